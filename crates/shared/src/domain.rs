use serde::{Deserialize, Serialize};

/// Opaque server-assigned student identity. A record has no id until the
/// service has persisted it once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub i64);
