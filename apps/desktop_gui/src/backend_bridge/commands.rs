//! Backend commands queued from UI to backend worker.

use shared::{domain::StudentId, protocol::StudentPayload};

pub enum BackendCommand {
    LoadStudents,
    /// Create when `target` is `None`, update otherwise.
    SaveStudent {
        target: Option<StudentId>,
        payload: StudentPayload,
    },
    DeleteStudent {
        student_id: StudentId,
    },
}
