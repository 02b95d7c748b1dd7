//! Reducer-style state for the student editor modal.
//!
//! The editor owns a draft copy of one record's fields plus a per-field
//! error map. Errors never appear while the user is still typing into a
//! clean field; they are introduced on blur or submit and cleared the
//! moment the field validates again.

use std::collections::BTreeMap;

use shared::{
    domain::StudentId,
    protocol::{Student, StudentPayload},
};

use crate::controller::validation::{validate_email, validate_name, validate_phone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit(StudentId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Address,
    City,
    State,
    Email,
    Phone,
}

impl Field {
    /// Form order, top to bottom.
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Address,
        Field::City,
        Field::State,
        Field::Email,
        Field::Phone,
    ];

    const VALIDATED: [Field; 3] = [Field::Name, Field::Email, Field::Phone];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Address => "Address",
            Field::City => "City",
            Field::State => "State",
            Field::Email => "Email",
            Field::Phone => "Phone",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Field::Name => "Enter student's full name",
            Field::Address => "Enter street address",
            Field::City => "Enter city",
            Field::State => "Enter state",
            Field::Email => "Enter email address",
            Field::Phone => "Enter phone number",
        }
    }

    pub fn required(self) -> bool {
        matches!(self, Field::Name | Field::Email)
    }

    fn validator(self) -> Option<fn(&str) -> Result<(), &'static str>> {
        match self {
            Field::Name => Some(validate_name),
            Field::Email => Some(validate_email),
            Field::Phone => Some(validate_phone),
            Field::Address | Field::City | Field::State => None,
        }
    }
}

/// Working copy of one record's field values while the editor is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub email: String,
    pub phone: String,
}

impl StudentDraft {
    fn from_record(record: &Student) -> Self {
        Self {
            name: record.name.clone(),
            address: record.address.clone().unwrap_or_default(),
            city: record.city.clone().unwrap_or_default(),
            state: record.state.clone().unwrap_or_default(),
            email: record.email.clone(),
            phone: record.phone.clone().unwrap_or_default(),
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Address => &mut self.address,
            Field::City => &mut self.city,
            Field::State => &mut self.state,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
        }
    }

    fn payload(&self) -> StudentPayload {
        fn non_empty(value: &str) -> Option<String> {
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        }

        StudentPayload {
            name: self.name.clone(),
            address: non_empty(&self.address),
            city: non_empty(&self.city),
            state: non_empty(&self.state),
            email: self.email.clone(),
            phone: non_empty(&self.phone),
        }
    }
}

/// One open editor session. The shell holds `Option<StudentEditor>`;
/// `None` is the closed state, and dropping the value discards the draft.
pub struct StudentEditor {
    mode: EditorMode,
    draft: StudentDraft,
    errors: BTreeMap<Field, &'static str>,
    submitting: bool,
    autofocus_pending: bool,
}

impl StudentEditor {
    pub fn add() -> Self {
        Self {
            mode: EditorMode::Add,
            draft: StudentDraft::default(),
            errors: BTreeMap::new(),
            submitting: false,
            autofocus_pending: true,
        }
    }

    pub fn edit(record: &Student) -> Self {
        Self {
            mode: EditorMode::Edit(record.id),
            draft: StudentDraft::from_record(record),
            errors: BTreeMap::new(),
            submitting: false,
            autofocus_pending: true,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn target(&self) -> Option<StudentId> {
        match self.mode {
            EditorMode::Add => None,
            EditorMode::Edit(student_id) => Some(student_id),
        }
    }

    pub fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Cancel and Escape are inert while a save is in flight.
    pub fn can_close(&self) -> bool {
        !self.submitting
    }

    /// One-shot autofocus for the first field after the editor opens.
    pub fn take_autofocus(&mut self) -> bool {
        std::mem::take(&mut self.autofocus_pending)
    }

    pub fn field_changed(&mut self, field: Field, value: String) {
        *self.draft.field_mut(field) = value;
        // Only fields already showing an error re-validate mid-typing.
        if self.errors.contains_key(&field) {
            self.revalidate(field);
        }
    }

    pub fn field_blurred(&mut self, field: Field) {
        self.revalidate(field);
    }

    /// Validates the full draft, replacing the entire error map. Returns
    /// the payload to hand to the service when everything passes; `None`
    /// leaves the editor open with the errors surfaced.
    pub fn submit(&mut self) -> Option<StudentPayload> {
        if self.submitting {
            return None;
        }
        self.errors.clear();
        for field in Field::VALIDATED {
            self.revalidate(field);
        }
        if !self.errors.is_empty() {
            return None;
        }
        self.submitting = true;
        Some(self.draft.payload())
    }

    /// A failed save keeps the editor open with the draft intact; the
    /// failure itself is reported through the shell's banner, not here.
    pub fn save_failed(&mut self) {
        self.submitting = false;
    }

    fn revalidate(&mut self, field: Field) {
        let Some(validator) = field.validator() else {
            return;
        };
        match validator(self.draft.field(field)) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(message) => {
                self.errors.insert(field, message);
            }
        }
    }
}
