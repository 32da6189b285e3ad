//! Create/edit form buffer and the editing state machine.
//!
//! A single form slot backs both the record creator and the record
//! editor, so at most one record can be in Editing/Saving state at a
//! time. Lifecycle per record:
//!
//! `Viewing -> Editing -> (Saving -> Viewing on success)
//!                      | (Editing on failure, buffer retained)
//!                      | (Viewing on cancel, buffer discarded)`
//!
//! "Viewing" is the absence of a form (`AppState.form == None`).

use crate::model::{Draft, Record, RecordPatch};

/// What the form commits to on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// Record creator: insert with a blank starting draft.
    Create,
    /// Record editor: full-field update keyed by the record id.
    Edit { id: String },
}

/// Field focus order inside the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Brewery,
    Category,
    Abv,
    Ibu,
    Notes,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::Name,
            FormField::Brewery,
            FormField::Category,
            FormField::Abv,
            FormField::Ibu,
            FormField::Notes,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Brewery => "Brewery",
            FormField::Category => "Style",
            FormField::Abv => "ABV %",
            FormField::Ibu => "IBU",
            FormField::Notes => "Notes",
        }
    }

    pub fn next(&self) -> FormField {
        match self {
            FormField::Name => FormField::Brewery,
            FormField::Brewery => FormField::Category,
            FormField::Category => FormField::Abv,
            FormField::Abv => FormField::Ibu,
            FormField::Ibu => FormField::Notes,
            FormField::Notes => FormField::Name,
        }
    }

    pub fn prev(&self) -> FormField {
        match self {
            FormField::Name => FormField::Notes,
            FormField::Brewery => FormField::Name,
            FormField::Category => FormField::Brewery,
            FormField::Abv => FormField::Category,
            FormField::Ibu => FormField::Abv,
            FormField::Notes => FormField::Ibu,
        }
    }
}

/// The open form: mode, edit buffer, focus, and request status.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub mode: FormMode,
    pub buffer: Draft,
    pub field: FormField,
    /// Validation or store failure shown inline; cleared on next submit.
    pub error: Option<String>,
    /// True while the insert/update round trip is in flight (Saving).
    pub busy: bool,
}

impl Form {
    /// Opens the record creator with a blank draft.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            buffer: Draft::default(),
            field: FormField::Name,
            error: None,
            busy: false,
        }
    }

    /// Opens the record editor seeded with a full copy of the record.
    pub fn edit(record: &Record) -> Self {
        Self {
            mode: FormMode::Edit {
                id: record.id.clone(),
            },
            buffer: Draft::from_record(record),
            field: FormField::Name,
            error: None,
            busy: false,
        }
    }

    /// Mutable access to the text of the focused field.
    pub fn focused_text(&mut self) -> &mut String {
        match self.field {
            FormField::Name => &mut self.buffer.name,
            FormField::Brewery => &mut self.buffer.brewery,
            FormField::Category => &mut self.buffer.category,
            FormField::Abv => &mut self.buffer.abv,
            FormField::Ibu => &mut self.buffer.ibu,
            FormField::Notes => &mut self.buffer.notes,
        }
    }

    /// Read-only text of an arbitrary field (rendering).
    pub fn text_of(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.buffer.name,
            FormField::Brewery => &self.buffer.brewery,
            FormField::Category => &self.buffer.category,
            FormField::Abv => &self.buffer.abv,
            FormField::Ibu => &self.buffer.ibu,
            FormField::Notes => &self.buffer.notes,
        }
    }

    /// Validates the buffer. On success enters Saving and returns the
    /// patch to send; on validation failure records the message and
    /// returns `None` — no store call is made.
    pub fn submit(&mut self) -> Option<RecordPatch> {
        if self.busy {
            return None;
        }
        match self.buffer.to_patch() {
            Ok(patch) => {
                self.error = None;
                self.busy = true;
                Some(patch)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Store failure: back to Editing with the buffer retained for retry.
    pub fn submit_failed(&mut self, message: String) {
        self.busy = false;
        self.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            id: "r7".to_string(),
            owner: "alice".to_string(),
            name: "Gose Tide".to_string(),
            brewery: Some("Saltworks".to_string()),
            category: Some("Gose".to_string()),
            abv: Some(4.2),
            ibu: Some(8),
            notes: None,
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_create_starts_blank() {
        let form = Form::create();
        assert_eq!(form.buffer, Draft::default());
        assert_eq!(form.field, FormField::Name);
        assert!(!form.busy);
    }

    #[test]
    fn test_edit_seeds_full_copy() {
        let form = Form::edit(&record());
        assert_eq!(form.mode, FormMode::Edit { id: "r7".to_string() });
        assert_eq!(form.buffer.name, "Gose Tide");
        assert_eq!(form.buffer.abv, "4.2");
    }

    #[test]
    fn test_submit_with_empty_name_is_rejected_locally() {
        let mut form = Form::create();
        assert!(form.submit().is_none());
        assert!(form.error.is_some());
        // Still Editing, not Saving.
        assert!(!form.busy);
    }

    #[test]
    fn test_submit_enters_saving_and_failure_returns_to_editing() {
        let mut form = Form::edit(&record());
        let patch = form.submit().expect("valid buffer");
        assert_eq!(patch.name, "Gose Tide");
        assert!(form.busy);

        // While Saving, further submits are ignored.
        assert!(form.submit().is_none());

        form.submit_failed("store: boom".to_string());
        assert!(!form.busy);
        assert_eq!(form.error.as_deref(), Some("store: boom"));
        // Buffer retained for retry.
        assert_eq!(form.buffer.name, "Gose Tide");
    }

    #[test]
    fn test_field_order_cycles() {
        let mut field = FormField::Name;
        for _ in 0..FormField::all().len() {
            field = field.next();
        }
        assert_eq!(field, FormField::Name);
        assert_eq!(FormField::Name.prev(), FormField::Notes);
    }
}
