//! Record data model and submit-time validation.

use serde::{Deserialize, Serialize};

/// One beer in the cellar.
///
/// `id`, `owner` and `created_at` are assigned by the store at creation and
/// never mutated by this client. All reads and writes are scoped to the
/// caller's own `owner` value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub brewery: Option<String>,
    /// Beer style (IPA, Stout, ...). Free-form; the client suggests values
    /// from the current set but accepts any.
    pub category: Option<String>,
    /// Alcohol by volume, percent. `None` means "not recorded" — distinct
    /// from 0.0 and excluded from averages.
    pub abv: Option<f64>,
    /// Bitterness score. Same absence rules as `abv`.
    pub ibu: Option<i64>,
    pub notes: Option<String>,
    /// Epoch seconds, store-assigned.
    pub created_at: i64,
}

/// The editable fields of a record, sent on insert and (all together, even
/// unchanged ones) on update. `owner` is deliberately absent: the store
/// defaults it from the ambient session identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPatch {
    pub name: String,
    pub brewery: Option<String>,
    pub category: Option<String>,
    pub abv: Option<f64>,
    pub ibu: Option<i64>,
    pub notes: Option<String>,
}

/// Validation failure caught before any store call is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

/// Transient edit buffer backing the create and edit forms.
///
/// All fields are held as text while being edited; numeric fields are
/// parsed on submit. Empty text means "no value" (`None`), never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub brewery: String,
    pub category: String,
    pub abv: String,
    pub ibu: String,
    pub notes: String,
}

impl Draft {
    /// Seeds an edit buffer as a full copy of the record.
    pub fn from_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            brewery: record.brewery.clone().unwrap_or_default(),
            category: record.category.clone().unwrap_or_default(),
            abv: record.abv.map(|v| trim_float(v)).unwrap_or_default(),
            ibu: record.ibu.map(|v| v.to_string()).unwrap_or_default(),
            notes: record.notes.clone().unwrap_or_default(),
        }
    }

    /// Validates the buffer and converts it into the patch sent to the
    /// store. Returns an error (and sends nothing) when `name` is empty,
    /// when a numeric field does not parse, or when a numeric value is
    /// outside its UI range (ABV 0–100, IBU 0–200).
    pub fn to_patch(&self) -> Result<RecordPatch, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError("Name is required".to_string()));
        }

        let abv = match self.abv.trim() {
            "" => None,
            text => match text.parse::<f64>() {
                Ok(v) if (0.0..=100.0).contains(&v) => Some(v),
                Ok(_) => {
                    return Err(ValidationError("ABV must be between 0 and 100".to_string()));
                }
                Err(_) => return Err(ValidationError("ABV must be a number".to_string())),
            },
        };

        let ibu = match self.ibu.trim() {
            "" => None,
            text => match text.parse::<i64>() {
                Ok(v) if (0..=200).contains(&v) => Some(v),
                Ok(_) => {
                    return Err(ValidationError("IBU must be between 0 and 200".to_string()));
                }
                Err(_) => return Err(ValidationError("IBU must be a whole number".to_string())),
            },
        };

        Ok(RecordPatch {
            name: name.to_string(),
            brewery: non_empty(&self.brewery),
            category: non_empty(&self.category),
            abv,
            ibu,
            notes: non_empty(&self.notes),
        })
    }
}

/// Empty or whitespace-only text becomes `None`, matching the store's
/// representation of absent optional fields.
fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Formats a float without a trailing `.0` so the edit buffer shows what
/// the user originally typed for whole-number ABVs.
fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            id: "r1".to_string(),
            owner: "alice".to_string(),
            name: "Pale Ale".to_string(),
            brewery: Some("Crooked Mast".to_string()),
            category: Some("IPA".to_string()),
            abv: Some(6.0),
            ibu: Some(45),
            notes: None,
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let draft = Draft::default();
        assert!(draft.to_patch().is_err());

        let draft = Draft {
            name: "   ".to_string(),
            ..Draft::default()
        };
        assert!(draft.to_patch().is_err());
    }

    #[test]
    fn test_empty_numeric_fields_become_none_not_zero() {
        let draft = Draft {
            name: "Stout Night".to_string(),
            ..Draft::default()
        };
        let patch = draft.to_patch().unwrap();
        assert_eq!(patch.abv, None);
        assert_eq!(patch.ibu, None);
        assert_eq!(patch.brewery, None);
        assert_eq!(patch.notes, None);
    }

    #[test]
    fn test_numeric_parsing_and_ranges() {
        let mut draft = Draft {
            name: "x".to_string(),
            abv: "6.2".to_string(),
            ibu: "45".to_string(),
            ..Draft::default()
        };
        let patch = draft.to_patch().unwrap();
        assert_eq!(patch.abv, Some(6.2));
        assert_eq!(patch.ibu, Some(45));

        draft.abv = "abc".to_string();
        assert!(draft.to_patch().is_err());

        draft.abv = "120".to_string();
        assert!(draft.to_patch().is_err());

        draft.abv = String::new();
        draft.ibu = "250".to_string();
        assert!(draft.to_patch().is_err());

        draft.ibu = "4.5".to_string();
        assert!(draft.to_patch().is_err());
    }

    #[test]
    fn test_whitespace_only_optionals_become_none() {
        let draft = Draft {
            name: "x".to_string(),
            category: "  ".to_string(),
            notes: "\t".to_string(),
            ..Draft::default()
        };
        let patch = draft.to_patch().unwrap();
        assert_eq!(patch.category, None);
        assert_eq!(patch.notes, None);
    }

    #[test]
    fn test_from_record_seeds_full_copy() {
        let draft = Draft::from_record(&record());
        assert_eq!(draft.name, "Pale Ale");
        assert_eq!(draft.brewery, "Crooked Mast");
        assert_eq!(draft.category, "IPA");
        assert_eq!(draft.abv, "6");
        assert_eq!(draft.ibu, "45");
        assert_eq!(draft.notes, "");
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let rec = record();
        let patch = Draft::from_record(&rec).to_patch().unwrap();
        assert_eq!(patch.name, rec.name);
        assert_eq!(patch.brewery, rec.brewery);
        assert_eq!(patch.category, rec.category);
        assert_eq!(patch.abv, rec.abv);
        assert_eq!(patch.ibu, rec.ibu);
        assert_eq!(patch.notes, rec.notes);
    }
}
