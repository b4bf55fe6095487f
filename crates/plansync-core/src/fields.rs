//! Choosing which project fields carry start and end dates.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::{DateFields, FieldHandle};

/// Explicit field roles, matched by name (case-insensitive) or node id.
/// Unset roles fall back to the name heuristic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRoles {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl FieldRoles {
    pub fn is_configured(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

fn find_configured<'a>(fields: &'a [FieldHandle], wanted: &str, role: &str) -> Result<&'a FieldHandle, CoreError> {
    fields
        .iter()
        .filter(|f| f.is_date())
        .find(|f| f.id == wanted || f.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| {
            CoreError::InvalidInput(format!(
                "Configured {} field '{}' is not a DATE field of this project",
                role, wanted
            ))
        })
}

/// Name heuristic: a DATE field containing "start" is the start field, one
/// containing "end" the end field, and the first other DATE field seen
/// while no start field is known serves as both.
pub fn heuristic_date_fields(fields: &[FieldHandle]) -> DateFields {
    let mut start: Option<&FieldHandle> = None;
    let mut end: Option<&FieldHandle> = None;
    // First name match wins; the single-field fallback can still be replaced.
    let (mut start_named, mut end_named) = (false, false);

    for field in fields.iter().filter(|f| f.is_date()) {
        let name = field.name.to_lowercase();
        if name.contains("start") {
            if !start_named {
                start = Some(field);
                start_named = true;
            }
        } else if name.contains("end") {
            if !end_named {
                end = Some(field);
                end_named = true;
            }
        } else if start.is_none() {
            start = Some(field);
            end = Some(field);
        }
    }

    DateFields {
        start: start.cloned(),
        end: end.cloned(),
        all: fields.to_vec(),
    }
}

/// Picks the start/end date fields.
///
/// Fails with [`CoreError::NoDateFields`] when no start field can be
/// chosen, so the caller can list everything that was discovered. When only
/// a start field exists it is also used for the end date.
pub fn select_date_fields(fields: &[FieldHandle], roles: &FieldRoles) -> Result<DateFields, CoreError> {
    let mut selected = heuristic_date_fields(fields);

    if let Some(wanted) = &roles.start {
        selected.start = Some(find_configured(fields, wanted, "start")?.clone());
    }
    if let Some(wanted) = &roles.end {
        selected.end = Some(find_configured(fields, wanted, "end")?.clone());
    }

    if selected.start.is_none() {
        return Err(CoreError::NoDateFields(fields.to_vec()));
    }
    if selected.end.is_none() {
        selected.end = selected.start.clone();
    }
    Ok(selected)
}
