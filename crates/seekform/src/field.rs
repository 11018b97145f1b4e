//! The closed set of searchable fields.
//!
//! Clause rows treat fields as opaque strings. A [`FieldSet`] is what an
//! adapter checks user choices against before handing them to the form.

use serde::Serialize;

use crate::error::{FormError, Result};

/// Fields offered when no configuration says otherwise.
pub const DEFAULT_FIELDS: &[&str] = &["text", "subject", "from", "to", "msgid"];

/// An ordered, non-empty list of field names with a designated default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSet {
    fields: Vec<String>,
    default_field: String,
}

impl FieldSet {
    /// Builds a field set whose default is the first field.
    pub fn new<I, S>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let default_field = fields.first().cloned().ok_or(FormError::EmptyFieldSet)?;
        Ok(FieldSet {
            fields,
            default_field,
        })
    }

    /// Sets the field new forms start with. It must be a member.
    pub fn with_default(mut self, field: &str) -> Result<Self> {
        self.validate(field)?;
        self.default_field = field.to_string();
        Ok(self)
    }

    /// Field that initial rows are created with.
    pub fn default_field(&self) -> &str {
        &self.default_field
    }

    /// All fields in display order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Checks that `field` is a member.
    pub fn validate(&self, field: &str) -> Result<()> {
        if self.contains(field) {
            Ok(())
        } else {
            Err(FormError::UnknownField {
                field: field.to_string(),
                allowed: self.fields.join(", "),
            })
        }
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        FieldSet {
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            default_field: DEFAULT_FIELDS[0].to_string(),
        }
    }
}
