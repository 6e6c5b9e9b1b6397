//! Domain-level request outcomes, prior to HTTP translation.
//!
//! An [`Outcome`] is produced by application logic and consumed exactly once
//! by the envelope builder; the classifier reads it by reference. Outcomes
//! are immutable once constructed.

use crate::error::FacadeError;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{json, Value};
use validator::{ValidationErrors, ValidationErrorsKind};

/// Ordered mapping from field name to an ordered sequence of messages.
///
/// Field order is insertion order and is never re-sorted; message order per
/// field is push order. Serializes as a JSON object, preserving both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(String, Vec<String>)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to `field`, creating the field entry on first use.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.0.iter_mut().find(|(name, _)| *name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.0.push((field, vec![message])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Fields and their messages, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, messages) in &self.0 {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

/// Flattens nested `validator` errors into dotted/indexed field paths
/// (`urls[0].url`). `validator` stores fields in a `HashMap`, so the result
/// is sorted by path for determinism before it enters the ordered mapping.
impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut entries = Vec::new();
        flatten_validation_errors(&errors, "", &mut entries);
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self(entries)
    }
}

fn flatten_validation_errors(
    errors: &ValidationErrors,
    prefix: &str,
    out: &mut Vec<(String, Vec<String>)>,
) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let messages = field_errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                out.push((path, messages));
            }
            ValidationErrorsKind::Struct(nested) => {
                flatten_validation_errors(nested, &path, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten_validation_errors(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

/// Domain-level result of a request handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Created(Value),
    NoContent,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    ValidationFailure(FieldErrors),
}

impl Outcome {
    /// Checked 204 constructor.
    ///
    /// A 204 response carries no body, so handing it a payload is a caller
    /// programming error reported at construction. `None`, `null`, `{}`, and
    /// `[]` count as empty.
    ///
    /// # Errors
    ///
    /// Returns [`FacadeError::Configuration`] for a non-empty payload.
    pub fn no_content(payload: Option<Value>) -> Result<Self, FacadeError> {
        match payload {
            None => Ok(Self::NoContent),
            Some(value) if value_is_empty(&value) => Ok(Self::NoContent),
            Some(value) => Err(FacadeError::configuration(
                "NoContent outcome cannot carry a payload",
                json!({ "payload": value }),
            )),
        }
    }
}

impl From<ValidationErrors> for Outcome {
    fn from(errors: ValidationErrors) -> Self {
        Self::ValidationFailure(errors.into())
    }
}

fn value_is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
