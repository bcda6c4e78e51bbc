//! Feed operations.

use serde_json::value::RawValue;
use std::fmt;

use crate::id::DocumentId;

/// Kind of feed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Write the whole document, replacing any existing one
    Put,
    /// Modify fields of an existing document
    Update,
    Remove,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Put => "put",
            Self::Update => "update",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single document operation read from a feed.
///
/// `fields` is kept exactly as it appeared in the input and is never
/// interpreted here.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocumentId,
    pub operation: Operation,
    /// Test-and-set condition; empty means unconditional
    pub condition: String,
    /// Whether an update may create the document when absent
    pub create: bool,
    pub fields: Option<Box<RawValue>>,
}

impl Document {
    pub fn new(id: DocumentId, operation: Operation) -> Self {
        Self {
            id,
            operation,
            condition: String::new(),
            create: false,
            fields: None,
        }
    }

    pub fn put(id: DocumentId) -> Self {
        Self::new(id, Operation::Put)
    }

    pub fn update(id: DocumentId) -> Self {
        Self::new(id, Operation::Update)
    }

    pub fn remove(id: DocumentId) -> Self {
        Self::new(id, Operation::Remove)
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    pub fn with_create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    pub fn with_fields(mut self, fields: Box<RawValue>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Raw JSON text of the field payload.
    pub fn fields_json(&self) -> Option<&str> {
        self.fields.as_deref().map(RawValue::get)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.operation, self.id)?;
        if !self.condition.is_empty() {
            write!(f, ", condition={}", self.condition)?;
        }
        if self.create {
            f.write_str(", create=true")?;
        }
        Ok(())
    }
}
