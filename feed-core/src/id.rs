//! Structured document identifiers.
//!
//! Serialized grammar:
//! ```text
//! id:<namespace>:<document-type>:[n=<number>|g=<group>]:<user-specific>
//! ```
//!
//! The first three colons delimit namespace and type. The remainder is split
//! once more on its first colon, so the user-specific part may itself contain
//! colons (`id:ns:type::a:b:c` has user-specific `a:b:c`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// Why a serialized identifier was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdErrorReason {
    /// Does not start with the literal `id` segment.
    MissingPrefix,
    EmptyNamespace,
    EmptyDocumentType,
    /// No colon between the selector and the user-specific part.
    MissingSeparator,
    /// `n=` value is not a base-10 signed 64-bit integer.
    InvalidNumber,
    /// `g=` with nothing after it.
    EmptyGroup,
    /// Selector is neither empty, `n=...` nor `g=...`.
    UnknownSelector,
    EmptyUserSpecific,
}

impl fmt::Display for IdErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::MissingPrefix => "missing 'id' prefix",
            Self::EmptyNamespace => "empty namespace",
            Self::EmptyDocumentType => "empty document type",
            Self::MissingSeparator => "missing ':' before user-specific part",
            Self::InvalidNumber => "invalid number in 'n=' selector",
            Self::EmptyGroup => "empty group in 'g=' selector",
            Self::UnknownSelector => "unknown selector",
            Self::EmptyUserSpecific => "empty user-specific part",
        };
        f.write_str(reason)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "invalid document: expected id:<namespace>:<document-type>:[n=<number>|g=<group>]:<user-specific>, got {input:?} ({reason})"
)]
pub struct IdParseError {
    input: String,
    reason: IdErrorReason,
}

impl IdParseError {
    fn new(input: &str, reason: IdErrorReason) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The identifier string exactly as it was given to the parser.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn reason(&self) -> IdErrorReason {
        self.reason
    }
}

/// Location selector of a document: a numeric or a named group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Group {
    /// `n=<number>`
    Number(i64),
    /// `g=<name>`, never empty
    Name(String),
}

/// A parsed document identifier.
///
/// Equality and hashing cover namespace, type, group and user-specific part;
/// the retained serialized form does not take part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId {
    serialized: String,
    namespace: String,
    document_type: String,
    group: Option<Group>,
    user_specific: String,
}

impl DocumentId {
    /// Parse a serialized identifier.
    pub fn parse(serialized: &str) -> Result<Self, IdParseError> {
        let fail = |reason| IdParseError::new(serialized, reason);

        let mut segments = serialized.splitn(4, ':');
        if segments.next() != Some("id") {
            return Err(fail(IdErrorReason::MissingPrefix));
        }
        let namespace = segments.next().unwrap_or_default();
        if namespace.is_empty() {
            return Err(fail(IdErrorReason::EmptyNamespace));
        }
        let document_type = segments.next().unwrap_or_default();
        if document_type.is_empty() {
            return Err(fail(IdErrorReason::EmptyDocumentType));
        }
        let (selector, user_specific) = segments
            .next()
            .and_then(|rest| rest.split_once(':'))
            .ok_or_else(|| fail(IdErrorReason::MissingSeparator))?;

        let group = if let Some(number) = selector.strip_prefix("n=") {
            let number = number
                .parse::<i64>()
                .map_err(|_| fail(IdErrorReason::InvalidNumber))?;
            Some(Group::Number(number))
        } else if let Some(name) = selector.strip_prefix("g=") {
            if name.is_empty() {
                return Err(fail(IdErrorReason::EmptyGroup));
            }
            Some(Group::Name(name.to_string()))
        } else if selector.is_empty() {
            None
        } else {
            return Err(fail(IdErrorReason::UnknownSelector));
        };

        if user_specific.is_empty() {
            return Err(fail(IdErrorReason::EmptyUserSpecific));
        }

        Ok(Self {
            serialized: serialized.to_string(),
            namespace: namespace.to_string(),
            document_type: document_type.to_string(),
            group,
            user_specific: user_specific.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    pub fn group(&self) -> Option<&Group> {
        self.group.as_ref()
    }

    /// The `n=` selector value, if any.
    pub fn number(&self) -> Option<i64> {
        match self.group {
            Some(Group::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// The `g=` selector value, if any.
    pub fn group_name(&self) -> Option<&str> {
        match &self.group {
            Some(Group::Name(name)) => Some(name),
            _ => None,
        }
    }

    pub fn user_specific(&self) -> &str {
        &self.user_specific
    }

    /// The serialized form exactly as it was parsed.
    pub fn as_str(&self) -> &str {
        &self.serialized
    }
}

impl PartialEq for DocumentId {
    fn eq(&self, other: &Self) -> bool {
        self.document_type == other.document_type
            && self.namespace == other.namespace
            && self.group == other.group
            && self.user_specific == other.user_specific
    }
}

impl Eq for DocumentId {}

impl Hash for DocumentId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.document_type.hash(state);
        self.namespace.hash(state);
        self.group.hash(state);
        self.user_specific.hash(state);
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialized)
    }
}

impl FromStr for DocumentId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.serialized
    }
}
