use feed_core::IdParseError;
use std::io;
use thiserror::Error;

/// What went wrong while decoding a feed.
#[derive(Error, Debug)]
pub enum DecodeErrorKind {
    /// The first meaningful byte is neither `[` nor `{`.
    #[error("unexpected token: {0:?}")]
    UnexpectedToken(char),
    #[error("invalid array token: expected {expected}, found {found:?}")]
    InvalidArrayToken { expected: &'static str, found: char },
    /// Input ended inside an array.
    #[error("unexpected end of input, expected ']'")]
    UnexpectedEof,
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Id(#[from] IdParseError),
    /// None of `id`, `put`, `update` or `remove` is set.
    #[error("invalid document: missing operation")]
    MissingOperation,
    #[error("decoder already failed on an earlier record")]
    Poisoned,
}

/// A terminal decode failure, positioned at a byte offset of the input.
#[derive(Error, Debug)]
#[error("invalid json at byte offset {offset}: {kind}")]
pub struct DecodeError {
    offset: u64,
    #[source]
    kind: DecodeErrorKind,
}

impl DecodeError {
    pub(crate) fn new(offset: u64, kind: DecodeErrorKind) -> Self {
        Self { offset, kind }
    }

    /// Byte offset of the tokenizer when the failure was detected.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> DecodeErrorKind {
        self.kind
    }

    pub fn is_missing_operation(&self) -> bool {
        matches!(self.kind, DecodeErrorKind::MissingOperation)
    }

    /// The identifier error, when the record carried a malformed id.
    pub fn id_error(&self) -> Option<&IdParseError> {
        match &self.kind {
            DecodeErrorKind::Id(e) => Some(e),
            _ => None,
        }
    }
}
