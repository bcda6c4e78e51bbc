//! Incremental decoder for JSON feeds.
//!
//! Two framings are accepted and told apart by the first non-whitespace
//! byte of the stream:
//! ```text
//! [ {record}, {record}, ... ]        array
//! {record} {record}\n{record} ...    line-delimited (any whitespace, or none)
//! ```
//!
//! Records are decoded one at a time straight from the read buffer, so a
//! feed of any size is processed in memory proportional to its largest
//! record plus the buffer.

use feed_core::Document;
use serde::Deserialize;
use std::fmt;
use std::io::Read;

use crate::error::{DecodeError, DecodeErrorKind};
use crate::reader::FeedReader;
use crate::record::RawRecord;

/// Framing of a feed stream, fixed by its first meaningful byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingMode {
    /// One JSON array of records
    Array,
    /// Records back-to-back, separated by optional whitespace
    LineDelimited,
}

impl fmt::Display for FramingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array => f.write_str("array"),
            Self::LineDelimited => f.write_str("line-delimited"),
        }
    }
}

/// Decoder configuration.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Read buffer size in bytes. Default: 64MB.
    pub buffer_capacity: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: 1 << 26, // 64MB
        }
    }
}

impl DecoderConfig {
    /// Config for testing (tiny buffer, frequent refills).
    pub fn for_testing() -> Self {
        Self {
            buffer_capacity: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    Finished,
    Failed,
}

/// Pull-based decoder of feed operations.
///
/// ```
/// use feed_core::Operation;
/// use feed_decode::Decoder;
///
/// let feed = br#"{"put": "id:a:b::c", "fields": {}}
/// {"remove": "id:a:b::d"}"#;
/// let mut decoder = Decoder::new(&feed[..]);
///
/// assert_eq!(decoder.decode_next().unwrap().unwrap().operation, Operation::Put);
/// assert_eq!(decoder.decode_next().unwrap().unwrap().operation, Operation::Remove);
/// assert!(decoder.decode_next().unwrap().is_none());
/// ```
pub struct Decoder<R> {
    reader: FeedReader<R>,
    mode: Option<FramingMode>,
    state: State,
    /// In array mode: whether at least one element has been read
    seen_element: bool,
    decoded: u64,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecoderConfig::default())
    }

    pub fn with_config(reader: R, config: DecoderConfig) -> Self {
        Self {
            reader: FeedReader::with_capacity(config.buffer_capacity, reader),
            mode: None,
            state: State::Active,
            seen_element: false,
            decoded: 0,
        }
    }

    /// Detected framing, once the first call has looked at the stream.
    pub fn mode(&self) -> Option<FramingMode> {
        self.mode
    }

    /// Bytes of input consumed so far.
    pub fn offset(&self) -> u64 {
        self.reader.offset()
    }

    /// Number of documents returned so far.
    pub fn decoded(&self) -> u64 {
        self.decoded
    }

    /// Decode the next document.
    ///
    /// Returns `Ok(None)` at end of stream, and keeps doing so on later
    /// calls. Any error is terminal: the decoder does not resynchronize and
    /// every later call fails with [`DecodeErrorKind::Poisoned`].
    pub fn decode_next(&mut self) -> Result<Option<Document>, DecodeError> {
        match self.state {
            State::Finished => return Ok(None),
            State::Failed => return Err(self.error(DecodeErrorKind::Poisoned)),
            State::Active => {}
        }

        match self.decode() {
            Ok(Some(doc)) => {
                self.decoded += 1;
                log::trace!("Decoded {doc}");
                Ok(Some(doc))
            }
            Ok(None) => {
                self.state = State::Finished;
                log::debug!(
                    "End of feed after {} documents ({} bytes)",
                    self.decoded,
                    self.offset()
                );
                Ok(None)
            }
            Err(kind) => {
                self.state = State::Failed;
                let err = self.error(kind);
                log::warn!("Feed decoding aborted after {} documents: {err}", self.decoded);
                Err(err)
            }
        }
    }

    fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(self.reader.offset(), kind)
    }

    fn decode(&mut self) -> Result<Option<Document>, DecodeErrorKind> {
        let mode = match self.mode {
            Some(mode) => mode,
            None => match self.detect_mode()? {
                Some(mode) => mode,
                None => return Ok(None),
            },
        };

        if !self.has_next(mode)? {
            return Ok(None);
        }

        let mut de = serde_json::Deserializer::from_reader(&mut self.reader);
        let record = RawRecord::deserialize(&mut de)?;
        self.seen_element = true;
        record.into_document().map(Some)
    }

    /// Fix the framing from the first non-whitespace byte.
    ///
    /// `None` means the stream holds nothing but whitespace.
    fn detect_mode(&mut self) -> Result<Option<FramingMode>, DecodeErrorKind> {
        let mode = match self.reader.skip_whitespace()? {
            None => return Ok(None),
            Some(b'[') => {
                self.reader.consume(1);
                FramingMode::Array
            }
            Some(b'{') => FramingMode::LineDelimited,
            Some(other) => return Err(DecodeErrorKind::UnexpectedToken(char::from(other))),
        };
        log::debug!("Detected {mode} feed at byte offset {}", self.reader.offset());
        self.mode = Some(mode);
        Ok(Some(mode))
    }

    /// Whether another record follows, consuming array punctuation on the way.
    ///
    /// In array mode the closing `]` is consumed when it is reached.
    fn has_next(&mut self, mode: FramingMode) -> Result<bool, DecodeErrorKind> {
        let next = self.reader.skip_whitespace()?;
        if mode == FramingMode::LineDelimited {
            return Ok(next.is_some());
        }

        match next {
            None => Err(DecodeErrorKind::UnexpectedEof),
            Some(b']') => {
                self.reader.consume(1);
                Ok(false)
            }
            Some(b',') if self.seen_element => {
                self.reader.consume(1);
                match self.reader.skip_whitespace()? {
                    None => Err(DecodeErrorKind::UnexpectedEof),
                    Some(found @ (b']' | b',')) => Err(DecodeErrorKind::InvalidArrayToken {
                        expected: "value",
                        found: char::from(found),
                    }),
                    Some(_) => Ok(true),
                }
            }
            Some(found) if self.seen_element => Err(DecodeErrorKind::InvalidArrayToken {
                expected: "',' or ']'",
                found: char::from(found),
            }),
            Some(b',') => Err(DecodeErrorKind::InvalidArrayToken {
                expected: "value or ']'",
                found: ',',
            }),
            Some(_) => Ok(true),
        }
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Document, DecodeError>;

    /// Yields documents until end of stream, or until the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.state == State::Failed {
            return None;
        }
        self.decode_next().transpose()
    }
}

impl<R: Read> std::iter::FusedIterator for Decoder<R> {}
