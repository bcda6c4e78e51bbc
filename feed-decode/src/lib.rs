//! # feed-decode — Streaming decoder for JSON document feeds
//!
//! Turns a byte stream into a sequence of [`feed_core::Document`]s without
//! ever holding more than one record in memory.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  peek / consume   ┌──────────────┐
//! │   Decoder    │ ────────────────► │  FeedReader  │
//! │ (framing,    │                   │ (BufReader + │
//! │  punctuation)│                   │  byte offset)│
//! └──────┬───────┘                   └──────▲───────┘
//!        │ one record                       │ Read
//!        ▼                                  │
//! ┌──────────────┐                   ┌──────┴───────┐
//! │  RawRecord   │ ◄──────────────── │  serde_json  │
//! │ → Document   │                   │  tokenizer   │
//! └──────────────┘                   └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`decoder`] — framing detection and the pull API
//! - [`error`] — offset-carrying decode errors
//! - `reader` — buffered reader with peeking (internal)
//! - `record` — raw record schema and operation resolution (internal)

pub mod decoder;
pub mod error;
mod reader;
mod record;

pub use decoder::{Decoder, DecoderConfig, FramingMode};
pub use error::{DecodeError, DecodeErrorKind};
