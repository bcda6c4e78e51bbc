//! # feed-core — Document model for the feed protocol
//!
//! Shared by every stage of the feed pipeline:
//!
//! - [`id`] — structured document identifiers and their parser
//! - [`document`] — put/update/remove operations carrying a raw field payload
//!
//! ```
//! use feed_core::{Document, DocumentId, Operation};
//!
//! let id: DocumentId = "id:music:album:g=pink-floyd:dark-side".parse().unwrap();
//! assert_eq!(id.group_name(), Some("pink-floyd"));
//!
//! let doc = Document::put(id);
//! assert_eq!(doc.operation, Operation::Put);
//! ```

pub mod document;
pub mod id;

pub use document::{Document, Operation};
pub use id::{DocumentId, Group, IdErrorReason, IdParseError};
