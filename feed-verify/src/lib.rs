//! # feed-verify — Structural JSON comparison
//!
//! Checks that an actual JSON response contains everything an expected
//! document specifies, and pinpoints the first difference with a JSON
//! pointer. Objects in `actual` may carry extra fields; arrays must match in
//! length and element order.

pub mod compare;

pub use compare::{compare, Mismatch, MismatchKind};
