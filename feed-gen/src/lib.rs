//! # feed-gen — Synthetic feeds for load testing
//!
//! [`Generator`] is an [`std::io::Read`] source producing line-delimited put
//! operations until a deadline passes. It writes the same wire format the
//! feed decoder consumes, so it can stand in for a feed file anywhere a
//! reader is accepted.

pub mod generator;

pub use generator::{Generator, GeneratorConfig};
