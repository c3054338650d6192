//! Core types and classification logic for the Roster workforce tracker.
//!
//! This crate is deliberately free of I/O, HTTP and database dependencies.
//! Every function here is a pure computation over already-fetched records;
//! the evaluation date is always supplied by the caller.

pub mod clock;
pub mod document;
pub mod error;
pub mod lifecycle;
pub mod metrics;
pub mod policy;
pub mod query;
pub mod source;
pub mod status;
pub mod subject;

pub use error::{Error, Result};
