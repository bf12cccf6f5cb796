//! Deterministic, pure logic shared by the commit workflow.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and return deterministic outputs suitable for tests.

pub mod answers;
pub mod composer;
pub mod questions;
