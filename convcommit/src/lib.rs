//! Conventional-commit authoring assistant.
//!
//! This crate walks a user through building a structured commit message, hands
//! the commit to `git`, and keeps a backup of the message when the commit fails
//! so a later `cz commit --retry` can reuse it. The architecture keeps a strict
//! separation:
//!
//! - **[`core`]**: Pure, deterministic logic (answer sets, question schema,
//!   message composition). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting collaborators (git, terminal prompts, backup
//!   file, console reporting, config). Each sits behind a trait so tests can
//!   swap in fakes.
//! - **[`conventions`]**: Pluggable message conventions selected by name.
//!
//! The [`commit`] module coordinates core logic with I/O to implement
//! `cz commit`.

pub mod commit;
pub mod conventions;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
