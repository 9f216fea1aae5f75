//! # mame core
//!
//! Core functionality for the mame unit-test harness, including:
//! - the test registry and duplicate-name detection
//! - the execution engine with substring filtering, counters and timing
//! - the comparison engine and the `check_*`/`require_*` assertion macros
//! - diagnostic rendering of arbitrary values
//! - test reporting infrastructure
//!
//! ## Architecture (block diagram)
//!
//! ```text
//! +---------------------+      +---------------------+      +---------------------+
//! | test declarations   | ---> | registry (ordered,  | ---> | runner (self test,  |
//! | #[mame::test]       |      | duplicate-checked)  |      | filter, timing)     |
//! +---------------------+      +---------------------+      +---------------------+
//!            |                                                   |          |
//!            v                                                   v          v
//! +---------------------+      +---------------------+      +---------------------+
//! | assertion macros    | ---> | comparison engine   | ---> | reporter (console,  |
//! | check_*, require_*  |      | + value renderer    |      | null, custom)       |
//! +---------------------+      +---------------------+      +---------------------+
//! ```
//!
//! Most users should use the main `mame` crate rather than importing
//! `mame-core` directly.

pub mod compare;
mod macros;
pub mod message;
pub mod registry;
pub mod render;
pub mod reporter;
pub mod runner;
mod self_test;

pub use message::Diagnostic;
pub use registry::{DuplicateName, Registry, TestCase, TestFn};
pub use reporter::{ConsoleReporter, NullReporter, Reporter};
pub use runner::{Aborted, FilterError, FilterSpec, Harness, RunCounters, TestContext, TestResult};
