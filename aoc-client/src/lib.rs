//! Everything the `aoc` command line needs outside of running solutions: which puzzle is current,
//! where its files live, and talking to the Advent of Code site.
//!
//! - [`puzzle`] resolves the puzzle meant by a command from the saved state, explicit options and
//!   today's date.
//! - [`store`] persists the current puzzle.
//! - [`token`] reads and writes the session token.
//! - [`remote`] downloads inputs and submits answers.
//! - [`layout`] names the files of a workspace.

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

pub mod calendar;
pub mod layout;
pub mod puzzle;
pub mod remote;
pub mod store;
pub mod token;

pub use puzzle::{Notice, Overrides, PuzzleState, Resolution, ResolveError, resolve};
pub use remote::{RemoteClient, RemoteError, RetryPolicy, SubmissionStatus};
pub use store::{FileStore, MemoryStore, PuzzleStore, StoreError};
