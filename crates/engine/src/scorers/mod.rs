//! The four recommendation scorers.
//!
//! Each scorer is a pure function over an immutable snapshot: no shared
//! state, no I/O, no ordering dependency on the others. The engine runs
//! them concurrently and a failure in one never aborts the rest.

pub mod behavioral;
pub mod collaborative;
pub mod content;
pub mod market;

pub use behavioral::{observed_preferences, ObservedPreferences};
