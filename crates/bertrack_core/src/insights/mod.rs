//! Derived read-side projections.
//!
//! # Responsibility
//! - Expose the dashboard statistics, reminder summaries, and report
//!   filtering the presentation layer renders.
//! - Keep every projection a pure pass over read-only slices.

pub mod dashboard;
pub mod filter;
