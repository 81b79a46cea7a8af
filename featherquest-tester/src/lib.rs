//! Automated QA harness for the Featherquest game core.
//!
//! Drives complete games through the public `reduce` API with a
//! random-but-legal bot, asserting state invariants on every transition and
//! aggregating playability numbers across seeds.

pub mod bot;
pub mod report;

pub use bot::{SimConfig, SimOutcome, run_game};
pub use report::{SeedReport, build_report, render_console, render_json};
