//! Run orchestration for the BFD fuzz harness
//!
//! [`RunController`] drives the scenario catalog through a transport,
//! invokes the liveness oracle and reduces the run to a
//! [`Verdict`](bfdfuzz_core::Verdict). [`Reporter`] prints the console
//! report as the run progresses.

pub mod controller;
pub mod reporter;

pub use controller::{RunConfig, RunController, RunReport, DEFAULT_SETTLE};
pub use reporter::Reporter;
