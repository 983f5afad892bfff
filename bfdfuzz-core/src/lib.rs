//! BFD fuzz harness core library
//!
//! This crate provides the shared types, error handling and run bookkeeping
//! used by the packet, scenario, transport and runner crates.

pub mod error;
pub mod result;
pub mod scenario;

// Re-export commonly used types
pub use error::{Error, Result};
pub use result::{RunResult, ScenarioOutcome, Verdict};
pub use scenario::{
    DiscriminatorAllocator, FuzzPacket, ScenarioContext, ScenarioDescriptor, ScenarioId,
    DEFAULT_SEED, PROBE_DISCRIMINATOR,
};
