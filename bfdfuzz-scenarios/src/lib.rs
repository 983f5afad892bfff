//! BFD fuzz scenarios
//!
//! Each scenario targets one validation rule from RFC 5880 Section 6.8.6
//! (or GTSM from RFC 5881 Section 5) and produces a fixed list of labeled
//! packets. A conforming receiver discards every one of them without
//! crashing.
//!
//! ## Groups
//!
//! - [`header`]: version, detect mult, multipoint, discriminators, flags
//! - [`length`]: declared length against actual datagram size
//! - [`auth`]: authentication flag and section checks
//! - [`fields`]: boundary values RFC 5880 leaves unchecked
//! - [`ttl`]: valid packets sent with a non-255 TTL
//! - [`stress`]: seeded random payloads and a 1000-packet burst
//!
//! The [`catalog`] module lists them all in execution order.

pub mod auth;
pub mod catalog;
pub mod fields;
pub mod header;
pub mod length;
pub mod stress;
pub mod ttl;

pub use catalog::{all, find, names, select, CATALOG};
