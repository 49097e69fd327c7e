//! Repository implementations module.
//!
//! Backends implementing the `SpotRepository` trait:
//! - `local`: in-memory implementation for unit testing and single-instance
//!   deployments

pub mod local;

pub use local::LocalRepository;
