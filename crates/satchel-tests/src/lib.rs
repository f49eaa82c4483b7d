//! Satchel End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the full generation flow:
//!
//! - Generation: descriptor + scene -> parameter set, menu, controller
//! - Persistence: bundles written under an asset root and read back
//! - **Determinism**: identical inputs produce byte-identical bundles
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p satchel-tests
//! ```

pub mod determinism;
pub mod fixtures;
pub mod harness;

pub use determinism::{compute_hash, verify_determinism, DeterminismResult};
pub use fixtures::{avatar_scene, descriptor, filler_parameters, AvatarRig, FIXTURE_ID};
pub use harness::Workspace;
