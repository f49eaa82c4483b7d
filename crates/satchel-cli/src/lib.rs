//! Satchel CLI library.
//!
//! Input loading and the command implementations behind the `satchel`
//! binary, exposed so they can be driven from tests.

pub mod commands;
pub mod input;
