//! nlghi-cli library root.
//!
//! The binary is a thin shell over these modules; integration tests drive
//! the service and command layers directly against an in-memory store.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod service;
