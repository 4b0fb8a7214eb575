//! Common types and utilities for uegen
//!
//! This crate provides shared identifier types, the operator configuration
//! and logging helpers used across all uegen crates.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{
    HomeNetworkProfile, IntegrityMaxRate, MaxDataRate, OpType, OperatorConfig, PduSessionType,
    SessionConfig, SupportedAlgs, UacAcc, UacAic,
};
pub use error::Error;
pub use logging::{init_logging, HexDump, LogLevel};
pub use types::*;
