//! Infrastructure layer module
//!
//! This module contains the mechanisms the credential scope is built on:
//! - Request context propagation
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod context;
pub mod logging;
