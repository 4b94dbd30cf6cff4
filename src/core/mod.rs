//! Core library components.
//!
//! This module contains the reusable logic for env-file bootstrap: the
//! placeholder policy, secret generation, the stack registry and the
//! install orchestration around them.

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod domain;
pub mod install;
pub mod registry;
pub mod resolve;
pub mod secret;
pub mod types;
pub mod validation;
