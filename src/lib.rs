//! Credential, task and configuration stores for the FixFlow technician task
//! manager, plus the statistics computed from them.
//!
//! All state lives in three JSON documents under one data directory:
//! accounts (`users.json`), tasks (`tasks.json`) and the dropdown lists
//! (`config.json`). Open them together with [`services::Stores::open`].

pub mod config;
pub mod dashboard;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use crate::config::Config;
pub use errors::{StoreError, StoreResult, ValidationError};
pub use services::Stores;
