//! Shared library for the Notion period Lambda functions.
//!
//! This crate provides the configuration, error types, workspace client,
//! period resolution, and row-creation logic used by every Lambda binary.

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod models;
pub mod notion;
pub mod periods;
pub mod rows;
pub mod secrets;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use dispatch::Operation;
pub use error::{Error, Result};
pub use models::{CreateRequest, DateRange, PeriodRow, RowHandle};
pub use notion::{NotionClient, PropertyValue, WorkspaceClient};
