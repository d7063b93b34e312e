//! Workforce analytics engine
//!
//! Scores industries and companies for talent supply, talent demand and
//! workforce risk, predicts hiring surges for the planning year, and matches
//! resumes against job skill profiles.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod service;

pub use config::Config;
pub use error::{Result, WorkforceError};
pub use service::{Response, WorkforceService};
