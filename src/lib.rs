//! Performance and Bonus Engine
//!
//! This crate converts daily work inputs (hours, quality factors, failures and
//! leave) into approved performance points, and aggregates a month of those
//! points into a capped bonus and total compensation figure.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod telemetry;
