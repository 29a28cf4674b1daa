//! TreeShop pricing and job-costing engine.
//!
//! This crate turns equipment and crew costs into hourly rates, scores the
//! physical work of a tree-service job, estimates its hours, prices it at a
//! target margin, locks the result into a proposal line item and later
//! reconciles that line item against logged field time.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
