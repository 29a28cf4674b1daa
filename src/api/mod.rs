//! HTTP API module for the pricing engine.
//!
//! This module exposes the engine's calculators as JSON endpoints for the
//! estimating and job-costing front ends.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    EstimateRequest, LineItemRequest, PriceRequest, ReconcileRequest, ReconcileResponse,
    ScoreRequest, ScoreResponse, VarianceOutcomes,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
