//! HTTP API for the payroll engine.
//!
//! A thin JSON facade over the workflow services. Every request names its
//! actor explicitly via the `x-actor-id` header, which is resolved to a
//! role through the employee directory before any operation runs.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
