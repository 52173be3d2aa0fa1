//! Web layer for the journey server.
//!
//! JSON endpoints for fare estimates, rail reference data, the POI catalog
//! and the itinerary.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
