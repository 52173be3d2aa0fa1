//! Journey server.
//!
//! Estimates taxi, tuk-tuk, motorbike-taxi and rail fares from a shared
//! pricing configuration, and keeps an ordered itinerary of points of
//! interest.

pub mod config;
pub mod domain;
pub mod fares;
pub mod geo;
pub mod itinerary;
pub mod settings;
pub mod web;
