//! Career-Pilot web client: the page controller that checks backend readiness, stages
//! and uploads a résumé, gates and sends the tailoring request, and renders the result.

pub mod backend;
pub mod config;
pub mod controller;
pub mod errors;
pub mod models;
pub mod session;
pub mod state;
pub mod ui;
