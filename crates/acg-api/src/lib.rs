//! AWS CLI generator API: library crate for the HTTP server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `acg-e2e-tests`) can access `AppState`, `build_router` and
//! `CliGenerator`.

pub mod config;
pub mod error;
pub mod generator;
pub mod routes;
pub mod state;
