//! The `taskpad` library crate.
//!
//! Contains the domain models, authentication mechanisms, routing
//! configuration, and error handling for the taskpad API. The `main` binary
//! uses this crate to construct and run the application.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
