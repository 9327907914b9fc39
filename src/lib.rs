#![doc = "The `itemforge` library crate."]
#![doc = ""]
#![doc = "Domain models, password hashing and bearer-token authentication, SQLite"]
#![doc = "persistence, routing configuration, and error handling for the item catalog"]
#![doc = "service. The binary (`main.rs`) wires these into an actix-web server."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

pub use crate::error::AppError;
