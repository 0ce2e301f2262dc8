#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "A multi-user task tracker: the HTTP API (authentication and task CRUD),"]
#![doc = "its persistence layer, and a typed client that caches, filters and"]
#![doc = "renders a user's tasks. The server binary (`main.rs`) wires these together."]

pub mod app;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use app::{build_app, AppState};
pub use error::AppError;
