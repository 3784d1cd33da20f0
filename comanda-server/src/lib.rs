//! comanda-server — restaurant order management service
//!
//! REST API over mesas (tables), comandas (customer tabs), produtos (menu)
//! and pedidos (order lines), backed by PostgreSQL or an in-memory store.
//!
//! # Module layout
//!
//! - [`api`] - HTTP routes and handlers
//! - [`domain`] - validators, lifecycle guards and totals
//! - [`db`] - persistence gateway (`Store`) and its backends
//! - [`config`] - environment configuration
//! - [`state`] - shared application state

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod state;

pub use api::build_app;
pub use config::Config;
pub use state::AppState;
