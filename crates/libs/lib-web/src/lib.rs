//! # Web Library
//!
//! HTTP handlers, middleware, the form service, and server startup.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

pub use server::{create_router, init_tracing, start_server, AppState};
pub use services::FormService;
