pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod types;

pub use error::GatewayError;
pub use router::{GatewayState, gateway_router};
