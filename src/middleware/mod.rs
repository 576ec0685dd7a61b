//! Request extractors shared by the route handlers.

pub mod auth;
pub mod json_body;

pub use auth::BearerToken;
pub use json_body::JsonBody;
