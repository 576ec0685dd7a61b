pub mod backend_api;
pub mod backend_client;
pub mod payments_api;

pub use backend_client::{BackendClient, BackendScope};
pub use payments_api::PaymentsClient;
