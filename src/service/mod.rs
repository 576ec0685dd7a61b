pub mod admin_bootstrap;
pub mod user_deletion;
