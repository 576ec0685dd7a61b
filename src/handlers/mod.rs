//! Route handlers. Each one validates its input, mints a backend or payments
//! client, makes one or two remote calls and maps the outcome to a response.

pub mod health;
pub mod licenses;
pub mod payments;
pub mod placeholder;
pub mod session;
pub mod users;
pub mod vehicles;
