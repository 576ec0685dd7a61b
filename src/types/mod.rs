//! Transport shapes exchanged with callers, the backend and the payments provider.

pub mod backend;
pub mod license;
pub mod payments;
pub mod users;

pub use backend::BackendError;

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
