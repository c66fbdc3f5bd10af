pub mod dashboard;
pub mod overview;
pub mod resource;

/// Outcome of a read-only page load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}
