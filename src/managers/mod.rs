// jobmark state managers
// Managers own persistent and shared state: the bookmark store and its in-memory projection.

pub mod bookmark_store;
pub mod bookmark_sync;
