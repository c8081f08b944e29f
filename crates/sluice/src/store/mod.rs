/// Load, save, and resolve operations.
pub mod operations;
/// Core list store type.
pub mod stor;
/// Store tests.
pub mod tests;

pub use operations::{ListFile, ListPayload, LoadedLists};
pub use stor::ListStore;
