pub mod bundle;
pub mod constants;
pub mod error;
pub mod index;
pub mod store;
pub mod suggestions;
pub(crate) mod validation;

pub use bundle::{BundleCodec, BundleFormat, BundleInput, ExportBundle, ImportSummary};
pub use error::{Result, SluiceError};
pub use index::IndexEntry;
pub use store::{ListFile, ListPayload, ListStore, LoadedLists};
pub use suggestions::SuggestionStore;
