/// Binary bundle container framing.
#[cfg(feature = "archive")]
pub mod archive;
/// Tagged export/import codec.
pub mod codec;
/// Shared payload shapes.
pub mod payload;
/// Bundle tests.
pub mod tests;

pub use codec::{BundleCodec, BundleFormat, BundleInput};
pub use payload::{ExportBundle, ImportSummary, JsonBundle, JsonListEntry};
