/// Filesystem adapters: manifest loading and output files
mod file_writer;
mod manifest_store;

pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use manifest_store::ManifestObjectStore;
