/// Filesystem adapters for file I/O operations
mod manifest_reader;
mod output_writer;
mod policy_store;

pub use manifest_reader::FileSystemReader;
pub use output_writer::{FileSystemWriter, StdoutPresenter};
pub use policy_store::PolicyStore;
