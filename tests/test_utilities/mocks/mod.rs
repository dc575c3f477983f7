/// Mock implementations for testing
mod mock_object_store;
mod mock_progress_reporter;

pub use mock_object_store::MockObjectStore;
pub use mock_progress_reporter::MockProgressReporter;
