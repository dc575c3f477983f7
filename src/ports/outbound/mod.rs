/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (cluster API, console, files).
pub mod formatter;
pub mod object_store;
pub mod output_presenter;
pub mod progress_reporter;

pub use formatter::ResultFormatter;
pub use object_store::ObjectStore;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
