/// Data Transfer Objects for application layer
///
/// DTOs carry data between the CLI, the use case and the adapters,
/// keeping the lineage domain isolated.
mod output_format;
mod view_result_request;
mod view_result_response;

pub use output_format::OutputFormat;
pub use view_result_request::ViewResultRequest;
pub use view_result_response::ViewResultResponse;
