/// Use cases module containing application logic orchestration
mod view_result;

pub use view_result::ViewResultUseCase;
