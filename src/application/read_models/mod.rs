//! Read models for CQRS-lite pattern
//!
//! View-optimized structs holding the denormalized rows that formatters
//! render.

mod result_view;
mod result_view_builder;

pub use result_view::{ResultRow, ResultView};
pub use result_view_builder::ResultViewBuilder;
