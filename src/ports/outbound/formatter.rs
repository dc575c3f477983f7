use crate::application::read_models::ResultView;
use crate::shared::Result;

/// ResultFormatter port for rendering a resolved result
///
/// This port abstracts the presentation format (Key/Value table, JSON).
pub trait ResultFormatter {
    /// Renders the result view
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, view: &ResultView) -> Result<String>;
}
