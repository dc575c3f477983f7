/// ProgressReporter port for reporting progress during operations
///
/// This port abstracts user-facing progress output (e.g., to stderr) so it
/// never mixes with the rendered result on stdout.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress through a fixed number of steps
    ///
    /// # Arguments
    /// * `current` - Current step
    /// * `total` - Total number of steps
    /// * `message` - Optional description of the current step
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
