use crate::adapters::outbound::formatters::{JsonFormatter, TreeFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::SnapshotFormatter;

/// Factory for creating snapshot formatters
///
/// Selecting the formatter adapter is an application concern, so the
/// factory lives here rather than in the CLI.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter for `format`
    ///
    /// `colored` only affects the tree format; JSON output is never colored.
    ///
    /// # Examples
    /// ```
    /// use dependency_snapshots::application::dto::OutputFormat;
    /// use dependency_snapshots::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Json, false);
    /// ```
    pub fn create(format: OutputFormat, colored: bool) -> Box<dyn SnapshotFormatter> {
        match format {
            OutputFormat::Tree => Box::new(TreeFormatter::new(colored)),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }

    /// # Examples
    /// ```
    /// use dependency_snapshots::application::dto::OutputFormat;
    /// use dependency_snapshots::application::factories::FormatterFactory;
    ///
    /// let message = FormatterFactory::progress_message(OutputFormat::Tree);
    /// assert_eq!(message, "📝 Rendering dependency tree...");
    /// ```
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Tree => "📝 Rendering dependency tree...",
            OutputFormat::Json => "📝 Rendering JSON snapshot...",
        }
    }
}
