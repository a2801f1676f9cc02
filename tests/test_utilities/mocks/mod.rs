/// Mock implementations for testing
mod mock_change_log_reader;
mod mock_progress_reporter;

pub use mock_change_log_reader::MockChangeLogReader;
pub use mock_progress_reporter::MockProgressReporter;
