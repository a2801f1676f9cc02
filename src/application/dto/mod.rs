/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod change_log;
mod output_format;
mod replay_request;
mod replay_response;

pub use change_log::{parse_target_frameworks, ChangeBatch, ChangeEntry, ChangeLog, EntryKind};
pub use output_format::OutputFormat;
pub use replay_request::ReplayRequest;
pub use replay_response::ReplayResponse;
