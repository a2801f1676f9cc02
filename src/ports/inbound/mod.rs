/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (e.g., CLI)
/// use to interact with the application core.
pub mod snapshot_replay_port;

pub use snapshot_replay_port::SnapshotReplayPort;
