//! Host for `homework-core`: performs the HTTP round-trips, logs, and runs
//! the poll loop.

pub mod config;
pub mod logging;
pub mod notifier;
pub mod runner;
pub mod transport;

pub use config::{Cli, Config};
pub use notifier::Notifier;
pub use runner::HomeworkBot;
pub use transport::{Transport, TransportError, UreqTransport};
