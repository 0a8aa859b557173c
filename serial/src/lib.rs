pub mod config;
pub mod transport;

pub use config::{ConfigError, Parity, SerialConfig};
pub use transport::{open_device, FileTransport, OpenError, PipeTransport, Transport};
