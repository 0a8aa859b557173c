use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;

use crate::config::{ConfigError, SerialConfig};

use log::debug;
use thiserror::Error;

/// A byte transport with read-timeout semantics: `recv` returns `Ok(0)`
/// when the line stayed silent for the timeout period. It never blocks
/// forever, so callers own the retry/abort policy.
pub trait Transport {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;
    fn send(&mut self, buf: &[u8]) -> io::Result<()>;
}

#[derive(Debug, Error)]
pub enum OpenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not open device {path}: {source}")]
    Io { path: String, source: io::Error },
}

/// Validate the line configuration and open a device node for raw byte
/// traffic. The line discipline itself (speed, framing, handshake) is
/// programmed by the platform outside this crate; a bad configuration
/// still fails fast here, before any decoding starts.
pub fn open_device(path: &str, config: &SerialConfig) -> Result<FileTransport, OpenError> {
    config.validate()?;
    debug!(
        "opening {path} at {} {}{}{}",
        config.baud,
        config.data_bits,
        config.parity.to_char(),
        config.stop_bits
    );
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| OpenError::Io { path: path.into(), source })?;
    Ok(FileTransport { file })
}

/// Transport over a plain file or an already-configured device node.
/// End of file reads as a timeout, so a recorded capture replays with
/// the same termination behavior as a silent line.
#[derive(Debug)]
pub struct FileTransport {
    file: File,
}

impl FileTransport {
    /// Open an existing file read-only, for replaying captures.
    pub fn open(path: impl AsRef<Path>) -> io::Result<FileTransport> {
        Ok(FileTransport { file: File::open(path)? })
    }
}

impl Transport for FileTransport {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }

    fn send(&mut self, buf: &[u8]) -> io::Result<()> {
        self.file.write_all(buf)
    }
}

/// In-memory transport for tests: scripted incoming chunks, with explicit
/// timeout ticks, and a capture of everything sent.
#[derive(Debug, Default)]
pub struct PipeTransport {
    incoming: VecDeque<Vec<u8>>,
    sent: Vec<u8>,
}

impl PipeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes to arrive as one read.
    pub fn push_chunk(&mut self, bytes: &[u8]) {
        self.incoming.push_back(bytes.to_vec());
    }

    /// Queue one silent read (`recv` returns `Ok(0)`).
    pub fn push_timeout(&mut self) {
        self.incoming.push_back(Vec::new());
    }

    pub fn sent(&self) -> &[u8] {
        &self.sent
    }
}

impl Transport for PipeTransport {
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(mut chunk) = self.incoming.pop_front() else {
            return Ok(0);
        };
        if chunk.len() > buf.len() {
            let rest = chunk.split_off(buf.len());
            self.incoming.push_front(rest);
        }
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }

    fn send(&mut self, buf: &[u8]) -> io::Result<()> {
        self.sent.extend_from_slice(buf);
        Ok(())
    }
}
