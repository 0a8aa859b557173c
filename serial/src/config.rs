use thiserror::Error;

/// Baud rates the line driver accepts.
pub const BAUD_RATES: &[u32] = &[
    110, 150, 200, 300, 600, 1200, 1800, 2400, 4800, 9600, 19200, 38400, 57600, 115200, 230400,
    460800, 500000, 576000, 921600, 1000000, 1152000, 1500000, 2000000,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
    /// Accepted on the command line, rejected by validation.
    Mark,
}

impl Parity {
    pub fn from_char(c: char) -> Result<Parity, ConfigError> {
        match c {
            'N' => Ok(Parity::None),
            'E' => Ok(Parity::Even),
            'O' => Ok(Parity::Odd),
            'M' => Ok(Parity::Mark),
            _ => Err(ConfigError::InvalidParity(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Parity::None => 'N',
            Parity::Even => 'E',
            Parity::Odd => 'O',
            Parity::Mark => 'M',
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid baudrate: {0}")]
    InvalidBaud(u32),

    #[error("invalid number of data bits: {0}")]
    InvalidBits(u8),

    #[error("invalid parity (N/E/O/M): {0}")]
    InvalidParity(char),

    #[error("mark parity is not supported")]
    MarkParity,

    #[error("invalid number of stop bits: {0}")]
    InvalidStop(u8),
}

/// Serial line parameters. These are setup inputs for the external line
/// driver; nothing in this workspace interprets them beyond validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialConfig {
    pub baud: u32,
    pub data_bits: u8,
    pub parity: Parity,
    pub stop_bits: u8,
    pub handshake: bool,
}

impl Default for SerialConfig {
    /// 9600 8N1, no handshake.
    fn default() -> Self {
        SerialConfig {
            baud: 9600,
            data_bits: 8,
            parity: Parity::None,
            stop_bits: 1,
            handshake: false,
        }
    }
}

impl SerialConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !BAUD_RATES.contains(&self.baud) {
            return Err(ConfigError::InvalidBaud(self.baud));
        }
        if !(5..=8).contains(&self.data_bits) {
            return Err(ConfigError::InvalidBits(self.data_bits));
        }
        if self.parity == Parity::Mark {
            return Err(ConfigError::MarkParity);
        }
        if !(1..=2).contains(&self.stop_bits) {
            return Err(ConfigError::InvalidStop(self.stop_bits));
        }
        Ok(())
    }
}
