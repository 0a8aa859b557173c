use crate::byte::{classify, ByteClass, SENTINEL};
use crate::framing::{Framer, RecordBody};
use crate::words::{pack, Word};

use log::debug;

/// Verdict for a BIN record's trailing checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checksum {
    Ok(u16),
    Fail { computed: u16, transmitted: u16 },
}

impl Checksum {
    pub fn is_ok(self) -> bool {
        matches!(self, Checksum::Ok(_))
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    origin: bool,
    high: u8,
}

/// BIN record body: reconstructs 12-bit words and verifies the rolling
/// checksum.
///
/// Every top-bit-clear byte is summed whole into the accumulator and
/// shifted through a two-byte window. When the sentinel arrives, the last
/// two window bytes turn out to have been the transmitted checksum, so
/// they are backed out of the sum before comparing. The data word they
/// formed is likewise dropped from the word stream; [`Checksum`] carries
/// the value instead.
#[derive(Debug, Default)]
pub struct BinBody {
    csum: u32,
    c1: u8, // last top-bit-clear byte
    c2: u8, // the one before it
    pending: Option<Pending>,
    words: Vec<Word>,
    checksum: Option<Checksum>,
    truncated: bool,
}

impl BinBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Words decoded so far, checksum word excluded once the record ends.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn into_words(self) -> Vec<Word> {
        self.words
    }

    /// Set once the terminating sentinel has been seen.
    pub fn checksum(&self) -> Option<Checksum> {
        self.checksum
    }

    /// True if the record ended in the middle of a word pair.
    pub fn truncated_pair(&self) -> bool {
        self.truncated
    }
}

impl RecordBody for BinBody {
    fn opens(&self, class: ByteClass) -> bool {
        class.is_origin() || class.is_field()
    }

    fn open(&mut self, byte: u8) {
        match classify(byte) {
            ByteClass::Origin(_) => {
                // The opening byte counts toward the checksum but never
                // enters the two-byte window.
                self.csum += u32::from(byte);
                self.pending = Some(Pending { origin: true, high: byte });
            }
            ByteClass::Field(f) => self.words.push(Word::Field(f)),
            // Unreachable through Framer, which only opens on Origin/Field.
            ByteClass::Data(_) | ByteClass::LeaderTrailer(_) => {}
        }
    }

    fn push(&mut self, byte: u8) -> bool {
        if byte & 0x80 == 0 {
            self.csum += u32::from(byte);
            self.c2 = self.c1;
            self.c1 = byte;
        }

        if byte == SENTINEL {
            let transmitted = pack(self.c2, self.c1);
            let computed = ((self.csum - u32::from(self.c1) - u32::from(self.c2)) & 0xfff) as u16;

            if self.pending.take().is_some() {
                self.truncated = true;
            } else if matches!(self.words.last(), Some(Word::Data(_))) {
                // The final data pair was the transmitted checksum, not
                // payload.
                self.words.pop();
            }

            debug!("checksum: computed {computed:04o}, transmitted {transmitted:04o}");
            self.checksum = Some(if computed == transmitted {
                Checksum::Ok(transmitted)
            } else {
                Checksum::Fail { computed, transmitted }
            });
            return true;
        }

        match (self.pending.take(), classify(byte)) {
            // Mid-pair, the next byte completes the word whatever its class.
            (Some(p), _) => {
                let word = pack(p.high, byte);
                self.words.push(if p.origin {
                    Word::Origin(word)
                } else {
                    Word::Data(word)
                });
            }
            (None, ByteClass::Data(_)) => {
                self.pending = Some(Pending { origin: false, high: byte });
            }
            (None, ByteClass::Origin(_)) => {
                self.pending = Some(Pending { origin: true, high: byte });
            }
            (None, ByteClass::Field(f)) => self.words.push(Word::Field(f)),
            // 0x81..=0xbf: copied through, but inert.
            (None, ByteClass::LeaderTrailer(_)) => {}
        }
        false
    }
}

pub type BinFramer = Framer<BinBody>;
