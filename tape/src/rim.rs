use crate::byte::{ByteClass, SENTINEL};
use crate::framing::{Framer, RecordBody};

/// RIM record body: a transparent framed copy. No checksum, no word
/// reconstruction; the body runs from the opening origin byte to the
/// first sentinel.
#[derive(Debug, Default)]
pub struct RimBody;

impl RecordBody for RimBody {
    fn opens(&self, class: ByteClass) -> bool {
        class.is_origin()
    }

    fn push(&mut self, byte: u8) -> bool {
        byte == SENTINEL
    }
}

pub type RimFramer = Framer<RimBody>;
