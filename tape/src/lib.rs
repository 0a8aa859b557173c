pub mod bin;
pub mod byte;
pub mod framing;
pub mod rim;
pub mod words;

pub use bin::{BinBody, BinFramer, Checksum};
pub use byte::{classify, ByteClass, SENTINEL};
pub use framing::{Framer, RecordBody, State};
pub use rim::{RimBody, RimFramer};
pub use words::Word;
