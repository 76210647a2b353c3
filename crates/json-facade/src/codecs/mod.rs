//! Per-type codecs consulted by the structural walk.
//!
//! The four coercion codecs substitute a zero value for missing input and
//! never emit JSON null. Sequences get a deliberately inert codec.

mod coerce;
mod sequence;
mod types;

pub use coerce::{is_absent, DoubleCodec, IntegerCodec, LongCodec, StringCodec};
pub use sequence::InertSequenceCodec;
pub use types::Codec;
