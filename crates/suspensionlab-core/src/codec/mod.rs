//! Tagged-field binary codec
//!
//! Schema types are written as a sequence of `(field number, wire type,
//! value)` triples. Field numbers are fixed per message and never reused, so
//! bytes produced by one schema revision stay readable by another:
//!
//! - fields this build does not know are kept on the owning message and
//!   written back unchanged on the next encode
//! - fields absent from the input decode to their zero value, except nested
//!   messages the schema requires, whose absence is a [`DecodeError`]
//! - the frame geometry is written as exactly one of three variant fields
//!
//! Decoding is all-or-nothing: any structural fault aborts with an error and
//! no partially populated value escapes.
//!
//! ```
//! use suspensionlab_core::codec;
//! use suspensionlab_core::schema::Config;
//!
//! let session = Config::new(2, 1000);
//! let bytes = codec::encode(&session);
//! let back: Config = codec::decode(&bytes).unwrap();
//! assert_eq!(back, session);
//! ```

pub mod messages;
pub mod wire;

use thiserror::Error;
use tracing::trace;

pub use wire::{Decoder, Encoder, WireType, MAX_FIELD_NUMBER};

/// Structural errors raised while decoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended in the middle of a value
    #[error("truncated input: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("varint exceeds 64 bits")]
    VarintOverflow,

    #[error("length prefix {0} does not fit in memory")]
    LengthOverflow(u64),

    #[error("invalid field number {0}")]
    InvalidFieldNumber(u64),

    #[error("unsupported wire type {0}")]
    UnsupportedWireType(u8),

    #[error("{message}.{field}: expected {expected} wire type, found {found}")]
    WireTypeMismatch {
        message: &'static str,
        field: u32,
        expected: WireType,
        found: WireType,
    },

    #[error("{message}.{field}: value {value} does not fit in 32 bits")]
    IntegerOverflow {
        message: &'static str,
        field: u32,
        value: u64,
    },

    #[error("{message}.{field}: string is not valid UTF-8")]
    InvalidUtf8 { message: &'static str, field: u32 },

    #[error("{message}.{field}: unknown enum value {value}")]
    UnknownEnumValue {
        message: &'static str,
        field: u32,
        value: u64,
    },

    #[error("{message}: required field '{field}' is missing")]
    MissingField {
        message: &'static str,
        field: &'static str,
    },

    #[error("{message}: no geometry variant is set")]
    MissingVariant { message: &'static str },

    #[error("{message}: more than one geometry variant is set")]
    ConflictingVariant { message: &'static str },
}

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// A schema type with a stable wire layout
pub trait WireMessage: Sized {
    /// Message name used in error reports
    const NAME: &'static str;

    /// Write every field of `self`, including preserved unknown fields
    fn encode_fields(&self, enc: &mut Encoder);

    /// Read fields until the decoder is exhausted
    fn decode_fields(dec: &mut Decoder<'_>) -> DecodeResult<Self>;
}

/// Encode a message to bytes
pub fn encode<M: WireMessage>(message: &M) -> Vec<u8> {
    let mut enc = Encoder::with_capacity(64);
    message.encode_fields(&mut enc);
    let bytes = enc.finish();
    trace!(message = M::NAME, len = bytes.len(), "encoded");
    bytes
}

/// Decode a message from bytes
pub fn decode<M: WireMessage>(bytes: &[u8]) -> DecodeResult<M> {
    let mut dec = Decoder::new(bytes);
    let message = M::decode_fields(&mut dec)?;
    trace!(message = M::NAME, len = bytes.len(), "decoded");
    Ok(message)
}
