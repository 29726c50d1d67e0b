//! Low-level wire primitives
//!
//! Every field is written as a varint key `(field_number << 3) | wire_type`
//! followed by its value:
//!
//! ```text
//! wire type 0  varint          integers, enums
//! wire type 1  64-bit          (skipped/preserved only)
//! wire type 2  length-delim.   strings, nested messages
//! wire type 5  32-bit          floats, little-endian
//! ```

use std::fmt;

use super::{DecodeError, DecodeResult, WireMessage};
use crate::schema::{UnknownField, UnknownFields};

/// Longest varint a u64 can need
const MAX_VARINT_LEN: usize = 10;

/// Largest field number a key can carry
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Wire encoding of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    Fixed32 = 5,
}

impl WireType {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(WireType::Varint),
            1 => Some(WireType::Fixed64),
            2 => Some(WireType::LengthDelimited),
            5 => Some(WireType::Fixed32),
            _ => None,
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireType::Varint => write!(f, "varint"),
            WireType::Fixed64 => write!(f, "fixed64"),
            WireType::LengthDelimited => write!(f, "length-delimited"),
            WireType::Fixed32 => write!(f, "fixed32"),
        }
    }
}

// ============================================================================
// Encoder
// ============================================================================

/// Growable output buffer.
///
/// Scalar writers follow the proto3 convention of omitting default values
/// (zero, empty string); nested messages are always written.
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_varint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.push((value as u8 & 0x7F) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    pub fn write_key(&mut self, field: u32, wire_type: WireType) {
        self.write_varint((u64::from(field) << 3) | wire_type as u64);
    }

    fn write_length_delimited(&mut self, field: u32, bytes: &[u8]) {
        self.write_key(field, WireType::LengthDelimited);
        self.write_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    pub fn uint32(&mut self, field: u32, value: u32) {
        if value != 0 {
            self.write_key(field, WireType::Varint);
            self.write_varint(u64::from(value));
        }
    }

    pub fn enumeration(&mut self, field: u32, value: u64) {
        if value != 0 {
            self.write_key(field, WireType::Varint);
            self.write_varint(value);
        }
    }

    pub fn string(&mut self, field: u32, value: &str) {
        if !value.is_empty() {
            self.write_length_delimited(field, value.as_bytes());
        }
    }

    pub fn float(&mut self, field: u32, value: f32) {
        // Compare bits so -0.0 survives the round trip
        if value.to_bits() != 0 {
            self.write_key(field, WireType::Fixed32);
            self.buf.extend_from_slice(&value.to_le_bytes());
        }
    }

    pub fn message<M: WireMessage>(&mut self, field: u32, message: &M) {
        let mut nested = Encoder::new();
        message.encode_fields(&mut nested);
        self.write_length_delimited(field, &nested.buf);
    }

    /// Write back fields preserved from an earlier decode
    pub fn unknown(&mut self, fields: &UnknownFields) {
        for field in fields {
            self.write_key(field.number, field.wire_type);
            self.buf.extend_from_slice(&field.payload);
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

// ============================================================================
// Decoder
// ============================================================================

/// Cursor over a borrowed input buffer.
#[derive(Debug)]
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(DecodeError::Truncated {
                needed: len,
                available: self.remaining(),
            });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_varint(&mut self) -> DecodeResult<u64> {
        let mut value: u64 = 0;
        for index in 0..MAX_VARINT_LEN {
            let byte = match self.buf.get(self.pos) {
                Some(byte) => *byte,
                None => {
                    return Err(DecodeError::Truncated {
                        needed: 1,
                        available: 0,
                    })
                }
            };
            self.pos += 1;

            // The tenth byte may only contribute the top bit of a u64
            if index == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(DecodeError::VarintOverflow);
            }
            value |= u64::from(byte & 0x7F) << (7 * index);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(DecodeError::VarintOverflow)
    }

    /// Read the next field key, or `None` at end of input
    pub fn next_key(&mut self) -> DecodeResult<Option<(u32, WireType)>> {
        if self.is_empty() {
            return Ok(None);
        }
        let key = self.read_varint()?;
        let number = key >> 3;
        if number == 0 || number > u64::from(MAX_FIELD_NUMBER) {
            return Err(DecodeError::InvalidFieldNumber(number));
        }
        let raw = (key & 0x7) as u8;
        let wire_type = WireType::from_raw(raw).ok_or(DecodeError::UnsupportedWireType(raw))?;
        Ok(Some((number as u32, wire_type)))
    }

    fn read_length_delimited(&mut self) -> DecodeResult<&'a [u8]> {
        let len = self.read_varint()?;
        let len = usize::try_from(len).map_err(|_| DecodeError::LengthOverflow(len))?;
        self.read_bytes(len)
    }

    fn expect(
        wire_type: WireType,
        expected: WireType,
        message: &'static str,
        field: u32,
    ) -> DecodeResult<()> {
        if wire_type == expected {
            Ok(())
        } else {
            Err(DecodeError::WireTypeMismatch {
                message,
                field,
                expected,
                found: wire_type,
            })
        }
    }

    pub fn uint32(
        &mut self,
        wire_type: WireType,
        message: &'static str,
        field: u32,
    ) -> DecodeResult<u32> {
        Self::expect(wire_type, WireType::Varint, message, field)?;
        let value = self.read_varint()?;
        u32::try_from(value).map_err(|_| DecodeError::IntegerOverflow {
            message,
            field,
            value,
        })
    }

    pub fn enumeration(
        &mut self,
        wire_type: WireType,
        message: &'static str,
        field: u32,
    ) -> DecodeResult<u64> {
        Self::expect(wire_type, WireType::Varint, message, field)?;
        self.read_varint()
    }

    pub fn string(
        &mut self,
        wire_type: WireType,
        message: &'static str,
        field: u32,
    ) -> DecodeResult<String> {
        Self::expect(wire_type, WireType::LengthDelimited, message, field)?;
        let bytes = self.read_length_delimited()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { message, field })
    }

    pub fn float(
        &mut self,
        wire_type: WireType,
        message: &'static str,
        field: u32,
    ) -> DecodeResult<f32> {
        Self::expect(wire_type, WireType::Fixed32, message, field)?;
        let bytes = self.read_bytes(4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        Ok(f32::from_le_bytes(raw))
    }

    pub fn message<M: WireMessage>(
        &mut self,
        wire_type: WireType,
        message: &'static str,
        field: u32,
    ) -> DecodeResult<M> {
        Self::expect(wire_type, WireType::LengthDelimited, message, field)?;
        let bytes = self.read_length_delimited()?;
        M::decode_fields(&mut Decoder::new(bytes))
    }

    /// Consume a field this build does not know, keeping its raw bytes
    pub fn unknown(&mut self, number: u32, wire_type: WireType) -> DecodeResult<UnknownField> {
        let start = self.pos;
        match wire_type {
            WireType::Varint => {
                self.read_varint()?;
            }
            WireType::Fixed64 => {
                self.read_bytes(8)?;
            }
            WireType::LengthDelimited => {
                self.read_length_delimited()?;
            }
            WireType::Fixed32 => {
                self.read_bytes(4)?;
            }
        }
        Ok(UnknownField {
            number,
            wire_type,
            payload: self.buf[start..self.pos].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varint_bytes(value: u64) -> Vec<u8> {
        let mut enc = Encoder::new();
        enc.write_varint(value);
        enc.finish()
    }

    #[test]
    fn test_varint_encoding() {
        assert_eq!(varint_bytes(0), vec![0x00]);
        assert_eq!(varint_bytes(1), vec![0x01]);
        assert_eq!(varint_bytes(300), vec![0xAC, 0x02]);
        assert_eq!(varint_bytes(u64::MAX).len(), MAX_VARINT_LEN);
    }

    #[test]
    fn test_varint_decoding() {
        let mut dec = Decoder::new(&[0xAC, 0x02, 0x7F]);
        assert_eq!(dec.read_varint().unwrap(), 300);
        assert_eq!(dec.read_varint().unwrap(), 127);
        assert!(dec.is_empty());

        let max = varint_bytes(u64::MAX);
        assert_eq!(Decoder::new(&max).read_varint().unwrap(), u64::MAX);
    }

    #[test]
    fn test_varint_overflow() {
        let bytes = [0xFF; 10];
        assert_eq!(
            Decoder::new(&bytes).read_varint(),
            Err(DecodeError::VarintOverflow)
        );
    }

    #[test]
    fn test_varint_truncated() {
        assert!(matches!(
            Decoder::new(&[0x80]).read_varint(),
            Err(DecodeError::Truncated { .. })
        ));
    }

    #[test]
    fn test_key_layout() {
        let mut enc = Encoder::new();
        enc.write_key(4, WireType::LengthDelimited);
        assert_eq!(enc.finish(), vec![0x22]);

        let mut dec = Decoder::new(&[0x22]);
        assert_eq!(
            dec.next_key().unwrap(),
            Some((4, WireType::LengthDelimited))
        );
        assert_eq!(dec.next_key().unwrap(), None);
    }

    #[test]
    fn test_field_zero_and_group_wire_types_rejected() {
        assert_eq!(
            Decoder::new(&[0x02]).next_key(),
            Err(DecodeError::InvalidFieldNumber(0))
        );
        assert_eq!(
            Decoder::new(&[0x0B]).next_key(),
            Err(DecodeError::UnsupportedWireType(3))
        );
    }

    #[test]
    fn test_defaults_are_omitted() {
        let mut enc = Encoder::new();
        enc.uint32(1, 0);
        enc.string(2, "");
        enc.float(3, 0.0);
        enc.enumeration(4, 0);
        assert!(enc.is_empty());

        enc.float(3, -0.0);
        assert_eq!(enc.len(), 5);
    }

    #[test]
    fn test_wire_type_mismatch() {
        let mut dec = Decoder::new(&[0x05]);
        let err = dec.string(WireType::Varint, "Test", 1).unwrap_err();
        assert!(matches!(err, DecodeError::WireTypeMismatch { field: 1, .. }));
    }

    #[test]
    fn test_integer_overflow() {
        let bytes = varint_bytes(u64::from(u32::MAX) + 1);
        let err = Decoder::new(&bytes).uint32(WireType::Varint, "Test", 2).unwrap_err();
        assert!(matches!(err, DecodeError::IntegerOverflow { field: 2, .. }));
    }

    #[test]
    fn test_unknown_field_payload_round_trip() {
        let mut enc = Encoder::new();
        enc.string(15, "future");
        let bytes = enc.finish();

        let mut dec = Decoder::new(&bytes);
        let (number, wire_type) = dec.next_key().unwrap().unwrap();
        let field = dec.unknown(number, wire_type).unwrap();
        assert_eq!(field.number(), 15);
        assert_eq!(field.wire_type(), WireType::LengthDelimited);
        assert_eq!(field.payload()[0], 6);

        let mut fields = UnknownFields::new();
        fields.push(field);
        let mut enc = Encoder::new();
        enc.unknown(&fields);
        assert_eq!(enc.finish(), bytes);
    }
}
