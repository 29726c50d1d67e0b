//! Fields carried through from newer schema revisions.
//!
//! Only the decoder creates these: each one is a complete value read under a
//! number its message does not use.

use crate::codec::WireType;

/// A field whose number this build does not know.
///
/// The payload holds the raw bytes that followed the field key on the wire
/// (including the length prefix for length-delimited fields), so the field
/// can be written back byte-for-byte.
///
/// Fields cannot be built outside this crate:
///
/// ```compile_fail
/// use suspensionlab_core::codec::WireType;
/// use suspensionlab_core::schema::UnknownField;
///
/// let field = UnknownField { number: 2, wire_type: WireType::Varint, payload: vec![5] };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownField {
    pub(crate) number: u32,
    pub(crate) wire_type: WireType,
    pub(crate) payload: Vec<u8>,
}

impl UnknownField {
    /// Field number from the key
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    /// Raw value bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// Unknown fields of one message, in the order they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UnknownFields(Vec<UnknownField>);

impl UnknownFields {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, field: UnknownField) {
        self.0.push(field);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UnknownField> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field numbers present, in wire order
    pub fn numbers(&self) -> Vec<u32> {
        self.0.iter().map(|f| f.number).collect()
    }
}

impl<'a> IntoIterator for &'a UnknownFields {
    type Item = &'a UnknownField;
    type IntoIter = std::slice::Iter<'a, UnknownField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
