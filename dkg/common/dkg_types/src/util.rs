use crate::DecodeError;
use ssz_types::typenum::Unsigned;
use ssz_types::{FixedVector, VariableList};

// Bound a sequence by the maximum length of its SSZ list
pub fn to_list<T: Clone, N: Unsigned>(
    field: &'static str,
    items: &[T],
) -> Result<VariableList<T, N>, DecodeError> {
    VariableList::new(items.to_vec()).map_err(|_| DecodeError::TooLong {
        field,
        max: N::to_usize(),
        actual: items.len(),
    })
}

// Fit a sequence into an SSZ vector of exact length
pub fn to_vector<T: Clone, N: Unsigned>(
    field: &'static str,
    items: &[T],
) -> Result<FixedVector<T, N>, DecodeError> {
    FixedVector::new(items.to_vec()).map_err(|_| DecodeError::InvalidLength {
        field,
        expected: N::to_usize(),
        actual: items.len(),
    })
}

// Decode a hex string field, naming the field on failure
pub(crate) fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, DecodeError> {
    hex::decode(value).map_err(|e| DecodeError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

// Read a byte field as UTF-8 text, naming the field on failure
pub(crate) fn decode_utf8(field: &'static str, value: &[u8]) -> Result<String, DecodeError> {
    String::from_utf8(value.to_vec()).map_err(|e| DecodeError::InvalidUtf8 {
        field,
        reason: e.to_string(),
    })
}
