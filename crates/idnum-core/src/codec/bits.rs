//! Regrouping between bit widths without padding.
//!
//! Values are consumed most-significant-bit first into a rolling accumulator
//! and emitted whenever a full output group is buffered. Leftover bits must
//! form less than one input group and be all zero.

use crate::error::CodecError;

/// Regroup `data` from `from`-bit values into `to`-bit values, strictly.
///
/// # Errors
///
/// - [`CodecError::ValueOutOfRange`] if an input value is wider than `from`.
/// - [`CodecError::ExcessPadding`] if `from` or more bits are left over.
/// - [`CodecError::NonZeroPadding`] if the leftover bits are not all zero.
pub fn convert_bits(data: &[u8], from: u32, to: u32) -> Result<Vec<u8>, CodecError> {
    let max_out: u32 = (1 << to) - 1;
    let max_acc: u32 = (1 << (from + to - 1)) - 1;
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(data.len() * from as usize / to as usize + 1);

    for &value in data {
        if u32::from(value) >> from != 0 {
            return Err(CodecError::ValueOutOfRange { value, bits: from });
        }
        acc = ((acc << from) | u32::from(value)) & max_acc;
        bits += from;
        while bits >= to {
            bits -= to;
            // Masked to `to` bits, which is at most 8.
            out.push(((acc >> bits) & max_out) as u8);
        }
    }

    if bits >= from {
        return Err(CodecError::ExcessPadding { bits });
    }
    if (acc << (to - bits)) & max_out != 0 {
        return Err(CodecError::NonZeroPadding { bits });
    }
    Ok(out)
}

/// Regroup 5-bit values into bytes.
pub fn five_to_eight(data: &[u8]) -> Result<Vec<u8>, CodecError> {
    convert_bits(data, 5, 8)
}
