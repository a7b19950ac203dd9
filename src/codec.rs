//! Conversion between identifier values and their two byte, big-endian wire form.
//!
//! This is the layout used for packet identifiers by protocols such as MQTT. Every function here
//! is total over `u16`, including the zero value which the pool itself never issues.
//!
//! # Example
//!
//! ```
//! # use packet_id_pool::codec;
//! assert_eq!(codec::encode(0x1234), [0x12, 0x34]);
//! assert_eq!(codec::decode([0x12, 0x34]), 0x1234);
//! ```

use thiserror::Error;

/// The number of bytes an identifier occupies on the wire.
pub const WIRE_LENGTH: usize = 2;

/// Encodes a value into its wire form, most significant byte first.
pub fn encode(value: u16) -> [u8; WIRE_LENGTH] {
    [(value >> 8) as u8, value as u8]
}

/// Decodes a value from its wire form, most significant byte first.
pub fn decode(bytes: [u8; WIRE_LENGTH]) -> u16 {
    (bytes[0] as u16) << 8 | bytes[1] as u16
}

/// Decodes a value from a slice borrowed out of a larger frame.
///
/// # Example
///
/// ```
/// # use packet_id_pool::codec::{self, DecodeError};
/// assert_eq!(codec::decode_slice(&[0x00, 0x2a]), Ok(42));
/// assert_eq!(
///     codec::decode_slice(&[0x00]),
///     Err(DecodeError::InvalidLength { length: 1 })
/// );
/// ```
pub fn decode_slice(bytes: &[u8]) -> Result<u16, DecodeError> {
    match bytes {
        [high, low] => Ok(decode([*high, *low])),
        _ => Err(DecodeError::InvalidLength {
            length: bytes.len(),
        }),
    }
}

/// The error returned when bytes can not be decoded into an identifier value.
#[derive(Debug, Error, Copy, Clone, Hash, Eq, PartialEq)]
pub enum DecodeError {
    /// The input was not exactly [WIRE_LENGTH] bytes long.
    #[error("identifier must be 2 bytes long, got {length}")]
    InvalidLength {
        /// The length of the rejected input.
        length: usize,
    },
}

#[cfg(test)]
mod test {
    use crate::codec::{decode, decode_slice, encode, DecodeError};

    #[test]
    fn encode_puts_the_high_byte_first() {
        assert_eq!(encode(0x0102), [0x01, 0x02]);
        assert_eq!(encode(0xff00), [0xff, 0x00]);
        assert_eq!(encode(0x00ff), [0x00, 0xff]);
    }

    #[test]
    fn decode_reads_the_high_byte_first() {
        assert_eq!(decode([0x01, 0x02]), 0x0102);
        assert_eq!(decode([0xff, 0xff]), u16::MAX);
        assert_eq!(decode([0x00, 0x00]), 0);
    }

    #[test]
    fn decode_inverts_encode_for_every_value() {
        for value in 0..=u16::MAX {
            assert_eq!(decode(encode(value)), value);
        }
    }

    #[test]
    fn decode_slice_rejects_other_lengths() {
        assert_eq!(
            decode_slice(&[]),
            Err(DecodeError::InvalidLength { length: 0 })
        );
        assert_eq!(
            decode_slice(&[1, 2, 3]),
            Err(DecodeError::InvalidLength { length: 3 })
        );
    }

    #[test]
    fn decode_slice_matches_decode() {
        assert_eq!(decode_slice(&[0xab, 0xcd]), Ok(decode([0xab, 0xcd])));
    }

    #[test]
    fn decode_error_is_displayable() {
        let error = DecodeError::InvalidLength { length: 5 };
        assert_eq!(
            error.to_string(),
            "identifier must be 2 bytes long, got 5"
        );
    }
}
