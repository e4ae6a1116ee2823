// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Hex text representation of keys, blocks and words.
//!
//! Blocks and keys are written byte by byte in memory order. Since every word is stored
//! little-endian, the hex text of a single word reads byte-reversed compared to the
//! usual big-endian rendering of its value: the word `0x03020100` is written `00010203`.

use crate::word::*;

/// The `TextError` enum represents the possible errors when parsing hex text.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TextError {
    #[error("invalid hex text: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("invalid word length `{actual}`; expected `{expected}` bytes")]
    InvalidWordLength { expected: usize, actual: usize },
}

/// Parses hex text into bytes, ignoring any whitespace between the digits.
///
/// # Examples
///
/// ```
/// use rc6::text::parse_hex;
///
/// let bytes = parse_hex("00 11 22 33\n44 55 66 77").unwrap();
/// assert_eq!(bytes, [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77]);
/// ```
pub fn parse_hex(text: &str) -> Result<Vec<u8>, TextError> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    Ok(hex::decode(digits)?)
}

/// Formats bytes as lowercase two digit hex values separated by single spaces.
///
/// # Examples
///
/// ```
/// use rc6::text::format_hex;
///
/// assert_eq!(format_hex(&[0x8F, 0xC3, 0x05]), "8f c3 05");
/// ```
pub fn format_hex(bytes: &[u8]) -> String {
    let digits = hex::encode(bytes);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && i % 2 == 0 {
            out.push(' ');
        }
        out.push(digit);
    }
    out
}

/// Renders one word in its serialized, little-endian byte order.
pub fn word_to_hex<T: Word>(word: T) -> String {
    let mut bytes = vec![0u8; T::BYTES];
    write_le_chunk(word, &mut bytes);
    hex::encode(bytes)
}

/// Reads one word from the hex text of its little-endian bytes.
pub fn word_from_hex<T: Word>(text: &str) -> Result<T, TextError> {
    let bytes = parse_hex(text)?;
    if bytes.len() != T::BYTES {
        return Err(TextError::InvalidWordLength {
            expected: T::BYTES,
            actual: bytes.len(),
        });
    }
    Ok(from_le_chunk(&bytes))
}
