// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! This library provides an implementation of the RC6 block cipher algorithm
//!
//! RC6 is a symmetric-key block cipher designed by Rivest, Robshaw, Sidney and Yin as an
//! AES candidate. It is parameterized by the word size `w` (8, 16, 32 or 64 bits here),
//! the number of rounds `r` (20 for the standard RC6-32/20/b) and a key of any non-zero
//! length `b`.
//!
//! The algorithm operates on four words `A, B, C, D` at a time, each word being
//! represented by a generic type `T`. A key expansion process generates `2r + 4` round
//! keys once per key; encryption and decryption are then pure functions of a block and
//! those round keys.
//!
//! ```
//! use rc6::{text, RC6, DEFAULT_ROUNDS};
//!
//! let key = text::parse_hex("00000000000000000000000000000000").unwrap();
//! let rc6 = RC6::<u32>::new(&key, DEFAULT_ROUNDS).unwrap();
//!
//! let mut block = [0u8; 16];
//! rc6.encrypt_block(&mut block).unwrap();
//! assert_eq!(
//!     text::format_hex(&block),
//!     "8f c3 a5 36 56 b1 f7 78 c1 29 df 4e 98 48 a4 1e"
//! );
//! ```
#![forbid(unsafe_code)]

mod algorithm;
mod key_schedule;
pub mod text;
mod word;

pub use crate::algorithm::*;
pub use crate::key_schedule::RoundKeys;
pub use crate::word::Word;
