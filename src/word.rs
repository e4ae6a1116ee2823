// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Fixed-width word arithmetic used by the RC6 key schedule and round function.
//!
//! All arithmetic is modulo `2^W` and every rotation amount is reduced modulo `W`,
//! so rotating by `0` or by `W` leaves the word untouched.

/// An unsigned word of `W` bits the cipher can operate on.
pub trait Word:
    num_traits::Unsigned
    + num_traits::WrappingAdd
    + num_traits::WrappingSub
    + num_traits::WrappingMul
    + std::ops::BitXor<Output = Self>
    + Copy
    + Eq
    + std::fmt::Debug
    + Send
    + Sync
    + 'static
{
    /// Word width in bits
    const BITS: u32;
    /// Word width in bytes
    const BYTES: usize;
    /// `log2(W)`, the fixed rotation applied to `x * (2x + 1)`
    const LG_W: u32 = Self::BITS.trailing_zeros();

    /// Truncates a 64 bit value to the word width.
    fn from_u64(v: u64) -> Self;

    /// Zero-extends the word to 64 bits.
    fn to_u64(self) -> u64;

    /// The word reduced modulo `W`, usable as a rotation amount.
    fn rotation(self) -> u32;

    /// Rotates left by `amount mod W` bits.
    fn rotl(self, amount: u32) -> Self;

    /// Rotates right by `amount mod W` bits.
    fn rotr(self, amount: u32) -> Self;

    #[inline]
    fn add_mod(self, rhs: Self) -> Self {
        self.wrapping_add(&rhs)
    }

    #[inline]
    fn sub_mod(self, rhs: Self) -> Self {
        self.wrapping_sub(&rhs)
    }

    #[inline]
    fn mul_mod(self, rhs: Self) -> Self {
        self.wrapping_mul(&rhs)
    }
}

macro_rules! impl_word {
    ($($t:ty)*) => {
        $(
            impl Word for $t {
                const BITS: u32 = <$t>::BITS;
                const BYTES: usize = std::mem::size_of::<$t>();

                #[inline]
                fn from_u64(v: u64) -> $t {
                    v as $t
                }

                #[inline]
                fn to_u64(self) -> u64 {
                    self as u64
                }

                #[inline]
                fn rotation(self) -> u32 {
                    (self % (<$t>::BITS as $t)) as u32
                }

                #[inline]
                fn rotl(self, amount: u32) -> $t {
                    self.rotate_left(rotation_amount::<$t>(amount))
                }

                #[inline]
                fn rotr(self, amount: u32) -> $t {
                    self.rotate_right(rotation_amount::<$t>(amount))
                }
            }
        )*
    };
}

impl_word!(u8 u16 u32 u64);

fn rotation_amount<T>(x: u32) -> u32 {
    x % (std::mem::size_of::<T>() * 8) as u32
}

/// Reads a little-endian word from `chunk`, zero-extending at the high end.
///
/// Bytes past `T::BYTES` fall off the top of the word.
pub(crate) fn from_le_chunk<T: Word>(chunk: &[u8]) -> T {
    let v = chunk
        .iter()
        .rev()
        .fold(0u64, |acc, &byte| (acc << 8) | byte as u64);
    T::from_u64(v)
}

/// Writes the low `out.len()` bytes (at most `T::BYTES`) of `word` little-endian.
pub(crate) fn write_le_chunk<T: Word>(word: T, out: &mut [u8]) {
    let v = word.to_u64();
    for (i, byte) in out.iter_mut().take(T::BYTES).enumerate() {
        *byte = (v >> (8 * i)) as u8;
    }
}

/// `P_w = Odd((e - 2) * 2^W)`
pub(crate) fn pw<T: Word>() -> T {
    // constant for 64bit
    const P: u64 = 0xB7E151628AED2A6B;
    T::from_u64((P >> (64 - T::BITS)) | 1)
}

/// `Q_w = Odd((phi - 1) * 2^W)`
pub(crate) fn qw<T: Word>() -> T {
    // constant for 64bit
    const Q: u64 = 0x9E3779B97F4A7C15;
    T::from_u64((Q >> (64 - T::BITS)) | 1)
}

/// `x * (2x + 1) mod 2^W` rotated left by `log2(W)`
#[inline]
pub(crate) fn quadratic<T: Word>(x: T) -> T {
    x.mul_mod(x.add_mod(x).add_mod(T::one())).rotl(T::LG_W)
}
