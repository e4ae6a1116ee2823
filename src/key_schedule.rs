// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Expansion of a user key into the `2R + 4` round keys consumed by the cipher.

use crate::algorithm::RC6InitError;
use crate::word::*;
use std::cmp::max;

/// The expanded key table `S[0..2R + 4]`.
///
/// Built once from the user key and never mutated afterwards, so it can be shared
/// read-only between any number of encrypt/decrypt calls.
#[derive(Clone, PartialEq, Eq)]
pub struct RoundKeys<T> {
    s_arr: Box<[T]>,
}

impl<T: Word> RoundKeys<T> {
    /// Expands `key` into `2 * rounds + 4` round keys.
    ///
    /// The key may have any non-zero length; it does not need to be a multiple of the
    /// word size.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc6::RoundKeys;
    ///
    /// let round_keys = RoundKeys::<u32>::expand(b"k", 20).unwrap();
    /// assert_eq!(round_keys.len(), 44);
    /// assert!(RoundKeys::<u32>::expand(&[], 20).is_err());
    /// ```
    pub fn expand(key: &[u8], rounds: u8) -> Result<RoundKeys<T>, RC6InitError> {
        if key.is_empty() {
            return Err(RC6InitError::InvalidKey);
        }

        let (s_arr, mut l_arr) = RoundKeys::<T>::init_sl_arrays(key, rounds);
        log::debug!(
            "expanding rc6 key schedule: w={} r={} c={} t={}",
            T::BITS,
            rounds,
            l_arr.len(),
            s_arr.len()
        );

        Ok(RoundKeys::mix_sl_arrays(s_arr, &mut l_arr))
    }

    fn init_sl_arrays(key: &[u8], rounds: u8) -> (Box<[T]>, Box<[T]>) {
        let p = pw::<T>();
        let q = qw::<T>();

        let l = key.chunks(T::BYTES).map(from_le_chunk::<T>);

        let t = table_len(rounds);
        let s = std::iter::successors(Some(p), |x| Some(x.add_mod(q))).take(t);

        (s.collect(), l.collect())
    }

    fn mix_sl_arrays(mut s_arr: Box<[T]>, l_arr: &mut [T]) -> RoundKeys<T> {
        let total_count = 3 * max(s_arr.len(), l_arr.len());

        let mut a = T::zero();
        let mut b = T::zero();
        let (mut i, mut j) = (0, 0);
        for _ in 0..total_count {
            // A = S[i] = (S[i] + A + B) <<< 3
            a = s_arr[i].add_mod(a).add_mod(b).rotl(3);
            s_arr[i] = a;
            // B = L[j] = (L[j] + A + B) <<< (A + B)
            let ab = a.add_mod(b);
            b = l_arr[j].add_mod(ab).rotl(ab.rotation());
            l_arr[j] = b;

            i = (i + 1) % s_arr.len();
            j = (j + 1) % l_arr.len();
        }

        RoundKeys { s_arr }
    }

    /// The round keys in schedule order.
    pub fn as_slice(&self) -> &[T] {
        &self.s_arr
    }

    /// Number of round keys, always `2 * rounds + 4`.
    pub fn len(&self) -> usize {
        self.s_arr.len()
    }

    /// Never true for a table produced by [RoundKeys::expand].
    pub fn is_empty(&self) -> bool {
        self.s_arr.is_empty()
    }

    /// The number of rounds this table was expanded for.
    pub fn rounds(&self) -> u8 {
        ((self.s_arr.len() - 4) / 2) as u8
    }
}

impl<T> std::fmt::Debug for RoundKeys<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundKeys")
            .field("len", &self.s_arr.len())
            .finish_non_exhaustive()
    }
}

fn table_len(rounds: u8) -> usize {
    2 * rounds as usize + 4
}
