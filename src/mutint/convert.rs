//! Assignment from native and `num_bigint` values, and conversions back out.

use super::MutInt;
use crate::error::{Error, Result};
use crate::limb::{Limb, LIMB_BITS};
use core::convert::TryFrom;
use core::fmt;
use core::str::FromStr;
use num_bigint::{BigInt, Sign};

impl MutInt {
    /// Reset to zero, keeping the storage.
    pub fn set_zero(&mut self) -> &mut Self {
        self.buf.clear();
        self.negative = false;
        self
    }

    /// Assign a magnitude given as little-endian limbs. Leading zero limbs are allowed.
    pub fn set_limbs(&mut self, words: &[Limb], negative: bool) -> &mut Self {
        let len = words.len();
        let dst = self.storage_mut(len.max(1));
        dst[..len].copy_from_slice(words);
        self.commit(len, negative)
    }

    fn set_magnitude(&mut self, magnitude: u128, negative: bool) -> &mut Self {
        let bits = 128 - magnitude.leading_zeros() as usize;
        let len = ((bits + LIMB_BITS - 1) / LIMB_BITS).max(1);
        let dst = self.storage_mut(len);
        for (i, w) in dst[..len].iter_mut().enumerate() {
            *w = (magnitude >> (LIMB_BITS * i)) as Limb;
        }
        self.commit(len, negative)
    }

    pub fn set_u32(&mut self, a: u32) -> &mut Self {
        self.set_magnitude(a as u128, false)
    }

    pub fn set_i32(&mut self, a: i32) -> &mut Self {
        self.set_magnitude(a.unsigned_abs() as u128, a < 0)
    }

    pub fn set_u64(&mut self, a: u64) -> &mut Self {
        self.set_magnitude(a as u128, false)
    }

    pub fn set_i64(&mut self, a: i64) -> &mut Self {
        self.set_magnitude(a.unsigned_abs() as u128, a < 0)
    }

    pub fn set_u128(&mut self, a: u128) -> &mut Self {
        self.set_magnitude(a, false)
    }

    pub fn set_i128(&mut self, a: i128) -> &mut Self {
        self.set_magnitude(a.unsigned_abs(), a < 0)
    }

    pub fn set_bigint(&mut self, a: &BigInt) -> &mut Self {
        let (sign, digits) = a.to_u32_digits();
        self.set_limbs(&digits, sign == Sign::Minus)
    }

    /// Copy another value into this one, reusing the storage.
    pub fn set(&mut self, a: &MutInt) -> &mut Self {
        self.set_limbs(a.limbs(), a.negative)
    }

    /// Magnitude as a `u128`, or None if it needs more than four limbs.
    fn magnitude_u128(&self) -> Option<u128> {
        if self.len() > 4 {
            return None;
        }
        Some(
            self.limbs()
                .iter()
                .rev()
                .fold(0u128, |acc, &w| acc << LIMB_BITS | w as u128),
        )
    }

    /// Two's complement little-endian bytes, in the same layout as
    /// [BigInt::to_signed_bytes_le].
    pub fn to_signed_bytes_le(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self.limbs().iter().flat_map(|w| w.to_le_bytes()).collect();
        bytes.push(0);
        if self.negative {
            negate_bytes(&mut bytes);
        }

        let fill = if self.negative { 0xff } else { 0 };
        while bytes.len() > 1 {
            let n = bytes.len();
            if bytes[n - 1] == fill && (bytes[n - 2] & 0x80) == (fill & 0x80) {
                bytes.pop();
            } else {
                break;
            }
        }
        bytes
    }

    /// Parse two's complement little-endian bytes. An empty slice is zero.
    pub fn from_signed_bytes_le(bytes: &[u8]) -> Self {
        let negative = bytes.last().map_or(false, |b| b & 0x80 != 0);
        let mut magnitude = bytes.to_vec();
        if negative {
            negate_bytes(&mut magnitude);
        }

        let words: Vec<Limb> = magnitude
            .chunks(4)
            .map(|c| {
                let mut w = [0u8; 4];
                w[..c.len()].copy_from_slice(c);
                Limb::from_le_bytes(w)
            })
            .collect();
        let mut result = MutInt::with_capacity(words.len());
        result.set_limbs(&words, negative);
        result
    }
}

fn negate_bytes(bytes: &mut [u8]) {
    let mut carry = 1u16;
    for b in bytes.iter_mut() {
        carry += (!*b) as u16;
        *b = carry as u8;
        carry >>= 8;
    }
}

macro_rules! impl_from_prim {
    ($($T:ty => $set:ident, $cap:expr;)*) => {$(
        impl From<$T> for MutInt {
            #[inline]
            fn from(v: $T) -> Self {
                let mut result = MutInt::with_capacity($cap);
                result.$set(v);
                result
            }
        }
    )*}
}
impl_from_prim! {
    i32 => set_i32, 1;
    u32 => set_u32, 1;
    i64 => set_i64, 2;
    u64 => set_u64, 2;
    i128 => set_i128, 4;
    u128 => set_u128, 4;
}

impl From<&BigInt> for MutInt {
    fn from(v: &BigInt) -> Self {
        let mut result = MutInt::with_capacity(v.bits() as usize / LIMB_BITS + 1);
        result.set_bigint(v);
        result
    }
}

impl From<BigInt> for MutInt {
    #[inline]
    fn from(v: BigInt) -> Self {
        MutInt::from(&v)
    }
}

impl From<&MutInt> for BigInt {
    fn from(v: &MutInt) -> Self {
        let sign = if v.negative { Sign::Minus } else { Sign::Plus };
        BigInt::from_slice(sign, v.limbs())
    }
}

impl From<MutInt> for BigInt {
    #[inline]
    fn from(v: MutInt) -> Self {
        BigInt::from(&v)
    }
}

macro_rules! impl_try_into_unsigned {
    ($($T:ty)*) => {$(
        impl TryFrom<&MutInt> for $T {
            type Error = Error;

            fn try_from(v: &MutInt) -> Result<$T> {
                if v.negative {
                    return Err(Error::Overflow(stringify!($T)));
                }
                v.magnitude_u128()
                    .and_then(|m| <$T>::try_from(m).ok())
                    .ok_or(Error::Overflow(stringify!($T)))
            }
        }
    )*}
}
impl_try_into_unsigned!(u32 u64 u128);

macro_rules! impl_try_into_signed {
    ($($T:ty)*) => {$(
        impl TryFrom<&MutInt> for $T {
            type Error = Error;

            fn try_from(v: &MutInt) -> Result<$T> {
                let m = v.magnitude_u128().ok_or(Error::Overflow(stringify!($T)))?;
                if v.negative {
                    // the most negative value has a magnitude one past MAX
                    if m <= <$T>::MAX as u128 + 1 {
                        Ok((m as $T).wrapping_neg())
                    } else {
                        Err(Error::Overflow(stringify!($T)))
                    }
                } else {
                    <$T>::try_from(m).map_err(|_| Error::Overflow(stringify!($T)))
                }
            }
        }
    )*}
}
impl_try_into_signed!(i32 i64 i128);

impl fmt::Display for MutInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&BigInt::from(self), f)
    }
}

impl fmt::Debug for MutInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MutInt({})", self)
    }
}

impl FromStr for MutInt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BigInt::from_str(s)
            .map(MutInt::from)
            .map_err(|_| Error::Parse(s.to_owned()))
    }
}
