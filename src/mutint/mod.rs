//! Mutable arbitrary precision integers.
//!
//! [MutInt] is a sign and a [LimbBuffer]. Every mutating method writes a canonical value into
//! `self` and returns `&mut Self`, so operations can be chained without allocating:
//!
//! ```
//! use num_residue::{MutInt, MutIntStore};
//!
//! let store = MutIntStore::new(4);
//! let mut x = MutInt::from(12345u32);
//! x.multiply(&MutInt::from(-3i32), &store).add_u32(5).left_shift(40);
//! assert_eq!(x.to_string(), "-40714915576545280");
//! ```
//!
//! Three operand forms (`set_sum(a, b)`) write into `self` from two borrowed operands, so the
//! destination can never alias a source. In-place forms (`add`, `subtract`, `multiply`) read
//! the words they need before overwriting them; in-place multiplication stages a copy of
//! `self` through a [MutIntStore](crate::MutIntStore).

mod arith;
mod bits;
mod convert;
mod div;
mod number;

use crate::limb::{self, Limb, LimbBuffer};
use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

/// Arbitrary precision signed integer stored as base 2^32 limbs, mutated in place.
pub struct MutInt {
    buf: LimbBuffer,
    negative: bool,
}

impl MutInt {
    /// Create zero with room for a single limb
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Create zero with room for `limbs` limbs
    #[inline]
    pub fn with_capacity(limbs: usize) -> Self {
        MutInt {
            buf: LimbBuffer::with_capacity(limbs),
            negative: false,
        }
    }

    /// The significant limbs of the magnitude, least significant first.
    #[inline]
    pub fn limbs(&self) -> &[Limb] {
        self.buf.words()
    }

    /// Number of significant limbs (1 for zero)
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Allocated limbs
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Grow the storage to hold at least `limbs` limbs.
    #[inline]
    pub fn reserve(&mut self, limbs: usize) -> &mut Self {
        self.buf.reserve(limbs);
        self
    }

    /// Limb `i` of the magnitude, zero past the significant limbs.
    #[inline]
    pub fn word(&self, i: usize) -> Limb {
        if i <= self.buf.last() {
            self.buf[i]
        } else {
            0
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.buf.is_zero()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.buf.last() == 0 && self.buf[0] == 1 && !self.negative
    }

    #[inline]
    pub fn is_even(&self) -> bool {
        self.buf[0] & 1 == 0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// -1, 0 or 1
    #[inline]
    pub fn signum(&self) -> i32 {
        if self.is_zero() {
            0
        } else if self.negative {
            -1
        } else {
            1
        }
    }

    /// The least significant limb of the magnitude
    #[inline]
    pub fn low_word(&self) -> Limb {
        self.buf[0]
    }

    /// Compare magnitudes, ignoring signs.
    #[inline]
    pub fn unsigned_cmp(&self, other: &MutInt) -> Ordering {
        limb::cmp(self.limbs(), other.limbs())
    }

    /// Trim the cursor and fix the sign of zero. A no-op on values that are already canonical,
    /// which is every value produced by the public API.
    pub fn canonicalize(&mut self) -> &mut Self {
        let last = self.buf.last();
        self.buf.set_last(last);
        if self.buf.is_zero() {
            self.negative = false;
        }
        self.check_valid();
        self
    }

    /// Declare `limbs[..len]` as the new magnitude with the given sign.
    #[inline]
    pub(crate) fn commit(&mut self, len: usize, negative: bool) -> &mut Self {
        self.buf.commit(len);
        self.negative = negative && !self.buf.is_zero();
        self.check_valid();
        self
    }

    /// Raw storage, reserved to at least `len` limbs. Writers must finish with `commit`.
    #[inline]
    pub(crate) fn storage_mut(&mut self, len: usize) -> &mut [Limb] {
        self.buf.reserve(len);
        self.buf.as_mut_slice()
    }

    /// The whole storage, including the words above the cursor.
    #[inline]
    pub(crate) fn raw_limbs(&self) -> &[Limb] {
        self.buf.as_slice()
    }

    /// Debug build validation of the representation invariant.
    #[inline]
    pub(crate) fn check_valid(&self) {
        #[cfg(debug_assertions)]
        {
            assert!(self.buf.is_canonical(), "stale limbs beyond the cursor: {:?}", self.buf);
            assert!(!(self.negative && self.buf.is_zero()), "negative zero");
        }
    }
}

impl Clone for MutInt {
    fn clone(&self) -> Self {
        MutInt {
            buf: self.buf.clone(),
            negative: self.negative,
        }
    }

    /// Copies into the existing storage, so residues can be re-assigned without allocating.
    fn clone_from(&mut self, source: &Self) {
        self.set(source);
    }
}

impl Default for MutInt {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for MutInt {
    fn eq(&self, other: &Self) -> bool {
        self.negative == other.negative && self.limbs() == other.limbs()
    }
}

impl Eq for MutInt {}

impl Ord for MutInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.unsigned_cmp(other),
            (true, true) => other.unsigned_cmp(self),
        }
    }
}

impl PartialOrd for MutInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for MutInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.negative.hash(state);
        self.limbs().hash(state);
    }
}

impl MutInt {
    /// Magnitude of the low two limbs, or None if the magnitude needs more.
    #[inline]
    fn magnitude_u64(&self) -> Option<u64> {
        if self.buf.last() > 1 {
            None
        } else {
            Some(self.word(0) as u64 | (self.word(1) as u64) << 32)
        }
    }

    /// Compare with a native signed value without allocating.
    pub fn cmp_i64(&self, other: i64) -> Ordering {
        let other_negative = other < 0;
        if self.negative != other_negative {
            return if self.negative {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        let ord = match self.magnitude_u64() {
            Some(m) => m.cmp(&other.unsigned_abs()),
            None => Ordering::Greater,
        };
        if self.negative {
            ord.reverse()
        } else {
            ord
        }
    }

    /// Compare with a native unsigned value without allocating.
    pub fn cmp_u64(&self, other: u64) -> Ordering {
        if self.negative {
            return Ordering::Less;
        }
        match self.magnitude_u64() {
            Some(m) => m.cmp(&other),
            None => Ordering::Greater,
        }
    }
}

macro_rules! impl_native_cmp {
    ($($T:ty => $method:ident, $W:ty;)*) => {$(
        impl PartialEq<$T> for MutInt {
            #[inline]
            fn eq(&self, other: &$T) -> bool {
                self.$method(*other as $W) == Ordering::Equal
            }
        }

        impl PartialOrd<$T> for MutInt {
            #[inline]
            fn partial_cmp(&self, other: &$T) -> Option<Ordering> {
                Some(self.$method(*other as $W))
            }
        }

        impl PartialEq<MutInt> for $T {
            #[inline]
            fn eq(&self, other: &MutInt) -> bool {
                other == self
            }
        }

        impl PartialOrd<MutInt> for $T {
            #[inline]
            fn partial_cmp(&self, other: &MutInt) -> Option<Ordering> {
                Some(other.$method(*self as $W).reverse())
            }
        }
    )*}
}
impl_native_cmp! {
    i32 => cmp_i64, i64;
    i64 => cmp_i64, i64;
    u32 => cmp_u64, u64;
    u64 => cmp_u64, u64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn canonical_form_test() {
        let mut x = MutInt::with_capacity(4);
        assert!(x.is_zero());
        assert_eq!(x.signum(), 0);

        x.set_i64(-(1i64 << 40));
        let before = x.clone();
        x.canonicalize();
        assert_eq!(x, before);
        assert_eq!(x.limbs(), before.limbs());
        assert!(x.is_negative());

        // zero produced by arithmetic is never negative
        x.add(&MutInt::from(1i64 << 40));
        assert!(x.is_zero());
        assert!(!x.is_negative());
        assert_eq!(x.limbs(), &[0]);
    }

    #[test]
    fn native_comparison_test() {
        for i in -10i32..10 {
            for j in -10i32..10 {
                let a = MutInt::from(i);
                let b = MutInt::from(j);
                assert_eq!(i == j, a == b);
                assert_eq!(i < j, a < b);
                assert_eq!(i >= j, a >= b);
                assert_eq!(i == j, a == j);
                assert_eq!(i < j, a < j);
                assert_eq!(i > j, i > b);
                assert_eq!(i <= j, i <= b);
            }
        }

        let big: MutInt = "340282366920938463463374607431768211456".parse().unwrap();
        assert!(big > u64::MAX);
        assert!(big > i64::MAX);
        assert!(-big.clone() < i64::MIN);
        assert!(MutInt::from(-1) < 0u64);
        assert_eq!(BigInt::from(&big).bits(), 129);
    }
}
