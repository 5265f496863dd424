//! Addition, subtraction and multiplication.

use super::MutInt;
use crate::limb::{self, Limb};
use crate::store::MutIntStore;
use core::cmp::Ordering;
use core::ops::Neg;

impl MutInt {
    /// `self += (-1)^b_negative * |b|`, where `b` is a little-endian magnitude.
    fn add_signed(&mut self, b: &[Limb], b_negative: bool) -> &mut Self {
        let negative = self.negative;
        if negative == b_negative {
            let len = self.len().max(b.len());
            let words = self.storage_mut(len + 1);
            words[len] = limb::add_assign(&mut words[..len], b);
            self.commit(len + 1, negative)
        } else if limb::cmp(self.limbs(), b) != Ordering::Less {
            let len = self.len();
            let words = self.storage_mut(len);
            limb::sub_assign(&mut words[..len], b);
            self.commit(len, negative)
        } else {
            // the other operand is larger, so the result takes its sign
            let len = b.len();
            let words = self.storage_mut(len);
            limb::sub_from_assign(&mut words[..len], b);
            self.commit(len, !negative)
        }
    }

    pub fn add(&mut self, b: &MutInt) -> &mut Self {
        self.add_signed(b.limbs(), b.negative)
    }

    pub fn subtract(&mut self, b: &MutInt) -> &mut Self {
        self.add_signed(b.limbs(), !b.negative)
    }

    /// `self = a + b`
    pub fn set_sum(&mut self, a: &MutInt, b: &MutInt) -> &mut Self {
        self.set(a).add(b)
    }

    /// `self = a - b`
    pub fn set_difference(&mut self, a: &MutInt, b: &MutInt) -> &mut Self {
        self.set(a).subtract(b)
    }

    pub fn add_u32(&mut self, b: u32) -> &mut Self {
        self.add_signed(&[b], false)
    }

    pub fn subtract_u32(&mut self, b: u32) -> &mut Self {
        self.add_signed(&[b], true)
    }

    pub fn add_i32(&mut self, b: i32) -> &mut Self {
        self.add_signed(&[b.unsigned_abs()], b < 0)
    }

    pub fn subtract_i32(&mut self, b: i32) -> &mut Self {
        self.add_signed(&[b.unsigned_abs()], b >= 0)
    }

    #[inline]
    pub fn increment(&mut self) -> &mut Self {
        self.add_u32(1)
    }

    #[inline]
    pub fn decrement(&mut self) -> &mut Self {
        self.subtract_u32(1)
    }

    pub fn negate(&mut self) -> &mut Self {
        self.negative = !self.negative && !self.is_zero();
        self
    }

    pub fn abs(&mut self) -> &mut Self {
        self.negative = false;
        self
    }

    /// `self = a * b` by operand scanning.
    pub fn set_product(&mut self, a: &MutInt, b: &MutInt) -> &mut Self {
        let len = a.len() + b.len();
        let words = self.storage_mut(len);
        limb::mul_into(words, a.limbs(), b.limbs());
        self.commit(len, a.negative != b.negative)
    }

    /// `self = a * a`
    #[inline]
    pub fn set_square(&mut self, a: &MutInt) -> &mut Self {
        self.set_product(a, a)
    }

    /// `self *= b`. The current value is staged through a scratch value from `store`, since a
    /// product cannot be written over one of its operands.
    pub fn multiply(&mut self, b: &MutInt, store: &MutIntStore) -> &mut Self {
        let mut staged = store.acquire();
        staged.set(self);
        self.set_product(&staged, b)
    }

    /// `self *= self`, staged through `store` like [multiply](Self::multiply).
    pub fn square(&mut self, store: &MutIntStore) -> &mut Self {
        let mut staged = store.acquire();
        staged.set(self);
        self.set_product(&staged, &staged)
    }

    pub fn multiply_u32(&mut self, b: u32) -> &mut Self {
        let negative = self.negative;
        let len = self.len();
        let words = self.storage_mut(len + 1);
        words[len] = limb::mul_limb_assign(&mut words[..len], b);
        self.commit(len + 1, negative)
    }

    pub fn multiply_i32(&mut self, b: i32) -> &mut Self {
        self.multiply_u32(b.unsigned_abs());
        if b < 0 {
            self.negate();
        }
        self
    }

    /// `self = a * b`
    pub fn set_product_u32(&mut self, a: &MutInt, b: u32) -> &mut Self {
        self.set(a).multiply_u32(b)
    }

    /// `self = a * b`
    pub fn set_product_i32(&mut self, a: &MutInt, b: i32) -> &mut Self {
        self.set(a).multiply_i32(b)
    }

    /// `self = (|a| * |b|) mod 2^bits`, computing only the low words of the product.
    pub fn set_product_masked(&mut self, a: &MutInt, b: &MutInt, bits: usize) -> &mut Self {
        let len = (bits + limb::LIMB_BITS - 1) / limb::LIMB_BITS;
        if len == 0 {
            return self.set_zero();
        }
        let words = self.storage_mut(len);
        limb::mul_low_into(words, a.limbs(), b.limbs(), len);
        let partial = bits % limb::LIMB_BITS;
        if partial != 0 {
            words[len - 1] &= (1 << partial) - 1;
        }
        self.commit(len, false)
    }

    /// `self = (self + a) mod n` for `0 <= self, a < n`.
    pub fn add_modulo(&mut self, a: &MutInt, n: &MutInt) -> &mut Self {
        debug_assert!(!self.negative && !a.negative && a < n);
        self.add(a);
        if self.unsigned_cmp(n) != Ordering::Less {
            self.subtract(n);
        }
        self
    }

    /// `self = (self - a) mod n` for `0 <= self, a < n`.
    pub fn subtract_modulo(&mut self, a: &MutInt, n: &MutInt) -> &mut Self {
        debug_assert!(!self.negative && !a.negative && a < n);
        if self.unsigned_cmp(a) == Ordering::Less {
            self.add(n);
        }
        self.subtract(a)
    }
}

impl Neg for MutInt {
    type Output = MutInt;

    fn neg(mut self) -> MutInt {
        MutInt::negate(&mut self);
        self
    }
}

impl Neg for &MutInt {
    type Output = MutInt;

    fn neg(self) -> MutInt {
        -self.clone()
    }
}
