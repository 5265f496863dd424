//! Truncating division with remainder (Knuth's Algorithm D).
//!
//! Quotients truncate toward zero and remainders take the sign of the dividend, matching the
//! primitive integer operators. Every public entry point rejects a zero divisor with
//! [Error::DivisionByZero].

use super::MutInt;
use crate::error::{Error, Result};
use crate::limb::{self, DoubleLimb, Limb, LIMB_BITS};
use crate::store::MutIntStore;
use core::cmp::Ordering;

impl MutInt {
    /// Replace `self` by `self rem v` and write the truncated quotient to `q` if given.
    ///
    /// The divisor is not normalized in memory: the quotient digit estimates are computed from
    /// the shifted leading words on the fly, while the multiply-subtract step works on the
    /// original words. The dividend needs two spare words above its top word.
    pub(crate) fn div_rem_in_place(&mut self, v: &MutInt, mut q: Option<&mut MutInt>) {
        debug_assert!(!v.is_zero(), "division by zero");
        let negative = self.negative;
        let q_negative = negative != v.negative;

        if self.unsigned_cmp(v) == Ordering::Less {
            if let Some(q) = q {
                q.set_zero();
            }
            return;
        }

        let n = v.len();
        if n == 1 {
            let r = self.div_rem_limb(v.low_word(), q, q_negative);
            let words = self.storage_mut(1);
            words[0] = r;
            self.commit(1, negative);
            return;
        }

        let vw = v.limbs();
        let last = self.buf.last();
        let m = last + 1 - n;
        let d = LIMB_BITS - limb::bit_length(vw[n - 1]);
        let dneg = LIMB_BITS - d;

        // leading words of the normalized divisor
        let mut v1 = vw[n - 1];
        let mut v2 = vw[n - 2];
        if d != 0 {
            let v3 = if n > 2 { vw[n - 3] } else { 0 };
            v1 = v1 << d | v2 >> dneg;
            v2 = v2 << d | v3 >> dneg;
        }

        let u = self.storage_mut(last + 2);
        let mut qw = q.as_mut().map(|q| q.storage_mut(m + 1));
        for j in 0..=m {
            let left = n + m - j;

            // leading words of the normalized partial remainder
            let mut u0 = u[left];
            let mut u1 = u[left - 1];
            let mut u2 = u[left - 2];
            if d != 0 {
                let u3 = if left >= 3 { u[left - 3] } else { 0 };
                u0 = u0 << d | u1 >> dneg;
                u1 = u1 << d | u2 >> dneg;
                u2 = u2 << d | u3 >> dneg;
            }

            let u0u1 = (u0 as DoubleLimb) << LIMB_BITS | u1 as DoubleLimb;
            let mut qhat: DoubleLimb = if u0 == v1 {
                Limb::MAX as DoubleLimb
            } else {
                u0u1 / v1 as DoubleLimb
            };
            let r = u0u1 - qhat * v1 as DoubleLimb;
            if r >> LIMB_BITS == 0 && v2 as DoubleLimb * qhat > (r << LIMB_BITS | u2 as DoubleLimb) {
                qhat -= 1;
                let r = u0u1 - qhat * v1 as DoubleLimb;
                if r >> LIMB_BITS == 0
                    && v2 as DoubleLimb * qhat > (r << LIMB_BITS | u2 as DoubleLimb)
                {
                    qhat -= 1;
                }
            }

            // multiply and subtract
            let base = left - n;
            let mut carry: DoubleLimb = 0;
            let mut borrow: i64 = 0;
            for i in 0..n {
                carry += qhat * vw[i] as DoubleLimb;
                borrow += u[base + i] as i64 - (carry as Limb) as i64;
                carry >>= LIMB_BITS;
                u[base + i] = borrow as Limb;
                borrow >>= LIMB_BITS;
            }
            borrow += u[left] as i64 - carry as i64;
            u[left] = 0;

            // qhat was one too large, add the divisor back
            if borrow != 0 {
                qhat -= 1;
                let mut carry: DoubleLimb = 0;
                for i in 0..n {
                    carry += u[base + i] as DoubleLimb + vw[i] as DoubleLimb;
                    u[base + i] = carry as Limb;
                    carry >>= LIMB_BITS;
                }
            }

            if let Some(qw) = &mut qw {
                qw[m - j] = qhat as Limb;
            }
        }

        if let Some(q) = q {
            q.commit(m + 1, q_negative);
        }
        self.commit(n, negative);
    }

    /// Divide the magnitude by a single word, writing the quotient to `q` if given.
    /// Returns the remainder of the magnitude, leaving `self` untouched.
    fn div_rem_limb(&self, v: Limb, q: Option<&mut MutInt>, q_negative: bool) -> Limb {
        debug_assert!(v != 0);
        let v = v as DoubleLimb;
        let words = self.limbs();
        let mut r: DoubleLimb = 0;
        match q {
            Some(q) => {
                let len = words.len();
                let qw = q.storage_mut(len);
                for j in (0..len).rev() {
                    let cur = r << LIMB_BITS | words[j] as DoubleLimb;
                    qw[j] = (cur / v) as Limb;
                    r = cur % v;
                }
                q.commit(len, q_negative);
            }
            None => {
                for &w in words.iter().rev() {
                    r = (r << LIMB_BITS | w as DoubleLimb) % v;
                }
            }
        }
        r as Limb
    }

    /// `self = self rem v`, `q = self / v` (truncated).
    pub fn modulo_with_quotient(&mut self, v: &MutInt, q: &mut MutInt) -> Result<&mut Self> {
        if v.is_zero() {
            return Err(Error::DivisionByZero);
        }
        self.div_rem_in_place(v, Some(q));
        Ok(self)
    }

    /// `self = self rem v`, with the sign of the dividend.
    pub fn modulo(&mut self, v: &MutInt) -> Result<&mut Self> {
        if v.is_zero() {
            return Err(Error::DivisionByZero);
        }
        self.div_rem_in_place(v, None);
        Ok(self)
    }

    /// `self = self mod |v|`, always in `[0, |v|)`.
    pub fn modulo_euclid(&mut self, v: &MutInt) -> Result<&mut Self> {
        self.modulo(v)?;
        if self.negative {
            self.add_signed_magnitude(v);
        }
        Ok(self)
    }

    /// Infallible Euclidean remainder for callers that validated the divisor.
    pub(crate) fn reduce_euclid(&mut self, v: &MutInt) -> &mut Self {
        self.div_rem_in_place(v, None);
        if self.negative {
            self.add_signed_magnitude(v);
        }
        self
    }

    fn add_signed_magnitude(&mut self, v: &MutInt) {
        if v.negative {
            self.subtract(v);
        } else {
            self.add(v);
        }
    }

    /// `self = self / v` (truncated), staging the dividend through `store`.
    pub fn divide(&mut self, v: &MutInt, store: &MutIntStore) -> Result<&mut Self> {
        if v.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let mut remainder = store.acquire();
        remainder.set(self);
        remainder.div_rem_in_place(v, Some(&mut *self));
        Ok(self)
    }

    /// `self = a / b` (truncated).
    pub fn set_quotient(&mut self, a: &MutInt, b: &MutInt, store: &MutIntStore) -> Result<&mut Self> {
        let mut remainder = store.acquire();
        self.set_quotient_with_remainder(a, b, &mut remainder)
    }

    /// `self = a / b` (truncated) and `remainder = a rem b`.
    pub fn set_quotient_with_remainder(
        &mut self,
        a: &MutInt,
        b: &MutInt,
        remainder: &mut MutInt,
    ) -> Result<&mut Self> {
        if b.is_zero() {
            return Err(Error::DivisionByZero);
        }
        remainder.set(a).div_rem_in_place(b, Some(&mut *self));
        Ok(self)
    }

    /// `self = a rem b`
    pub fn set_remainder(&mut self, a: &MutInt, b: &MutInt) -> Result<&mut Self> {
        self.set(a).modulo(b)
    }

    /// `|self| mod v`
    pub fn rem_u32(&self, v: u32) -> Result<u32> {
        if v == 0 {
            return Err(Error::DivisionByZero);
        }
        Ok(self.div_rem_limb(v, None, false))
    }

    /// `self rem v`, with the sign of the dividend.
    pub fn rem_i32(&self, v: i32) -> Result<i32> {
        let r = self.rem_u32(v.unsigned_abs())? as i64;
        let r = if self.negative { -r } else { r };
        Ok(r as i32)
    }

    /// `self = self / v` (truncated). Returns `|self| mod v` from before the division.
    pub fn div_rem_u32(&mut self, v: u32) -> Result<u32> {
        if v == 0 {
            return Err(Error::DivisionByZero);
        }
        let negative = self.negative;
        let len = self.len();
        let words = self.storage_mut(len);
        let mut r: DoubleLimb = 0;
        for j in (0..len).rev() {
            let cur = r << LIMB_BITS | words[j] as DoubleLimb;
            words[j] = (cur / v as DoubleLimb) as Limb;
            r = cur % v as DoubleLimb;
        }
        self.commit(len, negative);
        Ok(r as u32)
    }
}
