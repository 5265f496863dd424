//! Shifts, masks and two's complement bitwise operators.

use super::MutInt;
use crate::limb::{self, Limb, LIMB_BITS};
use crate::store::MutIntStore;

impl MutInt {
    /// Number of bits in the magnitude, 0 for zero.
    pub fn bit_length(&self) -> usize {
        let last = self.buf.last();
        last * LIMB_BITS + limb::bit_length(self.buf[last])
    }

    /// Bit `position` of the magnitude.
    #[inline]
    pub fn bit(&self, position: usize) -> bool {
        self.word(position / LIMB_BITS) >> (position % LIMB_BITS) & 1 == 1
    }

    /// Number of trailing zero bits of the magnitude, 0 for zero.
    pub fn trailing_zeros(&self) -> usize {
        self.limbs()
            .iter()
            .position(|&w| w != 0)
            .map_or(0, |i| i * LIMB_BITS + self.buf[i].trailing_zeros() as usize)
    }

    /// `self <<= n`, growing the storage as needed.
    pub fn left_shift(&mut self, n: usize) -> &mut Self {
        if n == 0 || self.is_zero() {
            return self;
        }
        let negative = self.negative;
        let last = self.buf.last();
        let i = n / LIMB_BITS;
        let j = n % LIMB_BITS;
        let w = self.storage_mut(last + i + 2);
        if j == 0 {
            w.copy_within(0..=last, i);
            w[..i].fill(0);
            self.commit(last + i + 1, negative)
        } else {
            let jneg = LIMB_BITS - j;
            w[last + i + 1] = w[last] >> jneg;
            for k in (0..last).rev() {
                w[k + i + 1] = w[k + 1] << j | w[k] >> jneg;
            }
            w[i] = w[0] << j;
            w[..i].fill(0);
            self.commit(last + i + 2, negative)
        }
    }

    /// Shift the magnitude right by `n` bits, keeping the sign (truncation toward zero).
    pub fn unsigned_right_shift(&mut self, n: usize) -> &mut Self {
        if n == 0 {
            return self;
        }
        let negative = self.negative;
        let last = self.buf.last();
        let i = n / LIMB_BITS;
        if i > last {
            return self.set_zero();
        }
        let j = n % LIMB_BITS;
        let limit = last - i;
        let w = self.storage_mut(last + 1);
        if j == 0 {
            w.copy_within(i..=last, 0);
        } else {
            let jneg = LIMB_BITS - j;
            for k in 0..limit {
                w[k] = w[i + k + 1] << jneg | w[i + k] >> j;
            }
            w[limit] = w[i + limit] >> j;
        }
        self.commit(limit + 1, negative)
    }

    /// `self >>= n` with floor semantics, so negative values round toward negative infinity
    /// like a two's complement arithmetic shift.
    pub fn right_shift(&mut self, n: usize) -> &mut Self {
        if !self.negative {
            return self.unsigned_right_shift(n);
        }
        // -m >> n == -(((m - 1) >> n) + 1)
        self.increment().unsigned_right_shift(n).decrement()
    }

    /// Keep the low `n` bits of the magnitude.
    pub fn mask(&mut self, n: usize) -> &mut Self {
        let negative = self.negative;
        let i = n / LIMB_BITS;
        let j = n % LIMB_BITS;
        if i > self.buf.last() {
            return self;
        }
        if j == 0 {
            self.commit(i, negative)
        } else {
            let w = self.storage_mut(i + 1);
            w[i] &= (1 << j) - 1;
            self.commit(i + 1, negative)
        }
    }

    /// Set bit `n` of the magnitude.
    pub fn set_bit(&mut self, n: usize) -> &mut Self {
        let negative = self.negative;
        let i = n / LIMB_BITS;
        let len = self.len().max(i + 1);
        let w = self.storage_mut(len);
        w[i] |= 1 << (n % LIMB_BITS);
        self.commit(len, negative)
    }

    /// Write the `width` word two's complement image of `src` into the raw storage without
    /// committing it. The cursor keeps pointing at the previous value until the image is
    /// finished with [take_image](Self::take_image) or [discard_image](Self::discard_image).
    fn load_image(&mut self, src: &MutInt, width: usize) {
        let w = self.storage_mut(width);
        let len = src.len();
        w[..len].copy_from_slice(src.limbs());
        w[len..width].fill(0);
        if src.negative {
            limb::twos_negate(&mut w[..width]);
        }
    }

    /// Interpret the raw storage as a `width` word two's complement image.
    fn take_image(&mut self, width: usize) -> &mut Self {
        let w = self.storage_mut(width);
        let negative = w[width - 1] >> (LIMB_BITS - 1) == 1;
        if negative {
            limb::twos_negate(&mut w[..width]);
        }
        self.commit(width, negative)
    }

    fn discard_image(&mut self, width: usize) {
        self.storage_mut(width)[..width].fill(0);
        self.buf.commit(0);
        self.negative = false;
    }

    fn set_bitwise(
        &mut self,
        a: &MutInt,
        b: &MutInt,
        store: &MutIntStore,
        op: impl Fn(Limb, Limb) -> Limb,
    ) -> &mut Self {
        // one extra word keeps the sign bit clear of both magnitudes
        let width = a.len().max(b.len()) + 1;
        let mut image = store.acquire();
        image.load_image(b, width);
        self.load_image(a, width);
        {
            let rhs = image.raw_limbs();
            let w = self.storage_mut(width);
            for k in 0..width {
                w[k] = op(w[k], rhs[k]);
            }
        }
        image.discard_image(width);
        self.take_image(width)
    }

    /// `self = a & b` with two's complement semantics.
    pub fn set_and(&mut self, a: &MutInt, b: &MutInt, store: &MutIntStore) -> &mut Self {
        self.set_bitwise(a, b, store, |x, y| x & y)
    }

    /// `self = a | b` with two's complement semantics.
    pub fn set_or(&mut self, a: &MutInt, b: &MutInt, store: &MutIntStore) -> &mut Self {
        self.set_bitwise(a, b, store, |x, y| x | y)
    }

    /// `self = a ^ b` with two's complement semantics.
    pub fn set_xor(&mut self, a: &MutInt, b: &MutInt, store: &MutIntStore) -> &mut Self {
        self.set_bitwise(a, b, store, |x, y| x ^ y)
    }

    /// `self = !a`, that is `-a - 1`.
    pub fn set_not(&mut self, a: &MutInt) -> &mut Self {
        self.set(a).negate().decrement()
    }
}
