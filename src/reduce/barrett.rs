use super::MutIntScratch;
use crate::error::{Error, Result};
use crate::limb::LIMB_BITS;
use crate::mutint::MutInt;
use crate::traits::{Reducer, Reduction};
use core::cmp::Ordering;
use core::mem::swap;
use log::debug;

/// Builds [BarrettReducer]s. Accepts any positive modulus, odd or even.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarrettReduction;

/// Reduction with the precomputed reciprocal `mu = floor(b^2k / n)`, where `b = 2^32` and `k`
/// is the limb count of `n`. Residues are plain values in `[0, n)`.
#[derive(Debug, Clone)]
pub struct BarrettReducer {
    n: MutInt,
    mu: MutInt,
    k: usize,
}

impl Reduction<MutInt> for BarrettReduction {
    type Reducer = BarrettReducer;

    fn build(&self, modulus: &MutInt) -> Result<BarrettReducer> {
        if modulus.signum() <= 0 {
            return Err(Error::NonPositiveModulus);
        }
        debug!("building barrett reducer for a {} bit modulus", modulus.bit_length());

        let k = modulus.len();
        let mut numerator = MutInt::with_capacity(2 * k + 2);
        numerator.set_u32(1).left_shift(2 * LIMB_BITS * k);
        let mut mu = MutInt::with_capacity(k + 2);
        numerator.div_rem_in_place(modulus, Some(&mut mu));
        Ok(BarrettReducer {
            n: modulus.clone(),
            mu,
            k,
        })
    }
}

impl BarrettReducer {
    /// The precomputed reciprocal
    #[inline]
    pub fn mu(&self) -> &MutInt {
        &self.mu
    }

    /// `z = z mod n` for `0 <= z < b^2k`, using `q` and `p` as scratch.
    fn reduce(&self, z: &mut MutInt, q: &mut MutInt, p: &mut MutInt) {
        let bits = LIMB_BITS * (self.k + 1);

        // estimate the quotient from the high words only
        q.set(z).unsigned_right_shift(LIMB_BITS * (self.k - 1));
        p.set_product(q, &self.mu).unsigned_right_shift(bits);

        // both sides modulo b^(k+1)
        z.mask(bits);
        q.set_product_masked(p, &self.n, bits);
        if z.unsigned_cmp(q) == Ordering::Less {
            z.set_bit(bits);
        }
        z.subtract(q);

        // the estimate is short by at most two
        while z.unsigned_cmp(&self.n) != Ordering::Less {
            z.subtract(&self.n);
        }
    }
}

impl Reducer<MutInt> for BarrettReducer {
    type Repr = MutInt;
    type Scratch = MutIntScratch;

    #[inline]
    fn modulus(&self) -> &MutInt {
        &self.n
    }

    fn new_repr(&self) -> MutInt {
        MutInt::with_capacity(2 * self.k + 2)
    }

    fn new_scratch(&self) -> MutIntScratch {
        MutIntScratch::new(2 * self.k + 2)
    }

    fn transform(&self, value: &MutInt, out: &mut MutInt, _: &mut MutIntScratch) {
        // arbitrary inputs may exceed b^2k, so they take the division path
        out.set(value).reduce_euclid(&self.n);
    }

    fn residue(&self, repr: &MutInt) -> MutInt {
        repr.clone()
    }

    fn one(&self, out: &mut MutInt) {
        out.set_u32(1).reduce_euclid(&self.n);
    }

    fn mul_assign(&self, lhs: &mut MutInt, rhs: &MutInt, scratch: &mut MutIntScratch) {
        let MutIntScratch {
            wide,
            quotient,
            product,
        } = scratch;
        wide.set_product(lhs, rhs);
        self.reduce(wide, quotient, product);
        swap(lhs, wide);
    }

    fn sqr_assign(&self, lhs: &mut MutInt, scratch: &mut MutIntScratch) {
        let MutIntScratch {
            wide,
            quotient,
            product,
        } = scratch;
        wide.set_square(lhs);
        self.reduce(wide, quotient, product);
        swap(lhs, wide);
    }

    fn is_compatible(&self, other: &Self) -> bool {
        self.n == other.n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::{BigInt, RandBigInt};
    use num_integer::Integer;
    use rand::random;

    #[test]
    fn mu_test() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let big = BigInt::from(rng.gen_biguint(random::<u64>() % 300 + 1)) + 1u8;
            let reducer = BarrettReduction.build(&MutInt::from(&big)).unwrap();
            let k = reducer.k;
            let expect = (BigInt::from(1) << (64 * k)) / &big;
            assert_eq!(BigInt::from(reducer.mu()), expect);
        }
    }

    #[test]
    fn reduce_test() {
        let mut rng = rand::thread_rng();
        let mut scratch = MutIntScratch::new(4);
        for _ in 0..300 {
            let big = BigInt::from(rng.gen_biguint(random::<u64>() % 300 + 1)) + 1u8;
            let reducer = BarrettReduction.build(&MutInt::from(&big)).unwrap();
            // any z below b^2k is accepted, not just products of residues
            let z = BigInt::from(rng.gen_biguint(64 * reducer.k as u64));
            let mut x = MutInt::from(&z);
            reducer.reduce(&mut x, &mut scratch.quotient, &mut scratch.product);
            assert_eq!(BigInt::from(&x), &z % &big, "{} mod {}", z, big);
        }
    }

    #[test]
    fn power_test() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            // even moduli included
            let big = BigInt::from(rng.gen_biguint(random::<u64>() % 400 + 1)) + 1u8;
            let reducer = BarrettReduction.build(&MutInt::from(&big)).unwrap();
            let a = rng.gen_bigint(500);
            let e = BigInt::from(rng.gen_biguint(150));
            let value = reducer.power(&MutInt::from(&a), &e).unwrap();
            assert_eq!(BigInt::from(&value), a.mod_floor(&big).modpow(&e, &big));
        }

        let n = MutInt::from(1u64 << 40);
        let reducer = BarrettReduction.build(&n).unwrap();
        assert_eq!(reducer.power(&MutInt::from(3), &40u32).unwrap(), 3u64.pow(40) % (1 << 40));
    }

    #[test]
    fn build_error_test() {
        assert_eq!(BarrettReduction.build(&MutInt::new()).err(), Some(Error::NonPositiveModulus));
        assert_eq!(BarrettReduction.build(&MutInt::from(-4)).err(), Some(Error::NonPositiveModulus));
    }
}
