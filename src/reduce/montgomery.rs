//! Montgomery reduction over [MutInt] limbs.
//!
//! With `s` the limb count of the odd modulus `n` and `R = 2^(32 s)`, a value `x` is kept as
//! `x R mod n`. Multiplying two such values and dividing by `R` keeps the form, and dividing
//! by `R` only needs word multiplications by `k0 = -n^-1 mod 2^32` plus a shift.

use super::MutIntScratch;
use crate::error::{Error, Result};
use crate::limb::{self, DoubleLimb, Limb, LIMB_BITS};
use crate::mutint::MutInt;
use crate::traits::{MontgomeryVariant, Reducer, Reduction};
use core::cmp::Ordering;
use core::mem::swap;
use log::debug;

/// Builds [MontgomeryReducer]s using the given multiplication flavor. Odd moduli only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MontgomeryReduction(pub MontgomeryVariant);

impl Default for MontgomeryReduction {
    fn default() -> Self {
        MontgomeryReduction(MontgomeryVariant::Cios)
    }
}

#[derive(Debug, Clone)]
pub struct MontgomeryReducer {
    n: MutInt,
    /// `-n^-1 mod 2^32`
    k0: Limb,
    /// limb count of `n`
    s: usize,
    /// `R mod n`, the Montgomery form of one
    r_mod_n: MutInt,
    /// `R^2 mod n`, converts plain values into the Montgomery form
    r2: MutInt,
    variant: MontgomeryVariant,
}

impl Reduction<MutInt> for MontgomeryReduction {
    type Reducer = MontgomeryReducer;

    fn build(&self, modulus: &MutInt) -> Result<MontgomeryReducer> {
        if modulus.signum() <= 0 {
            return Err(Error::NonPositiveModulus);
        }
        if modulus.is_even() {
            return Err(Error::EvenModulus);
        }
        debug!(
            "building montgomery ({:?}) reducer for a {} bit modulus",
            self.0,
            modulus.bit_length()
        );

        let s = modulus.len();
        let mut r_mod_n = MutInt::with_capacity(2 * s + 2);
        r_mod_n
            .set_u32(1)
            .left_shift(LIMB_BITS * s)
            .reduce_euclid(modulus);
        let mut r2 = MutInt::with_capacity(2 * s + 2);
        r2.set_u32(1)
            .left_shift(2 * LIMB_BITS * s)
            .reduce_euclid(modulus);

        Ok(MontgomeryReducer {
            n: modulus.clone(),
            k0: limb::inverse_limb(modulus.low_word()).wrapping_neg(),
            s,
            r_mod_n,
            r2,
            variant: self.0,
        })
    }
}

/// Montgomery reduction of `t` in place (SOS). `t` holds `2s + 1` words, on return
/// `t[s..=2s]` is `t R^-1 mod n`, possibly plus `n`.
fn reduce_sos(t: &mut [Limb], n: &[Limb], k0: Limb) {
    let s = n.len();
    debug_assert!(t.len() > 2 * s);
    for i in 0..s {
        let m = t[i].wrapping_mul(k0);
        let carry = limb::mul_add_limb(&mut t[i..i + s], n, m);
        limb::add_assign(&mut t[i + s..], &[carry]);
    }
}

/// `t = u v R^-1 mod n`, possibly plus `n` (CIOS). `t` holds `s + 2` zeroed words and the
/// result is left in `t[..=s]`.
fn mul_cios(t: &mut [Limb], u: &[Limb], v: &[Limb], n: &[Limb], k0: Limb) {
    let s = n.len();
    debug_assert!(t.len() >= s + 2 && u.len() <= s && v.len() <= s);
    for i in 0..s {
        let ui = u.get(i).copied().unwrap_or(0);
        let mut carry: DoubleLimb = 0;
        for j in 0..s {
            let vj = v.get(j).copied().unwrap_or(0);
            carry += t[j] as DoubleLimb + ui as DoubleLimb * vj as DoubleLimb;
            t[j] = carry as Limb;
            carry >>= LIMB_BITS;
        }
        carry += t[s] as DoubleLimb;
        t[s] = carry as Limb;
        t[s + 1] = (carry >> LIMB_BITS) as Limb;

        // cancel the low word and shift down by one
        let m = t[0].wrapping_mul(k0);
        let mut carry = (t[0] as DoubleLimb + m as DoubleLimb * n[0] as DoubleLimb) >> LIMB_BITS;
        for j in 1..s {
            carry += t[j] as DoubleLimb + m as DoubleLimb * n[j] as DoubleLimb;
            t[j - 1] = carry as Limb;
            carry >>= LIMB_BITS;
        }
        carry += t[s] as DoubleLimb;
        t[s - 1] = carry as Limb;
        t[s] = t[s + 1] + (carry >> LIMB_BITS) as Limb;
    }
    t[s + 1] = 0;
}

impl MontgomeryReducer {
    #[inline]
    pub fn variant(&self) -> MontgomeryVariant {
        self.variant
    }

    /// Bring a value below `2n` into `[0, n)`.
    #[inline]
    fn finish(&self, t: &mut MutInt) {
        if t.unsigned_cmp(&self.n) != Ordering::Less {
            t.subtract(&self.n);
        }
    }

    /// `t = t R^-1 mod n` for a non-negative `t < n R`.
    fn redc(&self, t: &mut MutInt) {
        let s = self.s;
        let w = t.storage_mut(2 * s + 1);
        reduce_sos(&mut w[..2 * s + 1], self.n.limbs(), self.k0);
        w.copy_within(s..2 * s + 1, 0);
        w[s + 1..2 * s + 1].fill(0);
        t.commit(s + 1, false);
        self.finish(t);
    }

    /// `wide = lhs * rhs R^-1 mod n` with the configured flavor.
    fn product(&self, wide: &mut MutInt, lhs: &MutInt, rhs: &MutInt) {
        match self.variant {
            MontgomeryVariant::Sos => {
                wide.set_product(lhs, rhs);
                self.redc(wide);
            }
            MontgomeryVariant::Cios => {
                let s = self.s;
                wide.set_zero();
                let w = wide.storage_mut(s + 2);
                mul_cios(&mut w[..s + 2], lhs.limbs(), rhs.limbs(), self.n.limbs(), self.k0);
                wide.commit(s + 1, false);
                self.finish(wide);
            }
        }
    }
}

impl Reducer<MutInt> for MontgomeryReducer {
    type Repr = MutInt;
    type Scratch = MutIntScratch;

    #[inline]
    fn modulus(&self) -> &MutInt {
        &self.n
    }

    fn new_repr(&self) -> MutInt {
        MutInt::with_capacity(2 * self.s + 2)
    }

    fn new_scratch(&self) -> MutIntScratch {
        MutIntScratch::new(2 * self.s + 2)
    }

    fn transform(&self, value: &MutInt, out: &mut MutInt, scratch: &mut MutIntScratch) {
        out.set(value).reduce_euclid(&self.n);
        self.mul_assign(out, &self.r2, scratch);
    }

    fn residue(&self, repr: &MutInt) -> MutInt {
        let mut t = MutInt::with_capacity(2 * self.s + 2);
        t.set(repr);
        self.redc(&mut t);
        t
    }

    fn one(&self, out: &mut MutInt) {
        out.set(&self.r_mod_n);
    }

    fn mul_assign(&self, lhs: &mut MutInt, rhs: &MutInt, scratch: &mut MutIntScratch) {
        self.product(&mut scratch.wide, lhs, rhs);
        swap(lhs, &mut scratch.wide);
    }

    fn sqr_assign(&self, lhs: &mut MutInt, scratch: &mut MutIntScratch) {
        self.product(&mut scratch.wide, lhs, lhs);
        swap(lhs, &mut scratch.wide);
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

    const VARIANTS: [MontgomeryVariant; 2] = [MontgomeryVariant::Sos, MontgomeryVariant::Cios];

    fn random_odd(bits: u64) -> BigInt {
        let mut rng = rand::thread_rng();
        BigInt::from(rng.gen_biguint(bits)) | BigInt::from(1)
    }

    #[test]
    fn constants_test() {
        let n = MutInt::from(&random_odd(200));
        let reducer = MontgomeryReduction::default().build(&n).unwrap();
        assert_eq!(reducer.variant(), MontgomeryVariant::Cios);
        assert_eq!(n.low_word().wrapping_mul(reducer.k0), u32::MAX);

        let r = BigInt::from(1) << (32 * reducer.s);
        let big = BigInt::from(&n);
        assert_eq!(BigInt::from(&reducer.r_mod_n), &r % &big);
        assert_eq!(BigInt::from(&reducer.r2), (&r * &r) % &big);
    }

    #[test]
    fn multiply_test() {
        let mut rng = rand::thread_rng();
        for variant in VARIANTS {
            for _ in 0..100 {
                let big = random_odd(random::<u64>() % 400 + 1);
                let n = MutInt::from(&big);
                let reducer = MontgomeryReduction(variant).build(&n).unwrap();
                let a = rng.gen_bigint(500);
                let b = rng.gen_bigint(500);
                let mut x = reducer.to_residue(&MutInt::from(&a));
                let y = reducer.to_residue(&MutInt::from(&b));
                assert_eq!(BigInt::from(&x.value()), a.mod_floor(&big));
                x.multiply(&y);
                assert_eq!(BigInt::from(&x.value()), (&a * &b).mod_floor(&big), "{:?}", variant);
                x.square();
                assert_eq!(BigInt::from(&x.value()), (&a * &b).pow(2).mod_floor(&big));
            }
        }
    }

    #[test]
    fn boundary_operands_test() {
        // all ones moduli push every carry path through the top words
        for variant in VARIANTS {
            for words in 1..6 {
                let big = (BigInt::from(1) << (32 * words)) - 1;
                let n = MutInt::from(&big);
                let reducer = MontgomeryReduction(variant).build(&n).unwrap();
                let a = &big - 1;
                let mut x = reducer.to_residue(&MutInt::from(&a));
                x.square();
                assert_eq!(BigInt::from(&x.value()), (&a * &a) % &big);

                let e = &big - 2;
                let expect = a.modpow(&e, &big);
                assert_eq!(BigInt::from(&reducer.power(&MutInt::from(&a), &e).unwrap()), expect);
            }
        }
    }

    #[test]
    fn scenario_test() {
        let n: MutInt = "10023859281455311421".parse().unwrap();
        let big = BigInt::from(&n);
        let expect = BigInt::from(123456789u32).modpow(&BigInt::from(987654321u32), &big);
        for variant in VARIANTS {
            let reducer = MontgomeryReduction(variant).build(&n).unwrap();
            let value = reducer
                .power(&MutInt::from(123456789u32), &MutInt::from(987654321u32))
                .unwrap();
            assert_eq!(BigInt::from(&value), expect);
        }
    }

    #[test]
    fn build_error_test() {
        let reduction = MontgomeryReduction(MontgomeryVariant::Sos);
        assert_eq!(reduction.build(&MutInt::from(10)).err(), Some(Error::EvenModulus));
        assert_eq!(reduction.build(&MutInt::new()).err(), Some(Error::NonPositiveModulus));
        assert_eq!(reduction.build(&MutInt::from(-9)).err(), Some(Error::NonPositiveModulus));
    }
}
