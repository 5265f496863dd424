use crate::limb::LIMB_BITS;
use crate::mutint::MutInt;
use crate::RandInteger;
use core::cmp::Ordering;
use num_bigint::{BigInt, RandBigInt};
use num_traits::{Signed, Zero};
use rand::Rng;

macro_rules! impl_randint_prim {
    ($($T:ty)*) => {$(
        impl<R: Rng> RandInteger<$T> for R {
            #[inline]
            fn gen_integer(&mut self, bits: usize) -> $T {
                if bits > (<$T>::BITS as usize) {
                    panic!("The given bit size limit exceeded the capacity of the integer type!")
                }
                if bits == 0 {
                    return 0;
                }
                let t: $T = self.gen();
                t >> (<$T>::BITS - bits as u32)
            }

            #[inline]
            fn gen_integer_below(&mut self, bound: &$T) -> $T {
                if *bound == 0 {
                    panic!("The upper bound must be positive!")
                }
                self.gen_range(0..*bound)
            }
        }
    )*}
}
impl_randint_prim!(u32 u64 u128);

impl<R: Rng> RandInteger<BigInt> for R {
    #[inline]
    fn gen_integer(&mut self, bits: usize) -> BigInt {
        BigInt::from(self.gen_biguint(bits as u64))
    }

    #[inline]
    fn gen_integer_below(&mut self, bound: &BigInt) -> BigInt {
        if !bound.is_positive() {
            panic!("The upper bound must be positive!")
        }
        self.gen_bigint_range(&BigInt::zero(), bound)
    }
}

/// Overwrite `x` with `bits` random bits.
fn fill_bits<R: Rng>(rng: &mut R, x: &mut MutInt, bits: usize) {
    let words = (bits + LIMB_BITS - 1) / LIMB_BITS;
    if words == 0 {
        x.set_zero();
        return;
    }
    let w = x.storage_mut(words);
    rng.fill(&mut w[..words]);
    let partial = bits % LIMB_BITS;
    if partial != 0 {
        w[words - 1] &= (1 << partial) - 1;
    }
    x.commit(words, false);
}

impl<R: Rng> RandInteger<MutInt> for R {
    fn gen_integer(&mut self, bits: usize) -> MutInt {
        let mut x = MutInt::with_capacity((bits + LIMB_BITS - 1) / LIMB_BITS);
        fill_bits(self, &mut x, bits);
        x
    }

    fn gen_integer_below(&mut self, bound: &MutInt) -> MutInt {
        if bound.signum() <= 0 {
            panic!("The upper bound must be positive!")
        }
        // rejection sampling, each round succeeds with probability above one half
        let bits = bound.bit_length();
        let mut x = MutInt::with_capacity(bound.len());
        loop {
            fill_bits(self, &mut x, bits);
            if x.unsigned_cmp(bound) == Ordering::Less {
                break x;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_bits_test() {
        let mut rng = rand::thread_rng();
        for bits in [0usize, 1, 7, 32] {
            let v: u32 = rng.gen_integer(bits);
            assert!((v as u64) < 1u64 << bits);
        }
        for _ in 0..100 {
            let v: u64 = rng.gen_integer(40);
            assert!(v < 1 << 40);
            let v: u128 = rng.gen_integer(128);
            let _ = v;
            let v: u64 = rng.gen_integer_below(&1000);
            assert!(v < 1000);
        }
    }

    #[test]
    #[should_panic]
    fn native_bits_overflow_test() {
        let mut rng = rand::thread_rng();
        let _: u32 = rng.gen_integer(33);
    }

    #[test]
    fn big_test() {
        let mut rng = rand::thread_rng();
        for bits in [0usize, 1, 31, 32, 33, 100, 512] {
            for _ in 0..20 {
                let v: MutInt = rng.gen_integer(bits);
                assert!(v.bit_length() <= bits);
                assert!(!v.is_negative());
                let v: BigInt = rng.gen_integer(bits);
                assert!(v.bits() as usize <= bits);
            }
        }

        let bound: MutInt = "340282366920938463463374607431768211457".parse().unwrap();
        let big_bound = BigInt::from(&bound);
        let mut seen_high = false;
        for _ in 0..100 {
            let v: MutInt = rng.gen_integer_below(&bound);
            assert!(!v.is_negative() && v < bound);
            seen_high |= v.bit_length() > 64;
            let v: BigInt = rng.gen_integer_below(&big_bound);
            assert!(v < big_bound && !v.is_negative());
        }
        assert!(seen_high);

        let one = MutInt::from(1);
        assert!(rng.gen_integer_below(&one).is_zero());
    }

    #[test]
    #[should_panic]
    fn big_nonpositive_bound_test() {
        let mut rng = rand::thread_rng();
        let _: MutInt = rng.gen_integer_below(&MutInt::from(-3));
    }
}
