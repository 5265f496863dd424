//! Number theoretic helpers built on the division kernel.

use super::MutInt;
use crate::error::{Error, Result};
use crate::store::MutIntStore;
use core::mem::swap;

impl MutInt {
    fn check_modulus(n: &MutInt) -> Result<()> {
        if n.is_zero() || n.is_negative() {
            Err(Error::NonPositiveModulus)
        } else {
            Ok(())
        }
    }

    /// `self = gcd(a, b)`, always non-negative.
    pub fn set_gcd(&mut self, a: &MutInt, b: &MutInt, store: &MutIntStore) -> &mut Self {
        let mut x = store.acquire();
        let mut y = store.acquire();
        x.set(a).abs();
        y.set(b).abs();
        while !y.is_zero() {
            x.div_rem_in_place(&y, None);
            swap(&mut *x, &mut *y);
        }
        self.set(&x)
    }

    /// `self = a^-1 mod n` by the extended Euclidean algorithm.
    pub fn set_modular_inverse(&mut self, a: &MutInt, n: &MutInt, store: &MutIntStore) -> Result<&mut Self> {
        Self::check_modulus(n)?;
        let mut r0 = store.acquire();
        let mut r1 = store.acquire();
        let mut t0 = store.acquire();
        let mut t1 = store.acquire();
        let mut q = store.acquire();
        let mut qt = store.acquire();

        r0.set(n);
        r1.set(a).reduce_euclid(n);
        t1.set_u32(1);
        while !r1.is_zero() {
            r0.div_rem_in_place(&r1, Some(&mut *q));
            swap(&mut *r0, &mut *r1);
            qt.set_product(&q, &t1);
            t0.subtract(&qt);
            swap(&mut *t0, &mut *t1);
        }

        if !r0.is_one() {
            return Err(Error::NoInverse);
        }
        Ok(self.set(&t0).reduce_euclid(n))
    }

    /// `self = floor(sqrt(a))` by Newton's iteration from a power of two above the root.
    pub fn set_sqrt(&mut self, a: &MutInt, store: &MutIntStore) -> Result<&mut Self> {
        if a.is_negative() {
            return Err(Error::NegativeRoot);
        }
        if a.bit_length() <= 1 {
            return Ok(self.set(a));
        }

        let mut x = store.acquire();
        let mut y = store.acquire();
        let mut r = store.acquire();
        x.set_u32(1).left_shift((a.bit_length() + 1) / 2);
        loop {
            r.set(a).div_rem_in_place(&x, Some(&mut *y));
            y.add(&x).unsigned_right_shift(1);
            if *y >= *x {
                break;
            }
            swap(&mut *x, &mut *y);
        }
        Ok(self.set(&x))
    }

    /// `self = a * b mod n`, in `[0, n)`.
    pub fn set_modular_product(&mut self, a: &MutInt, b: &MutInt, n: &MutInt) -> Result<&mut Self> {
        Self::check_modulus(n)?;
        Ok(self.set_product(a, b).reduce_euclid(n))
    }

    /// `self = base^exp mod n` by left to right square and multiply with a full division per
    /// step.
    pub fn set_modular_power(
        &mut self,
        base: &MutInt,
        exp: &MutInt,
        n: &MutInt,
        store: &MutIntStore,
    ) -> Result<&mut Self> {
        Self::check_modulus(n)?;
        if exp.is_negative() {
            return Err(Error::NegativeExponent);
        }

        let mut b = store.acquire();
        let mut t = store.acquire();
        b.set(base).reduce_euclid(n);
        self.set_u32(1).reduce_euclid(n);
        for i in (0..exp.bit_length()).rev() {
            t.set_square(self).reduce_euclid(n);
            if exp.bit(i) {
                self.set_product(&t, &b).reduce_euclid(n);
            } else {
                swap(&mut *self, &mut *t);
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::{BigInt, RandBigInt};
    use num_integer::{Integer, Roots};
    use rand::random;

    #[test]
    fn gcd_test() {
        let mut rng = rand::thread_rng();
        let store = MutIntStore::new(4);
        let mut x = MutInt::new();
        for _ in 0..100 {
            let c = rng.gen_bigint(64);
            let a = rng.gen_bigint(200) * &c;
            let b = rng.gen_bigint(150) * &c;
            x.set_gcd(&MutInt::from(&a), &MutInt::from(&b), &store);
            assert_eq!(BigInt::from(&x), a.gcd(&b));
        }
        x.set_gcd(&MutInt::new(), &MutInt::from(-12), &store);
        assert_eq!(x, 12);
        x.set_gcd(&MutInt::new(), &MutInt::new(), &store);
        assert!(x.is_zero());
    }

    #[test]
    fn modular_inverse_test() {
        let mut rng = rand::thread_rng();
        let store = MutIntStore::new(4);
        let mut x = MutInt::new();
        for _ in 0..100 {
            let n = BigInt::from(rng.gen_biguint(random::<u64>() % 200 + 2)) + 2u8;
            let a = rng.gen_bigint(250);
            let result = x.set_modular_inverse(&MutInt::from(&a), &MutInt::from(&n), &store);
            if a.gcd(&n) == BigInt::from(1) {
                assert!(result.is_ok());
                assert_eq!((BigInt::from(&x) * &a).mod_floor(&n), BigInt::from(1));
                assert!(!x.is_negative() && BigInt::from(&x) < n);
            } else {
                assert_eq!(result.err(), Some(Error::NoInverse));
            }
        }

        let n = MutInt::from(10);
        assert_eq!(x.set_modular_inverse(&MutInt::from(3), &n, &store).map(|v| v.clone()), Ok(MutInt::from(7)));
        assert_eq!(x.set_modular_inverse(&MutInt::from(-3), &n, &store).map(|v| v.clone()), Ok(MutInt::from(3)));
        assert_eq!(x.set_modular_inverse(&MutInt::from(4), &n, &store).err(), Some(Error::NoInverse));
        assert_eq!(x.set_modular_inverse(&MutInt::from(4), &MutInt::new(), &store).err(), Some(Error::NonPositiveModulus));
    }

    #[test]
    fn sqrt_test() {
        let mut rng = rand::thread_rng();
        let store = MutIntStore::new(4);
        let mut x = MutInt::new();
        for v in 0u64..300 {
            x.set_sqrt(&MutInt::from(v), &store).unwrap();
            assert_eq!(x, v.sqrt());
        }
        for _ in 0..100 {
            let a = BigInt::from(rng.gen_biguint(random::<u64>() % 500));
            x.set_sqrt(&MutInt::from(&a), &store).unwrap();
            assert_eq!(BigInt::from(&x), a.sqrt());
        }
        assert_eq!(x.set_sqrt(&MutInt::from(-4), &store).err(), Some(Error::NegativeRoot));
    }

    #[test]
    fn modular_power_test() {
        let mut rng = rand::thread_rng();
        let store = MutIntStore::new(4);
        let mut x = MutInt::new();
        for _ in 0..50 {
            let n = BigInt::from(rng.gen_biguint(random::<u64>() % 200 + 1)) + 1u8;
            let a = rng.gen_bigint(300);
            let e = BigInt::from(rng.gen_biguint(100));
            x.set_modular_power(&MutInt::from(&a), &MutInt::from(&e), &MutInt::from(&n), &store)
                .unwrap();
            assert_eq!(BigInt::from(&x), a.mod_floor(&n).modpow(&e, &n));

            x.set_modular_product(&MutInt::from(&a), &MutInt::from(&e), &MutInt::from(&n)).unwrap();
            assert_eq!(BigInt::from(&x), (&a * &e).mod_floor(&n));
        }

        let n = MutInt::from(7);
        assert_eq!(x.set_modular_power(&MutInt::from(3), &MutInt::from(-1), &n, &store).err(), Some(Error::NegativeExponent));
        assert_eq!(x.set_modular_power(&MutInt::from(3), &MutInt::new(), &MutInt::from(-7), &store).err(), Some(Error::NonPositiveModulus));
        x.set_modular_power(&MutInt::from(3), &MutInt::new(), &MutInt::from(1), &store).unwrap();
        assert!(x.is_zero());
    }
}
