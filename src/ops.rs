//! Backend implementations of the operations table for every supported representation

use crate::error::{Error, Result};
use crate::mutint::MutInt;
use crate::store::MutIntStore;
use crate::traits::{BitTest, Numeric, NumericOps};
use core::cmp::Ordering;
use core::convert::TryFrom;
use num_bigint::{BigInt, Sign};
use num_integer::{ExtendedGcd, Integer, Roots};
use num_modular::{ModularCoreOps, ModularPow, ModularUnaryOps};
use num_traits::{One, Signed, Zero};
use once_cell::sync::Lazy;

macro_rules! impl_bittest_prim {
    ($($T:ty)*) => {$(
        impl BitTest for $T {
            #[inline]
            fn bits(&self) -> usize {
                (<$T>::BITS - self.leading_zeros()) as usize
            }
            #[inline]
            fn bit(&self, position: usize) -> bool {
                position < <$T>::BITS as usize && (self >> position) & 1 == 1
            }
            #[inline]
            fn trailing_zeros(&self) -> usize {
                if *self == 0 {
                    0
                } else {
                    <$T>::trailing_zeros(*self) as usize
                }
            }
        }
    )*}
}
impl_bittest_prim!(u8 u16 u32 u64 u128 usize);

macro_rules! impl_bittest_signed {
    ($($T:ty)*) => {$(
        impl BitTest for $T {
            #[inline]
            fn bits(&self) -> usize {
                self.unsigned_abs().bits()
            }
            #[inline]
            fn bit(&self, position: usize) -> bool {
                self.unsigned_abs().bit(position)
            }
            #[inline]
            fn trailing_zeros(&self) -> usize {
                BitTest::trailing_zeros(&self.unsigned_abs())
            }
            #[inline]
            fn is_negative(&self) -> bool {
                *self < 0
            }
        }
    )*}
}
impl_bittest_signed!(i8 i16 i32 i64 i128 isize);

impl BitTest for BigInt {
    fn bits(&self) -> usize {
        BigInt::bits(self) as usize
    }
    fn bit(&self, position: usize) -> bool {
        self.magnitude().bit(position as u64)
    }
    #[inline]
    fn trailing_zeros(&self) -> usize {
        match BigInt::trailing_zeros(self) {
            Some(a) => a as usize,
            None => 0,
        }
    }
    #[inline]
    fn is_negative(&self) -> bool {
        self.sign() == Sign::Minus
    }
}

impl BitTest for MutInt {
    #[inline]
    fn bits(&self) -> usize {
        self.bit_length()
    }
    #[inline]
    fn bit(&self, position: usize) -> bool {
        MutInt::bit(self, position)
    }
    #[inline]
    fn trailing_zeros(&self) -> usize {
        MutInt::trailing_zeros(self)
    }
    #[inline]
    fn is_negative(&self) -> bool {
        MutInt::is_negative(self)
    }
}

/// Magnitude of a native value as its unsigned counterpart
trait Magnitude {
    type Unsigned;
    fn magnitude(self) -> Self::Unsigned;
}

macro_rules! impl_magnitude {
    (signed $($T:ty => $U:ty),*) => {$(
        impl Magnitude for $T {
            type Unsigned = $U;
            #[inline]
            fn magnitude(self) -> $U {
                self.unsigned_abs()
            }
        }
    )*};
    (unsigned $($T:ty),*) => {$(
        impl Magnitude for $T {
            type Unsigned = $T;
            #[inline]
            fn magnitude(self) -> $T {
                self
            }
        }
    )*};
}
impl_magnitude!(signed i32 => u32, i64 => u64, i128 => u128);
impl_magnitude!(unsigned u32, u64, u128);

macro_rules! impl_native_ops {
    ($($Ops:ident => $T:ty, $U:ty;)*) => {$(
        #[doc = concat!("Operations table for `", stringify!($T), "`. Arithmetic wraps on overflow.")]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $Ops;

        impl $Ops {
            /// Check the modulus and return it as the unsigned counterpart.
            #[inline]
            fn check_modulus(n: $T) -> Result<$U> {
                if n <= <$T as Zero>::zero() {
                    Err(Error::NonPositiveModulus)
                } else {
                    Ok(n as $U)
                }
            }

            /// `a mod n` in `[0, n)` for a positive `n`
            #[inline]
            fn reduce(a: $T, n: $T) -> $U {
                a.rem_euclid(n) as $U
            }
        }

        impl NumericOps<$T> for $Ops {
            #[inline]
            fn zero(&self) -> $T {
                0
            }
            #[inline]
            fn one(&self) -> $T {
                1
            }
            #[inline]
            fn two(&self) -> $T {
                2
            }
            #[inline]
            fn from_i32(&self, value: i32) -> $T {
                value as $T
            }

            #[inline]
            fn is_zero(&self, a: &$T) -> bool {
                *a == 0
            }
            #[inline]
            fn is_one(&self, a: &$T) -> bool {
                *a == 1
            }
            #[inline]
            fn is_even(&self, a: &$T) -> bool {
                a & 1 == 0
            }

            #[inline]
            fn add(&self, a: &$T, b: &$T) -> $T {
                a.wrapping_add(*b)
            }
            #[inline]
            fn subtract(&self, a: &$T, b: &$T) -> $T {
                a.wrapping_sub(*b)
            }
            #[inline]
            fn multiply(&self, a: &$T, b: &$T) -> $T {
                a.wrapping_mul(*b)
            }
            #[inline]
            fn divide(&self, a: &$T, b: &$T) -> Result<$T> {
                if *b == 0 {
                    Err(Error::DivisionByZero)
                } else {
                    Ok(a.wrapping_div(*b))
                }
            }
            #[inline]
            fn modulus(&self, a: &$T, b: &$T) -> Result<$T> {
                if *b == 0 {
                    Err(Error::DivisionByZero)
                } else {
                    Ok(a.wrapping_rem(*b))
                }
            }
            #[inline]
            fn negate(&self, a: &$T) -> $T {
                a.wrapping_neg()
            }

            #[inline]
            fn shift_left(&self, a: &$T, n: usize) -> $T {
                if n >= <$T>::BITS as usize {
                    0
                } else {
                    a << n
                }
            }
            #[inline]
            fn shift_right(&self, a: &$T, n: usize) -> $T {
                if n < <$T>::BITS as usize {
                    a >> n
                } else if <$T>::MIN == 0 {
                    0
                } else {
                    // all sign bits
                    a >> (<$T>::BITS - 1)
                }
            }
            #[inline]
            fn and(&self, a: &$T, b: &$T) -> $T {
                a & b
            }
            #[inline]
            fn or(&self, a: &$T, b: &$T) -> $T {
                a | b
            }
            #[inline]
            fn xor(&self, a: &$T, b: &$T) -> $T {
                a ^ b
            }
            #[inline]
            fn not(&self, a: &$T) -> $T {
                !a
            }

            #[inline]
            fn compare(&self, a: &$T, b: &$T) -> Ordering {
                a.cmp(b)
            }

            fn to_canonical(&self, a: &$T) -> BigInt {
                BigInt::from(*a)
            }
            fn from_canonical(&self, a: &BigInt) -> Result<$T> {
                <$T>::try_from(a).map_err(|_| Error::Overflow(stringify!($T)))
            }

            fn gcd(&self, a: &$T, b: &$T) -> $T {
                Magnitude::magnitude(*a).gcd(&Magnitude::magnitude(*b)) as $T
            }
            fn modular_sum(&self, a: &$T, b: &$T, n: &$T) -> Result<$T> {
                let m = Self::check_modulus(*n)?;
                let (x, y) = (Self::reduce(*a, *n), Self::reduce(*b, *n));
                Ok(x.addm(y, &m) as $T)
            }
            fn modular_difference(&self, a: &$T, b: &$T, n: &$T) -> Result<$T> {
                let m = Self::check_modulus(*n)?;
                let (x, y) = (Self::reduce(*a, *n), Self::reduce(*b, *n));
                Ok(x.subm(y, &m) as $T)
            }
            fn modular_product(&self, a: &$T, b: &$T, n: &$T) -> Result<$T> {
                let m = Self::check_modulus(*n)?;
                let (x, y) = (Self::reduce(*a, *n), Self::reduce(*b, *n));
                Ok(x.mulm(y, &m) as $T)
            }
            fn modular_power(&self, base: &$T, exponent: &$T, n: &$T) -> Result<$T> {
                let m = Self::check_modulus(*n)?;
                if *exponent < <$T as Zero>::zero() {
                    return Err(Error::NegativeExponent);
                }
                if m == 1 {
                    return Ok(0);
                }
                Ok(Self::reduce(*base, *n).powm(*exponent as $U, &m) as $T)
            }
            fn modular_inverse(&self, a: &$T, n: &$T) -> Result<$T> {
                let m = Self::check_modulus(*n)?;
                if m == 1 {
                    return Ok(0);
                }
                Self::reduce(*a, *n)
                    .invm(&m)
                    .map(|v| v as $T)
                    .ok_or(Error::NoInverse)
            }
            fn integer_sqrt(&self, a: &$T) -> Result<$T> {
                if *a < <$T as Zero>::zero() {
                    Err(Error::NegativeRoot)
                } else {
                    Ok(Roots::sqrt(a))
                }
            }
        }

        impl Numeric for $T {
            type Ops = $Ops;

            #[inline]
            fn ops() -> &'static $Ops {
                &$Ops
            }
        }
    )*}
}
impl_native_ops! {
    Int32Ops => i32, u32;
    UInt32Ops => u32, u32;
    Int64Ops => i64, u64;
    UInt64Ops => u64, u64;
    Int128Ops => i128, u128;
    UInt128Ops => u128, u128;
}

/// Operations table for [BigInt], the canonical representation.
pub struct BigIntOps {
    zero: BigInt,
    one: BigInt,
    two: BigInt,
}

static BIGINT_OPS: Lazy<BigIntOps> = Lazy::new(|| BigIntOps {
    zero: BigInt::zero(),
    one: BigInt::one(),
    two: BigInt::from(2u8),
});

impl BigIntOps {
    fn check_modulus(n: &BigInt) -> Result<()> {
        if n.is_positive() {
            Ok(())
        } else {
            Err(Error::NonPositiveModulus)
        }
    }
}

impl NumericOps<BigInt> for BigIntOps {
    fn zero(&self) -> BigInt {
        self.zero.clone()
    }
    fn one(&self) -> BigInt {
        self.one.clone()
    }
    fn two(&self) -> BigInt {
        self.two.clone()
    }
    fn from_i32(&self, value: i32) -> BigInt {
        BigInt::from(value)
    }

    fn is_zero(&self, a: &BigInt) -> bool {
        a.is_zero()
    }
    fn is_one(&self, a: &BigInt) -> bool {
        a.is_one()
    }
    fn is_even(&self, a: &BigInt) -> bool {
        Integer::is_even(a)
    }

    fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a + b
    }
    fn subtract(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a - b
    }
    fn multiply(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a * b
    }
    fn divide(&self, a: &BigInt, b: &BigInt) -> Result<BigInt> {
        if b.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(a / b)
    }
    fn modulus(&self, a: &BigInt, b: &BigInt) -> Result<BigInt> {
        if b.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(a % b)
    }
    fn negate(&self, a: &BigInt) -> BigInt {
        -a
    }

    fn shift_left(&self, a: &BigInt, n: usize) -> BigInt {
        a << n
    }
    fn shift_right(&self, a: &BigInt, n: usize) -> BigInt {
        a >> n
    }
    fn and(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a & b
    }
    fn or(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a | b
    }
    fn xor(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a ^ b
    }
    fn not(&self, a: &BigInt) -> BigInt {
        !a
    }

    fn compare(&self, a: &BigInt, b: &BigInt) -> Ordering {
        a.cmp(b)
    }

    fn to_canonical(&self, a: &BigInt) -> BigInt {
        a.clone()
    }
    fn from_canonical(&self, a: &BigInt) -> Result<BigInt> {
        Ok(a.clone())
    }

    fn gcd(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a.gcd(b)
    }
    fn modular_sum(&self, a: &BigInt, b: &BigInt, n: &BigInt) -> Result<BigInt> {
        Self::check_modulus(n)?;
        Ok((a + b).mod_floor(n))
    }
    fn modular_difference(&self, a: &BigInt, b: &BigInt, n: &BigInt) -> Result<BigInt> {
        Self::check_modulus(n)?;
        Ok((a - b).mod_floor(n))
    }
    fn modular_product(&self, a: &BigInt, b: &BigInt, n: &BigInt) -> Result<BigInt> {
        Self::check_modulus(n)?;
        Ok((a * b).mod_floor(n))
    }
    fn modular_power(&self, base: &BigInt, exponent: &BigInt, n: &BigInt) -> Result<BigInt> {
        Self::check_modulus(n)?;
        if Signed::is_negative(exponent) {
            return Err(Error::NegativeExponent);
        }
        Ok(base.mod_floor(n).modpow(exponent, n))
    }
    fn modular_inverse(&self, a: &BigInt, n: &BigInt) -> Result<BigInt> {
        Self::check_modulus(n)?;
        let ExtendedGcd { gcd, x, .. } = a.mod_floor(n).extended_gcd(n);
        if gcd.is_one() {
            Ok(x.mod_floor(n))
        } else {
            Err(Error::NoInverse)
        }
    }
    fn integer_sqrt(&self, a: &BigInt) -> Result<BigInt> {
        if Signed::is_negative(a) {
            return Err(Error::NegativeRoot);
        }
        Ok(Roots::sqrt(a))
    }
}

impl Numeric for BigInt {
    type Ops = BigIntOps;

    fn ops() -> &'static BigIntOps {
        &BIGINT_OPS
    }
}

/// Operations table for [MutInt]. Operations that need scratch values draw them from a
/// thread local [MutIntStore].
pub struct MutIntOps {
    zero: MutInt,
    one: MutInt,
    two: MutInt,
}

static MUTINT_OPS: Lazy<MutIntOps> = Lazy::new(|| MutIntOps {
    zero: MutInt::new(),
    one: MutInt::from(1u32),
    two: MutInt::from(2u32),
});

thread_local! {
    static STORE: MutIntStore = MutIntStore::new(8);
}

fn with_store<R>(f: impl FnOnce(&MutIntStore) -> R) -> R {
    STORE.with(f)
}

impl MutIntOps {
    fn check_modulus(n: &MutInt) -> Result<()> {
        if n.signum() > 0 {
            Ok(())
        } else {
            Err(Error::NonPositiveModulus)
        }
    }
}

impl NumericOps<MutInt> for MutIntOps {
    fn zero(&self) -> MutInt {
        self.zero.clone()
    }
    fn one(&self) -> MutInt {
        self.one.clone()
    }
    fn two(&self) -> MutInt {
        self.two.clone()
    }
    fn from_i32(&self, value: i32) -> MutInt {
        MutInt::from(value)
    }

    fn is_zero(&self, a: &MutInt) -> bool {
        a.is_zero()
    }
    fn is_one(&self, a: &MutInt) -> bool {
        a.is_one()
    }
    fn is_even(&self, a: &MutInt) -> bool {
        a.is_even()
    }

    fn add(&self, a: &MutInt, b: &MutInt) -> MutInt {
        let mut r = MutInt::with_capacity(a.len().max(b.len()) + 1);
        r.set_sum(a, b);
        r
    }
    fn subtract(&self, a: &MutInt, b: &MutInt) -> MutInt {
        let mut r = MutInt::with_capacity(a.len().max(b.len()) + 1);
        r.set_difference(a, b);
        r
    }
    fn multiply(&self, a: &MutInt, b: &MutInt) -> MutInt {
        let mut r = MutInt::with_capacity(a.len() + b.len());
        r.set_product(a, b);
        r
    }
    fn divide(&self, a: &MutInt, b: &MutInt) -> Result<MutInt> {
        let mut r = MutInt::with_capacity(a.len());
        with_store(|store| r.set_quotient(a, b, store).map(|_| ()))?;
        Ok(r)
    }
    fn modulus(&self, a: &MutInt, b: &MutInt) -> Result<MutInt> {
        let mut r = a.clone();
        r.modulo(b)?;
        Ok(r)
    }
    fn negate(&self, a: &MutInt) -> MutInt {
        -a
    }

    fn shift_left(&self, a: &MutInt, n: usize) -> MutInt {
        let mut r = a.clone();
        r.left_shift(n);
        r
    }
    fn shift_right(&self, a: &MutInt, n: usize) -> MutInt {
        let mut r = a.clone();
        r.right_shift(n);
        r
    }
    fn and(&self, a: &MutInt, b: &MutInt) -> MutInt {
        let mut r = MutInt::new();
        with_store(|store| {
            r.set_and(a, b, store);
        });
        r
    }
    fn or(&self, a: &MutInt, b: &MutInt) -> MutInt {
        let mut r = MutInt::new();
        with_store(|store| {
            r.set_or(a, b, store);
        });
        r
    }
    fn xor(&self, a: &MutInt, b: &MutInt) -> MutInt {
        let mut r = MutInt::new();
        with_store(|store| {
            r.set_xor(a, b, store);
        });
        r
    }
    fn not(&self, a: &MutInt) -> MutInt {
        let mut r = MutInt::with_capacity(a.len() + 1);
        r.set_not(a);
        r
    }

    fn compare(&self, a: &MutInt, b: &MutInt) -> Ordering {
        a.cmp(b)
    }

    fn to_canonical(&self, a: &MutInt) -> BigInt {
        BigInt::from(a)
    }
    fn from_canonical(&self, a: &BigInt) -> Result<MutInt> {
        Ok(MutInt::from(a))
    }

    fn gcd(&self, a: &MutInt, b: &MutInt) -> MutInt {
        let mut r = MutInt::new();
        with_store(|store| {
            r.set_gcd(a, b, store);
        });
        r
    }
    fn modular_sum(&self, a: &MutInt, b: &MutInt, n: &MutInt) -> Result<MutInt> {
        Self::check_modulus(n)?;
        let mut r = MutInt::with_capacity(n.len() + 1);
        r.set_sum(a, b).modulo_euclid(n)?;
        Ok(r)
    }
    fn modular_difference(&self, a: &MutInt, b: &MutInt, n: &MutInt) -> Result<MutInt> {
        Self::check_modulus(n)?;
        let mut r = MutInt::with_capacity(n.len() + 1);
        r.set_difference(a, b).modulo_euclid(n)?;
        Ok(r)
    }
    fn modular_product(&self, a: &MutInt, b: &MutInt, n: &MutInt) -> Result<MutInt> {
        let mut r = MutInt::with_capacity(a.len() + b.len());
        r.set_modular_product(a, b, n)?;
        Ok(r)
    }
    fn modular_power(&self, base: &MutInt, exponent: &MutInt, n: &MutInt) -> Result<MutInt> {
        let mut r = MutInt::with_capacity(2 * n.len());
        with_store(|store| r.set_modular_power(base, exponent, n, store).map(|_| ()))?;
        Ok(r)
    }
    fn modular_inverse(&self, a: &MutInt, n: &MutInt) -> Result<MutInt> {
        let mut r = MutInt::with_capacity(n.len());
        with_store(|store| r.set_modular_inverse(a, n, store).map(|_| ()))?;
        Ok(r)
    }
    fn integer_sqrt(&self, a: &MutInt) -> Result<MutInt> {
        let mut r = MutInt::new();
        with_store(|store| r.set_sqrt(a, store).map(|_| ()))?;
        Ok(r)
    }
}

impl Numeric for MutInt {
    type Ops = MutIntOps;

    fn ops() -> &'static MutIntOps {
        &MUTINT_OPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::RandBigInt;
    use rand::random;

    /// Compare every modular operation of `T` against the canonical implementation.
    fn check_modular<T: Numeric>(values: &[T], moduli: &[T]) {
        let ops = T::ops();
        let big = BigInt::ops();
        let canon = |r: Result<T>| r.map(|v| ops.to_canonical(&v));
        for n in moduli {
            let cn = ops.to_canonical(n);
            for a in values {
                let ca = ops.to_canonical(a);
                assert_eq!(canon(ops.modular_inverse(a, n)), big.modular_inverse(&ca, &cn));
                for b in values {
                    let cb = ops.to_canonical(b);
                    assert_eq!(canon(ops.modular_sum(a, b, n)), big.modular_sum(&ca, &cb, &cn));
                    assert_eq!(
                        canon(ops.modular_difference(a, b, n)),
                        big.modular_difference(&ca, &cb, &cn)
                    );
                    assert_eq!(
                        canon(ops.modular_product(a, b, n)),
                        big.modular_product(&ca, &cb, &cn),
                        "{} * {} mod {}",
                        ca,
                        cb,
                        cn
                    );
                    assert_eq!(
                        canon(ops.modular_power(a, b, n)),
                        big.modular_power(&ca, &cb, &cn),
                        "{} ^ {} mod {}",
                        ca,
                        cb,
                        cn
                    );
                }
            }
        }
    }

    #[test]
    fn native_modular_test() {
        let mut values: Vec<i64> = vec![0, 1, -1, 2, i64::MAX, i64::MIN, 1 << 40];
        values.extend((0..6).map(|_| random::<i64>()));
        check_modular(&values, &[1, 2, 7, 1_000_000_007, i64::MAX]);
        assert_eq!(Int64Ops.modular_sum(&1, &1, &0), Err(Error::NonPositiveModulus));
        assert_eq!(Int64Ops.modular_sum(&1, &1, &-5), Err(Error::NonPositiveModulus));

        let mut values: Vec<u32> = vec![0, 1, 2, u32::MAX];
        values.extend((0..6).map(|_| random::<u32>()));
        check_modular(&values, &[1, 6, 65537, u32::MAX]);

        let mut values: Vec<u128> = vec![0, 1, u128::MAX];
        values.extend((0..4).map(|_| random::<u128>()));
        check_modular(&values, &[3, (1 << 89) - 1, u128::MAX]);

        let values: Vec<i32> = vec![0, 5, -5, i32::MIN, i32::MAX];
        check_modular(&values, &[9, i32::MAX]);
    }

    #[test]
    fn big_modular_test() {
        let mut rng = rand::thread_rng();
        let mut values: Vec<BigInt> = vec![BigInt::zero(), BigInt::from(-3), BigInt::from(12)];
        values.extend((0..4).map(|_| rng.gen_bigint(150)));
        let moduli = vec![BigInt::from(1), BigInt::from(12), BigInt::from(rng.gen_biguint(130)) + 1u8];
        let mvalues: Vec<MutInt> = values.iter().map(MutInt::from).collect();
        let mmoduli: Vec<MutInt> = moduli.iter().map(MutInt::from).collect();
        check_modular(&mvalues, &mmoduli);
        check_modular(&values, &moduli);

        let ops = BigInt::ops();
        let (a, n) = (BigInt::from(5), BigInt::from(13));
        assert_eq!(ops.modular_power(&a, &BigInt::from(-2), &n), Err(Error::NegativeExponent));
        assert_eq!(ops.modular_power(&a, &BigInt::from(2), &n), Ok(BigInt::from(12)));
        assert_eq!(ops.integer_sqrt(&BigInt::from(-4)), Err(Error::NegativeRoot));
        assert_eq!(ops.integer_sqrt(&BigInt::from(17)), Ok(BigInt::from(4)));
    }

    #[test]
    fn native_wrapping_test() {
        let ops = i32::ops();
        assert_eq!(ops.add(&i32::MAX, &1), i32::MIN);
        assert_eq!(ops.negate(&i32::MIN), i32::MIN);
        assert_eq!(ops.divide(&i32::MIN, &-1), Ok(i32::MIN));
        assert_eq!(ops.divide(&7, &0), Err(Error::DivisionByZero));
        assert_eq!(ops.modulus(&-7, &3), Ok(-1));
        assert_eq!(ops.shift_right(&-7, 1), -4);
        assert_eq!(ops.shift_right(&-7, 40), -1);
        assert_eq!(ops.shift_left(&1, 40), 0);
        assert_eq!(ops.not(&5), -6);
        assert_eq!(ops.gcd(&i32::MIN, &6), 2);
        // 2^31 does not fit and wraps like the other native operations
        assert_eq!(ops.gcd(&i32::MIN, &0), i32::MIN);
        assert_eq!(i64::ops().gcd(&i64::MIN, &i64::MIN), i64::MIN);
        assert_eq!(i64::ops().gcd(&-12, &-18), 6);
        assert_eq!(ops.from_canonical(&BigInt::from(1u64 << 31)), Err(Error::Overflow("i32")));
        assert_eq!(ops.integer_sqrt(&-1), Err(Error::NegativeRoot));

        let ops = u64::ops();
        assert_eq!(ops.subtract(&0, &1), u64::MAX);
        assert_eq!(ops.shift_right(&u64::MAX, 64), 0);
        assert_eq!(ops.from_i32(-1), u64::MAX);
        assert_eq!(ops.integer_sqrt(&u64::MAX), Ok(u32::MAX as u64));
        assert!(ops.is_even(&0) && !ops.is_even(&u64::MAX));
    }

    #[test]
    fn mutint_matches_bigint_test() {
        let mut rng = rand::thread_rng();
        let ops = MutInt::ops();
        let big = BigInt::ops();
        let mut values: Vec<BigInt> = vec![BigInt::zero(), BigInt::one(), -BigInt::one()];
        for _ in 0..12 {
            values.push(rng.gen_bigint(random::<u64>() % 260));
        }

        for a in &values {
            let ma = MutInt::from(a);
            assert_eq!(ops.to_canonical(&ops.negate(&ma)), -a);
            assert_eq!(ops.to_canonical(&ops.not(&ma)), !a);
            assert_eq!(ops.is_even(&ma), Integer::is_even(a));
            assert_eq!(ops.integer_sqrt(&ma).map(|v| BigInt::from(&v)), big.integer_sqrt(a));
            for n in [0usize, 3, 32, 77] {
                assert_eq!(ops.to_canonical(&ops.shift_left(&ma, n)), a << n);
                assert_eq!(ops.to_canonical(&ops.shift_right(&ma, n)), a >> n);
            }
            for b in &values {
                let mb = MutInt::from(b);
                let canon = |v: MutInt| BigInt::from(&v);
                assert_eq!(canon(ops.add(&ma, &mb)), a + b);
                assert_eq!(canon(ops.subtract(&ma, &mb)), a - b);
                assert_eq!(canon(ops.multiply(&ma, &mb)), a * b);
                assert_eq!(ops.divide(&ma, &mb).map(canon), big.divide(a, b));
                assert_eq!(ops.modulus(&ma, &mb).map(canon), big.modulus(a, b));
                assert_eq!(canon(ops.and(&ma, &mb)), a & b);
                assert_eq!(canon(ops.or(&ma, &mb)), a | b);
                assert_eq!(canon(ops.xor(&ma, &mb)), a ^ b);
                assert_eq!(canon(ops.gcd(&ma, &mb)), a.gcd(b));
                assert_eq!(ops.compare(&ma, &mb), a.cmp(b));
                assert_eq!(ops.equals(&ma, &mb), a == b);
            }
        }
        assert!(ops.is_one(&ops.one()) && ops.is_zero(&ops.zero()));
        assert_eq!(ops.two(), 2);
        assert_eq!(ops.from_i32(-9), -9);
    }

    #[test]
    fn bittest_test() {
        assert_eq!(BitTest::bits(&0u32), 0);
        assert_eq!(BitTest::bits(&-8i64), 4);
        assert!(BitTest::bit(&5u8, 2) && !BitTest::bit(&5u8, 200));
        assert!(BitTest::is_negative(&-1i32) && !BitTest::is_negative(&1u32));
        assert_eq!(BitTest::trailing_zeros(&0u64), 0);
        let b = BigInt::from(-40);
        assert_eq!(BitTest::bits(&b), 6);
        assert!(BitTest::bit(&b, 3) && BitTest::bit(&b, 5) && !BitTest::bit(&b, 4));
        assert_eq!(BitTest::trailing_zeros(&b), 3);
        let m = MutInt::from(-40);
        assert_eq!(BitTest::bits(&m), 6);
        assert!(BitTest::is_negative(&m) && BitTest::bit(&m, 5));
    }
}
