//! Value type giving every [Numeric] representation the usual operators.

use crate::error::Result;
use crate::traits::{Numeric, NumericOps};
use core::cmp::Ordering;
use core::fmt;
use core::ops::*;
use num_bigint::BigInt;
use num_traits::{One, Zero};

/// An integer of representation `T` whose operators delegate to `T`'s operations table.
///
/// Generic algorithms written against `Integer<T>` run unchanged over machine words and
/// arbitrary precision values. Arithmetic on native representations wraps on overflow.
/// Division and remainder by zero panic like the primitive operators; use
/// [checked_div](Self::checked_div) and [checked_rem](Self::checked_rem) to get the error.
///
/// ```
/// use num_residue::{Integer, MutInt};
///
/// fn sum_of_squares<T: num_residue::Numeric>(values: &[Integer<T>]) -> Integer<T> {
///     values.iter().fold(Integer::from_i32(0), |acc, v| acc + v * v)
/// }
///
/// let words: Vec<Integer<u64>> = (1..4).map(Integer::from_i32).collect();
/// let bigs: Vec<Integer<MutInt>> = (1..4).map(Integer::from_i32).collect();
/// assert_eq!(sum_of_squares(&words).into_inner(), 14);
/// assert_eq!(sum_of_squares(&bigs).to_string(), "14");
/// ```
#[derive(Clone)]
pub struct Integer<T: Numeric>(T);

impl<T: Numeric> Integer<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Integer(value)
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }

    pub fn from_i32(value: i32) -> Self {
        Integer(T::ops().from_i32(value))
    }

    #[inline]
    pub fn two() -> Self {
        Integer(T::ops().two())
    }

    /// Add one in place, wrapping for native types.
    pub fn increment(&mut self) -> &mut Self {
        let ops = T::ops();
        self.0 = ops.add(&self.0, &ops.one());
        self
    }

    /// Subtract one in place, wrapping for native types.
    pub fn decrement(&mut self) -> &mut Self {
        let ops = T::ops();
        self.0 = ops.subtract(&self.0, &ops.one());
        self
    }

    pub fn is_even(&self) -> bool {
        T::ops().is_even(&self.0)
    }

    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        T::ops().divide(&self.0, &rhs.0).map(Integer)
    }

    pub fn checked_rem(&self, rhs: &Self) -> Result<Self> {
        T::ops().modulus(&self.0, &rhs.0).map(Integer)
    }

    pub fn gcd(&self, other: &Self) -> Self {
        Integer(T::ops().gcd(&self.0, &other.0))
    }

    /// Floor of the square root
    pub fn sqrt(&self) -> Result<Self> {
        T::ops().integer_sqrt(&self.0).map(Integer)
    }

    pub fn modular_sum(&self, other: &Self, n: &Self) -> Result<Self> {
        T::ops().modular_sum(&self.0, &other.0, &n.0).map(Integer)
    }

    pub fn modular_difference(&self, other: &Self, n: &Self) -> Result<Self> {
        T::ops()
            .modular_difference(&self.0, &other.0, &n.0)
            .map(Integer)
    }

    pub fn modular_product(&self, other: &Self, n: &Self) -> Result<Self> {
        T::ops().modular_product(&self.0, &other.0, &n.0).map(Integer)
    }

    pub fn modular_power(&self, exponent: &Self, n: &Self) -> Result<Self> {
        T::ops()
            .modular_power(&self.0, &exponent.0, &n.0)
            .map(Integer)
    }

    pub fn modular_inverse(&self, n: &Self) -> Result<Self> {
        T::ops().modular_inverse(&self.0, &n.0).map(Integer)
    }

    pub fn to_canonical(&self) -> BigInt {
        T::ops().to_canonical(&self.0)
    }

    pub fn from_canonical(value: &BigInt) -> Result<Self> {
        T::ops().from_canonical(value).map(Integer)
    }
}

impl<T: Numeric> From<T> for Integer<T> {
    #[inline]
    fn from(value: T) -> Self {
        Integer(value)
    }
}

macro_rules! impl_binop {
    ($($Trait:ident, $method:ident, $AssignTrait:ident, $assign:ident => $op:ident;)*) => {$(
        impl<T: Numeric> $Trait<&Integer<T>> for &Integer<T> {
            type Output = Integer<T>;
            #[inline]
            fn $method(self, rhs: &Integer<T>) -> Integer<T> {
                Integer(T::ops().$op(&self.0, &rhs.0))
            }
        }
        impl<T: Numeric> $Trait<Integer<T>> for &Integer<T> {
            type Output = Integer<T>;
            #[inline]
            fn $method(self, rhs: Integer<T>) -> Integer<T> {
                self.$method(&rhs)
            }
        }
        impl<T: Numeric> $Trait<&Integer<T>> for Integer<T> {
            type Output = Integer<T>;
            #[inline]
            fn $method(self, rhs: &Integer<T>) -> Integer<T> {
                (&self).$method(rhs)
            }
        }
        impl<T: Numeric> $Trait<Integer<T>> for Integer<T> {
            type Output = Integer<T>;
            #[inline]
            fn $method(self, rhs: Integer<T>) -> Integer<T> {
                (&self).$method(&rhs)
            }
        }
        impl<T: Numeric> $AssignTrait<&Integer<T>> for Integer<T> {
            #[inline]
            fn $assign(&mut self, rhs: &Integer<T>) {
                self.0 = T::ops().$op(&self.0, &rhs.0);
            }
        }
        impl<T: Numeric> $AssignTrait<Integer<T>> for Integer<T> {
            #[inline]
            fn $assign(&mut self, rhs: Integer<T>) {
                self.$assign(&rhs);
            }
        }
    )*}
}
impl_binop! {
    Add, add, AddAssign, add_assign => add;
    Sub, sub, SubAssign, sub_assign => subtract;
    Mul, mul, MulAssign, mul_assign => multiply;
    BitAnd, bitand, BitAndAssign, bitand_assign => and;
    BitOr, bitor, BitOrAssign, bitor_assign => or;
    BitXor, bitxor, BitXorAssign, bitxor_assign => xor;
}

// Division by zero panics, matching the primitive operators.
macro_rules! impl_divop {
    ($($Trait:ident, $method:ident, $AssignTrait:ident, $assign:ident => $op:ident;)*) => {$(
        impl<T: Numeric> $Trait<&Integer<T>> for &Integer<T> {
            type Output = Integer<T>;
            fn $method(self, rhs: &Integer<T>) -> Integer<T> {
                match T::ops().$op(&self.0, &rhs.0) {
                    Ok(v) => Integer(v),
                    Err(e) => panic!("{}", e),
                }
            }
        }
        impl<T: Numeric> $Trait<Integer<T>> for &Integer<T> {
            type Output = Integer<T>;
            #[inline]
            fn $method(self, rhs: Integer<T>) -> Integer<T> {
                self.$method(&rhs)
            }
        }
        impl<T: Numeric> $Trait<&Integer<T>> for Integer<T> {
            type Output = Integer<T>;
            #[inline]
            fn $method(self, rhs: &Integer<T>) -> Integer<T> {
                (&self).$method(rhs)
            }
        }
        impl<T: Numeric> $Trait<Integer<T>> for Integer<T> {
            type Output = Integer<T>;
            #[inline]
            fn $method(self, rhs: Integer<T>) -> Integer<T> {
                (&self).$method(&rhs)
            }
        }
        impl<T: Numeric> $AssignTrait<&Integer<T>> for Integer<T> {
            #[inline]
            fn $assign(&mut self, rhs: &Integer<T>) {
                *self = (&*self).$method(rhs);
            }
        }
        impl<T: Numeric> $AssignTrait<Integer<T>> for Integer<T> {
            #[inline]
            fn $assign(&mut self, rhs: Integer<T>) {
                self.$assign(&rhs);
            }
        }
    )*}
}
impl_divop! {
    Div, div, DivAssign, div_assign => divide;
    Rem, rem, RemAssign, rem_assign => modulus;
}

impl<T: Numeric> Shl<usize> for &Integer<T> {
    type Output = Integer<T>;
    #[inline]
    fn shl(self, n: usize) -> Integer<T> {
        Integer(T::ops().shift_left(&self.0, n))
    }
}

impl<T: Numeric> Shl<usize> for Integer<T> {
    type Output = Integer<T>;
    #[inline]
    fn shl(self, n: usize) -> Integer<T> {
        &self << n
    }
}

impl<T: Numeric> Shr<usize> for &Integer<T> {
    type Output = Integer<T>;
    /// Arithmetic shift, rounding toward negative infinity
    #[inline]
    fn shr(self, n: usize) -> Integer<T> {
        Integer(T::ops().shift_right(&self.0, n))
    }
}

impl<T: Numeric> Shr<usize> for Integer<T> {
    type Output = Integer<T>;
    #[inline]
    fn shr(self, n: usize) -> Integer<T> {
        &self >> n
    }
}

impl<T: Numeric> Neg for &Integer<T> {
    type Output = Integer<T>;
    #[inline]
    fn neg(self) -> Integer<T> {
        Integer(T::ops().negate(&self.0))
    }
}

impl<T: Numeric> Neg for Integer<T> {
    type Output = Integer<T>;
    #[inline]
    fn neg(self) -> Integer<T> {
        -&self
    }
}

impl<T: Numeric> Not for &Integer<T> {
    type Output = Integer<T>;
    #[inline]
    fn not(self) -> Integer<T> {
        Integer(T::ops().not(&self.0))
    }
}

impl<T: Numeric> Not for Integer<T> {
    type Output = Integer<T>;
    #[inline]
    fn not(self) -> Integer<T> {
        !&self
    }
}

impl<T: Numeric> PartialEq for Integer<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        T::ops().equals(&self.0, &other.0)
    }
}

impl<T: Numeric> Eq for Integer<T> {}

impl<T: Numeric> PartialOrd for Integer<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Numeric> Ord for Integer<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        T::ops().compare(&self.0, &other.0)
    }
}

impl<T: Numeric> Zero for Integer<T> {
    #[inline]
    fn zero() -> Self {
        Integer(T::ops().zero())
    }
    #[inline]
    fn is_zero(&self) -> bool {
        T::ops().is_zero(&self.0)
    }
}

impl<T: Numeric> One for Integer<T> {
    #[inline]
    fn one() -> Self {
        Integer(T::ops().one())
    }
}

impl<T: Numeric> fmt::Display for Integer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl<T: Numeric> fmt::Debug for Integer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::mutint::MutInt;
    use num_bigint::RandBigInt;
    use num_integer::Integer as _;

    /// Generic Euclid written once against the wrapper.
    fn euclid<T: Numeric>(mut a: Integer<T>, mut b: Integer<T>) -> Integer<T> {
        while !b.is_zero() {
            let r = &a % &b;
            a = b;
            b = r;
        }
        a
    }

    fn check_against_canonical<T: Numeric>(values: &[i64]) {
        for &x in values {
            for &y in values {
                let a = Integer::<T>::from_canonical(&BigInt::from(x)).unwrap();
                let b = Integer::<T>::from_canonical(&BigInt::from(y)).unwrap();
                let (bx, by) = (BigInt::from(x), BigInt::from(y));
                assert_eq!((&a + &b).to_canonical(), &bx + &by);
                assert_eq!((&a - &b).to_canonical(), &bx - &by);
                assert_eq!((&a * &b).to_canonical(), &bx * &by);
                assert_eq!((&a & &b).to_canonical(), &bx & &by);
                assert_eq!((&a | &b).to_canonical(), &bx | &by);
                assert_eq!((&a ^ &b).to_canonical(), &bx ^ &by);
                assert_eq!(a.cmp(&b), x.cmp(&y));
                assert_eq!(a == b, x == y);
                if y != 0 {
                    assert_eq!((&a / &b).to_canonical(), &bx / &by);
                    assert_eq!((&a % &b).to_canonical(), &bx % &by);
                } else {
                    assert_eq!(a.checked_div(&b), Err(Error::DivisionByZero));
                    assert_eq!(a.checked_rem(&b), Err(Error::DivisionByZero));
                }
                // truncated remainders leave the sign of the last divisor
                let g = euclid(a.clone(), b.clone()).to_canonical();
                assert_eq!(g.magnitude(), bx.gcd(&by).magnitude());
                assert_eq!(a.gcd(&b).to_canonical(), bx.gcd(&by));
            }
            let a = Integer::<T>::from_canonical(&BigInt::from(x)).unwrap();
            assert_eq!((-&a).to_canonical(), -BigInt::from(x));
            assert_eq!((!&a).to_canonical(), !BigInt::from(x));
            assert_eq!((&a << 3).to_canonical(), BigInt::from(x) << 3);
            assert_eq!((&a >> 3).to_canonical(), BigInt::from(x) >> 3);
            assert_eq!(a.is_even(), x % 2 == 0);
        }
    }

    #[test]
    fn signed_representations_test() {
        // small enough that no native operation overflows
        let values = [0i64, 1, -1, 2, -7, 12, 1000, -4096, 65535];
        check_against_canonical::<i64>(&values);
        check_against_canonical::<i128>(&values);
        check_against_canonical::<BigInt>(&values);
        check_against_canonical::<MutInt>(&values);
    }

    #[test]
    fn wrapping_test() {
        let max = Integer::new(u32::MAX);
        assert_eq!((max.clone() + Integer::one()).into_inner(), 0);
        let mut x = Integer::new(i64::MAX);
        x += Integer::from_i32(1);
        assert_eq!(x.into_inner(), i64::MIN);
        assert_eq!(Integer::<u64>::from_canonical(&BigInt::from(-1)), Err(Error::Overflow("u64")));
    }

    #[test]
    #[should_panic]
    fn division_by_zero_panics_test() {
        let _ = Integer::new(MutInt::from(5)) / Integer::zero();
    }

    #[test]
    fn assign_ops_test() {
        let mut rng = rand::thread_rng();
        let a = rng.gen_bigint(300);
        let b = rng.gen_bigint(200) + 1u8;
        let mut x = Integer::new(MutInt::from(&a));
        let y = Integer::new(MutInt::from(&b));
        x *= &y;
        x -= &y;
        x += y.clone();
        x /= &y;
        x %= y.clone();
        x ^= &y;
        x &= &y;
        x |= y.clone();
        let mut e = a.clone();
        e = e * &b - &b + &b;
        e = &e / &b;
        e = &e % &b;
        e = (e ^ &b) & &b | &b;
        assert_eq!(x.to_canonical(), e);
    }

    fn check_constants<T: Numeric>() {
        let two = Integer::<T>::two();
        assert_eq!(two.to_canonical(), BigInt::from(2));
        assert!(two.is_even());

        let mut x = Integer::<T>::zero();
        x.increment().increment();
        assert!(x == two);
        x.decrement();
        assert!(x.is_one());
        x.decrement();
        assert!(x.is_zero());
    }

    #[test]
    fn constants_test() {
        check_constants::<i32>();
        check_constants::<u64>();
        check_constants::<u128>();
        check_constants::<BigInt>();
        check_constants::<MutInt>();

        let mut x = Integer::new(u32::MAX);
        x.increment();
        assert_eq!(x.into_inner(), 0);
        let mut y = Integer::new(MutInt::from(0));
        assert_eq!(y.decrement().to_string(), "-1");
    }

    #[test]
    fn modular_test() {
        let n = Integer::new(BigInt::from(1_000_000_007));
        let a = Integer::new(BigInt::from(-123456));
        let inv = a.modular_inverse(&n).unwrap();
        assert!(a.modular_product(&inv, &n).unwrap().is_one());
        let two = Integer::from_i32(2);
        let p = two.modular_power(&Integer::from_i32(30), &n).unwrap();
        assert_eq!(p.into_inner(), BigInt::from(73741817));
        let p = two.modular_power(&Integer::from_i32(29), &n).unwrap();
        assert_eq!(p.into_inner(), BigInt::from(1 << 29));
        assert_eq!(a.modular_sum(&a, &n).unwrap().into_inner(), BigInt::from(1_000_000_007 - 246912));
        assert!(a.modular_difference(&a, &n).unwrap().is_zero());
        assert_eq!(Integer::new(BigInt::from(99)).sqrt().unwrap().to_string(), "9");
        assert_eq!(a.sqrt().err(), Some(Error::NegativeRoot));
        assert_eq!(format!("{:?}", Integer::new(MutInt::from(-3))), "MutInt(-3)");
    }
}
