use crate::error::{Error, Result};
use crate::traits::{BitTest, Numeric, NumericOps, Reducer, Reduction};
use core::cmp::Ordering;
use log::debug;

/// Reduction by a full division after every product. Works for every representation and any
/// positive modulus, and serves as the reference the faster reducers are checked against.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveReduction;

/// Reducer whose internal domain is the plain residue in `[0, n)`.
#[derive(Debug, Clone)]
pub struct NaiveReducer<T: Numeric> {
    n: T,
    zero: T,
}

/// Modular operations cannot fail once the modulus passed [NaiveReduction::build].
#[inline]
fn infallible<T>(result: Result<T>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => unreachable!("modulus was checked when the reducer was built: {}", e),
    }
}

impl<T: Numeric + BitTest> Reduction<T> for NaiveReduction {
    type Reducer = NaiveReducer<T>;

    fn build(&self, modulus: &T) -> Result<NaiveReducer<T>> {
        let ops = T::ops();
        let zero = ops.zero();
        if ops.compare(modulus, &zero) != Ordering::Greater {
            return Err(Error::NonPositiveModulus);
        }
        debug!("building naive reducer for a {} bit modulus", modulus.bits());
        Ok(NaiveReducer {
            n: modulus.clone(),
            zero,
        })
    }
}

impl<T: Numeric> Reducer<T> for NaiveReducer<T> {
    type Repr = T;
    type Scratch = ();

    #[inline]
    fn modulus(&self) -> &T {
        &self.n
    }

    fn new_repr(&self) -> T {
        self.zero.clone()
    }

    fn new_scratch(&self) {}

    fn transform(&self, value: &T, out: &mut T, _: &mut ()) {
        *out = infallible(T::ops().modular_sum(value, &self.zero, &self.n));
    }

    fn residue(&self, repr: &T) -> T {
        repr.clone()
    }

    fn one(&self, out: &mut T) {
        let ops = T::ops();
        *out = infallible(ops.modular_sum(&ops.one(), &self.zero, &self.n));
    }

    fn mul_assign(&self, lhs: &mut T, rhs: &T, _: &mut ()) {
        *lhs = infallible(T::ops().modular_product(lhs, rhs, &self.n));
    }

    fn sqr_assign(&self, lhs: &mut T, _: &mut ()) {
        *lhs = infallible(T::ops().modular_product(lhs, lhs, &self.n));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutint::MutInt;
    use num_bigint::BigInt;
    use rand::random;

    fn check_power<T: Numeric + BitTest + From<u32>>(n: u32) {
        let reducer = NaiveReduction.build(&T::from(n)).unwrap();
        for _ in 0..20 {
            let (a, e) = (random::<u32>(), random::<u16>());
            let expect = BigInt::from(a).modpow(&BigInt::from(e), &BigInt::from(n));
            let value = reducer.power(&T::from(a), &e).unwrap();
            assert_eq!(T::ops().to_canonical(&value), expect);
        }
    }

    #[test]
    fn naive_power_test() {
        check_power::<u32>(4_294_967_291);
        check_power::<u64>(1_000_000);
        check_power::<i64>(65_537);
        check_power::<u128>(97);
        check_power::<BigInt>(3_000_000_019);
        check_power::<MutInt>(1 << 31);
    }

    #[test]
    fn naive_negative_input_test() {
        let reducer = NaiveReduction.build(&15i32).unwrap();
        assert_eq!(reducer.to_residue(&-4).value(), 11);
        assert_eq!(reducer.to_residue(&i32::MIN).value(), i32::MIN.rem_euclid(15));
        let r = reducer.to_residue(&-1);
        let mut x = reducer.to_residue(&-1);
        x.multiply(&r);
        assert_eq!(x.value(), 1);
    }

    #[test]
    fn naive_build_test() {
        assert_eq!(NaiveReduction.build(&0u64).err(), Some(Error::NonPositiveModulus));
        assert_eq!(NaiveReduction.build(&-3i64).err(), Some(Error::NonPositiveModulus));
        assert_eq!(NaiveReduction.build(&BigInt::from(-3)).err(), Some(Error::NonPositiveModulus));
        let unit = NaiveReduction.build(&1u32).unwrap();
        assert_eq!(unit.power(&5, &0u32).unwrap(), 0);
    }
}
