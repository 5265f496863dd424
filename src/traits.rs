use crate::error::Result;
use crate::reduce::Residue;
use core::cmp::Ordering;
use core::fmt::{Debug, Display};
use num_bigint::BigInt;

/// Bit queries on the magnitude of an integer, used to scan exponents.
pub trait BitTest {
    /// Number of bits needed to represent the magnitude
    fn bits(&self) -> usize;

    /// Whether bit `position` of the magnitude is set
    fn bit(&self, position: usize) -> bool;

    /// Number of trailing zero bits, 0 for zero
    fn trailing_zeros(&self) -> usize;

    /// Whether the value is below zero. Unsigned types keep the default.
    fn is_negative(&self) -> bool {
        false
    }
}

/// The capability set of one integer representation.
///
/// Generic algorithms are written once against this table and run unchanged over machine
/// words, 128 bit values and arbitrary precision values. Native implementations wrap on
/// overflow like the primitive `wrapping_*` methods. Division and remainder truncate toward
/// zero; the `modular_*` operations take a positive modulus and return values in `[0, n)`.
pub trait NumericOps<T> {
    fn zero(&self) -> T;
    fn one(&self) -> T;
    fn two(&self) -> T;
    fn from_i32(&self, value: i32) -> T;

    fn is_zero(&self, a: &T) -> bool;
    fn is_one(&self, a: &T) -> bool;
    fn is_even(&self, a: &T) -> bool;

    fn add(&self, a: &T, b: &T) -> T;
    fn subtract(&self, a: &T, b: &T) -> T;
    fn multiply(&self, a: &T, b: &T) -> T;
    fn divide(&self, a: &T, b: &T) -> Result<T>;
    /// Remainder of the truncated division, with the sign of `a`
    fn modulus(&self, a: &T, b: &T) -> Result<T>;
    fn negate(&self, a: &T) -> T;

    fn shift_left(&self, a: &T, n: usize) -> T;
    /// Arithmetic right shift, rounding toward negative infinity
    fn shift_right(&self, a: &T, n: usize) -> T;
    fn and(&self, a: &T, b: &T) -> T;
    fn or(&self, a: &T, b: &T) -> T;
    fn xor(&self, a: &T, b: &T) -> T;
    fn not(&self, a: &T) -> T;

    fn compare(&self, a: &T, b: &T) -> Ordering;
    fn equals(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    /// Convert into the canonical arbitrary precision form
    fn to_canonical(&self, a: &T) -> BigInt;
    /// Convert from the canonical form, failing with [Error::Overflow](crate::Error::Overflow)
    /// when the value does not fit
    fn from_canonical(&self, a: &BigInt) -> Result<T>;

    /// Greatest common divisor, non-negative. For signed native types a gcd of `2^(BITS-1)`
    /// does not fit and wraps to `MIN`, like the other native operations.
    fn gcd(&self, a: &T, b: &T) -> T;
    fn modular_sum(&self, a: &T, b: &T, n: &T) -> Result<T>;
    fn modular_difference(&self, a: &T, b: &T, n: &T) -> Result<T>;
    fn modular_product(&self, a: &T, b: &T, n: &T) -> Result<T>;
    fn modular_power(&self, base: &T, exponent: &T, n: &T) -> Result<T>;
    fn modular_inverse(&self, a: &T, n: &T) -> Result<T>;
    /// Floor of the square root
    fn integer_sqrt(&self, a: &T) -> Result<T>;
}

/// An integer representation with a process wide operations table.
pub trait Numeric: Clone + Debug + Display + 'static {
    type Ops: NumericOps<Self> + Sync + 'static;

    fn ops() -> &'static Self::Ops;
}

/// A modulus bound object that converts values into an internal domain where modular
/// multiplication needs a single reduction pass.
///
/// Reducers are immutable after construction. All mutable state lives in the [Residue]
/// values and their per-residue scratch, so one reducer can be shared read-only by many
/// residues.
pub trait Reducer<T: Numeric>: Sized {
    /// Internal representation of a residue
    type Repr: Clone;
    /// Per-residue working storage for the multiplication path
    type Scratch;

    /// The modulus this reducer was built for
    fn modulus(&self) -> &T;

    fn new_repr(&self) -> Self::Repr;
    fn new_scratch(&self) -> Self::Scratch;

    /// `out = value mod n` in the internal domain. Negative values are reduced to `[0, n)`.
    fn transform(&self, value: &T, out: &mut Self::Repr, scratch: &mut Self::Scratch);

    /// Convert back to a plain value in `[0, n)`.
    fn residue(&self, repr: &Self::Repr) -> T;

    /// The internal representation of one
    fn one(&self, out: &mut Self::Repr);

    /// `lhs = lhs * rhs mod n`
    fn mul_assign(&self, lhs: &mut Self::Repr, rhs: &Self::Repr, scratch: &mut Self::Scratch);

    /// `lhs = lhs^2 mod n`
    fn sqr_assign(&self, lhs: &mut Self::Repr, scratch: &mut Self::Scratch);

    /// Whether residues built by `other` share the internal domain of this reducer.
    fn is_compatible(&self, other: &Self) -> bool {
        T::ops().equals(self.modulus(), other.modulus())
    }

    /// Create a residue bound to this reducer, holding `value mod n`.
    fn to_residue(&self, value: &T) -> Residue<'_, T, Self> {
        Residue::new(self, value)
    }

    /// `base^exponent mod n` through a temporary residue.
    fn power<E: BitTest>(&self, base: &T, exponent: &E) -> Result<T> {
        let mut r = self.to_residue(base);
        r.power(exponent)?;
        Ok(r.value())
    }
}

/// A reduction strategy: a stateless policy that builds reducers for a modulus.
pub trait Reduction<T: Numeric> {
    type Reducer: Reducer<T>;

    /// Validate the modulus and precompute the reducer constants.
    fn build(&self, modulus: &T) -> Result<Self::Reducer>;
}

/// Montgomery multiplication flavor for multi-limb moduli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MontgomeryVariant {
    /// Separated operand scanning: a full product, then a reduction pass over it
    Sos,
    /// Coarsely integrated operand scanning: multiplication and reduction interleaved per
    /// limb, with only `s + 2` words live
    Cios,
}

/// Which reducer a [ReductionConfig] builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Full division after every product
    Naive,
    /// Montgomery reduction, odd moduli only
    Montgomery,
    /// Barrett reduction, any positive modulus
    Barrett,
    /// Montgomery for odd moduli and Barrett for even moduli
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReductionConfig {
    /// Reducer family to build
    pub strategy: Strategy,

    /// Montgomery flavor used when the strategy resolves to Montgomery
    pub montgomery_variant: MontgomeryVariant,
}

impl ReductionConfig {
    pub fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            montgomery_variant: MontgomeryVariant::Cios,
        }
    }

    /// Always divide, useful as a reference implementation.
    pub fn naive() -> Self {
        Self {
            strategy: Strategy::Naive,
            ..Self::default()
        }
    }

    pub fn montgomery(variant: MontgomeryVariant) -> Self {
        Self {
            strategy: Strategy::Montgomery,
            montgomery_variant: variant,
        }
    }

    pub fn barrett() -> Self {
        Self {
            strategy: Strategy::Barrett,
            ..Self::default()
        }
    }
}

/// Extension on [rand::Rng] for generating integers of the supported representations.
pub trait RandInteger<T> {
    /// Generate a non-negative random integer with at most `bits` bits.
    fn gen_integer(&mut self, bits: usize) -> T;

    /// Generate a random integer uniformly in `[0, bound)`. Panics if `bound` is not positive.
    fn gen_integer_below(&mut self, bound: &T) -> T;
}
