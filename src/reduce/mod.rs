//! Modular reduction strategies and the residues bound to them.
//!
//! A [Reduction] is a stateless policy. Building it for a modulus yields a [Reducer] that owns
//! every modulus dependent constant, and residues borrow that reducer:
//!
//! ```
//! use num_residue::{MutInt, Reducer, Reduction, ReductionConfig};
//!
//! let n: MutInt = "10023859281455311421".parse().unwrap();
//! let reducer = ReductionConfig::default().build(&n).unwrap();
//! let mut a = reducer.to_residue(&MutInt::from(123456789u32));
//! a.power(&987654321u32).unwrap();
//! assert!(a.value() < n);
//! ```

mod barrett;
mod montgomery;
mod naive;
mod word;

pub use barrett::{BarrettReducer, BarrettReduction};
pub use montgomery::{MontgomeryReducer, MontgomeryReduction};
pub use naive::{NaiveReducer, NaiveReduction};
pub use word::{Montgomery32, Montgomery64, WordMontgomeryReduction};

use crate::error::{Error, Result};
use crate::mutint::MutInt;
use crate::traits::{BitTest, Numeric, Reducer, Reduction, ReductionConfig, Strategy};
use core::fmt;
use core::marker::PhantomData;

/// A value in the internal domain of a reducer.
///
/// Residues borrow their reducer, so the reducer outlives every residue built from it and can
/// be shared read-only between threads while each thread owns its residues. Each residue
/// carries its own scratch, which keeps [multiply](Self::multiply) free of allocations.
pub struct Residue<'a, T: Numeric, R: Reducer<T>> {
    reducer: &'a R,
    repr: R::Repr,
    scratch: R::Scratch,
    _value: PhantomData<fn() -> T>,
}

impl<'a, T: Numeric, R: Reducer<T>> Residue<'a, T, R> {
    /// Residue of `value mod n`
    pub fn new(reducer: &'a R, value: &T) -> Self {
        let mut repr = reducer.new_repr();
        let mut scratch = reducer.new_scratch();
        reducer.transform(value, &mut repr, &mut scratch);
        Residue {
            reducer,
            repr,
            scratch,
            _value: PhantomData,
        }
    }

    /// Residue of one
    pub fn one(reducer: &'a R) -> Self {
        let mut repr = reducer.new_repr();
        reducer.one(&mut repr);
        Residue {
            reducer,
            repr,
            scratch: reducer.new_scratch(),
            _value: PhantomData,
        }
    }

    #[inline]
    pub fn reducer(&self) -> &'a R {
        self.reducer
    }

    /// Whether `other` can be combined with this residue: it shares the reducer, or a reducer
    /// of the same kind for the same modulus.
    pub fn is_compatible(&self, other: &Residue<'_, T, R>) -> bool {
        core::ptr::eq(self.reducer, other.reducer) || self.reducer.is_compatible(other.reducer)
    }

    /// Replace the value with `value mod n`.
    pub fn set(&mut self, value: &T) -> &mut Self {
        self.reducer
            .transform(value, &mut self.repr, &mut self.scratch);
        self
    }

    /// Copy another residue of the same reducer. Mismatched reducers are only caught by a
    /// debug assertion, see [try_set_residue](Self::try_set_residue).
    pub fn set_residue(&mut self, other: &Residue<'_, T, R>) -> &mut Self {
        debug_assert!(self.is_compatible(other), "residues of different reducers");
        self.repr.clone_from(&other.repr);
        self
    }

    pub fn try_set_residue(&mut self, other: &Residue<'_, T, R>) -> Result<&mut Self> {
        if !self.is_compatible(other) {
            return Err(Error::ReducerMismatch);
        }
        Ok(self.set_residue(other))
    }

    /// `self = self * other mod n` with one reduction pass.
    pub fn multiply(&mut self, other: &Residue<'_, T, R>) -> &mut Self {
        debug_assert!(self.is_compatible(other), "residues of different reducers");
        self.reducer
            .mul_assign(&mut self.repr, &other.repr, &mut self.scratch);
        self
    }

    pub fn try_multiply(&mut self, other: &Residue<'_, T, R>) -> Result<&mut Self> {
        if !self.is_compatible(other) {
            return Err(Error::ReducerMismatch);
        }
        Ok(self.multiply(other))
    }

    /// `self = self^2 mod n`
    pub fn square(&mut self) -> &mut Self {
        self.reducer.sqr_assign(&mut self.repr, &mut self.scratch);
        self
    }

    /// `self = self^exponent mod n` by left to right square and multiply.
    ///
    /// Every bit of the exponent costs one squaring whatever its value, and set bits add one
    /// multiplication. There is no early exit on small intermediate values.
    pub fn power<E: BitTest>(&mut self, exponent: &E) -> Result<&mut Self> {
        if exponent.is_negative() {
            return Err(Error::NegativeExponent);
        }
        let base = self.repr.clone();
        self.reducer.one(&mut self.repr);
        for i in (0..exponent.bits()).rev() {
            self.reducer.sqr_assign(&mut self.repr, &mut self.scratch);
            if exponent.bit(i) {
                self.reducer
                    .mul_assign(&mut self.repr, &base, &mut self.scratch);
            }
        }
        Ok(self)
    }

    /// The plain value, in `[0, n)`
    pub fn value(&self) -> T {
        self.reducer.residue(&self.repr)
    }
}

impl<T: Numeric, R: Reducer<T>> Clone for Residue<'_, T, R> {
    fn clone(&self) -> Self {
        Residue {
            reducer: self.reducer,
            repr: self.repr.clone(),
            scratch: self.reducer.new_scratch(),
            _value: PhantomData,
        }
    }
}

impl<T: Numeric, R: Reducer<T>> fmt::Debug for Residue<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Residue")
            .field("value", &self.value())
            .field("modulus", self.reducer.modulus())
            .finish()
    }
}

/// Working storage shared by the [MutInt] reducers.
pub struct MutIntScratch {
    pub(crate) wide: MutInt,
    pub(crate) quotient: MutInt,
    pub(crate) product: MutInt,
}

impl MutIntScratch {
    /// Scratch values with room for `limbs` limbs each
    pub fn new(limbs: usize) -> Self {
        MutIntScratch {
            wide: MutInt::with_capacity(limbs),
            quotient: MutInt::with_capacity(limbs),
            product: MutInt::with_capacity(limbs),
        }
    }
}

/// The [MutInt] reducers as one closed set, selected by [ReductionConfig].
pub enum AnyReducer {
    Naive(NaiveReducer<MutInt>),
    Montgomery(MontgomeryReducer),
    Barrett(BarrettReducer),
}

impl AnyReducer {
    /// Name of the selected strategy
    pub fn strategy(&self) -> Strategy {
        match self {
            AnyReducer::Naive(_) => Strategy::Naive,
            AnyReducer::Montgomery(_) => Strategy::Montgomery,
            AnyReducer::Barrett(_) => Strategy::Barrett,
        }
    }
}

impl Reducer<MutInt> for AnyReducer {
    type Repr = MutInt;
    type Scratch = MutIntScratch;

    fn modulus(&self) -> &MutInt {
        match self {
            AnyReducer::Naive(r) => r.modulus(),
            AnyReducer::Montgomery(r) => r.modulus(),
            AnyReducer::Barrett(r) => r.modulus(),
        }
    }

    fn new_repr(&self) -> MutInt {
        match self {
            AnyReducer::Naive(r) => r.new_repr(),
            AnyReducer::Montgomery(r) => r.new_repr(),
            AnyReducer::Barrett(r) => r.new_repr(),
        }
    }

    fn new_scratch(&self) -> MutIntScratch {
        match self {
            AnyReducer::Naive(_) => MutIntScratch::new(1),
            AnyReducer::Montgomery(r) => r.new_scratch(),
            AnyReducer::Barrett(r) => r.new_scratch(),
        }
    }

    fn transform(&self, value: &MutInt, out: &mut MutInt, scratch: &mut MutIntScratch) {
        match self {
            AnyReducer::Naive(r) => r.transform(value, out, &mut ()),
            AnyReducer::Montgomery(r) => r.transform(value, out, scratch),
            AnyReducer::Barrett(r) => r.transform(value, out, scratch),
        }
    }

    fn residue(&self, repr: &MutInt) -> MutInt {
        match self {
            AnyReducer::Naive(r) => r.residue(repr),
            AnyReducer::Montgomery(r) => r.residue(repr),
            AnyReducer::Barrett(r) => r.residue(repr),
        }
    }

    fn one(&self, out: &mut MutInt) {
        match self {
            AnyReducer::Naive(r) => r.one(out),
            AnyReducer::Montgomery(r) => r.one(out),
            AnyReducer::Barrett(r) => r.one(out),
        }
    }

    fn mul_assign(&self, lhs: &mut MutInt, rhs: &MutInt, scratch: &mut MutIntScratch) {
        match self {
            AnyReducer::Naive(r) => r.mul_assign(lhs, rhs, &mut ()),
            AnyReducer::Montgomery(r) => r.mul_assign(lhs, rhs, scratch),
            AnyReducer::Barrett(r) => r.mul_assign(lhs, rhs, scratch),
        }
    }

    fn sqr_assign(&self, lhs: &mut MutInt, scratch: &mut MutIntScratch) {
        match self {
            AnyReducer::Naive(r) => r.sqr_assign(lhs, &mut ()),
            AnyReducer::Montgomery(r) => r.sqr_assign(lhs, scratch),
            AnyReducer::Barrett(r) => r.sqr_assign(lhs, scratch),
        }
    }

    fn is_compatible(&self, other: &Self) -> bool {
        // Montgomery residues live in a different domain than the plain ones
        let domain = |r: &AnyReducer| matches!(r, AnyReducer::Montgomery(_));
        domain(self) == domain(other) && self.modulus() == other.modulus()
    }
}

impl Reduction<MutInt> for ReductionConfig {
    type Reducer = AnyReducer;

    fn build(&self, modulus: &MutInt) -> Result<AnyReducer> {
        let strategy = match self.strategy {
            Strategy::Auto if modulus.is_even() => Strategy::Barrett,
            Strategy::Auto => Strategy::Montgomery,
            s => s,
        };
        match strategy {
            Strategy::Naive => NaiveReduction.build(modulus).map(AnyReducer::Naive),
            Strategy::Barrett => BarrettReduction.build(modulus).map(AnyReducer::Barrett),
            _ => MontgomeryReduction(self.montgomery_variant)
                .build(modulus)
                .map(AnyReducer::Montgomery),
        }
    }
}
