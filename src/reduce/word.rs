//! Montgomery reducers for moduli that fit a single machine word.

use crate::error::{Error, Result};
use crate::traits::{Reducer, Reduction};
use log::debug;

/// Builds [Montgomery32] and [Montgomery64] reducers for odd word sized moduli.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordMontgomeryReduction;

macro_rules! impl_word_montgomery {
    ($($Name:ident => $T:ty, $D:ty;)*) => {$(
        #[doc = concat!("Montgomery reducer for `", stringify!($T), "` with `R = 2^", stringify!($T), "::BITS`.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $Name {
            n: $T,
            /// `-n^-1 mod R`
            k0: $T,
            /// `R mod n`
            r: $T,
            /// `R^2 mod n`
            r2: $T,
        }

        impl $Name {
            fn new(n: $T) -> Self {
                // Newton iteration, the correct low bits double every round
                let mut inv: $T = n;
                while n.wrapping_mul(inv) != 1 {
                    inv = inv.wrapping_mul((2 as $T).wrapping_sub(n.wrapping_mul(inv)));
                }
                let r = (1u128 << <$T>::BITS) % n as u128;
                let r2 = r * r % n as u128;
                $Name {
                    n,
                    k0: inv.wrapping_neg(),
                    r: r as $T,
                    r2: r2 as $T,
                }
            }

            /// `t R^-1 mod n` for `t < n R`
            #[inline]
            fn redc(&self, t: $D) -> $T {
                let m = (t as $T).wrapping_mul(self.k0);
                let (sum, overflow) = t.overflowing_add(m as $D * self.n as $D);
                let hi = (sum >> <$T>::BITS) as $T;
                // the true quotient is below 2n, so one wrapping subtraction corrects it
                if overflow || hi >= self.n {
                    hi.wrapping_sub(self.n)
                } else {
                    hi
                }
            }
        }

        impl Reduction<$T> for WordMontgomeryReduction {
            type Reducer = $Name;

            fn build(&self, modulus: &$T) -> Result<$Name> {
                if *modulus == 0 {
                    return Err(Error::NonPositiveModulus);
                }
                if modulus & 1 == 0 {
                    return Err(Error::EvenModulus);
                }
                debug!(
                    "building {} reducer for a {} bit modulus",
                    stringify!($Name),
                    <$T>::BITS - modulus.leading_zeros()
                );
                Ok($Name::new(*modulus))
            }
        }

        impl Reducer<$T> for $Name {
            type Repr = $T;
            type Scratch = ();

            #[inline]
            fn modulus(&self) -> &$T {
                &self.n
            }

            #[inline]
            fn new_repr(&self) -> $T {
                0
            }

            #[inline]
            fn new_scratch(&self) {}

            #[inline]
            fn transform(&self, value: &$T, out: &mut $T, _: &mut ()) {
                *out = self.redc((value % self.n) as $D * self.r2 as $D);
            }

            #[inline]
            fn residue(&self, repr: &$T) -> $T {
                self.redc(*repr as $D)
            }

            #[inline]
            fn one(&self, out: &mut $T) {
                *out = self.r;
            }

            #[inline]
            fn mul_assign(&self, lhs: &mut $T, rhs: &$T, _: &mut ()) {
                *lhs = self.redc(*lhs as $D * *rhs as $D);
            }

            #[inline]
            fn sqr_assign(&self, lhs: &mut $T, _: &mut ()) {
                *lhs = self.redc(*lhs as $D * *lhs as $D);
            }
        }
    )*}
}
impl_word_montgomery! {
    Montgomery32 => u32, u64;
    Montgomery64 => u64, u128;
}
