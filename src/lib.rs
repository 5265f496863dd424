//! Mutable limb-based big integers, one operations table per integer representation, and
//! modular reducers (naive, Montgomery SOS/CIOS, Barrett) with the residues bound to them.
//!
//! ```
//! use num_residue::{Integer, MutInt, Reducer, Reduction, ReductionConfig};
//!
//! // the same generic code runs over native words and big integers
//! let a = Integer::new(7u64) * Integer::new(6u64);
//! assert_eq!(a.into_inner(), 42);
//!
//! let n = MutInt::from(1_000_000_007u32);
//! let reducer = ReductionConfig::default().build(&n).unwrap();
//! let x = reducer.power(&MutInt::from(2u32), &(1_000_000_006u32)).unwrap();
//! assert!(x.is_one());
//! ```

mod error;
mod integer;
mod limb;
mod mutint;
mod ops;
mod rand;
mod reduce;
mod store;
mod traits;

pub use error::{Error, Result};
pub use integer::Integer;
pub use limb::{Limb, LimbBuffer};
pub use mutint::MutInt;
pub use ops::{
    BigIntOps, Int128Ops, Int32Ops, Int64Ops, MutIntOps, UInt128Ops, UInt32Ops, UInt64Ops,
};
pub use reduce::{
    AnyReducer, BarrettReducer, BarrettReduction, Montgomery32, Montgomery64, MontgomeryReducer,
    MontgomeryReduction, MutIntScratch, NaiveReducer, NaiveReduction, Residue,
    WordMontgomeryReduction,
};
pub use store::{MutIntStore, Scratch};
pub use traits::{
    BitTest, MontgomeryVariant, Numeric, NumericOps, RandInteger, Reducer, Reduction,
    ReductionConfig, Strategy,
};

pub mod detail {
    //! Word level kernels on little-endian limb slices, shared by the big integer and the
    //! reducers.
    pub use super::limb::{
        add_assign, bit_length, cmp, inverse_limb, mul_add_limb, mul_into, mul_limb_assign,
        mul_low_into, sub_assign, sub_from_assign, twos_negate, DoubleLimb, LIMB_BITS,
    };
}
