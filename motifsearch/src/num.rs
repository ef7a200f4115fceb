//! Re-exports of the type-level numbers used to size alphabets.

#[doc(no_inline)]
pub use generic_array::ArrayLength;
#[doc(no_inline)]
pub use typenum::*;
