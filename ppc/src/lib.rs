//! PowerPC instruction encoding primitives: MSB-first bit ranges, the closed table of encoding
//! forms and the field expressions used to compose extended opcodes.
mod error;
mod ppc_bits;
mod ppc_field_expr;
mod ppc_forms;

pub use error::*;
pub use ppc_bits::*;
pub use ppc_field_expr::*;
pub use ppc_forms::*;
