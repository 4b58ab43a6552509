//! Defines the closed set of PowerPC encoding forms and the bit ranges of their extended opcode
//! fields. Every form shares the primary opcode field at bits 0..=5.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{BitRange, Error, FieldExpression};

/// Internal macro used to define all forms in the [`EncodingForm`] enum
macro_rules! define_forms {
    ( $( ($name:ident, $str_name:expr, [ $( ($msb:expr, $lsb:expr) ),* ]) ),* $(,)? ) => {
        /// Encoding form of a PowerPC instruction.
        ///
        /// The layout of each form's extended opcode is fixed configuration, accessed via the
        /// methods on this enum.
        #[allow(non_camel_case_types)]
        #[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
        pub enum EncodingForm {
            $(
                $name,
            )*
        }

        impl EncodingForm {
            /// Every form, in declaration order
            pub const ALL: &'static [EncodingForm] = &[ $( Self::$name, )* ];

            /// Returns the tag used for the form in instruction tables
            pub const fn name(&self) -> &'static str {
                match self {
                    $(
                        Self::$name => $str_name,
                    )*
                }
            }

            /// Returns the declared `(msb, lsb)` pairs of the extended opcode, unvalidated
            pub const fn raw_extended_ranges(&self) -> &'static [(u8, u8)] {
                match self {
                    $(
                        Self::$name => &[ $( ($msb, $lsb), )* ],
                    )*
                }
            }

            /// Attempts to create an [`EncodingForm`] from its tag, returning an error if the
            /// tag is unknown
            pub fn try_from_name(st: &str) -> Result<EncodingForm, Error> {
                match st {
                    $(
                        $str_name => Ok(Self::$name),
                    )*
                    _ => Err(Error::UnknownForm(st.to_string())),
                }
            }
        }
    };
}

define_forms! {
    (I, "I", []),
    (B, "B", []),
    (SC, "SC", []),
    (D, "D", []),
    (M, "M", []),
    (X, "X", [(21, 30)]),
    (XL, "XL", [(21, 30)]),
    (XFX, "XFX", [(21, 30)]),
    (XFL, "XFL", [(21, 30)]),
    (VX, "VX", [(21, 31)]),
    (VX128, "VX128", [(22, 25), (27, 27)]),
    (VX128_1, "VX128_1", [(21, 27), (30, 31)]),
    (VX128_2, "VX128_2", [(22, 22), (27, 27)]),
    (VX128_3, "VX128_3", [(21, 27)]),
    (VX128_4, "VX128_4", [(21, 23), (26, 27)]),
    (VX128_5, "VX128_5", [(27, 27)]),
    (VX128_R, "VX128_R", [(22, 24), (27, 27)]),
    (VX128_P, "VX128_P", [(21, 22), (26, 27)]),
    (VC, "VC", [(22, 31)]),
    (VA, "VA", [(26, 31)]),
    (XO, "XO", [(22, 30)]),
    (XW, "XW", [(25, 30)]),
    (A, "A", [(26, 30)]),
    (DS, "DS", [(30, 31)]),
    (MD, "MD", [(27, 30)]),
    (MDS, "MDS", [(27, 30)]),
    (MDSH, "MDSH", [(27, 29)]),
    (XS, "XS", [(21, 29)]),
    (DCBZ, "DCBZ", [(6, 10), (21, 30)]),
}

impl EncodingForm {
    /// Returns the validated extended opcode ranges of the form
    pub fn extended_ranges(&self) -> Result<Vec<BitRange>, Error> {
        self.raw_extended_ranges().iter().map(|&(msb, lsb)| BitRange::new(msb, lsb)).collect()
    }

    /// Returns the extraction expression of the form's extended opcode; empty for primary-only
    /// forms
    pub fn field_expression(&self) -> Result<FieldExpression, Error> {
        FieldExpression::new(&self.extended_ranges()?)
    }

    pub const fn has_extended_opcode(&self) -> bool {
        !self.raw_extended_ranges().is_empty()
    }
}

impl Display for EncodingForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EncodingForm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_name(s)
    }
}
