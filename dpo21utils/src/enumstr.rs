//!
//! # Enum-String Mapping Module
//!
//! Defines the [enumstr] macro and paired [EnumStr] trait,
//! mapping fieldless enums to and from the short string-values
//! that placement formats (DEF components, LEF sites, command lines) use for them.
//!
//! The [EnumStr] trait defines three methods:
//! * `to_str(&self) -> &'static str` converts the enum to its string value.
//! * `from_str(&str) -> Option<Self>` does the opposite, matching case-sensitively.
//! * `parse(&str) -> Option<Self>` matches case-insensitively, after trimming whitespace.
//!
//! Example:
//!
//! ```rs
//! use dpo21utils::enumstr;
//!
//! enumstr!(
//! /// # Row Facing
//! RowFacing {
//!     North: "N",
//!     South: "S",
//!  }
//! );
//! ```
//!

///
/// # String-Enumeration Trait
///
/// While [EnumStr] can be implemented by any type, its primary intent is
/// for implementation by the [enumstr] macro.
///
pub trait EnumStr: std::marker::Sized {
    fn to_str(&self) -> &'static str;
    fn from_str(txt: &str) -> Option<Self>;
    /// Parse `txt` case-insensitively.
    /// String-values are expected to be written in upper-case, as in DEF and LEF.
    fn parse(txt: &str) -> Option<Self> {
        Self::from_str(&txt.trim().to_ascii_uppercase())
    }
}

///
/// # Enum-String Pairing Macro
///
/// Creates an `enum` which:
/// * (a) Has paired string-values
/// * (b) Implements the [EnumStr] trait for conversions to and from these strings
/// * (c) Implements [std::fmt::Display], writing the string-values
///
/// All variants are fieldless. Derived implementations include `Hash` and `serde::{Serialize,Deserialize}`,
/// so callers must have `serde`'s derive macros in scope.
///
#[macro_export]
macro_rules! enumstr {
    (   $(#[$meta: meta])*
        $enum_name: ident {
        $( $variant: ident : $strval: literal ),* $(,)?
    }) => {
        $(#[$meta])*
        #[allow(dead_code)]
        #[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
        pub enum $enum_name {
            $( #[doc=$strval]
                #[serde(rename=$strval)]
                $variant ),*
        }
        impl EnumStr for $enum_name {
            /// Convert a [$enum_name] variant to its paired (static) string value.
            #[allow(dead_code)]
            fn to_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $strval),*,
                }
            }
            /// Create a [$enum_name] from one of its string-values.
            /// Returns `None` if input `txt` does not match one of [$enum_name]'s variants.
            fn from_str(txt: &str) -> Option<Self> {
                match txt {
                    $( $strval => Some(Self::$variant)),*,
                    _ => None,
                }
            }
        }
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", self.to_str())
            }
        }
    }
}
