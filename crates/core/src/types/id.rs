//! Newtype IDs for type-safe entity references.
//!
//! IDs are serial integers assigned by the database. The `define_id!` macro
//! keeps a `ShopId` from being passed where a `ProductId` is expected.

use serde::{Deserialize, Serialize};

/// Define a type-safe ID wrapper around `i32`.
///
/// The generated type is `Copy`, serializes transparently, and (with the
/// `postgres` feature) maps to `INT4` via sqlx's transparent derive.
///
/// # Example
///
/// ```rust
/// # use shoplokalt_core::define_id;
/// define_id!(ShopId);
/// define_id!(ProductId);
///
/// let shop = ShopId::new(7);
/// assert_eq!(shop.get(), 7);
/// // A ProductId is a different type; `let _: ShopId = ProductId::new(7);`
/// // does not compile.
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        #[cfg_attr(feature = "postgres", derive(::sqlx::Type))]
        #[cfg_attr(feature = "postgres", sqlx(transparent))]
        pub struct $name(i32);

        impl $name {
            /// Wrap a raw database ID.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// The raw database ID.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ShopId);
define_id!(ProductId);
define_id!(OrderId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let id = ShopId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(i32::from(id), 42);
        assert_eq!(ShopId::from(42), id);
    }

    #[test]
    fn test_display() {
        assert_eq!(ProductId::new(17).to_string(), "17");
    }

    #[test]
    fn test_serde_transparent() {
        let id = OrderId::new(9);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "9");
        let back: OrderId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
