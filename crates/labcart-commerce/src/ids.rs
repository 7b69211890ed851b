//! Newtype IDs and structured item identity.
//!
//! Newtypes prevent mixing up identifier kinds. Bundle identity is a
//! value-compared struct rather than a joined string, so the order in which
//! parts were selected can never produce two keys for the same bundle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(String);

        impl $name {
            /// Create an ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(UserId);
define_id!(QuotationId);
define_id!(DocumentId);

/// Identity of a bundle: the parent product plus the set of selected parts.
///
/// Compared by value; `parts` is a sorted set, so two selections of the same
/// parts in different order are the same bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BundleKey {
    pub parent: ProductId,
    pub parts: BTreeSet<ProductId>,
}

impl BundleKey {
    pub fn new(parent: ProductId, parts: impl IntoIterator<Item = ProductId>) -> Self {
        Self {
            parent,
            parts: parts.into_iter().collect(),
        }
    }
}

impl fmt::Display for BundleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parent)?;
        for part in &self.parts {
            write!(f, "+{part}")?;
        }
        Ok(())
    }
}

/// Identity of a cart line: a plain product or a bundle with parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKey {
    Product(ProductId),
    Bundle(BundleKey),
}

impl ItemKey {
    /// The product id of the line itself (the bundle parent for bundles).
    pub fn product_id(&self) -> &ProductId {
        match self {
            ItemKey::Product(id) => id,
            ItemKey::Bundle(bundle) => &bundle.parent,
        }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Product(id) => write!(f, "{id}"),
            ItemKey::Bundle(bundle) => write!(f, "{bundle}"),
        }
    }
}

impl From<ProductId> for ItemKey {
    fn from(id: ProductId) -> Self {
        ItemKey::Product(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrip() {
        let id = ProductId::new("prod-123");
        assert_eq!(id.as_str(), "prod-123");
        assert_eq!(format!("{id}"), "prod-123");
    }

    #[test]
    fn bundle_key_ignores_selection_order() {
        let a = BundleKey::new(
            ProductId::new("parent"),
            [ProductId::new("p1"), ProductId::new("p2")],
        );
        let b = BundleKey::new(
            ProductId::new("parent"),
            [ProductId::new("p2"), ProductId::new("p1")],
        );
        assert_eq!(a, b);
        assert_eq!(ItemKey::Bundle(a), ItemKey::Bundle(b));
    }

    #[test]
    fn bundle_key_distinguishes_part_sets() {
        let a = BundleKey::new(ProductId::new("parent"), [ProductId::new("p1")]);
        let b = BundleKey::new(
            ProductId::new("parent"),
            [ProductId::new("p1"), ProductId::new("p2")],
        );
        assert_ne!(a, b);
    }

    #[test]
    fn bundle_key_display_is_sorted() {
        let key = BundleKey::new(
            ProductId::new("parent"),
            [ProductId::new("p2"), ProductId::new("p1")],
        );
        assert_eq!(key.to_string(), "parent+p1+p2");
    }
}
