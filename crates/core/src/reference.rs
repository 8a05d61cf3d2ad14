//! Reference data offered by the product form.
//!
//! The vendor directory and category list are fixed for now; the backend
//! validates them again on create.

use crate::types::VendorId;

/// Label shown in place of an unselected category.
pub const CATEGORY_PLACEHOLDER: &str = "Select Category";

/// Categories a product can be filed under.
pub const CATEGORIES: &[&str] = &[
    "Electronics",
    "Mobile Phones & Accessories",
    "Clothing & Apparel",
    "Beauty, Health & Personal Care (Cosmetics)",
    "Home & Kitchen",
    "Books & Media",
    "Sports & Fitness",
    "Automotive",
    "Toys & Gaming",
];

/// A vendor that supplies products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vendor {
    pub id: &'static str,
    pub name: &'static str,
}

/// Known vendors.
pub const VENDORS: &[Vendor] = &[
    Vendor {
        id: "VEN-2023-A789",
        name: "Global Distributors Inc.",
    },
    Vendor {
        id: "VEN-2024-B101",
        name: "Tech Solutions LLC",
    },
    Vendor {
        id: "VEN-2024-C202",
        name: "Cosmetic Kings India",
    },
    Vendor {
        id: "VEN-2025-D303",
        name: "Fashion Forward Co.",
    },
];

/// Look up a vendor by ID.
#[must_use]
pub fn find_vendor(id: &str) -> Option<&'static Vendor> {
    VENDORS.iter().find(|vendor| vendor.id == id)
}

/// Returns `true` if `category` is an actual selection, not blank or the
/// placeholder.
#[must_use]
pub fn is_category_selected(category: &str) -> bool {
    let category = category.trim();
    !category.is_empty() && category != CATEGORY_PLACEHOLDER
}

impl Vendor {
    /// The vendor's ID as a typed value.
    #[must_use]
    pub fn vendor_id(&self) -> VendorId {
        VendorId::new(self.id)
    }
}
