//! Product and variant types.
//!
//! These mirror the catalog backend's document shape (camelCase JSON). A
//! [`Product`] exclusively owns its [`Variant`]s, and each variant owns its
//! colors, images and specifications.

use serde::{Deserialize, Serialize};

use super::color::{Color, HexColor};
use super::id::{ProductId, VariantId};
use super::image::Image;
use super::money::Money;
use super::status::PublishStatus;

/// A free-form key/value attribute (e.g., "Material" = "Polycotton").
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Specification {
    pub key: String,
    pub value: String,
}

impl Specification {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// A specification is only retained when both fields are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.key.trim().is_empty() && !self.value.trim().is_empty()
    }
}

/// Long-form copy for a variant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    #[serde(default)]
    pub story: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub style_note: String,
}

/// A buyer review attached to a variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

/// One color/size/SKU combination of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(rename = "PV_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<VariantId>,
    pub color: HexColor,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub product_colors: Vec<Color>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub specifications: Vec<Specification>,
    /// Always a single-element list on the wire.
    pub price: Vec<Money>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub description: Description,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub product_ratings: f64,
}

const fn default_true() -> bool {
    true
}

impl Variant {
    /// The variant's price record.
    #[must_use]
    pub fn price(&self) -> Option<&Money> {
        self.price.first()
    }

    /// Returns `true` if any of the variant's colors is the prime color.
    #[must_use]
    pub fn has_prime_color(&self) -> bool {
        self.product_colors.iter().any(|color| color.is_prime)
    }

    /// Buyer-facing stock label.
    #[must_use]
    pub fn stock_label(&self) -> String {
        if self.in_stock {
            let plural = if self.stock == 1 { "" } else { "s" };
            format!("In Stock ({} unit{plural})", self.stock)
        } else {
            "Out of Stock".to_string()
        }
    }
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub highlight_heading: String,
    #[serde(default)]
    pub vendor_id: String,
    #[serde(default)]
    pub vendor_name: String,
    #[serde(default)]
    pub publish_status: PublishStatus,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub variations: Vec<Variant>,
    #[serde(default)]
    pub warranty_years: u32,
    #[serde(default)]
    pub return_policy_days: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn variant(stock: u32, in_stock: bool) -> Variant {
        Variant {
            id: None,
            color: HexColor::white(),
            size: "M".to_string(),
            stock,
            sku: "SKU".to_string(),
            slug: "sku".to_string(),
            product_colors: vec![],
            images: vec![],
            specifications: vec![],
            price: vec![],
            is_active: true,
            in_stock,
            description: Description::default(),
            reviews: vec![],
            product_ratings: 0.0,
        }
    }

    #[test]
    fn test_specification_completeness() {
        assert!(Specification::new("Material", "Cotton").is_complete());
        assert!(!Specification::new("Material", " ").is_complete());
        assert!(!Specification::default().is_complete());
    }

    #[test]
    fn test_stock_label() {
        assert_eq!(variant(1, true).stock_label(), "In Stock (1 unit)");
        assert_eq!(variant(5, true).stock_label(), "In Stock (5 units)");
        assert_eq!(variant(0, false).stock_label(), "Out of Stock");
    }

    #[test]
    fn test_variant_wire_names() {
        let json = serde_json::to_value(variant(2, true)).unwrap();
        assert!(json.get("productColors").is_some());
        assert!(json.get("inStock").is_some());
        assert!(json.get("PV_id").is_none());
    }

    #[test]
    fn test_product_minimal_document() {
        let product: Product = serde_json::from_str(
            r##"{
                "_id": {"$oid": "p1"},
                "name": "Tee",
                "variations": [{"color": "#4640bf", "price": [{"mrp": 10, "sellingPrice": 9, "discountPercent": 10}]}],
                "returnPolicyDays": 7
            }"##,
        )
        .unwrap();
        assert_eq!(product.id.unwrap().as_str(), "p1");
        assert_eq!(product.variations[0].color.as_str(), "#4640BF");
        assert!(product.variations[0].is_active);
        assert_eq!(product.publish_status, PublishStatus::Draft);
    }
}
