//! Product form state.
//!
//! A [`ProductForm`] is a plain, serializable value. It only changes through
//! [`ProductForm::apply`], which takes the current state and one edit and
//! returns the next state. Edits are grouped by field group (see [`edit`]):
//! product fields, per-color price, colors, per-color images, per-color
//! specifications, per-color description and variation rows.
//!
//! Per-color records live in an ordered map keyed by [`ColorId`]. Looking up
//! a color without a record yields a fresh default record.
//!
//! Before submission, [`ProductForm::submission`] runs the validation gate and
//! assembles the [`Product`] payload.

pub mod edit;
mod payload;
mod validate;

use std::borrow::Cow;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::derive_price_in;
use crate::primary::{Flagged, Keyed};
use crate::types::{
    ColorId, CurrencyCode, Description, HexColor, Image, Money, Product, PublishStatus,
    Specification,
};

pub use edit::{
    ColorEdit, DescriptionEdit, FieldEdit, FormEdit, ImageEdit, PriceEdit, SpecificationEdit,
    VariationEdit,
};
pub use payload::prepare_product;
pub use validate::{ImageProblem, RequiredField, SubmitError, validate_submission};

/// Default return window offered on new products, in days.
pub const DEFAULT_RETURN_POLICY_DAYS: u32 = 7;

/// The in-progress product being created.
///
/// Numeric inputs are kept as the raw strings the user typed so editing is
/// never disturbed; they are parsed when the payload is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductForm {
    pub name: String,
    /// Derived from `name` on every name edit.
    pub slug: String,
    pub brand: String,
    /// Optional product-level SKU; the backend checks it for uniqueness.
    pub sku: String,
    pub category: String,
    pub sub_category: String,
    pub vendor_id: String,
    pub vendor_name: String,
    pub publish_status: PublishStatus,
    pub highlight_heading: String,
    /// Comma-separated.
    pub keywords: String,
    /// Comma-separated.
    pub tags: String,
    pub warranty_years: String,
    pub return_policy_days: String,
    pub currency: CurrencyCode,
    pub colors: Vec<ColorEntry>,
    pub details: IndexMap<ColorId, ColorDetail>,
    pub variations: Vec<VariationRow>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            brand: String::new(),
            sku: String::new(),
            category: String::new(),
            sub_category: String::new(),
            vendor_id: String::new(),
            vendor_name: String::new(),
            publish_status: PublishStatus::Draft,
            highlight_heading: String::new(),
            keywords: String::new(),
            tags: String::new(),
            warranty_years: String::new(),
            return_policy_days: DEFAULT_RETURN_POLICY_DAYS.to_string(),
            currency: CurrencyCode::default(),
            colors: Vec::new(),
            details: IndexMap::new(),
            variations: vec![VariationRow::default()],
        }
    }
}

impl ProductForm {
    /// A blank form in the given currency.
    #[must_use]
    pub fn new(currency: CurrencyCode) -> Self {
        Self {
            currency,
            ..Self::default()
        }
    }

    /// Apply one edit and return the next state.
    #[must_use]
    pub fn apply(self, edit: FormEdit) -> Self {
        edit::apply(self, edit)
    }

    /// Apply a sequence of edits in order.
    #[must_use]
    pub fn apply_all(self, edits: impl IntoIterator<Item = FormEdit>) -> Self {
        edits.into_iter().fold(self, Self::apply)
    }

    /// The color with the given ID.
    #[must_use]
    pub fn color(&self, id: ColorId) -> Option<&ColorEntry> {
        self.colors.iter().find(|color| color.id == id)
    }

    /// The prime color, if one is designated.
    #[must_use]
    pub fn prime_color(&self) -> Option<&ColorEntry> {
        self.colors.iter().find(|color| color.is_prime)
    }

    /// Detail record for a color; a fresh default when none exists yet.
    #[must_use]
    pub fn detail(&self, id: ColorId) -> Cow<'_, ColorDetail> {
        self.details
            .get(&id)
            .map_or_else(|| Cow::Owned(ColorDetail::default()), Cow::Borrowed)
    }

    /// Validate the form and assemble the payload for the backend.
    ///
    /// # Errors
    ///
    /// Returns the first [`SubmitError`] found by [`validate_submission`].
    pub fn submission(&self) -> Result<Product, SubmitError> {
        validate_submission(self)?;
        prepare_product(self)
    }
}

/// A color as edited in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorEntry {
    pub id: ColorId,
    pub hex: HexColor,
    #[serde(default)]
    pub is_prime: bool,
}

impl ColorEntry {
    /// A new white color.
    #[must_use]
    pub fn white(id: ColorId, is_prime: bool) -> Self {
        Self {
            id,
            hex: HexColor::white(),
            is_prime,
        }
    }

    /// The single prime color a form falls back to when its last color is
    /// removed.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            id: ColorId::generate(),
            hex: HexColor::from_rgb(0x00, 0x7B, 0xFF),
            is_prime: true,
        }
    }
}

impl Flagged for ColorEntry {
    fn is_flagged(&self) -> bool {
        self.is_prime
    }

    fn set_flagged(&mut self, flagged: bool) {
        self.is_prime = flagged;
    }
}

impl Keyed for ColorEntry {
    type Key = ColorId;

    fn key(&self) -> &ColorId {
        &self.id
    }
}

/// Everything the form collects per color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorDetail {
    pub price: PriceInput,
    pub images: Vec<Image>,
    pub specifications: Vec<Specification>,
    pub description: Description,
}

impl Default for ColorDetail {
    fn default() -> Self {
        Self {
            price: PriceInput::default(),
            images: vec![Image::blank(true)],
            specifications: vec![Specification::default()],
            description: Description::default(),
        }
    }
}

/// Price inputs as typed, with the derived selling price.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceInput {
    pub mrp: String,
    pub discount_percent: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub selling_price: Decimal,
}

impl PriceInput {
    /// The price record these inputs describe.
    #[must_use]
    pub fn money(&self, currency: CurrencyCode) -> Money {
        derive_price_in(&self.mrp, &self.discount_percent, currency)
    }
}

/// One variation row: a color, a size and its stock.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VariationRow {
    pub color: Option<ColorId>,
    pub size: String,
    pub stock: u32,
    pub sku: String,
}

impl VariationRow {
    /// Rows without a SKU are left out of the payload.
    #[must_use]
    pub fn has_sku(&self) -> bool {
        !self.sku.trim().is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_form() {
        let form = ProductForm::default();
        assert!(form.colors.is_empty());
        assert_eq!(form.variations, vec![VariationRow::default()]);
        assert_eq!(form.return_policy_days, "7");
        assert_eq!(form.publish_status, PublishStatus::Draft);
    }

    #[test]
    fn test_missing_detail_is_fresh_default() {
        let form = ProductForm::default();
        let detail = form.detail(ColorId::generate());
        assert!(matches!(detail, Cow::Owned(_)));
        assert_eq!(*detail, ColorDetail::default());
        assert_eq!(detail.images, vec![Image::blank(true)]);
    }

    #[test]
    fn test_form_serde_round_trip_keeps_detail_order() {
        let first = ColorId::generate();
        let second = ColorId::generate();
        let form = ProductForm::default()
            .apply(FormEdit::Color(ColorEdit::Add { id: first }))
            .apply(FormEdit::Color(ColorEdit::Add { id: second }));

        let json = serde_json::to_string(&form).unwrap();
        let parsed: ProductForm = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, form);
        assert_eq!(parsed.details.keys().copied().collect::<Vec<_>>(), vec![first, second]);
    }

    #[test]
    fn test_partial_form_document_uses_defaults() {
        let form: ProductForm = serde_json::from_str(r#"{"name": "Tee"}"#).unwrap();
        assert_eq!(form.name, "Tee");
        assert_eq!(form.return_policy_days, "7");
        assert_eq!(form.variations.len(), 1);
    }

    #[test]
    fn test_price_input_money() {
        let price = PriceInput {
            mrp: "5767".to_string(),
            discount_percent: "14".to_string(),
            selling_price: Decimal::ZERO,
        };
        assert_eq!(
            price.money(CurrencyCode::INR).selling_price,
            Decimal::new(495_962, 2)
        );
    }
}
