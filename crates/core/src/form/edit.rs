//! Edits and the reducer that applies them.
//!
//! Each field group has its own edit enum and `apply_*` function. Every
//! function takes the current form by value and returns the next one.
//!
//! Edits that address a row by index are ignored when the index is out of
//! range. Edits that address a per-color record are ignored when the color is
//! not in the form.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::{ColorDetail, ColorEntry, ProductForm, VariationRow};
use crate::pricing::{parse_amount, selling_price};
use crate::primary::{At, ByKey, add_item, remove_item_or_seed, set_only};
use crate::reference::find_vendor;
use crate::types::{
    ColorId, CurrencyCode, HexColor, Image, PublishStatus, Specification, slugify,
};

/// Any edit to the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "group", rename_all = "camelCase")]
pub enum FormEdit {
    Field(FieldEdit),
    Price { color: ColorId, edit: PriceEdit },
    Color(ColorEdit),
    Image { color: ColorId, edit: ImageEdit },
    Specification { color: ColorId, edit: SpecificationEdit },
    Description { color: ColorId, edit: DescriptionEdit },
    Variation(VariationEdit),
}

/// Route an edit to its field group.
#[must_use]
pub fn apply(form: ProductForm, edit: FormEdit) -> ProductForm {
    match edit {
        FormEdit::Field(edit) => apply_field(form, edit),
        FormEdit::Price { color, edit } => apply_price(form, color, edit),
        FormEdit::Color(edit) => apply_color(form, edit),
        FormEdit::Image { color, edit } => apply_image(form, color, edit),
        FormEdit::Specification { color, edit } => apply_specification(form, color, edit),
        FormEdit::Description { color, edit } => apply_description(form, color, edit),
        FormEdit::Variation(edit) => apply_variation(form, edit),
    }
}

// ----------------------------------------------------------------------------
// Product fields
// ----------------------------------------------------------------------------

/// Top-level product fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldEdit {
    /// Also recomputes the slug.
    Name(String),
    Brand(String),
    Sku(String),
    Category(String),
    SubCategory(String),
    /// Also sets the vendor name from the directory; unknown IDs clear it.
    Vendor(String),
    PublishStatus(PublishStatus),
    HighlightHeading(String),
    Keywords(String),
    Tags(String),
    WarrantyYears(String),
    ReturnPolicyDays(String),
    Currency(CurrencyCode),
}

#[must_use]
pub fn apply_field(mut form: ProductForm, edit: FieldEdit) -> ProductForm {
    match edit {
        FieldEdit::Name(name) => {
            form.slug = slugify(&name);
            form.name = name;
        }
        FieldEdit::Brand(brand) => form.brand = brand,
        FieldEdit::Sku(sku) => form.sku = sku,
        FieldEdit::Category(category) => form.category = category,
        FieldEdit::SubCategory(sub_category) => form.sub_category = sub_category,
        FieldEdit::Vendor(vendor_id) => {
            form.vendor_name = find_vendor(&vendor_id)
                .map(|vendor| vendor.name.to_string())
                .unwrap_or_default();
            form.vendor_id = vendor_id;
        }
        FieldEdit::PublishStatus(status) => form.publish_status = status,
        FieldEdit::HighlightHeading(heading) => form.highlight_heading = heading,
        FieldEdit::Keywords(keywords) => form.keywords = keywords,
        FieldEdit::Tags(tags) => form.tags = tags,
        FieldEdit::WarrantyYears(years) => form.warranty_years = years,
        FieldEdit::ReturnPolicyDays(days) => form.return_policy_days = days,
        FieldEdit::Currency(currency) => form.currency = currency,
    }
    form
}

// ----------------------------------------------------------------------------
// Per-color price
// ----------------------------------------------------------------------------

/// Price inputs for one color. The selling price is recomputed on every edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum PriceEdit {
    Mrp(String),
    DiscountPercent(String),
}

#[must_use]
pub fn apply_price(form: ProductForm, color: ColorId, edit: PriceEdit) -> ProductForm {
    with_detail(form, color, |detail| {
        let price = &mut detail.price;
        match edit {
            PriceEdit::Mrp(mrp) => price.mrp = mrp,
            PriceEdit::DiscountPercent(discount) => price.discount_percent = discount,
        }
        price.selling_price =
            selling_price(parse_amount(&price.mrp), parse_amount(&price.discount_percent));
    })
}

// ----------------------------------------------------------------------------
// Colors
// ----------------------------------------------------------------------------

/// Color list edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ColorEdit {
    /// Append a white color. It becomes prime only if no color is prime.
    Add { id: ColorId },
    SetHex { id: ColorId, hex: HexColor },
    SetPrime { id: ColorId },
    /// Remove a color with its detail record and variation rows.
    Remove { id: ColorId },
}

#[must_use]
pub fn apply_color(mut form: ProductForm, edit: ColorEdit) -> ProductForm {
    match edit {
        ColorEdit::Add { id } => {
            if form.color(id).is_some() {
                return form;
            }
            let is_prime = form.prime_color().is_none();
            form.colors = add_item(&form.colors, ColorEntry::white(id, is_prime));
            form.details.entry(id).or_default();
        }
        ColorEdit::SetHex { id, hex } => {
            if let Some(color) = form.colors.iter_mut().find(|color| color.id == id) {
                color.hex = hex;
            }
        }
        ColorEdit::SetPrime { id } => {
            form.colors = set_only(&form.colors, &ByKey(&id));
        }
        ColorEdit::Remove { id } => {
            if form.color(id).is_none() {
                return form;
            }
            form.colors = remove_item_or_seed(&form.colors, &ByKey(&id), ColorEntry::seed);
            form.details.shift_remove(&id);
            form.variations.retain(|row| row.color != Some(id));
            if form.variations.is_empty() {
                form.variations.push(VariationRow::default());
            }
        }
    }
    form
}

// ----------------------------------------------------------------------------
// Per-color images
// ----------------------------------------------------------------------------

/// Image list edits for one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ImageEdit {
    /// Append a blank, non-primary image.
    Add,
    Url { index: usize, url: String },
    Alt { index: usize, alt: String },
    SetPrimary { index: usize },
    /// Removing the last image leaves one blank primary image.
    Remove { index: usize },
}

#[must_use]
pub fn apply_image(form: ProductForm, color: ColorId, edit: ImageEdit) -> ProductForm {
    with_detail(form, color, |detail| {
        let images = &mut detail.images;
        match edit {
            ImageEdit::Add => *images = add_item(images, Image::blank(false)),
            ImageEdit::Url { index, url } => {
                if let Some(image) = images.get_mut(index) {
                    image.url = url;
                }
            }
            ImageEdit::Alt { index, alt } => {
                if let Some(image) = images.get_mut(index) {
                    image.alt = alt;
                }
            }
            ImageEdit::SetPrimary { index } => {
                if index < images.len() {
                    *images = set_only(images, &At(index));
                }
            }
            ImageEdit::Remove { index } => {
                *images = remove_item_or_seed(images, &At(index), || Image::blank(true));
            }
        }
    })
}

// ----------------------------------------------------------------------------
// Per-color specifications and description
// ----------------------------------------------------------------------------

/// Specification row edits for one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum SpecificationEdit {
    Add,
    Key { index: usize, key: String },
    Value { index: usize, value: String },
    /// Removing the last row leaves one blank row.
    Remove { index: usize },
}

#[must_use]
pub fn apply_specification(
    form: ProductForm,
    color: ColorId,
    edit: SpecificationEdit,
) -> ProductForm {
    with_detail(form, color, |detail| {
        let rows = &mut detail.specifications;
        match edit {
            SpecificationEdit::Add => rows.push(Specification::default()),
            SpecificationEdit::Key { index, key } => {
                if let Some(row) = rows.get_mut(index) {
                    row.key = key;
                }
            }
            SpecificationEdit::Value { index, value } => {
                if let Some(row) = rows.get_mut(index) {
                    row.value = value;
                }
            }
            SpecificationEdit::Remove { index } => remove_row(rows, index),
        }
    })
}

/// Description fields for one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum DescriptionEdit {
    Story(String),
    Details(String),
    StyleNote(String),
}

#[must_use]
pub fn apply_description(form: ProductForm, color: ColorId, edit: DescriptionEdit) -> ProductForm {
    with_detail(form, color, |detail| {
        let description = &mut detail.description;
        match edit {
            DescriptionEdit::Story(story) => description.story = story,
            DescriptionEdit::Details(details) => description.details = details,
            DescriptionEdit::StyleNote(note) => description.style_note = note,
        }
    })
}

// ----------------------------------------------------------------------------
// Variation rows
// ----------------------------------------------------------------------------

/// Variation row edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum VariationEdit {
    Add,
    Color { index: usize, color: Option<ColorId> },
    Size { index: usize, size: String },
    /// Raw input; anything non-numeric is stored as zero.
    Stock { index: usize, stock: String },
    Sku { index: usize, sku: String },
    /// Removing the last row leaves one blank row.
    Remove { index: usize },
}

#[must_use]
pub fn apply_variation(mut form: ProductForm, edit: VariationEdit) -> ProductForm {
    let rows = &mut form.variations;
    match edit {
        VariationEdit::Add => rows.push(VariationRow::default()),
        VariationEdit::Color { index, color } => {
            if let Some(row) = rows.get_mut(index) {
                row.color = color;
            }
        }
        VariationEdit::Size { index, size } => {
            if let Some(row) = rows.get_mut(index) {
                row.size = size;
            }
        }
        VariationEdit::Stock { index, stock } => {
            if let Some(row) = rows.get_mut(index) {
                row.stock = parse_count(&stock);
            }
        }
        VariationEdit::Sku { index, sku } => {
            if let Some(row) = rows.get_mut(index) {
                row.sku = sku;
            }
        }
        VariationEdit::Remove { index } => remove_row(rows, index),
    }
    form
}

/// A whole, non-negative count. Fractions are truncated; negative or non-numeric
/// input is zero.
#[must_use]
pub fn parse_count(input: &str) -> u32 {
    let amount = parse_amount(input).trunc();
    if amount <= Decimal::ZERO {
        return 0;
    }
    amount.to_u32().unwrap_or(u32::MAX)
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

fn with_detail(
    mut form: ProductForm,
    color: ColorId,
    update: impl FnOnce(&mut ColorDetail),
) -> ProductForm {
    if form.color(color).is_none() {
        return form;
    }
    update(form.details.entry(color).or_default());
    form
}

fn remove_row<T: Default>(rows: &mut Vec<T>, index: usize) {
    if index >= rows.len() {
        return;
    }
    rows.remove(index);
    if rows.is_empty() {
        rows.push(T::default());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::primary::flagged_count;

    fn form_with_colors(count: usize) -> (ProductForm, Vec<ColorId>) {
        let ids: Vec<ColorId> = (0..count).map(|_| ColorId::generate()).collect();
        let form = ids.iter().fold(ProductForm::default(), |form, &id| {
            apply_color(form, ColorEdit::Add { id })
        });
        (form, ids)
    }

    #[test]
    fn test_name_edit_updates_slug() {
        let form = apply_field(
            ProductForm::default(),
            FieldEdit::Name("Premium T-Shirt (HK)".to_string()),
        );
        assert_eq!(form.name, "Premium T-Shirt (HK)");
        assert_eq!(form.slug, "premium-t-shirt-hk");
    }

    #[test]
    fn test_vendor_edit_sets_name() {
        let form = apply_field(
            ProductForm::default(),
            FieldEdit::Vendor("VEN-2024-C202".to_string()),
        );
        assert_eq!(form.vendor_name, "Cosmetic Kings India");

        let form = apply_field(form, FieldEdit::Vendor("nope".to_string()));
        assert_eq!(form.vendor_id, "nope");
        assert!(form.vendor_name.is_empty());
    }

    #[test]
    fn test_first_color_is_prime_second_is_not() {
        let (form, ids) = form_with_colors(2);
        assert!(form.colors[0].is_prime);
        assert!(!form.colors[1].is_prime);
        assert_eq!(form.colors[1].hex, HexColor::white());
        assert_eq!(form.details.len(), 2);
        assert_eq!(form.colors[0].id, ids[0]);
    }

    #[test]
    fn test_add_color_when_none_prime_becomes_prime() {
        let (form, _) = form_with_colors(1);
        let unknown = ColorId::generate();
        let form = apply_color(form, ColorEdit::SetPrime { id: unknown });
        assert_eq!(flagged_count(&form.colors), 0);

        let id = ColorId::generate();
        let form = apply_color(form, ColorEdit::Add { id });
        assert_eq!(form.prime_color().unwrap().id, id);
        assert_eq!(flagged_count(&form.colors), 1);
    }

    #[test]
    fn test_add_existing_color_id_is_ignored() {
        let (form, ids) = form_with_colors(1);
        let again = apply_color(form.clone(), ColorEdit::Add { id: ids[0] });
        assert_eq!(again, form);
    }

    #[test]
    fn test_set_prime_moves_flag() {
        let (form, ids) = form_with_colors(3);
        let form = apply_color(form, ColorEdit::SetPrime { id: ids[2] });
        assert_eq!(flagged_count(&form.colors), 1);
        assert_eq!(form.prime_color().unwrap().id, ids[2]);
    }

    #[test]
    fn test_remove_prime_color_promotes_first_remaining() {
        let (form, ids) = form_with_colors(3);
        let form = apply_color(form, ColorEdit::Remove { id: ids[0] });
        assert_eq!(form.colors.len(), 2);
        assert_eq!(form.prime_color().unwrap().id, ids[1]);
        assert!(!form.details.contains_key(&ids[0]));
    }

    #[test]
    fn test_remove_last_color_reseeds() {
        let (form, ids) = form_with_colors(1);
        let form = apply_color(form, ColorEdit::Remove { id: ids[0] });
        assert_eq!(form.colors.len(), 1);
        let seed = &form.colors[0];
        assert!(seed.is_prime);
        assert_eq!(seed.hex.as_str(), "#007BFF");
        assert_ne!(seed.id, ids[0]);
        assert!(form.details.is_empty());
    }

    #[test]
    fn test_remove_color_drops_its_variations() {
        let (form, ids) = form_with_colors(2);
        let form = [
            VariationEdit::Color { index: 0, color: Some(ids[0]) },
            VariationEdit::Add,
            VariationEdit::Color { index: 1, color: Some(ids[1]) },
        ]
        .into_iter()
        .fold(form, apply_variation);

        let form = apply_color(form, ColorEdit::Remove { id: ids[0] });
        assert_eq!(form.variations.len(), 1);
        assert_eq!(form.variations[0].color, Some(ids[1]));

        let form = apply_color(form, ColorEdit::Remove { id: ids[1] });
        assert_eq!(form.variations, vec![VariationRow::default()]);
    }

    #[test]
    fn test_set_hex() {
        let (form, ids) = form_with_colors(1);
        let hex = HexColor::parse("#ff0000").unwrap();
        let form = apply_color(form, ColorEdit::SetHex { id: ids[0], hex: hex.clone() });
        assert_eq!(form.colors[0].hex, hex);
    }

    #[test]
    fn test_price_edit_recomputes_selling_price() {
        let (form, ids) = form_with_colors(1);
        let form = apply_price(form, ids[0], PriceEdit::Mrp("5767".to_string()));
        assert_eq!(form.detail(ids[0]).price.selling_price, Decimal::new(5767, 0));

        let form = apply_price(form, ids[0], PriceEdit::DiscountPercent("14".to_string()));
        let detail = form.detail(ids[0]);
        assert_eq!(detail.price.selling_price, Decimal::new(495_962, 2));
        assert_eq!(detail.price.discount_percent, "14");
    }

    #[test]
    fn test_price_edit_keeps_raw_discount() {
        let (form, ids) = form_with_colors(1);
        let form = apply_price(form, ids[0], PriceEdit::Mrp("100".to_string()));
        let form = apply_price(form, ids[0], PriceEdit::DiscountPercent("150".to_string()));
        let detail = form.detail(ids[0]);
        assert_eq!(detail.price.discount_percent, "150");
        assert_eq!(detail.price.selling_price, Decimal::ZERO);
    }

    #[test]
    fn test_edits_for_unknown_color_are_ignored() {
        let (form, _) = form_with_colors(1);
        let stranger = ColorId::generate();
        let next = apply_price(form.clone(), stranger, PriceEdit::Mrp("10".to_string()));
        assert_eq!(next, form);
        let next = apply_image(form.clone(), stranger, ImageEdit::Add);
        assert_eq!(next, form);
    }

    #[test]
    fn test_image_edits() {
        let (form, ids) = form_with_colors(1);
        let id = ids[0];
        let form = [
            ImageEdit::Url { index: 0, url: "https://cdn.test/a.jpg".to_string() },
            ImageEdit::Add,
            ImageEdit::Url { index: 1, url: "https://cdn.test/b.jpg".to_string() },
            ImageEdit::Alt { index: 1, alt: "Back".to_string() },
        ]
        .into_iter()
        .fold(form, |form, edit| apply_image(form, id, edit));

        let images = form.detail(id).images.clone();
        assert_eq!(images.len(), 2);
        assert!(images[0].is_primary);
        assert!(!images[1].is_primary);
        assert_eq!(images[1].alt, "Back");

        let form = apply_image(form, id, ImageEdit::SetPrimary { index: 1 });
        let images = &form.detail(id).images;
        assert!(!images[0].is_primary);
        assert!(images[1].is_primary);
    }

    #[test]
    fn test_remove_primary_image_promotes_first() {
        let (form, ids) = form_with_colors(1);
        let id = ids[0];
        let form = apply_image(form, id, ImageEdit::Add);
        let form = apply_image(form, id, ImageEdit::Add);
        let form = apply_image(form, id, ImageEdit::Remove { index: 0 });
        let images = &form.detail(id).images;
        assert_eq!(images.len(), 2);
        assert!(images[0].is_primary);
    }

    #[test]
    fn test_remove_last_image_reseeds_blank_primary() {
        let (form, ids) = form_with_colors(1);
        let id = ids[0];
        let form = apply_image(
            form,
            id,
            ImageEdit::Url { index: 0, url: "https://cdn.test/a.jpg".to_string() },
        );
        let form = apply_image(form, id, ImageEdit::Remove { index: 0 });
        assert_eq!(form.detail(id).images, vec![Image::blank(true)]);
    }

    #[test]
    fn test_set_primary_out_of_range_is_ignored() {
        let (form, ids) = form_with_colors(1);
        let next = apply_image(form.clone(), ids[0], ImageEdit::SetPrimary { index: 4 });
        assert_eq!(next, form);
    }

    #[test]
    fn test_specification_rows() {
        let (form, ids) = form_with_colors(1);
        let id = ids[0];
        let form = [
            SpecificationEdit::Key { index: 0, key: "Fabric".to_string() },
            SpecificationEdit::Value { index: 0, value: "Cotton".to_string() },
            SpecificationEdit::Add,
        ]
        .into_iter()
        .fold(form, |form, edit| apply_specification(form, id, edit));

        let specs = &form.detail(id).specifications;
        assert_eq!(specs[0], Specification::new("Fabric", "Cotton"));
        assert_eq!(specs.len(), 2);

        let form = apply_specification(form, id, SpecificationEdit::Remove { index: 0 });
        let form = apply_specification(form, id, SpecificationEdit::Remove { index: 0 });
        assert_eq!(form.detail(id).specifications, vec![Specification::default()]);
    }

    #[test]
    fn test_description_fields() {
        let (form, ids) = form_with_colors(1);
        let form = apply_description(form, ids[0], DescriptionEdit::Story("Soft".to_string()));
        let form = apply_description(form, ids[0], DescriptionEdit::StyleNote("Casual".to_string()));
        let description = &form.detail(ids[0]).description;
        assert_eq!(description.story, "Soft");
        assert_eq!(description.style_note, "Casual");
        assert!(description.details.is_empty());
    }

    #[test]
    fn test_variation_rows() {
        let form = [
            VariationEdit::Size { index: 0, size: "M".to_string() },
            VariationEdit::Stock { index: 0, stock: "12".to_string() },
            VariationEdit::Sku { index: 0, sku: "TS-M".to_string() },
            VariationEdit::Add,
        ]
        .into_iter()
        .fold(ProductForm::default(), apply_variation);

        assert_eq!(form.variations.len(), 2);
        assert_eq!(form.variations[0].stock, 12);
        assert_eq!(form.variations[1], VariationRow::default());

        let form = apply_variation(form, VariationEdit::Remove { index: 0 });
        let form = apply_variation(form, VariationEdit::Remove { index: 0 });
        assert_eq!(form.variations, vec![VariationRow::default()]);
    }

    #[test]
    fn test_out_of_range_variation_edit_is_ignored() {
        let form = ProductForm::default();
        let next = apply_variation(form.clone(), VariationEdit::Sku { index: 5, sku: "X".to_string() });
        assert_eq!(next, form);
        let next = apply_variation(form.clone(), VariationEdit::Remove { index: 5 });
        assert_eq!(next, form);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count("12.9"), 12);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("-3"), 0);
        assert_eq!(parse_count("99999999999"), u32::MAX);
    }

    #[test]
    fn test_edit_json_shape() {
        let edit: FormEdit = serde_json::from_str(
            r#"{"group": "field", "field": "name", "value": "Tee"}"#,
        )
        .unwrap();
        assert_eq!(edit, FormEdit::Field(FieldEdit::Name("Tee".to_string())));

        let edit: FormEdit =
            serde_json::from_str(r#"{"group": "variation", "op": "add"}"#).unwrap();
        assert_eq!(edit, FormEdit::Variation(VariationEdit::Add));
    }
}
