//! Pre-submit validation.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use super::ProductForm;
use crate::primary::has_flagged;
use crate::reference::is_category_selected;
use crate::types::{HexColor, Image};

/// Required product field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Name,
    Vendor,
    Category,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "Product Name",
            Self::Vendor => "Vendor",
            Self::Category => "Category",
        })
    }
}

/// What is wrong with a color's images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageProblem {
    NoImages,
    NoPrimary,
}

impl fmt::Display for ImageProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoImages => "no images",
            Self::NoPrimary => "no primary image",
        })
    }
}

/// Why a form cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error(
        "Please fill in all required fields (Product Name, Vendor, Category). Missing: {field}."
    )]
    MissingRequiredField { field: RequiredField },

    #[error("MRP and Selling Price must be greater than zero (color {color}).")]
    InvalidPrice { color: HexColor },

    #[error("You must define at least one color and designate one as the Prime Color.")]
    NoPrimaryColor,

    #[error("Color {color} needs at least one image marked as primary ({problem}).")]
    IncompletePrimaryImage { color: HexColor, problem: ImageProblem },

    #[error("Variations with an SKU must have a selected Color and Size (SKU {sku}).")]
    InvalidVariationReference { sku: String },
}

/// Run every pre-submit check in order and return the first failure.
///
/// Order: required fields, prices, prime color, primary images, variation
/// references.
///
/// # Errors
///
/// Returns the first [`SubmitError`] found.
pub fn validate_submission(form: &ProductForm) -> Result<(), SubmitError> {
    check_required(form)?;
    check_prices(form)?;
    check_prime_color(form)?;
    check_images(form)?;
    check_variations(form)
}

/// Name and vendor must have non-whitespace text. The payload trims the
/// name, so a blank one would reach the backend as an empty string.
fn check_required(form: &ProductForm) -> Result<(), SubmitError> {
    let missing = if form.name.trim().is_empty() {
        Some(RequiredField::Name)
    } else if form.vendor_id.trim().is_empty() {
        Some(RequiredField::Vendor)
    } else if !is_category_selected(&form.category) {
        Some(RequiredField::Category)
    } else {
        None
    };
    missing.map_or(Ok(()), |field| {
        Err(SubmitError::MissingRequiredField { field })
    })
}

fn check_prices(form: &ProductForm) -> Result<(), SubmitError> {
    for color in &form.colors {
        let money = form.detail(color.id).price.money(form.currency);
        if money.mrp <= Decimal::ZERO
            || money.selling_price <= Decimal::ZERO
        {
            return Err(SubmitError::InvalidPrice {
                color: color.hex.clone(),
            });
        }
    }
    Ok(())
}

fn check_prime_color(form: &ProductForm) -> Result<(), SubmitError> {
    if has_flagged(&form.colors) {
        Ok(())
    } else {
        Err(SubmitError::NoPrimaryColor)
    }
}

fn check_images(form: &ProductForm) -> Result<(), SubmitError> {
    for color in &form.colors {
        let detail = form.detail(color.id);
        let images: Vec<&Image> = detail.images.iter().filter(|i| i.has_url()).collect();
        let problem = if images.is_empty() {
            Some(ImageProblem::NoImages)
        } else if !images.iter().any(|image| image.is_primary) {
            Some(ImageProblem::NoPrimary)
        } else {
            None
        };
        if let Some(problem) = problem {
            return Err(SubmitError::IncompletePrimaryImage {
                color: color.hex.clone(),
                problem,
            });
        }
    }
    Ok(())
}

fn check_variations(form: &ProductForm) -> Result<(), SubmitError> {
    let broken = form.variations.iter().filter(|row| row.has_sku()).find(|row| {
        let color_known = row.color.is_some_and(|id| form.color(id).is_some());
        !color_known || row.size.trim().is_empty()
    });
    match broken {
        Some(row) => Err(SubmitError::InvalidVariationReference {
            sku: row.sku.trim().to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::form::{ColorEdit, FieldEdit, FormEdit, ImageEdit, PriceEdit, VariationEdit};
    use crate::types::ColorId;

    fn valid_form() -> (ProductForm, ColorId) {
        let id = ColorId::generate();
        let form = ProductForm::default().apply_all([
            FormEdit::Field(FieldEdit::Name("Premium T-Shirt".to_string())),
            FormEdit::Field(FieldEdit::Vendor("VEN-2025-D303".to_string())),
            FormEdit::Field(FieldEdit::Category("Clothing & Apparel".to_string())),
            FormEdit::Color(ColorEdit::Add { id }),
            FormEdit::Price {
                color: id,
                edit: PriceEdit::Mrp("5767".to_string()),
            },
            FormEdit::Price {
                color: id,
                edit: PriceEdit::DiscountPercent("14".to_string()),
            },
            FormEdit::Image {
                color: id,
                edit: ImageEdit::Url {
                    index: 0,
                    url: "https://cdn.test/front.jpg".to_string(),
                },
            },
            FormEdit::Variation(VariationEdit::Color {
                index: 0,
                color: Some(id),
            }),
            FormEdit::Variation(VariationEdit::Size {
                index: 0,
                size: "M".to_string(),
            }),
            FormEdit::Variation(VariationEdit::Sku {
                index: 0,
                sku: "TS-M".to_string(),
            }),
        ]);
        (form, id)
    }

    #[test]
    fn test_valid_form_passes() {
        let (form, _) = valid_form();
        assert_eq!(validate_submission(&form), Ok(()));
    }

    #[test]
    fn test_missing_required_fields_in_order() {
        let (form, _) = valid_form();
        let mut blank = form.clone();
        blank.name = "  ".to_string();
        blank.vendor_id.clear();
        assert_eq!(
            validate_submission(&blank),
            Err(SubmitError::MissingRequiredField {
                field: RequiredField::Name
            })
        );

        let mut no_vendor = form.clone();
        no_vendor.vendor_id.clear();
        assert_eq!(
            validate_submission(&no_vendor),
            Err(SubmitError::MissingRequiredField {
                field: RequiredField::Vendor
            })
        );

        let mut placeholder = form;
        placeholder.category = "Select Category".to_string();
        assert_eq!(
            validate_submission(&placeholder),
            Err(SubmitError::MissingRequiredField {
                field: RequiredField::Category
            })
        );
    }

    #[test]
    fn test_whitespace_only_name_is_missing() {
        let (form, _) = valid_form();
        let form = form.apply(FormEdit::Field(FieldEdit::Name(" \t ".to_string())));
        assert_eq!(
            validate_submission(&form),
            Err(SubmitError::MissingRequiredField {
                field: RequiredField::Name
            })
        );
    }

    #[test]
    fn test_zero_price_is_rejected() {
        let (form, id) = valid_form();
        let form = form.apply(FormEdit::Price {
            color: id,
            edit: PriceEdit::Mrp("0".to_string()),
        });
        assert!(matches!(
            validate_submission(&form),
            Err(SubmitError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_full_discount_is_rejected() {
        let (form, id) = valid_form();
        let form = form.apply(FormEdit::Price {
            color: id,
            edit: PriceEdit::DiscountPercent("100".to_string()),
        });
        assert!(matches!(
            validate_submission(&form),
            Err(SubmitError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn test_no_colors_is_no_primary_color() {
        let (mut form, _) = valid_form();
        form.colors.clear();
        form.variations.clear();
        assert_eq!(validate_submission(&form), Err(SubmitError::NoPrimaryColor));
    }

    #[test]
    fn test_unflagged_colors_is_no_primary_color() {
        let (form, _) = valid_form();
        let form = form.apply(FormEdit::Color(ColorEdit::SetPrime {
            id: ColorId::generate(),
        }));
        assert_eq!(validate_submission(&form), Err(SubmitError::NoPrimaryColor));
    }

    #[test]
    fn test_color_without_images() {
        let (form, id) = valid_form();
        let form = form.apply(FormEdit::Image {
            color: id,
            edit: ImageEdit::Remove { index: 0 },
        });
        assert_eq!(
            validate_submission(&form),
            Err(SubmitError::IncompletePrimaryImage {
                color: HexColor::white(),
                problem: ImageProblem::NoImages,
            })
        );
    }

    #[test]
    fn test_color_without_primary_image() {
        let (form, id) = valid_form();
        let form = form.apply_all([
            FormEdit::Image {
                color: id,
                edit: ImageEdit::Add,
            },
            FormEdit::Image {
                color: id,
                edit: ImageEdit::Url {
                    index: 1,
                    url: "https://cdn.test/back.jpg".to_string(),
                },
            },
            FormEdit::Image {
                color: id,
                edit: ImageEdit::Url {
                    index: 0,
                    url: String::new(),
                },
            },
        ]);
        assert_eq!(
            validate_submission(&form),
            Err(SubmitError::IncompletePrimaryImage {
                color: HexColor::white(),
                problem: ImageProblem::NoPrimary,
            })
        );
    }

    #[test]
    fn test_sku_row_without_size() {
        let (form, _) = valid_form();
        let form = form.apply(FormEdit::Variation(VariationEdit::Size {
            index: 0,
            size: String::new(),
        }));
        assert_eq!(
            validate_submission(&form),
            Err(SubmitError::InvalidVariationReference {
                sku: "TS-M".to_string()
            })
        );
    }

    #[test]
    fn test_sku_row_with_unknown_color() {
        let (form, _) = valid_form();
        let form = form.apply(FormEdit::Variation(VariationEdit::Color {
            index: 0,
            color: Some(ColorId::generate()),
        }));
        assert!(matches!(
            validate_submission(&form),
            Err(SubmitError::InvalidVariationReference { .. })
        ));
    }

    #[test]
    fn test_rows_without_sku_are_not_checked() {
        let (form, _) = valid_form();
        let form = form.apply(FormEdit::Variation(VariationEdit::Add));
        assert_eq!(validate_submission(&form), Ok(()));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            SubmitError::NoPrimaryColor.to_string(),
            "You must define at least one color and designate one as the Prime Color."
        );
        assert_eq!(
            SubmitError::MissingRequiredField {
                field: RequiredField::Name
            }
            .to_string(),
            "Please fill in all required fields (Product Name, Vendor, Category). Missing: Product Name."
        );
    }
}
