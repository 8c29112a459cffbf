//! Admin game form
//!
//! `GameForm` carries the raw field values exactly as submitted. Cleaning
//! trims them, runs the declarative `validator` rules, parses the price and
//! checks the optional image upload. The result is either a `GameDraft` or a
//! `FieldErrors` map keyed by field name, which is echoed back to the
//! re-rendered form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use super::models::{Game, GameDraft};
use crate::money;

/// Prices are entered with at most cent precision
const PRICE_DECIMALS: u32 = 2;

/// Raw game form values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct GameForm {
    #[validate(
        custom(function = "required"),
        length(max = 254, message = "Ensure this value has at most 254 characters.")
    )]
    #[schema(example = "Hollow Knight")]
    pub name: String,

    #[validate(length(max = 5000, message = "Ensure this value has at most 5000 characters."))]
    #[serde(default)]
    pub description: String,

    #[validate(
        custom(function = "required"),
        length(max = 64, message = "Ensure this value has at most 64 characters.")
    )]
    #[schema(example = "PC")]
    pub platform: String,

    #[validate(custom(function = "valid_price"))]
    #[schema(example = "14.99")]
    pub price: String,
}

/// An uploaded cover image, held in memory until the form validates
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Field name -> error messages, in field-name order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = FieldErrors::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required").with_message("This field is required.".into()));
    }
    Ok(())
}

fn valid_price(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required").with_message("This field is required.".into()));
    }
    money::parse_amount(value, PRICE_DECIMALS)
        .map(|_| ())
        .map_err(|e| ValidationError::new("invalid_price").with_message(e.to_string().into()))
}

impl GameForm {
    /// Prefill the form from a stored game
    pub fn from_game(game: &Game) -> Self {
        Self {
            name: game.name.clone(),
            description: game.description.clone(),
            platform: game.platform.clone(),
            price: money::format_amount(game.price),
        }
    }

    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            platform: self.platform.trim().to_string(),
            price: self.price.trim().to_string(),
        }
    }

    /// Validate the submission.
    ///
    /// The returned draft has no image; storing an accepted upload is the
    /// caller's job, and only happens once the whole form is valid.
    pub fn clean(
        &self,
        upload: Option<&UploadedImage>,
        max_upload_bytes: usize,
    ) -> Result<GameDraft, FieldErrors> {
        let form = self.trimmed();

        let mut errors = match form.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(&e),
        };

        if let Some(image) = upload {
            check_image(image, max_upload_bytes, &mut errors);
        }

        let price = match money::parse_amount(&form.price, PRICE_DECIMALS) {
            Ok(price) => Some(price),
            Err(_) if errors.get("price").is_some() => None,
            Err(e) => {
                errors.add("price", e.to_string());
                None
            }
        };

        match price {
            Some(price) if errors.is_empty() => Ok(GameDraft {
                name: form.name,
                description: form.description,
                platform: form.platform,
                price,
                image: None,
            }),
            _ => Err(errors),
        }
    }
}

fn check_image(image: &UploadedImage, max_upload_bytes: usize, errors: &mut FieldErrors) {
    if image.bytes.is_empty() {
        errors.add("image", "The submitted file is empty.");
    } else if !image.content_type.starts_with("image/") {
        errors.add(
            "image",
            "Upload a valid image. The file you uploaded was either not an image or a corrupted image.",
        );
    } else if image.bytes.len() > max_upload_bytes {
        errors.add(
            "image",
            format!("Ensure the image is at most {} bytes.", max_upload_bytes),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const MAX_UPLOAD: usize = 1024;

    fn valid_form() -> GameForm {
        GameForm {
            name: "Celeste".to_string(),
            description: "Climb the mountain.".to_string(),
            platform: "Switch".to_string(),
            price: "19.99".to_string(),
        }
    }

    fn png(len: usize) -> UploadedImage {
        UploadedImage {
            file_name: "cover.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89; len],
        }
    }

    #[test]
    fn test_clean_valid_form() {
        let draft = valid_form().clean(None, MAX_UPLOAD).unwrap();
        assert_eq!(draft.name, "Celeste");
        assert_eq!(draft.platform, "Switch");
        assert_eq!(draft.price, Decimal::new(1999, 2));
        assert!(draft.image.is_none());
    }

    #[test]
    fn test_clean_trims_whitespace() {
        let mut form = valid_form();
        form.name = "  Celeste  ".to_string();
        form.price = " 5 ".to_string();
        let draft = form.clean(None, MAX_UPLOAD).unwrap();
        assert_eq!(draft.name, "Celeste");
        assert_eq!(draft.price, Decimal::new(500, 2));
    }

    #[test]
    fn test_clean_reports_every_invalid_field() {
        let form = GameForm {
            name: "   ".to_string(),
            description: String::new(),
            platform: String::new(),
            price: "twelve".to_string(),
        };
        let errors = form.clean(None, MAX_UPLOAD).unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["name", "platform", "price"]);
        assert_eq!(
            errors.get("name").unwrap(),
            &["This field is required.".to_string()]
        );
        assert_eq!(errors.get("price").unwrap(), &["Enter a number.".to_string()]);
    }

    #[test]
    fn test_clean_rejects_long_name() {
        let mut form = valid_form();
        form.name = "x".repeat(255);
        let errors = form.clean(None, MAX_UPLOAD).unwrap_err();
        assert!(errors.get("name").is_some());
    }

    #[test]
    fn test_clean_rejects_negative_and_sub_cent_prices() {
        let mut form = valid_form();
        form.price = "-3".to_string();
        let errors = form.clean(None, MAX_UPLOAD).unwrap_err();
        assert_eq!(
            errors.get("price").unwrap(),
            &["Ensure this value is greater than or equal to 0.".to_string()]
        );

        form.price = "3.999".to_string();
        let errors = form.clean(None, MAX_UPLOAD).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["price"]);
    }

    #[test]
    fn test_clean_accepts_image_upload() {
        assert!(valid_form().clean(Some(&png(10)), MAX_UPLOAD).is_ok());
    }

    #[test]
    fn test_clean_rejects_bad_uploads() {
        let mut not_image = png(10);
        not_image.content_type = "application/pdf".to_string();
        let errors = valid_form().clean(Some(&not_image), MAX_UPLOAD).unwrap_err();
        assert!(errors.get("image").is_some());

        let errors = valid_form().clean(Some(&png(0)), MAX_UPLOAD).unwrap_err();
        assert_eq!(
            errors.get("image").unwrap(),
            &["The submitted file is empty.".to_string()]
        );

        let errors = valid_form()
            .clean(Some(&png(MAX_UPLOAD + 1)), MAX_UPLOAD)
            .unwrap_err();
        assert!(errors.get("image").is_some());
    }

    #[test]
    fn test_from_game_round_trips_through_clean() {
        let game = Game {
            id: 7,
            name: "Hades".to_string(),
            description: "Escape the underworld.".to_string(),
            platform: "PC".to_string(),
            price: Decimal::new(2499, 2),
            image: Some("games/hades.png".to_string()),
        };
        let form = GameForm::from_game(&game);
        assert_eq!(form.price, "24.99");

        let draft = form.clean(None, MAX_UPLOAD).unwrap();
        assert_eq!(draft.price, game.price);
        assert_eq!(draft.name, game.name);
    }
}
