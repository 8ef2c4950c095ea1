//! Request DTOs for the inventory API
//!
//! Defines the structure of incoming HTTP request bodies and the field rules
//! applied before anything reaches the item store.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{ApiError, FieldErrors};
use crate::models::{Item, NewItem};

/// Maximum item name length in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// Largest price magnitude that fits in 10 digits with 2 decimal places
const PRICE_INTEGER_DIGITS: u32 = 8;
const PRICE_DECIMAL_PLACES: u32 = 2;

/// Request body for `POST /items`
///
/// Every field is required. Fields are optional here so that a missing field
/// is reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
}

impl CreateItemRequest {
    /// Validates every field and returns the item ready for the store.
    pub fn validate(self) -> Result<NewItem, ApiError> {
        let mut check = FieldCheck::default();

        let name = check.required("name", self.name).and_then(|n| check.name(n));
        let description = check.required("description", self.description);
        let quantity = check
            .required("quantity", self.quantity)
            .and_then(|q| check.quantity(q));
        let price = check.required("price", self.price).and_then(|p| check.price(p));

        match (name, description, quantity, price) {
            (Some(name), Some(description), Some(quantity), Some(price)) if check.is_clean() => {
                Ok(NewItem {
                    name,
                    description,
                    quantity,
                    price,
                })
            }
            _ => Err(check.into_error()),
        }
    }
}

/// Request body for `PUT /items/{id}/update`
///
/// Only the provided fields are changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<Decimal>,
}

impl UpdateItemRequest {
    /// Validates the provided fields and writes them into `item`.
    ///
    /// `item` is left untouched when any field is invalid.
    pub fn apply(self, item: &mut Item) -> Result<(), ApiError> {
        let mut check = FieldCheck::default();

        let name = self.name.and_then(|n| check.name(n));
        let quantity = self.quantity.and_then(|q| check.quantity(q));
        let price = self.price.and_then(|p| check.price(p));

        if !check.is_clean() {
            return Err(check.into_error());
        }

        if let Some(name) = name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(quantity) = quantity {
            item.quantity = quantity;
        }
        if let Some(price) = price {
            item.price = price;
        }
        Ok(())
    }
}

/// Request body for `POST /register`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A validated registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<Registration, ApiError> {
        let mut check = FieldCheck::default();

        let username = check
            .required("username", self.username)
            .map(|u| u.trim().to_string())
            .and_then(|u| check.not_blank("username", u));
        let email = check.required("email", self.email).and_then(|e| check.email(e));
        let password = check
            .required("password", self.password)
            .and_then(|p| check.not_blank("password", p));

        match (username, email, password) {
            (Some(username), Some(email), Some(password)) if check.is_clean() => Ok(Registration {
                username,
                email,
                password,
            }),
            _ => Err(check.into_error()),
        }
    }
}

/// Request body for `POST /login`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /token/refresh`
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

// == Field Checks ==
/// Collects per-field messages while a request is validated.
#[derive(Debug, Default)]
struct FieldCheck {
    errors: FieldErrors,
}

impl FieldCheck {
    fn fail(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn into_error(self) -> ApiError {
        ApiError::Validation(self.errors)
    }

    fn required<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.fail(field, "This field is required.");
        }
        value
    }

    fn not_blank(&mut self, field: &str, value: String) -> Option<String> {
        if value.trim().is_empty() {
            self.fail(field, "This field may not be blank.");
            return None;
        }
        Some(value)
    }

    fn name(&mut self, name: String) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            self.fail("name", "The name field cannot be empty.");
            return None;
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            self.fail("name", "Ensure this field has no more than 255 characters.");
            return None;
        }
        Some(name.to_string())
    }

    fn quantity(&mut self, quantity: i64) -> Option<i64> {
        if quantity < 0 {
            self.fail("quantity", "Ensure this value is greater than or equal to 0.");
            return None;
        }
        Some(quantity)
    }

    fn price(&mut self, price: Decimal) -> Option<Decimal> {
        if price.is_sign_negative() && !price.is_zero() {
            self.fail("price", "Ensure this value is greater than or equal to 0.");
            return None;
        }
        if price.normalize().scale() > PRICE_DECIMAL_PLACES {
            self.fail("price", "Ensure that there are no more than 2 decimal places.");
            return None;
        }
        if price.trunc() >= Decimal::from(10i64.pow(PRICE_INTEGER_DIGITS)) {
            self.fail(
                "price",
                "Ensure that there are no more than 8 digits before the decimal point.",
            );
            return None;
        }

        let mut price = price;
        price.rescale(PRICE_DECIMAL_PLACES);
        Some(price)
    }

    fn email(&mut self, email: String) -> Option<String> {
        let email = email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
                Some(email.to_string())
            }
            _ => {
                self.fail("email", "Enter a valid email address.");
                None
            }
        }
    }
}
