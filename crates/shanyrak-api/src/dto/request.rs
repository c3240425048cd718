//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use shanyrak_core::error::AppError;
use shanyrak_core::types::PageRequest;
use shanyrak_entity::post::{NewPost, PostChanges, PostSearch, PostType};
use shanyrak_service::{NewAccount, ProfileUpdate};

/// Phone numbers: digits with optional `+`, spaces, dashes and parentheses.
fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = phone
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')') || (c == '+' && i == 0));

    if !allowed || !(10..=20).contains(&phone.len()) || digits < 10 {
        let mut err = ValidationError::new("phone");
        err.message = Some("must be a phone number like +7 701 234 5678".into());
        return Err(err);
    }
    Ok(())
}

/// Signup body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Login name; must be an email address.
    #[validate(email(message = "must be a valid email address"))]
    pub username: String,
    /// Phone number.
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    /// Plaintext password; length policy is applied by the account service.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
    /// City.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub city: String,
}

impl From<SignupRequest> for NewAccount {
    fn from(req: SignupRequest) -> Self {
        Self {
            username: req.username,
            phone: req.phone,
            password: req.password,
            name: req.name,
            city: req.city,
        }
    }
}

/// Login form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Partial profile update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New login name (email).
    #[validate(email(message = "must be a valid email address"))]
    pub username: Option<String>,
    /// New phone number.
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    /// New password.
    pub password: Option<String>,
    /// New display name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: Option<String>,
    /// New city.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub city: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            username: req.username,
            phone: req.phone,
            password: req.password,
            name: req.name,
            city: req.city,
        }
    }
}

/// Body for publishing a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShanyrakRequest {
    /// Rent or buy.
    #[serde(rename = "type")]
    pub post_type: PostType,
    /// Asking price.
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price: i64,
    /// Street address.
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub address: String,
    /// Floor area.
    #[validate(range(exclusive_min = 0.0, message = "must be positive"))]
    pub area: f64,
    /// Number of rooms.
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub rooms_count: i32,
    /// Description.
    #[validate(length(max = 5000, message = "must be at most 5000 characters"))]
    #[serde(default)]
    pub description: String,
}

impl From<CreateShanyrakRequest> for NewPost {
    fn from(req: CreateShanyrakRequest) -> Self {
        Self {
            post_type: req.post_type,
            price: req.price,
            address: req.address,
            area: req.area,
            rooms_count: req.rooms_count,
            description: req.description,
        }
    }
}

/// Partial listing update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateShanyrakRequest {
    /// New type.
    #[serde(rename = "type")]
    pub post_type: Option<PostType>,
    /// New price.
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price: Option<i64>,
    /// New address.
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub address: Option<String>,
    /// New area.
    #[validate(range(exclusive_min = 0.0, message = "must be positive"))]
    pub area: Option<f64>,
    /// New room count.
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub rooms_count: Option<i32>,
    /// New description.
    #[validate(length(max = 5000, message = "must be at most 5000 characters"))]
    pub description: Option<String>,
}

impl From<UpdateShanyrakRequest> for PostChanges {
    fn from(req: UpdateShanyrakRequest) -> Self {
        Self {
            post_type: req.post_type,
            price: req.price,
            address: req.address,
            area: req.area,
            rooms_count: req.rooms_count,
            description: req.description,
        }
    }
}

/// Search query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchParams {
    /// Window size (default 5, capped at 100).
    pub limit: Option<i64>,
    /// Rows to skip.
    pub offset: Option<i64>,
    /// Listing type.
    #[serde(rename = "type")]
    pub post_type: Option<PostType>,
    /// Exact room count.
    #[validate(range(min = 0, message = "must not be negative"))]
    pub rooms_count: Option<i32>,
    /// Minimum price.
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price_from: Option<i64>,
    /// Maximum price.
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price_until: Option<i64>,
}

impl SearchParams {
    /// Split into a filter and a pagination window.
    pub fn into_parts(self) -> Result<(PostSearch, PageRequest), AppError> {
        let page = PageRequest::from_query(self.limit, self.offset)?;
        let filter = PostSearch {
            post_type: self.post_type,
            rooms_count: self.rooms_count,
            price_from: self.price_from,
            price_until: self.price_until,
        };
        Ok((filter, page))
    }
}

/// Comment body, used for both create and edit.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentRequest {
    /// Comment text.
    #[validate(length(min = 1, max = 2000, message = "must be 1-2000 characters"))]
    pub content: String,
}
