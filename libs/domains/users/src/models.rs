use axum_helpers::TokenPair;
use chrono::{DateTime, SubsecRound, Utc};
use domain_products::{MAX_PRICE, Product};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// User document stored in the `users` collection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Argon2 PHC string
    pub password: String,
    pub email: String,
    pub phone: String,
    pub token: String,
    pub refresh_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// String form of `id`, used as the token subject and update key
    pub user_id: String,
    #[serde(default)]
    pub usercart: Vec<CartItem>,
    #[serde(default)]
    pub address_details: Vec<Address>,
    #[serde(default)]
    pub order_status: Vec<Order>,
}

impl User {
    /// Build a freshly signed-up user with empty cart, addresses and orders.
    pub fn new(input: NewUser, password_hash: String, id: Uuid, tokens: TokenPair) -> Self {
        let now = now_seconds();
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            password: password_hash,
            email: input.email,
            phone: input.phone,
            token: tokens.token,
            refresh_token: tokens.refresh_token,
            created_at: now,
            updated_at: now,
            user_id: id.to_string(),
            usercart: Vec::new(),
            address_details: Vec::new(),
            order_status: Vec::new(),
        }
    }
}

/// Current UTC time truncated to whole seconds
pub fn now_seconds() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// User as returned to clients (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub token: String,
    pub refresh_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
    pub usercart: Vec<CartItem>,
    pub address_details: Vec<Address>,
    pub order_status: Vec<Order>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            token: user.token,
            refresh_token: user.refresh_token,
            created_at: user.created_at,
            updated_at: user.updated_at,
            user_id: user.user_id,
            usercart: user.usercart,
            address_details: user.address_details,
            order_status: user.order_status,
        }
    }
}

/// Signup body. Every field is optional on the wire and checked by `validate`
/// before it is read.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(required, length(min = 2, max = 30))]
    #[schema(example = "Jo", min_length = 2, max_length = 30)]
    pub first_name: Option<String>,

    #[validate(required, length(min = 2, max = 30))]
    #[schema(example = "Doe", min_length = 2, max_length = 30)]
    pub last_name: Option<String>,

    #[validate(required, length(min = 6))]
    #[schema(example = "secret1", min_length = 6)]
    pub password: Option<String>,

    #[validate(required, email)]
    #[schema(example = "a@b.com")]
    pub email: Option<String>,

    #[validate(required, length(min = 1))]
    #[schema(example = "555")]
    pub phone: Option<String>,
}

/// A signup request that passed validation
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub email: String,
    pub phone: String,
}

impl TryFrom<SignupRequest> for NewUser {
    type Error = ValidationErrors;

    fn try_from(input: SignupRequest) -> Result<Self, Self::Error> {
        input.validate()?;

        match (
            input.first_name,
            input.last_name,
            input.password,
            input.email,
            input.phone,
        ) {
            (Some(first_name), Some(last_name), Some(password), Some(email), Some(phone)) => {
                Ok(Self {
                    first_name,
                    last_name,
                    password,
                    email,
                    phone,
                })
            }
            // `required` already rejected any missing field
            _ => Err(ValidationErrors::new()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    #[schema(example = "a@b.com")]
    pub email: String,

    #[validate(length(min = 1))]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Snapshot of a product taken when it is put in a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub product_name: String,
    pub price: u64,
    pub rating: u8,
    pub image: String,
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            product_name: product.product_name.clone(),
            price: product.price,
            rating: product.rating,
            image: product.image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub house_name: String,
    pub street_name: String,
    pub city_name: String,
    pub pin_code: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    pub digital: bool,
    pub cod: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub order_list: Vec<CartItem>,
    pub ordered_at: DateTime<Utc>,
    #[validate(range(max = MAX_PRICE))]
    pub total_price: u64,
    #[validate(range(max = MAX_PRICE))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<u64>,
    pub payment_method: Payment,
}
