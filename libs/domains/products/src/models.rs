use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Largest price BSON can store (it has no unsigned 64-bit integer)
pub const MAX_PRICE: u64 = i64::MAX as u64;

/// Product document stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub product_name: String,
    pub price: u64,
    pub rating: u8,
    /// Image reference (URL or file name)
    pub image: String,
}

impl Product {
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            product_name: input.product_name,
            price: input.price,
            rating: input.rating,
            image: input.image,
        }
    }
}

/// Body of `POST /admin/addproduct`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Alienware x15", min_length = 1, max_length = 200)]
    pub product_name: String,

    #[validate(range(max = MAX_PRICE))]
    #[schema(example = 2500)]
    pub price: u64,

    #[schema(example = 5)]
    pub rating: u8,

    #[schema(example = "alienware.png")]
    pub image: String,
}

/// Query string of `GET /users/search`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring to look for in product names (case-sensitive)
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_gets_fresh_id() {
        let input = CreateProduct {
            product_name: "Alienware x15".into(),
            price: 2500,
            rating: 5,
            image: "alienware.png".into(),
        };

        let a = Product::new(input.clone());
        let b = Product::new(input);
        assert_ne!(a.id, b.id);
        assert_eq!(a.product_name, "Alienware x15");
    }

    #[test]
    fn test_create_product_name_bounds() {
        let mut input = CreateProduct {
            product_name: String::new(),
            price: 1,
            rating: 0,
            image: String::new(),
        };
        assert!(input.validate().is_err());

        input.product_name = "x".repeat(201);
        assert!(input.validate().is_err());

        input.product_name = "ok".into();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_negative_price_does_not_deserialize() {
        let result = serde_json::from_str::<CreateProduct>(
            r#"{"product_name":"x","price":-1,"rating":1,"image":"i"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_price_bounded_by_bson_int64() {
        let mut input = CreateProduct {
            product_name: "x".into(),
            price: MAX_PRICE,
            rating: 1,
            image: "i".into(),
        };
        assert!(input.validate().is_ok());

        input.price = MAX_PRICE + 1;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_rating_above_255_does_not_deserialize() {
        let result = serde_json::from_str::<CreateProduct>(
            r#"{"product_name":"x","price":1,"rating":256,"image":"i"}"#,
        );
        assert!(result.is_err());
    }
}
