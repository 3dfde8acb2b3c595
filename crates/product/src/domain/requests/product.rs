use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::validation::{coerce_f64, coerce_string, parse_bool};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "El nombre de Producto no puede ir vacio"))]
    #[schema(example = "Monitor curvo 32 pulgadas")]
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "Precio no valido"))]
    #[schema(example = 400)]
    pub price: f64,

    /// Falls back to the store default when absent.
    #[schema(example = true)]
    pub availability: Option<bool>,
}

impl CreateProductRequest {
    /// Builds the request from a body that already passed the create rules.
    pub fn from_body(body: &Value) -> Self {
        Self {
            name: coerce_string(body.get("name")),
            price: coerce_f64(body.get("price")).unwrap_or_default(),
            availability: parse_bool(body.get("availability")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(skip)]
    pub id: i64,

    #[validate(length(min = 1, message = "El nombre de Producto no puede ir vacio"))]
    #[schema(example = "Monitor curvo 32 pulgadas")]
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "Precio no valido"))]
    #[schema(example = 400)]
    pub price: f64,

    #[schema(example = true)]
    pub availability: bool,
}

impl UpdateProductRequest {
    /// Builds the request from a body that already passed the update rules.
    pub fn from_body(id: i64, body: &Value) -> Self {
        Self {
            id,
            name: coerce_string(body.get("name")),
            price: coerce_f64(body.get("price")).unwrap_or_default(),
            availability: parse_bool(body.get("availability")).unwrap_or_default(),
        }
    }
}
