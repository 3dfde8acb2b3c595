use crate::model::product::Product as ProductModel;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[schema(as = Product)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Monitor curvo 49 pulgadas")]
    pub name: String,
    #[schema(example = 500)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.and_utc().to_rfc3339()
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            price: value.price,
            availability: value.availability,
            created_at: value.created_at.map(format_timestamp),
            updated_at: value.updated_at.map(format_timestamp),
        }
    }
}
