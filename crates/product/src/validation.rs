//! Rule chains for the product routes.

use shared::validation::{FieldRules, coerce_f64};
use std::sync::LazyLock;

pub const INVALID_ID: &str = "Id no valido";
pub const EMPTY_NAME: &str = "El nombre de Producto no puede ir vacio";
pub const INVALID_VALUE: &str = "Valor no valido";
pub const EMPTY_PRICE: &str = "El precio del producto no puede ir vacio";
pub const INVALID_PRICE: &str = "Precio no valido";
pub const INVALID_AVAILABILITY: &str = "Valor para disponibilidad no valido";

/// A fixed list of rule chains a route runs before its handler.
pub trait RuleSet: Send + Sync + 'static {
    fn rules() -> &'static [FieldRules];
}

fn id_rule() -> FieldRules {
    FieldRules::param("id").is_int().with_message(INVALID_ID)
}

fn name_rule() -> FieldRules {
    FieldRules::body("name").not_empty().with_message(EMPTY_NAME)
}

fn price_rule() -> FieldRules {
    FieldRules::body("price")
        .is_numeric()
        .with_message(INVALID_VALUE)
        .not_empty()
        .with_message(EMPTY_PRICE)
        .custom(|value| coerce_f64(value).is_some_and(|price| price > 0.0))
        .with_message(INVALID_PRICE)
}

fn availability_rule() -> FieldRules {
    FieldRules::body("availability")
        .is_boolean()
        .with_message(INVALID_AVAILABILITY)
}

#[derive(Debug)]
pub struct IdRules;

impl RuleSet for IdRules {
    fn rules() -> &'static [FieldRules] {
        static RULES: LazyLock<Vec<FieldRules>> = LazyLock::new(|| vec![id_rule()]);
        &RULES
    }
}

#[derive(Debug)]
pub struct CreateProductRules;

impl RuleSet for CreateProductRules {
    fn rules() -> &'static [FieldRules] {
        static RULES: LazyLock<Vec<FieldRules>> =
            LazyLock::new(|| vec![name_rule(), price_rule()]);
        &RULES
    }
}

#[derive(Debug)]
pub struct UpdateProductRules;

impl RuleSet for UpdateProductRules {
    fn rules() -> &'static [FieldRules] {
        static RULES: LazyLock<Vec<FieldRules>> =
            LazyLock::new(|| vec![id_rule(), name_rule(), price_rule(), availability_rule()]);
        &RULES
    }
}
