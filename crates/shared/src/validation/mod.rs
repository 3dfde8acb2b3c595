//! Declarative field validation.
//!
//! A [`FieldRules`] chain targets one field in one [`Location`] and holds an
//! ordered list of rules, each a predicate paired with the message reported
//! when it fails. Chains are plain values: routes compose them into slices
//! and [`validate`] runs all of them, accumulating every violation.

mod predicates;

use serde::Serialize;
use serde_json::{Map, Value};
use std::{collections::HashMap, fmt, sync::Arc};
use utoipa::ToSchema;

pub use self::predicates::{coerce_f64, coerce_string, parse_bool};

pub const DEFAULT_MESSAGE: &str = "Invalid value";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
    pub msg: String,
    pub param: String,
    pub location: Location,
}

/// The request data a rule chain can look at.
#[derive(Debug, Clone, Default)]
pub struct Input {
    params: Map<String, Value>,
    body: Value,
}

impl Input {
    pub fn new(params: HashMap<String, String>, body: Value) -> Self {
        let params = params
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();

        Self { params, body }
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(Value::as_str)
    }

    pub fn field(&self, location: Location, name: &str) -> Option<&Value> {
        match location {
            Location::Params => self.params.get(name),
            Location::Body => self.body.get(name),
        }
    }
}

type Predicate = Arc<dyn Fn(Option<&Value>) -> bool + Send + Sync>;

#[derive(Clone)]
struct Rule {
    check: Predicate,
    message: String,
}

#[derive(Clone)]
pub struct FieldRules {
    field: String,
    location: Location,
    rules: Vec<Rule>,
}

impl fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("field", &self.field)
            .field("location", &self.location)
            .field(
                "messages",
                &self.rules.iter().map(|r| &r.message).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FieldRules {
    pub fn body(field: impl Into<String>) -> Self {
        Self::new(field, Location::Body)
    }

    pub fn param(field: impl Into<String>) -> Self {
        Self::new(field, Location::Params)
    }

    fn new(field: impl Into<String>, location: Location) -> Self {
        Self {
            field: field.into(),
            location,
            rules: Vec::new(),
        }
    }

    pub fn not_empty(self) -> Self {
        self.custom(|value| !coerce_string(value).is_empty())
    }

    pub fn is_numeric(self) -> Self {
        self.custom(|value| predicates::is_numeric(&coerce_string(value)))
    }

    pub fn is_int(self) -> Self {
        self.custom(|value| predicates::is_int(&coerce_string(value)))
    }

    pub fn is_boolean(self) -> Self {
        self.custom(|value| parse_bool(value).is_some())
    }

    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            check: Arc::new(check),
            message: DEFAULT_MESSAGE.to_string(),
        });
        self
    }

    /// Replaces the message of the most recently added rule.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        if let Some(rule) = self.rules.last_mut() {
            rule.message = message.into();
        }
        self
    }

    pub fn check(&self, input: &Input, errors: &mut Vec<FieldError>) {
        let value = input.field(self.location, &self.field);

        for rule in &self.rules {
            if !(rule.check)(value) {
                errors.push(FieldError {
                    kind: "field".to_string(),
                    value: value.cloned(),
                    msg: rule.message.clone(),
                    param: self.field.clone(),
                    location: self.location,
                });
            }
        }
    }
}

/// Runs every chain against `input` and returns the violations in
/// declaration order.
pub fn validate(chains: &[FieldRules], input: &Input) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for chain in chains {
        chain.check(input, &mut errors);
    }
    errors
}
