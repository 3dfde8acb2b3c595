use crate::validation::RuleSet;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::PathRejection},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use shared::{
    errors::HttpError,
    validation::{Input, validate},
};
use std::{collections::HashMap, marker::PhantomData};
use tracing::warn;

pub const INVALID_JSON: &str = "JSON no valido";

/// Request input that passed the rule set `R`.
///
/// Path parameters and the JSON body are collected first; every chain of
/// `R` then runs and any violation rejects the request with
/// [`HttpError::Validation`] before the handler body executes. A missing or
/// non-JSON body is seen by the rules as `{}`.
pub struct Validated<R> {
    pub input: Input,
    _rules: PhantomData<R>,
}

impl<R> Validated<R> {
    /// The `id` path parameter. `None` when it does not fit an `i64`, which
    /// no stored product can have.
    pub fn id(&self) -> Option<i64> {
        self.input.param("id").and_then(|id| id.parse().ok())
    }

    pub fn body(&self) -> &Value {
        self.input.body()
    }
}

impl<S, R> FromRequest<S> for Validated<R>
where
    R: RuleSet,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let params = match Path::<HashMap<String, String>>::from_request_parts(&mut parts, state)
            .await
        {
            Ok(Path(params)) => params,
            Err(PathRejection::MissingPathParams(_)) => HashMap::new(),
            Err(rejection) => {
                return Err(HttpError::BadRequest(rejection.body_text()).into_response());
            }
        };

        let is_json = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        // Keeps the rejection's own status, e.g. 413 past the body limit.
        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(IntoResponse::into_response)?;

        let body = if is_json && !bytes.is_empty() {
            serde_json::from_slice::<Value>(&bytes).map_err(|err| {
                warn!("Rejected malformed JSON body: {err}");
                HttpError::BadRequest(INVALID_JSON.to_string()).into_response()
            })?
        } else {
            json!({})
        };

        let input = Input::new(params, body);
        let errors = validate(R::rules(), &input);

        if !errors.is_empty() {
            warn!("Validation failed with {} error(s)", errors.len());
            return Err(HttpError::Validation(errors).into_response());
        }

        Ok(Self {
            input,
            _rules: PhantomData,
        })
    }
}
