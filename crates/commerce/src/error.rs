// crates/commerce/src/error.rs

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum CommerceError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Invalid JSON body: {0}")]
    BadJson(String),

    #[error("Order not found")]
    OrderNotFound,

    #[error("Product not found")]
    ProductNotFound,
}

impl CommerceError {
    pub fn to_status(&self) -> StatusCode {
        match self {
            CommerceError::Validation(_) | CommerceError::BadJson(_) => StatusCode::BAD_REQUEST,
            CommerceError::OrderNotFound | CommerceError::ProductNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<ValidationErrors> for CommerceError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details = Vec::new();
        flatten(&errors, "", &mut details);
        details.sort_by(|a, b| a.field.cmp(&b.field));
        CommerceError::Validation(details)
    }
}

impl From<JsonRejection> for CommerceError {
    fn from(rejection: JsonRejection) -> Self {
        CommerceError::BadJson(rejection.body_text())
    }
}

impl IntoResponse for CommerceError {
    fn into_response(self) -> Response {
        let status = self.to_status();
        let body = match &self {
            CommerceError::Validation(details) => json!({
                "error": self.to_string(),
                "details": details,
            }),
            CommerceError::BadJson(reason) => json!({
                "error": "Invalid JSON body",
                "details": [ { "field": "body", "message": reason } ],
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn flatten(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = format!("{prefix}{}", camel_case(field));
        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{path} is invalid ({})", e.code)),
                }));
            }
            ValidationErrorsKind::Struct(nested) => flatten(nested, &format!("{path}."), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    flatten(nested, &format!("{path}[{index}]."), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewOrder;
    use serde_json::json;
    use validator::Validate;

    #[test]
    fn validation_errors_flatten_to_camel_case_paths() {
        let new: NewOrder = serde_json::from_value(json!({
            "items": [
                { "productId": "P001", "quantity": 1, "price": 1.0 },
                { "productId": "P002", "quantity": 0, "price": 1.0 }
            ]
        }))
        .unwrap();

        let CommerceError::Validation(details) = CommerceError::from(new.validate().unwrap_err())
        else {
            panic!("expected validation error");
        };

        let fields: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, ["customerName", "items[1].quantity"]);
        assert_eq!(details[0].message, "customerName is required");
    }

    #[test]
    fn statuses() {
        assert_eq!(CommerceError::OrderNotFound.to_status(), StatusCode::NOT_FOUND);
        assert_eq!(CommerceError::Validation(vec![]).to_status(), StatusCode::BAD_REQUEST);
        assert_eq!(CommerceError::OrderNotFound.to_string(), "Order not found");
    }
}
