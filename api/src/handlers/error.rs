//! Translation of domain errors into HTTP envelope responses.
//!
//! Every error leaves the API in the standard envelope shape with
//! `status: false`. Internal errors keep their original message out of
//! the top-level `message` field and surface it under `errors.detail`.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;
use validator::ValidationErrors;

use pt_core::errors::{AccountError, DomainError, KycError, OtpError};
use pt_shared::types::response::ApiResponse;

/// Maps a domain error onto its HTTP status code
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DomainError::BusinessRule { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden { .. } => StatusCode::FORBIDDEN,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Otp(error) => match error {
            OtpError::InvalidCode => StatusCode::NOT_FOUND,
            OtpError::Expired
            | OtpError::MissingTradeSide
            | OtpError::InvalidTradeSide { .. } => StatusCode::BAD_REQUEST,
            OtpError::MailDeliveryFailure => StatusCode::INTERNAL_SERVER_ERROR,
            OtpError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
        },
        DomainError::Account(error) => match error {
            AccountError::EmailAlreadyRegistered => StatusCode::CONFLICT,
            AccountError::InvalidCredentials
            | AccountError::SessionExpired
            | AccountError::InvalidSession => StatusCode::UNAUTHORIZED,
            AccountError::UserNotFound => StatusCode::NOT_FOUND,
            AccountError::InsufficientPermissions => StatusCode::FORBIDDEN,
        },
        DomainError::Kyc(error) => match error {
            KycError::EmailNotVerified => StatusCode::FORBIDDEN,
            KycError::AlreadyReviewed => StatusCode::CONFLICT,
        },
    }
}

/// Converts a domain error into the standard error envelope
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        log::error!("Request failed: {:?}", error);
    } else {
        log::warn!("Request rejected: {}", error);
    }

    let envelope: ApiResponse<()> = match error {
        DomainError::Internal { message } => ApiResponse::error_with_details(
            "An internal error occurred",
            json!({ "detail": message }),
        ),
        _ => ApiResponse::error(error.to_string()),
    };

    HttpResponse::build(status).json(envelope)
}

/// Converts request body validation failures into a 422 envelope
///
/// Field messages from the `validator` derive are grouped per field
/// under `errors`.
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut fields = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string())
            })
            .collect();
        fields.insert(field.to_string(), json!(messages));
    }

    log::warn!(
        "Request failed validation: {:?}",
        fields.keys().collect::<Vec<_>>()
    );

    let envelope: ApiResponse<()> =
        ApiResponse::error_with_details("Invalid request data", serde_json::Value::Object(fields));
    HttpResponse::UnprocessableEntity().json(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pt_core::errors::ValidationError;

    #[test]
    fn test_otp_error_statuses() {
        assert_eq!(
            status_for(&DomainError::from(OtpError::InvalidCode)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::from(OtpError::Expired)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::from(OtpError::MissingTradeSide)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::from(OtpError::RateLimitExceeded { minutes: 30 })),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status_for(&DomainError::from(OtpError::MailDeliveryFailure)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_account_error_statuses() {
        assert_eq!(
            status_for(&DomainError::from(AccountError::EmailAlreadyRegistered)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DomainError::from(AccountError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&DomainError::from(AccountError::SessionExpired)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&DomainError::from(AccountError::UserNotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::from(AccountError::InsufficientPermissions)),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_kyc_error_statuses() {
        assert_eq!(
            status_for(&DomainError::from(KycError::EmailNotVerified)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&DomainError::from(KycError::AlreadyReviewed)),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_validation_errors_are_unprocessable() {
        let error: DomainError = ValidationError::InvalidValue {
            field: "purpose".to_string(),
            value: "trade".to_string(),
        }
        .into();
        assert_eq!(status_for(&error), StatusCode::UNPROCESSABLE_ENTITY);

        let response = domain_error_response(&error);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_internal_error_is_masked() {
        let response = domain_error_response(&DomainError::internal("connection pool exhausted"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_field_validation_envelope() {
        let mut errors = ValidationErrors::new();
        errors.add("email", validator::ValidationError::new("email"));

        let response = validation_error_response(&errors);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
