/// Input validation helpers shared by request models and handlers
use actix_web::{error::JsonPayloadError, web, HttpRequest};
use validator::ValidationError;

use crate::error::{AppError, FieldError};

/// Rejects empty or whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Maps JSON body failures (bad syntax, wrong types) onto the validation
/// error shape so clients always get a field list.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("rejected JSON payload: {}", err);
    let message = match &err {
        JsonPayloadError::ContentType => "Expected application/json".to_string(),
        JsonPayloadError::Deserialize(e) => e.to_string(),
        _ => "Invalid request body".to_string(),
    };
    AppError::Validation(vec![FieldError::new("body", message)]).into()
}

/// JSON extractor config used by every route that takes a body
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(json_error_handler)
}
