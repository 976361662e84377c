use actix_web::{web, HttpResponse};
use otc_core::{CodeDispatcher, DomainError, ExpiringStore, UserDirectory};
use otc_shared::identity::{mask_user_id, normalize_user_id};
use validator::Validate;

use crate::dto::VerifyCodeRequest;
use crate::handlers::{verify_error_response, verify_outcome_response};

use super::AppState;

/// Handler for POST /verify-code
///
/// # Request Body
///
/// ```json
/// { "user_id": "abc", "passcode": "012345" }
/// ```
///
/// # Response
///
/// 200 with `{ "success": true, "message", "user_id" }` when the code
/// matches. Every other result carries
/// `{ "success": false, "message", "user_id", "error_type" }`, plus
/// `remaining_attempts` for a wrong code:
///
/// | error_type          | status |
/// |---------------------|--------|
/// | `not_found`         | 404    |
/// | `expired`           | 410    |
/// | `too_many_attempts` | 429    |
/// | `invalid_code`      | 400    |
pub async fn verify_code<D, S, X>(
    state: web::Data<AppState<D, S, X>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    D: UserDirectory + ?Sized + 'static,
    S: ExpiringStore + ?Sized + 'static,
    X: CodeDispatcher + ?Sized + 'static,
{
    let request = request.into_inner();
    let user_id = normalize_user_id(&request.user_id);

    if let Err(errors) = request.validate() {
        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        let error = DomainError::validation(format!("Invalid fields: {}", fields.join(", ")));
        return verify_error_response(&error, &user_id);
    }

    tracing::info!(user = %mask_user_id(&user_id), "Processing verify-code request");

    match state
        .passcode_service
        .verify_code(&request.user_id, &request.passcode)
        .await
    {
        Ok(outcome) => verify_outcome_response(outcome, &user_id),
        Err(error) => verify_error_response(&error, &user_id),
    }
}
