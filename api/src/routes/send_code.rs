use actix_web::{web, HttpResponse};
use otc_core::{CodeDispatcher, ExpiringStore, UserDirectory};
use otc_shared::identity::{mask_user_id, normalize_user_id};
use validator::Validate;

use crate::dto::{SendCodeRequest, SendCodeResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /send-code
///
/// Issues a fresh code for the user and delivers it to the phone number on
/// record. Any code issued earlier for the same user stops verifying.
///
/// # Request Body
///
/// ```json
/// { "user_id": "abc" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Code sent successfully via SMS",
///     "user_id": "abc",
///     "phone": "+11111111111"
/// }
/// ```
///
/// ## Errors
/// - 400: malformed request
/// - 404: unknown user, or no phone number on record
/// - 500: delivery failed
/// - 503: code storage unavailable
pub async fn send_code<D, S, X>(
    state: web::Data<AppState<D, S, X>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    D: UserDirectory + ?Sized + 'static,
    S: ExpiringStore + ?Sized + 'static,
    X: CodeDispatcher + ?Sized + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    tracing::info!(user = %mask_user_id(&request.user_id), "Processing send-code request");

    match state.passcode_service.send_code(&request.user_id).await {
        Ok(result) => HttpResponse::Ok().json(SendCodeResponse::from(result)),
        Err(error) => handle_domain_error(&error, &normalize_user_id(&request.user_id)),
    }
}
