//! Application factory
//!
//! Builds the Actix-web application from an already wired [`AppState`].

use actix_web::{error::JsonPayloadError, web, App, HttpRequest, HttpResponse};
use tracing_actix_web::TracingLogger;

use otc_core::{CodeDispatcher, ExpiringStore, UserDirectory};
use otc_shared::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};
use crate::middleware::create_cors;
use crate::routes::{send_code::send_code, verify_code::verify_code, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<D, S, X>(
    app_state: web::Data<AppState<D, S, X>>,
    allowed_origins: &[String],
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    D: UserDirectory + ?Sized + 'static,
    S: ExpiringStore + ?Sized + 'static,
    X: CodeDispatcher + ?Sized + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error))
        // Tracing outermost so CORS rejections still get a request span
        .wrap(create_cors(allowed_origins))
        .wrap(TracingLogger::default())
        .route("/", web::get().to(service_info))
        .route("/health", web::get().to(health_check::<D, S, X>))
        .route("/send-code", web::post().to(send_code::<D, S, X>))
        .route("/verify-code", web::post().to(verify_code::<D, S, X>))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check<D, S, X>(state: web::Data<AppState<D, S, X>>) -> HttpResponse
where
    D: UserDirectory + ?Sized + 'static,
    S: ExpiringStore + ?Sized + 'static,
    X: CodeDispatcher + ?Sized + 'static,
{
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "otc-service",
        "version": env!("CARGO_PKG_VERSION"),
        "store": state.passcode_service.store_backend(),
        "channel": state.passcode_service.channel_name(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Root endpoint listing the operations
async fn service_info() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "OTC Service API",
        "endpoints": ["/send-code", "/verify-code"],
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::info!(error = %err, "Rejected malformed JSON body");
    let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Malformed JSON body")
        .to_response(actix_web::http::StatusCode::BAD_REQUEST);
    actix_web::error::InternalError::from_response(err, response).into()
}
