//! CORS middleware configuration for browser clients.
//!
//! With no configured origins any origin is accepted, which suits local
//! development. Listing origins in `CORS_ALLOWED_ORIGINS` restricts access to
//! exactly those.

use actix_cors::Cors;
use actix_web::http::{header, Method};

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Creates a CORS middleware instance for the configured origins
pub fn create_cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::USER_AGENT,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
        .max_age(PREFLIGHT_MAX_AGE_SECS);

    if allowed_origins.is_empty() {
        tracing::info!("CORS allows any origin");
        return cors.allow_any_origin();
    }

    for origin in allowed_origins {
        tracing::info!(origin = %origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }
    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    async fn preflight(allowed: &[String], origin: &str) -> actix_web::http::StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(allowed))
                .route("/verify-code", web::post().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/verify-code")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        test::call_service(&app, req).await.status()
    }

    #[actix_web::test]
    async fn test_any_origin_when_unconfigured() {
        let status = preflight(&[], "https://anywhere.example").await;
        assert!(status.is_success());
    }

    #[actix_web::test]
    async fn test_configured_origins_only() {
        let allowed = vec!["https://app.example".to_string()];

        assert!(preflight(&allowed, "https://app.example").await.is_success());
        assert!(preflight(&allowed, "https://evil.example").await.is_client_error());
    }
}
