//! Server-wide middleware and extractor configuration helpers.
//!
//! Keeps the Actix application setup focused by providing reusable
//! constructors for request logging and body limits.

use actix_web::{error, middleware, web, HttpResponse};

/// Request/response logging through the `log` facade.
pub fn request_logger() -> middleware::Logger {
    // Client address as resolved through X-Forwarded-For / Forwarded
    middleware::Logger::new("%{r}a \"%r\" %s %b %Dms")
}

/// Urlencoded form limit for `POST /submit`.
///
/// Oversized or malformed bodies are answered with a plain-text 400 instead
/// of actix's default error page.
pub fn form_config(limit: usize) -> web::FormConfig {
    web::FormConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            log::warn!("Rejected submission form: {}", err);
            let response = HttpResponse::BadRequest()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Invalid submission form: {}", err));
            error::InternalError::from_response(err, response).into()
        })
}
