use actix_web::http::header;
use actix_web::{get, web, HttpResponse, Responder};
use afold_jobs::AppContext;
use serde_json::json;
use std::sync::Arc;

/// GET /healthcheck
#[get("/healthcheck")]
pub async fn healthcheck_handler(app_context: web::Data<Arc<AppContext>>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "build_date": env!("BUILD_DATE"),
        "git_commit": env!("GIT_COMMIT_HASH"),
        "uptime_seconds": app_context.uptime_seconds(),
    }))
}

/// GET / - the submission form is the landing page
#[get("/")]
pub async fn index_handler() -> impl Responder {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/submit"))
        .finish()
}
