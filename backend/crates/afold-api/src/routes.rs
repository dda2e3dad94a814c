//! Route table
//!
//! - GET  /                                   → 303 /submit
//! - GET  /healthcheck                        → JSON status
//! - GET  /favicon.ico                        → PNG icon
//! - GET  /submit, POST /submit               → form / submission
//! - GET  /jobs/recent                        → audit table
//! - GET  /jobs/{job_id}                      → status page
//! - GET  /jobs/{job_id}/browse[/{path}]      → listing or download
//! - GET  /jobs/{job_id}/download/{path}      → attachment
//! - GET  /jobs/{job_id}/view-image/{path}    → inline PNG
//! - GET  /jobs/{job_id}/view-text/{path}     → inline text

use crate::handlers::{files, health, jobs, submit};
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health::index_handler)
        .service(health::healthcheck_handler)
        .service(health::favicon_handler)
        .service(submit::submit_form)
        .service(submit::submit_job)
        // Must precede /jobs/{job_id}
        .service(jobs::recent_jobs)
        .service(jobs::job_status)
        .service(files::browse_job)
        .service(files::browse_path)
        .service(files::download_file)
        .service(files::view_image)
        .service(files::view_text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_server_level_routes_are_registered() {
        let app = test::init_service(App::new().configure(configure_routes)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/submit");

        let resp = test::call_service(&app, test::TestRequest::get().uri("/favicon.ico").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    }
}
