use super::models::SubmitForm;
use crate::error::ApiError;
use crate::render;
use actix_web::http::header;
use actix_web::{post, web, HttpRequest, HttpResponse};
use afold_jobs::{AppContext, SubmissionRequest};
use std::sync::Arc;

/// POST /submit
///
/// Answers `303 See Other` pointing at the job's status page, so a browser
/// refresh never resubmits. The body repeats the link for clients that do
/// not follow redirects.
#[post("/submit")]
pub async fn submit_job(
    req: HttpRequest,
    form: web::Form<SubmitForm>,
    app_context: web::Data<Arc<AppContext>>,
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    let origin = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    let submitted = app_context
        .submissions()
        .submit(SubmissionRequest {
            sequences: form.sequences,
            email: form.email,
            tokens: form.tokens_var,
            origin,
        })
        .await?;

    // Server-built from a validated JobId; nothing to escape.
    let link = &submitted.status_path;
    let body = render::page(
        "Job submitted",
        &format!(
            "<h1>Your job has been submitted</h1>\n\
             <p>You can check the result at: <a href=\"{link}\">{link}</a></p>\n\
             <p>Keep the link above for future access.</p>",
            link = link
        ),
    );

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, submitted.status_path))
        .content_type("text/html; charset=utf-8")
        .body(body))
}
