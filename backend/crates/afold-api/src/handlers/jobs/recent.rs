use crate::error::ApiError;
use crate::render;
use actix_web::http::StatusCode;
use actix_web::{get, web, HttpResponse};
use afold_jobs::AppContext;
use std::fmt::Write;
use std::sync::Arc;

/// GET /jobs/recent
///
/// Newest submissions first. The log itself is append-only and in
/// submission order.
#[get("/jobs/recent")]
pub async fn recent_jobs(app_context: web::Data<Arc<AppContext>>) -> Result<HttpResponse, ApiError> {
    let records = app_context.audit_log().records().await?;

    let mut rows = String::new();
    for record in records.iter().rev() {
        let _ = writeln!(
            rows,
            "<tr><td>{ts}</td><td>{user}</td><td>{origin}</td><td><a href=\"/jobs/{job}\">{job}</a></td><td>{tokens}</td></tr>",
            ts = record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            user = render::escape(&record.requester),
            origin = render::escape(&record.origin),
            job = record.job_id,
            tokens = record.tokens,
        );
    }

    let body = format!(
        "<h1>Previous jobs</h1>\n<table style=\"width:100%\">\n\
         <tr><th>Date-time</th><th>User</th><th>IP</th><th>Job id</th><th>#tokens</th></tr>\n\
         {rows}</table>\n<p>{count} submission(s).</p>",
        rows = rows,
        count = records.len(),
    );
    Ok(render::html(StatusCode::OK, "Previous jobs", &body))
}
