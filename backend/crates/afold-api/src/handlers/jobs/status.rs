use crate::error::ApiError;
use crate::handlers::parse_job_id;
use crate::render;
use actix_web::http::StatusCode;
use actix_web::{get, web, HttpResponse};
use afold_commons::JobState;
use afold_jobs::{AppContext, JobStatusReport, StatusDetail};
use std::sync::Arc;

/// GET /jobs/{job_id}
///
/// The state is re-derived from the job directory on every request; a
/// refresh is all a client needs to follow progress.
#[get("/jobs/{job_id}")]
pub async fn job_status(
    path: web::Path<String>,
    app_context: web::Data<Arc<AppContext>>,
) -> Result<HttpResponse, ApiError> {
    let job_id = parse_job_id(&path.into_inner())?;
    let report = app_context.status().report(&job_id).await?;

    if report.state == JobState::NotFound {
        return Err(ApiError::JobNotFound);
    }

    let (title, body) = render_report(&report);
    Ok(render::html(StatusCode::OK, title, &body))
}

fn render_report(report: &JobStatusReport) -> (&'static str, String) {
    let job_id = &report.job_id;
    match (&report.state, &report.detail) {
        (JobState::Finished, _) => (
            "Job finished",
            format!(
                "<h1>Job completed successfully</h1>\n\
                 <p>You can browse the output files here:</p>\n\
                 <p><a href=\"{}\">Browse output files</a></p>",
                render::job_url(job_id, "browse", "")
            ),
        ),
        (JobState::Failed, detail) => {
            let details = match detail {
                StatusDetail::Failed {
                    log: Some(log),
                    truncated,
                } => {
                    let note = if *truncated {
                        "<p>Only the end of the log is shown.</p>\n"
                    } else {
                        ""
                    };
                    format!("{}{}", note, render::preformatted(log))
                },
                _ => "<p>No worker log is available.</p>".to_string(),
            };
            (
                "Job failed",
                format!(
                    "<h1>Job failed</h1>\n\
                     <p>An error occurred during the job execution.</p>\n\
                     <h2>Error details:</h2>\n{}",
                    details
                ),
            )
        },
        (JobState::Running, StatusDetail::Running { queue, devices }) => (
            "Job running",
            format!(
                "<h1>Job is running or waiting in the queue.</h1>\n\
                 <p>Please refresh this page later.</p>\n\
                 <h2>Current job queue:</h2>\n{}\n\
                 <h2>GPU status:</h2>\n{}",
                render::preformatted(queue),
                render::preformatted(devices)
            ),
        ),
        _ => (
            "Job not started",
            "<h1>Job is not running nor in the queue yet.</h1>\n\
             <p>Please refresh this page later.</p>\n\
             <p>If this persists, contact the server administrators.</p>"
                .to_string(),
        ),
    }
}
