//! Status page rendering for every job state.

mod common;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use common::{TestServer, DEVICE_SNAPSHOT, QUEUE_SNAPSHOT};

const JOB: &str = "0123456789abcdef0123456789abcdef";

async fn get_status(server: &TestServer, uri: &str) -> (StatusCode, String) {
    let app = test::init_service(App::new().configure(server.app_config())).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}

#[actix_web::test]
async fn test_unknown_job_is_not_found() {
    let server = TestServer::new().await;
    let (status, body) = get_status(&server, &format!("/jobs/{}", JOB)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Job not found.");
}

#[actix_web::test]
async fn test_malformed_job_id_is_not_found() {
    let server = TestServer::new().await;
    for uri in ["/jobs/not-a-job", "/jobs/..", "/jobs/0123456789ABCDEF0123456789ABCDEF"] {
        let (status, body) = get_status(&server, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body, "Job not found.");
    }
}

#[actix_web::test]
async fn test_queued_job_asks_for_refresh() {
    let server = TestServer::new().await;
    server.create_job(JOB);

    let (status, body) = get_status(&server, &format!("/jobs/{}", JOB)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("not running nor in the queue yet"));
}

#[actix_web::test]
async fn test_running_job_shows_diagnostics() {
    let server = TestServer::new().await;
    let job_id = server.create_job(JOB);
    server.write_job_file(&job_id, &format!("input_{}_full_dbs/running.txt", JOB), b"");

    let (status, body) = get_status(&server, &format!("/jobs/{}", JOB)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Job is running"));
    assert!(body.contains(QUEUE_SNAPSHOT));
    assert!(body.contains(DEVICE_SNAPSHOT));
}

#[actix_web::test]
async fn test_failed_job_shows_escaped_log() {
    let server = TestServer::new().await;
    let job_id = server.create_job(JOB);
    server.write_job_file(&job_id, &format!("input_{}_full_dbs/failed.txt", JOB), b"");
    server.write_job_file(
        &job_id,
        &format!("input_{}_full_dbs.log", JOB),
        b"step 3 <script>alert(1)</script> out of memory",
    );

    let (status, body) = get_status(&server, &format!("/jobs/{}", JOB)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Job failed"));
    assert!(body.contains("&lt;script&gt;alert(1)&lt;&#47;script&gt;"));
    assert!(body.contains("memory"));
    assert!(!body.contains("<script>"));
}

#[actix_web::test]
async fn test_failed_job_without_log() {
    let server = TestServer::new().await;
    let job_id = server.create_job(JOB);
    server.write_job_file(&job_id, &format!("input_{}_full_dbs/failed.txt", JOB), b"");

    let (status, body) = get_status(&server, &format!("/jobs/{}", JOB)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No worker log is available."));
}

#[actix_web::test]
async fn test_finished_wins_over_failed() {
    let server = TestServer::new().await;
    let job_id = server.create_job(JOB);
    server.write_job_file(&job_id, &format!("input_{}_full_dbs/failed.txt", JOB), b"");
    server.write_job_file(&job_id, &format!("input_{}_full_dbs/finished.txt", JOB), b"");

    let (status, body) = get_status(&server, &format!("/jobs/{}", JOB)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Job completed successfully"));
    assert!(body.contains(&format!("href=\"/jobs/{}/browse\"", JOB)));
}

#[actix_web::test]
async fn test_healthcheck_reports_version() {
    let server = TestServer::new().await;
    let (status, body) = get_status(&server, "/healthcheck").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
    assert!(json["uptime_seconds"].is_u64());
}

#[actix_web::test]
async fn test_favicon_is_png() {
    let server = TestServer::new().await;
    let app = test::init_service(App::new().configure(server.app_config())).await;
    let resp = test::call_service(&app, test::TestRequest::get().uri("/favicon.ico").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("content-type").unwrap(), "image/png");

    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"\x89PNG\r\n\x1a\n"));
}
