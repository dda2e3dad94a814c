//! End-to-end submission flow over the HTTP surface.

mod common;

use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use afold_jobs::job_id_for;
use common::{TestServer, CLIENT_IP, QUEUE_SNAPSHOT};

fn submit_request(sequences: &str, email: &str, tokens: Option<&str>) -> test::TestRequest {
    let mut form = vec![("sequences", sequences), ("email", email)];
    if let Some(tokens) = tokens {
        form.push(("tokens_var", tokens));
    }
    test::TestRequest::post()
        .uri("/submit")
        .insert_header(("X-Forwarded-For", CLIENT_IP))
        .set_form(&form)
}

#[cfg(unix)]
#[actix_web::test]
async fn test_submit_redirects_and_launches_worker() {
    let scratch = tempfile::TempDir::new().unwrap();
    let worker = common::recording_worker(scratch.path());
    let server = TestServer::with_worker(&worker).await;
    let app = test::init_service(App::new().configure(server.app_config())).await;

    let resp = test::call_service(
        &app,
        submit_request(">seq1\r\nMKV\r\n", "alice@example.org", Some("42")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let job_id = job_id_for(">seq1\nMKV\n");
    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap();
    assert_eq!(location, format!("/jobs/{}", job_id));

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains(&location));

    let job_dir = server.job_dir(&job_id);
    let input = job_dir.join(format!("input_{}.fasta", job_id));
    assert_eq!(std::fs::read_to_string(&input).unwrap(), ">seq1\nMKV\n");

    let seen = common::wait_for_file(&job_dir.join("seen.txt")).await;
    let fields: Vec<&str> = seen.split('|').collect();
    assert_eq!(fields[0], job_id.as_str());
    assert_eq!(fields[1], input.display().to_string());
    assert_eq!(fields[2], "3");

    let records = server.app_context.audit_log().records().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].requester, "alice");
    assert_eq!(records[0].origin, CLIENT_IP);
    assert_eq!(records[0].job_id, job_id);
    assert_eq!(records[0].tokens, 3);
}

#[actix_web::test]
async fn test_invalid_sequence_is_rejected_without_side_effects() {
    let server = TestServer::new().await;
    let app = test::init_service(App::new().configure(server.app_config())).await;

    let resp = test::call_service(
        &app,
        submit_request(">seq1\nMKV1\n", "alice@example.org", None).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let leftovers: Vec<_> = std::fs::read_dir(server.base_dir()).unwrap().collect();
    assert!(leftovers.is_empty(), "nothing may be written for rejected input");
}

#[actix_web::test]
async fn test_invalid_email_is_rejected() {
    let server = TestServer::new().await;
    let app = test::init_service(App::new().configure(server.app_config())).await;

    let resp = test::call_service(&app, submit_request(">seq1\nMKV\n", "alice", None).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!server.audit_log_path().exists());
}

#[actix_web::test]
async fn test_missing_form_field_is_a_bad_request() {
    let server = TestServer::new().await;
    let app = test::init_service(App::new().configure(server.app_config())).await;

    let req = test::TestRequest::post()
        .uri("/submit")
        .set_form([("email", "alice@example.org")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).starts_with("Invalid submission form"));
}

#[actix_web::test]
async fn test_launch_failure_is_reported_and_not_audited() {
    let scratch = tempfile::TempDir::new().unwrap();
    let server = TestServer::with_worker(scratch.path().join("no-such-worker")).await;
    let app = test::init_service(App::new().configure(server.app_config())).await;

    let resp = test::call_service(
        &app,
        submit_request(">seq1\nMKV\n", "alice@example.org", None).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&body).contains("could not be started"));
    assert!(!server.audit_log_path().exists());
}

#[actix_web::test]
async fn test_submit_form_shows_queue_and_client() {
    let server = TestServer::new().await;
    let app = test::init_service(App::new().configure(server.app_config())).await;

    let req = test::TestRequest::get()
        .uri("/submit")
        .insert_header(("X-Forwarded-For", CLIENT_IP))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("name=\"sequences\""));
    assert!(body.contains("name=\"email\""));
    assert!(body.contains(QUEUE_SNAPSHOT));
    assert!(body.contains(CLIENT_IP));
}

#[actix_web::test]
async fn test_index_redirects_to_form() {
    let server = TestServer::new().await;
    let app = test::init_service(App::new().configure(server.app_config())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/submit");
}

#[cfg(unix)]
#[actix_web::test]
async fn test_recent_jobs_lists_submissions_newest_first() {
    let server = TestServer::new().await;
    let app = test::init_service(App::new().configure(server.app_config())).await;

    for seq in [">a\nMKV\n", ">b\nMKW\n"] {
        let resp = test::call_service(
            &app,
            submit_request(seq, "bob@example.org", None).to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }

    let resp = test::call_service(&app, test::TestRequest::get().uri("/jobs/recent").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();

    let first = job_id_for(">a\nMKV\n").to_string();
    let second = job_id_for(">b\nMKW\n").to_string();
    let first_at = body.find(&first).unwrap();
    let second_at = body.find(&second).unwrap();
    assert!(second_at < first_at, "newest submission must come first");
    assert!(body.contains("2 submission(s)."));
}
