use super::serve::{stream_file, Presentation};
use crate::error::ApiError;
use crate::handlers::parse_job_id;
use crate::render;
use actix_web::http::StatusCode;
use actix_web::{get, web, HttpRequest, HttpResponse};
use afold_filestore::{BrowseTarget, DirectoryListing};
use afold_jobs::AppContext;
use std::fmt::Write;
use std::sync::Arc;

/// GET /jobs/{job_id}/browse
#[get("/jobs/{job_id}/browse")]
pub async fn browse_job(
    req: HttpRequest,
    path: web::Path<String>,
    app_context: web::Data<Arc<AppContext>>,
) -> Result<HttpResponse, ApiError> {
    browse(req, path.into_inner(), String::new(), app_context).await
}

/// GET /jobs/{job_id}/browse/{path}
#[get("/jobs/{job_id}/browse/{path:.*}")]
pub async fn browse_path(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    app_context: web::Data<Arc<AppContext>>,
) -> Result<HttpResponse, ApiError> {
    let (job_id, rel_path) = path.into_inner();
    browse(req, job_id, rel_path, app_context).await
}

async fn browse(
    req: HttpRequest,
    job_id: String,
    rel_path: String,
    app_context: web::Data<Arc<AppContext>>,
) -> Result<HttpResponse, ApiError> {
    let job_id = parse_job_id(&job_id)?;
    let browser = app_context.browser();
    let target = web::block(move || browser.browse(&job_id, &rel_path)).await??;

    match target {
        BrowseTarget::Directory(listing) => {
            let title = if listing.rel_path.is_empty() {
                listing.job_id.to_string()
            } else {
                listing.rel_path.clone()
            };
            Ok(render::html(StatusCode::OK, &title, &render_listing(&listing)))
        },
        BrowseTarget::File(file) => stream_file(&req, file, Presentation::Attachment).await,
    }
}

fn render_listing(listing: &DirectoryListing) -> String {
    let job_id = &listing.job_id;
    let mut body = String::new();

    let heading = if listing.rel_path.is_empty() {
        job_id.to_string()
    } else {
        listing.rel_path.clone()
    };
    let _ = writeln!(body, "<h1>Browsing results: {}</h1>", render::escape(&heading));

    if let Some(parent) = &listing.parent {
        let _ = writeln!(
            body,
            "<p><a href=\"{}\">[Parent Directory]</a></p>",
            render::job_url(job_id, "browse", parent)
        );
    }

    body.push_str("<ul>\n");
    for entry in &listing.entries {
        let name = render::escape(&entry.name);
        if entry.is_dir() {
            let _ = writeln!(
                body,
                "<li><code>drwxr-xr-x</code> [<a href=\"{}\">OPEN</a>] {}/</li>",
                render::job_url(job_id, "browse", &entry.rel_path),
                name
            );
        } else {
            let view_action = if entry.is_png() { "view-image" } else { "view-text" };
            let _ = writeln!(
                body,
                "<li><code>-rw-r--r--</code> [<a href=\"{}\">Download</a>] {} [<a href=\"{}\" target=\"_blank\">View</a>] {} bytes</li>",
                render::job_url(job_id, "download", &entry.rel_path),
                name,
                render::job_url(job_id, view_action, &entry.rel_path),
                entry.size.unwrap_or(0)
            );
        }
    }
    body.push_str("</ul>");
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use afold_commons::JobId;
    use afold_filestore::{DirEntryInfo, EntryKind};

    const JOB: &str = "0123456789abcdef0123456789abcdef";

    fn entry(name: &str, rel: &str, kind: EntryKind, size: Option<u64>) -> DirEntryInfo {
        DirEntryInfo {
            name: name.to_string(),
            rel_path: rel.to_string(),
            kind,
            size,
        }
    }

    #[test]
    fn test_listing_links_by_entry_kind() {
        let listing = DirectoryListing {
            job_id: JobId::parse(JOB).unwrap(),
            rel_path: "out".to_string(),
            parent: Some(String::new()),
            entries: vec![
                entry("msas", "out/msas", EntryKind::Directory, None),
                entry("PAE.PNG", "out/PAE.PNG", EntryKind::File, Some(10)),
                entry("ranked 0.pdb", "out/ranked 0.pdb", EntryKind::File, Some(42)),
            ],
        };

        let html = render_listing(&listing);
        let prefix = format!("/jobs/{}", JOB);
        assert!(html.contains(&format!("href=\"{}/browse\">[Parent Directory]", prefix)));
        assert!(html.contains(&format!("href=\"{}/browse/out/msas\"", prefix)));
        assert!(html.contains(&format!("href=\"{}/view-image/out/PAE.PNG\"", prefix)));
        assert!(html.contains(&format!("href=\"{}/download/out/ranked%200.pdb\"", prefix)));
        assert!(html.contains(&format!("href=\"{}/view-text/out/ranked%200.pdb\"", prefix)));
        assert!(html.contains("42 bytes"));
    }

    #[test]
    fn test_root_listing_has_no_parent_link() {
        let listing = DirectoryListing {
            job_id: JobId::parse(JOB).unwrap(),
            rel_path: String::new(),
            parent: None,
            entries: vec![],
        };
        assert!(!render_listing(&listing).contains("Parent Directory"));
    }
}
