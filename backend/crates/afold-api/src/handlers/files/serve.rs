use crate::error::ApiError;
use crate::handlers::parse_job_id;
use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{get, mime, web, HttpRequest, HttpResponse};
use afold_filestore::ResolvedFile;
use afold_jobs::AppContext;
use std::sync::Arc;

/// How a resolved file is handed to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Presentation {
    Attachment,
    InlineImage,
    InlineText,
}

/// Streams `file` with the disposition and media type of `presentation`.
pub(crate) async fn stream_file(
    req: &HttpRequest,
    file: ResolvedFile,
    presentation: Presentation,
) -> Result<HttpResponse, ApiError> {
    let (disposition, content_type) = match presentation {
        Presentation::Attachment => (DispositionType::Attachment, mime_for(&file.file_name)),
        Presentation::InlineImage => (DispositionType::Inline, mime::IMAGE_PNG),
        Presentation::InlineText => (DispositionType::Inline, mime::TEXT_PLAIN),
    };

    let named = NamedFile::open_async(&file.path)
        .await?
        .set_content_type(content_type)
        .set_content_disposition(ContentDisposition {
            disposition,
            parameters: vec![DispositionParam::Filename(file.file_name.clone())],
        });

    log::debug!(
        "Serving {} ({} bytes, {:?})",
        file.path.display(),
        file.size,
        presentation
    );
    Ok(named.into_response(req))
}

fn mime_for(file_name: &str) -> mime::Mime {
    mime_guess::from_path(file_name).first_or_octet_stream()
}

async fn serve(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    app_context: web::Data<Arc<AppContext>>,
    presentation: Presentation,
) -> Result<HttpResponse, ApiError> {
    let (job_id, rel_path) = path.into_inner();
    let job_id = parse_job_id(&job_id)?;
    let browser = app_context.browser();
    let file = web::block(move || browser.resolve_file(&job_id, &rel_path)).await??;
    stream_file(&req, file, presentation).await
}

/// GET /jobs/{job_id}/download/{path}
#[get("/jobs/{job_id}/download/{path:.*}")]
pub async fn download_file(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    app_context: web::Data<Arc<AppContext>>,
) -> Result<HttpResponse, ApiError> {
    serve(req, path, app_context, Presentation::Attachment).await
}

/// GET /jobs/{job_id}/view-image/{path}
#[get("/jobs/{job_id}/view-image/{path:.*}")]
pub async fn view_image(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    app_context: web::Data<Arc<AppContext>>,
) -> Result<HttpResponse, ApiError> {
    serve(req, path, app_context, Presentation::InlineImage).await
}

/// GET /jobs/{job_id}/view-text/{path}
#[get("/jobs/{job_id}/view-text/{path:.*}")]
pub async fn view_text(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    app_context: web::Data<Arc<AppContext>>,
) -> Result<HttpResponse, ApiError> {
    serve(req, path, app_context, Presentation::InlineText).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_for_guesses_from_extension() {
        assert_eq!(mime_for("pae.png"), mime::IMAGE_PNG);
        assert_eq!(mime_for("ranking_debug.json"), mime::APPLICATION_JSON);
        assert_eq!(mime_for("README"), mime::APPLICATION_OCTET_STREAM);
    }
}
