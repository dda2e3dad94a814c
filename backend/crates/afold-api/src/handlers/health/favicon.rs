use actix_web::{get, HttpResponse, Responder};
use base64::Engine;

/// 16x16 PNG
const FAVICON_PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAABAAAAAQCAYAAAAf8/9hAAAA+UlEQVQ4T6XSMQ5EQBQG4F8l0aiVCpE4gAIFcQaVwiX0GjeQOAAKpxARrVIpDqByANndeckmNsGO3Wllvnn/+wmP18EfR2CAqqoIwxBpmhKVJAmKosA8z19pAmzbhiiKaJqGLnieh23b0HUdH+A4DizLQhAEdKGuawzDgLZt+YEsy1CWJdhKWJw4ju8Bfd/D930anb0sSRJM06QJDMNAnueH09AOWAQGVFVFQBRFkGUZ67ryR2DA/uyBq5ZogqNndF2Hoij0aZomaJp22NIp8I7FgKuWuIGzlrgijOOIZVk+WnJdl9o6BfZ7OWrpJ2CP3gKufgauCFfAE09Z1dH0wbq/AAAAAElFTkSuQmCC";

/// GET /favicon.ico
#[get("/favicon.ico")]
pub async fn favicon_handler() -> impl Responder {
    match base64::engine::general_purpose::STANDARD.decode(FAVICON_PNG_BASE64) {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("image/png")
            .insert_header(("Cache-Control", "public, max-age=86400"))
            .body(bytes),
        Err(e) => {
            log::error!("Embedded favicon is not valid base64: {}", e);
            HttpResponse::NotFound().finish()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favicon_decodes_to_png() {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(FAVICON_PNG_BASE64)
            .unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
