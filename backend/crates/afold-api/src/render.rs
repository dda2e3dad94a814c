//! HTML helpers shared by the page handlers.
//!
//! Every piece of user- or worker-controlled text goes through [`escape`];
//! every path placed into an `href` goes through [`encode_path`].

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use afold_commons::JobId;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside one URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const STYLE: &str = "body { font-family: sans-serif; margin: 1.5em; }\n\
pre { background: #f6f6f6; padding: 0.5em; overflow-x: auto; }\n\
th { position: sticky; top: 0; background: white; text-align: left; }\n\
td, th { padding: 0.2em 0.8em; }\n";

pub fn escape(text: &str) -> String {
    ammonia::clean_text(text)
}

/// Percent-encodes each `/`-separated segment of a relative path.
pub fn encode_path(rel_path: &str) -> String {
    rel_path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// `/jobs/{job_id}/{action}[/{rel_path}]`
pub fn job_url(job_id: &JobId, action: &str, rel_path: &str) -> String {
    let encoded = encode_path(rel_path);
    if encoded.is_empty() {
        format!("/jobs/{}/{}", job_id, action)
    } else {
        format!("/jobs/{}/{}/{}", job_id, action, encoded)
    }
}

/// Wraps `body` in a complete document. `title` is escaped here.
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style type=\"text/css\">\n{style}</style>\n</head>\n<body>\n\
         <p><a href=\"/submit\">afold job server</a></p>\n{body}\n</body>\n</html>\n",
        title = escape(title),
        style = STYLE,
        body = body,
    )
}

pub fn html(status: StatusCode, title: &str, body: &str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(page(title, body))
}

pub fn preformatted(text: &str) -> String {
    format!("<pre>{}</pre>", escape(text))
}
