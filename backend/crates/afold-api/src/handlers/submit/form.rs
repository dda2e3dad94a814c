use crate::render;
use actix_web::http::StatusCode;
use actix_web::{get, web, HttpRequest, HttpResponse};
use afold_jobs::AppContext;
use std::sync::Arc;

const FORMAT_HELP: &str = r#"<h3>Format accepted</h3>
<pre>&gt;descriptor1 (single line)
PROTEIN_SEQUENCE ... (1 or more lines)
&gt;descriptor2 (single line)
PROTEIN_SEQUENCE ... (1 or more lines)</pre>
<p>For multimers, add one copy of the sequence per chain, each preceded by its own &gt;descriptor line.</p>
<h3>Example</h3>
<pre>&gt;WP_267731513.1 AAA family ATPase
MICHAELRSNAKFCDECGGPVAMSSILAEYKQVTV
LFADVVHSMNIAAAVGAERWREIVTELLNRSSTVV
&gt;1LYZ_1|Chain A|HEN EGG WHITE LYSOZYME|Gallus gallus (9031)
KVFGRCELAAAMKRHGLDNYRGYSLGNWVCAAKFESNFNTQATNRNTDGSTDYGILQINSRWWCNDGRTPGSRNLCNIPC
SALLSSDITASVNCAKKIVSDGNGMNAWVAWRNRCKGTDVQAWIRGCRL</pre>"#;

/// GET /submit
#[get("/submit")]
pub async fn submit_form(req: HttpRequest, app_context: web::Data<Arc<AppContext>>) -> HttpResponse {
    let queue = app_context.diagnostics().queue_text().await;
    let client = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    let submissions = app_context.submissions();
    let policy = submissions.policy();
    let email_placeholder = match &policy.allowed_email_domain {
        Some(domain) => format!("your_name@{}", domain),
        None => "your_name@example.org".to_string(),
    };

    let body = format!(
        r#"<h1>Structure prediction server</h1>
<form method="post" action="/submit">
<p><label for="sequences">FASTA protein sequence(s):</label></p>
<p><textarea id="sequences" name="sequences" rows="20" cols="100" required wrap="off" spellcheck="false"></textarea></p>
<p>Between {min} and {max} residues in total.</p>
<p><label for="email">E-mail for the job-done notification:</label></p>
<p><input type="email" id="email" name="email" required placeholder="{placeholder}"></p>
<input type="hidden" id="tokens_var" name="tokens_var" value="">
<p><input type="submit" value="Submit"></p>
</form>
{help}
<h2>Current job queue</h2>
{queue}
<hr>
<p>Your IP is: {client}</p>
<hr>
<p><a href="/jobs/recent">Previous jobs</a></p>"#,
        min = policy.min_residues,
        max = policy.max_residues,
        placeholder = render::escape(&email_placeholder),
        help = FORMAT_HELP,
        queue = render::preformatted(&queue),
        client = render::escape(&client),
    );

    render::html(StatusCode::OK, "Submit a job", &body)
}
