use crate::catalog::model::{ExampleGroup, FileEntry};
use crate::catalog::tables::CatalogConfig;
use crate::config::PageConfig;

const STYLESHEET: &str = include_str!("page.css");

// ---------------------------------------------------------------------------
// Index page
// ---------------------------------------------------------------------------

/// Render the whole page: one card per group, or the "no examples" notice.
pub fn render_index(page: &PageConfig, catalog: &CatalogConfig, groups: &[ExampleGroup]) -> String {
    let title = escape_html(&page.title);

    let body = if groups.is_empty() {
        no_examples_notice(catalog)
    } else {
        let cards: String = groups.iter().map(example_card).collect();
        format!("<div class=\"grid\">\n{cards}</div>\n")
    };

    let footer: String = page
        .credits
        .iter()
        .map(|c| {
            format!(
                "<div class=\"footer-row\"><span class=\"footer-label\">{}:</span> \
                 <span>{}</span><span class=\"footer-email\">{}</span></div>\n",
                escape_html(&c.role),
                escape_html(&c.name),
                escape_html(&c.email),
            )
        })
        .collect();

    format!(
        "<!doctype html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>{title}</title>
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">
<style>
{style}</style>
</head>
<body>
<div class=\"page\">
<div class=\"shell\">
<div class=\"header\"><h1 class=\"title\">{title}</h1></div>
{body}<div class=\"footer\">
{footer}</div>
</div>
</div>
</body>
</html>
",
        style = STYLESHEET,
    )
}

fn example_card(group: &ExampleGroup) -> String {
    let rows: String = group.files.iter().map(file_row).collect();
    format!(
        "<div class=\"example-card\" data-example=\"{name}\">
<div class=\"example-header\"><div class=\"example-title\">Input SNR = {snr}</div></div>
<div class=\"file-list\">
{rows}</div>
</div>
",
        name = escape_html(&group.name),
        snr = escape_html(&group.snr),
    )
}

fn file_row(file: &FileEntry) -> String {
    format!(
        "<div class=\"file-row\">
<div class=\"file-meta\"><div class=\"file-label\">{label}</div></div>
<div class=\"file-audio\">
<audio controls preload=\"none\">
<source src=\"{src}\">
Your browser does not support the audio tag.
</audio>
</div>
</div>
",
        label = escape_html(&file.label),
        src = escape_html(&audio_url(&file.rel_path)),
    )
}

/// Notice listing the folders the page expected, e.g.
/// "`Example_01`, `Example_02`, or `Example_03`".
fn no_examples_notice(catalog: &CatalogConfig) -> String {
    let names: Vec<String> = catalog
        .example_names()
        .into_iter()
        .map(|n| format!("<code>{}</code>", escape_html(n)))
        .collect();

    let listed = match names.as_slice() {
        [] => "the configured example folders".to_string(),
        [one] => one.clone(),
        [first, second] => format!("{first} or {second}"),
        [rest @ .., last] => format!("{}, or {last}", rest.join(", ")),
    };

    format!(
        "<div class=\"no-examples\">
No audio files were found in {listed}.
Please ensure these folders exist and contain valid audio files.
</div>
"
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// URL of the audio endpoint for a catalog path, percent-encoding each segment.
pub fn audio_url(rel_path: &str) -> String {
    let encoded: Vec<String> = rel_path.split('/').map(percent_encode).collect();
    format!("/audio/{}", encoded.join("/"))
}

fn percent_encode(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for b in segment.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
