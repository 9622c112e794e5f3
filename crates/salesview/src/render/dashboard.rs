//! Index page linking every chart of a run.

use chrono::{DateTime, Utc};

use super::html::escape_html;

/// One line of the index page.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardEntry {
    pub number: usize,
    pub title: String,
    /// Relative link to the artifact; `None` when it was not written.
    pub href: Option<String>,
    pub detail: String,
}

/// Render the index page.
pub fn render_dashboard(
    heading: &str,
    generated_at: DateTime<Utc>,
    entries: &[DashboardEntry],
) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(heading)));
    html.push_str(
        "<style>\nbody { font-family: sans-serif; margin: 2rem; }\n\
         li { margin: 0.4rem 0; }\n.detail { color: #666; }\n.failed { color: #b00020; }\n</style>\n",
    );
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(heading)));
    html.push_str(&format!(
        "<p class=\"detail\">Generated {}</p>\n<ol>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    for entry in entries {
        let title = escape_html(&entry.title);
        let detail = escape_html(&entry.detail);
        match &entry.href {
            Some(href) => html.push_str(&format!(
                "<li value=\"{}\"><a href=\"{}\">{}</a> <span class=\"detail\">{}</span></li>\n",
                entry.number,
                escape_html(href),
                title,
                detail
            )),
            None => html.push_str(&format!(
                "<li value=\"{}\">{} <span class=\"failed\">{}</span></li>\n",
                entry.number, title, detail
            )),
        }
    }

    html.push_str("</ol>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_rendered_and_failed_entries() {
        let entries = vec![
            DashboardEntry {
                number: 1,
                title: "Brand-wise Distribution".to_string(),
                href: Some("brand_distribution.html".to_string()),
                detail: "9 rows".to_string(),
            },
            DashboardEntry {
                number: 2,
                title: "Number of Models By Brands".to_string(),
                href: None,
                detail: "permission denied".to_string(),
            },
        ];

        let html = render_dashboard("Mobile Sales", Utc::now(), &entries);

        assert!(html.contains("<a href=\"brand_distribution.html\">Brand-wise Distribution</a>"));
        assert!(html.contains("<span class=\"failed\">permission denied</span>"));
        assert!(html.contains("<h1>Mobile Sales</h1>"));
    }
}
