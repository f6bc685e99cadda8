// HTML table export

use std::fs;
use std::path::{Path, PathBuf};

use csvsh_config::ColorScheme;
use csvsh_engine::Snapshot;

/// File name used inside the temp directory.
pub const PAGE_NAME: &str = "table.html";

/// Styles applied on top of the scheme variables.
pub const DEFAULT_CSS: &str = r#"
body {
  background-color: var(--bg-color);
  font-family: "Fira Code", monospace;
  font-size: 1.5rem;
  font-weight: 500;
  color: var(--text-color);
}

table {
  border-collapse: collapse;
}

table, th, td {
  border: 3px solid var(--border-color);
}

th, td {
  padding: 0.4rem 1rem;
  text-align: left;
}

th {
  color: var(--title-color);
}

tr:nth-child(even) {
  color: var(--text-color-2);
}
"#;

/// Render a full HTML page showing `snapshot` as a table.
pub fn render_page(snapshot: &Snapshot, scheme: &ColorScheme) -> String {
    let css = format!("{}\n{}", scheme.render_css(), DEFAULT_CSS);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    <title>CSV</title>\n<style>\n{}\n</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        css,
        render_table(snapshot)
    )
}

/// Just the `<table>` element.
pub fn render_table(snapshot: &Snapshot) -> String {
    let mut out = String::from("<table>\n  <tr>");
    for column in &snapshot.columns {
        out.push_str("<th>");
        out.push_str(&escape(column));
        out.push_str("</th>");
    }
    out.push_str("</tr>\n");

    for row in &snapshot.rows {
        out.push_str("  <tr>");
        for cell in row {
            out.push_str("<td>");
            out.push_str(&escape(cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}

/// Write the page into `dir`, replacing any previous one, and return its path.
pub fn write_page(snapshot: &Snapshot, scheme: &ColorScheme, dir: &Path) -> Result<PathBuf, String> {
    let path = dir.join(PAGE_NAME);
    fs::write(&path, render_page(snapshot, scheme)).map_err(|e| e.to_string())?;
    log::debug!("wrote {}", path.display());
    Ok(path)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
