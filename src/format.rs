use crate::model::{Metric, View};
use crate::session::Dataset;

pub fn parse_excludes(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

pub fn breadcrumb_line(breadcrumb: &[String]) -> String {
    let mut line = String::from("root");
    for seg in breadcrumb {
        line.push_str(" / ");
        line.push_str(seg);
    }
    line
}

pub fn summary_line(ds: &Dataset) -> String {
    if ds.skipped == 0 {
        format!("dataset '{}': {} files", ds.name, ds.file_count)
    } else {
        format!(
            "dataset '{}': {} files ({} records skipped)",
            ds.name, ds.file_count, ds.skipped
        )
    }
}

/// One level of the heat tree as text: breadcrumb, then a tile per line.
/// Directories carry a [+] marker; the renderer sizes by loc and colors
/// by the fill hex.
pub fn render_view(view: &View, metric: Metric) -> String {
    let mut out = String::new();
    out.push_str(&breadcrumb_line(&view.breadcrumb));
    out.push('\n');

    if view.tiles.is_empty() {
        out.push_str("(empty directory)\n");
        return out;
    }

    let name_w = view
        .tiles
        .iter()
        .map(|t| t.name.len())
        .max()
        .unwrap_or(0)
        .max("name".len());

    out.push_str(&format!(
        "{:<name_w$}  {:>8}  {:>8}  fill\n",
        "name",
        "loc",
        metric.as_str(),
    ));
    for tile in &view.tiles {
        let marker = if tile.has_children { "  [+]" } else { "" };
        out.push_str(&format!(
            "{:<name_w$}  {:>8}  {:>8}  {}{}\n",
            tile.name, tile.loc, tile.metric_value, tile.fill, marker,
        ));
    }
    out
}
