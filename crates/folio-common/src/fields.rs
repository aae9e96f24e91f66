//! Text <-> structured field conversions for list-valued form inputs.
//!
//! The admin console edits stacks, tags, highlights, paragraphs, and
//! project links as plain multi-line text; these helpers are the single
//! place that text is parsed and re-joined.

use crate::entities::ProjectLink;

/// Split a multi-line input into trimmed, non-empty lines.
pub fn parse_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Inverse of [`parse_lines`] for pre-filling an edit buffer.
pub fn join_lines(lines: Option<&[String]>) -> String {
    lines.map(|l| l.join("\n")).unwrap_or_default()
}

/// Parse "one link per line" input. Each line is either `Label|URL` or a
/// bare URL; the label defaults to `Link N` (1-based over non-empty
/// lines). The split is on the first `|` only, so hrefs may contain `|`.
/// Lines with an empty href are dropped.
pub fn parse_link_lines(input: &str) -> Vec<ProjectLink> {
    parse_lines(input)
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let fallback = format!("Link {}", index + 1);
            match line.split_once('|') {
                Some((label, href)) => {
                    let label = label.trim();
                    let href = href.trim();
                    if href.is_empty() {
                        return None;
                    }
                    Some(ProjectLink {
                        label: if label.is_empty() { fallback } else { label.to_string() },
                        href: href.to_string(),
                    })
                }
                None => Some(ProjectLink {
                    label: fallback,
                    href: line.clone(),
                }),
            }
        })
        .collect()
}

/// Render links back into the `Label|URL` line format.
pub fn join_link_lines(links: Option<&[ProjectLink]>) -> String {
    links
        .map(|links| {
            links
                .iter()
                .map(|link| format!("{}|{}", link.label, link.href))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}
