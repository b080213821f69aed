use serde::Serialize;

use super::dental::dental_text;
use super::overall::overall_text;
use super::physical::physical_text;
use super::session::ReportSession;
use crate::templates::TemplateStore;

const PHYSICAL_TITLE: &str = "신체검사";
const DENTAL_TITLE: &str = "치과 소견";
const OVERALL_TITLE: &str = "종합 소견";

/// CRLF to LF, trailing spaces/tabs stripped per line, runs of 3+ newlines
/// collapsed to 2, whole result trimmed.
///
/// Trailing whitespace goes first: a whitespace-only line between blank lines
/// must not survive as a separator that later becomes a third newline.
pub fn normalize_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n");
    let mut out = String::with_capacity(unified.len());
    let mut newlines = 0usize;

    for (i, line) in unified.split('\n').enumerate() {
        if i > 0 {
            newlines += 1;
        }
        let line = line.trim_end_matches([' ', '\t']);
        if line.is_empty() {
            continue;
        }
        for _ in 0..newlines.min(2) {
            out.push('\n');
        }
        newlines = 0;
        out.push_str(line);
    }

    out.trim().to_string()
}

fn section(title: &str, body: &str) -> String {
    format!("【{title}】\n{body}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedReport {
    pub physical: String,
    pub dental: String,
    pub overall: String,
    /// All three sections under their headers, ready to print or copy.
    pub full: String,
}

pub fn render_report(store: &TemplateStore, session: &ReportSession) -> RenderedReport {
    let physical = physical_text(store, &session.physical);
    let dental = dental_text(&session.dental);
    let overall = overall_text(store, &session.overall);

    let full = normalize_text(
        &[
            section(PHYSICAL_TITLE, &physical),
            section(DENTAL_TITLE, &dental),
            section(OVERALL_TITLE, &overall),
        ]
        .join("\n\n"),
    );

    RenderedReport {
        physical,
        dental,
        overall,
        full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::bcs::bcs_phrase;
    use crate::templates::models::SEED_TEMPLATES;

    #[test]
    fn test_collapses_long_blank_runs() {
        assert_eq!(normalize_text("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize_text("a\n\nb"), "a\n\nb");
        assert_eq!(normalize_text("a\nb"), "a\nb");
    }

    #[test]
    fn test_strips_trailing_whitespace_and_crlf() {
        assert_eq!(normalize_text("a  \t\r\nb \r\n"), "a\nb");
    }

    #[test]
    fn test_whitespace_only_lines_do_not_defeat_collapsing() {
        assert_eq!(normalize_text("a\n\n \t\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_trims_outer_whitespace_but_keeps_leading_indent_inside() {
        assert_eq!(normalize_text("\n\n  x\n  y  \n\n"), "x\n  y");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \n\t\n"), "");
    }

    #[test]
    fn test_full_report_has_three_headed_sections() {
        let store = TemplateStore::from_json(SEED_TEMPLATES).unwrap();
        let report = render_report(&store, &ReportSession::default());

        assert!(report.full.starts_with("【신체검사】\n"));
        assert!(report.full.contains("\n\n【치과 소견】\n"));
        // Nothing selected: the overall header is the last line.
        assert!(report.full.ends_with("【종합 소견】"));
        assert!(report.full.contains(bcs_phrase(5).trim_end()));
    }

    #[test]
    fn test_full_report_never_has_three_newlines_or_outer_whitespace() {
        let store = TemplateStore::from_json(SEED_TEMPLATES).unwrap();
        let mut session = ReportSession::default();
        session.physical.bcs = 9; // phrase ends with a trailing space
        session.physical.looks.insert("외이염".to_string(), true);
        session.dental.note = "\n\n\n".to_string();
        session.overall.selected.extend([0, 3]);
        session.overall.addenda = "식이 조절  \n\n\n\n재검 권장".to_string();

        let full = render_report(&store, &session).full;
        assert!(!full.contains("\n\n\n"));
        assert_eq!(full, full.trim());
        assert!(!full.contains(" \n"));
    }
}
