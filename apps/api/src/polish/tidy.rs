use crate::report::normalize_text;

/// Local cleanup with no model call: whitespace before a period dropped, runs
/// of spaces/tabs squeezed to one space, then the usual report normalization.
pub fn tidy(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending = String::new();

    for c in text.chars() {
        if c.is_whitespace() {
            pending.push(c);
            continue;
        }
        if c != '.' && !pending.is_empty() {
            out.push_str(&squeeze(&pending));
        }
        pending.clear();
        out.push(c);
    }
    out.push_str(&squeeze(&pending));

    normalize_text(&out)
}

/// Collapses every run of two or more spaces/tabs into a single space.
fn squeeze(ws: &str) -> String {
    let mut out = String::with_capacity(ws.len());
    let mut run = 0usize;
    let flush = |out: &mut String, run: usize, last: Option<char>| match run {
        0 => {}
        1 => out.extend(last),
        _ => out.push(' '),
    };

    let mut last = None;
    for c in ws.chars() {
        if c == ' ' || c == '\t' {
            run += 1;
            last = Some(c);
        } else {
            flush(&mut out, run, last);
            run = 0;
            out.push(c);
        }
    }
    flush(&mut out, run, last);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_before_period_removed() {
        assert_eq!(tidy("재검이 필요합니다 ."), "재검이 필요합니다.");
        assert_eq!(tidy("권장합니다\n."), "권장합니다.");
    }

    #[test]
    fn test_space_runs_collapsed() {
        assert_eq!(tidy("체중  감량\t\t권장"), "체중 감량 권장");
        assert_eq!(tidy("단일 공백\t유지"), "단일 공백\t유지");
    }

    #[test]
    fn test_blank_lines_clamped() {
        assert_eq!(tidy("  첫 줄  \n\n\n\n둘째 줄 \n"), "첫 줄\n\n둘째 줄");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tidy(""), "");
        assert_eq!(tidy(" \n\t "), "");
    }
}
