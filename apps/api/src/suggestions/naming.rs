//! Queue file and branch naming.

use chrono::{DateTime, Utc};

const MAX_SLUG_CHARS: usize = 40;

fn is_hangul_syllable(c: char) -> bool {
    ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

/// ISO-8601 UTC with `:` and `.` replaced by `-`, e.g. `2025-03-04T05-06-07-123Z`.
/// Sorts chronologically and is safe in every path segment.
pub fn queue_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S-%3fZ").to_string()
}

/// Case-preserving: every char outside `[A-Za-z0-9가-힣_-]` becomes `_`.
pub fn sanitize_tag(tag: &str) -> String {
    if tag.is_empty() {
        return "tag".to_string();
    }
    tag.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || is_hangul_syllable(c) || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Lowercased; runs outside `[a-z0-9가-힣]` collapse to one `-`; edges
/// trimmed; at most 40 chars; `suggestion` when nothing is left.
pub fn slugify(tag: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in tag.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() || is_hangul_syllable(c) {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    let slug: String = slug.chars().take(MAX_SLUG_CHARS).collect();
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "suggestion".to_string()
    } else {
        slug.to_string()
    }
}

/// `<timestamp>--<sanitized tag>.json`, used by the direct-write strategy.
pub fn direct_filename(now: DateTime<Utc>, tag: &str) -> String {
    format!("{}--{}.json", queue_timestamp(now), sanitize_tag(tag))
}

/// `<YYYY-MM-DD>-<epoch ms>-<slug>`, used by the pull-request strategy.
pub fn suggestion_id(now: DateTime<Utc>, tag: &str) -> String {
    format!(
        "{}-{}-{}",
        now.format("%Y-%m-%d"),
        now.timestamp_millis(),
        slugify(tag)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap() + chrono::Duration::milliseconds(89)
    }

    #[test]
    fn test_queue_timestamp_has_no_colons_or_dots() {
        assert_eq!(queue_timestamp(at()), "2025-03-04T05-06-07-089Z");
    }

    #[test]
    fn test_sanitize_keeps_hangul_and_case() {
        assert_eq!(sanitize_tag("정상 소견/OK!"), "정상_소견_OK_");
        assert_eq!(sanitize_tag("Grade_2-a"), "Grade_2-a");
        assert_eq!(sanitize_tag(""), "tag");
    }

    #[test]
    fn test_direct_filename() {
        assert_eq!(
            direct_filename(at(), "정상"),
            "2025-03-04T05-06-07-089Z--정상.json"
        );
    }

    #[test]
    fn test_slugify_collapses_and_trims() {
        assert_eq!(slugify("  ALT 상승 (경미) "), "alt-상승-경미");
        assert_eq!(slugify("a__b--c"), "a-b-c");
        assert_eq!(slugify("!!!"), "suggestion");
        assert_eq!(slugify(""), "suggestion");
    }

    #[test]
    fn test_slugify_caps_length() {
        let long = "가".repeat(50);
        assert_eq!(slugify(&long).chars().count(), 40);

        // A dash landing on the cut is trimmed.
        let edge = format!("{} b", "a".repeat(39));
        assert_eq!(slugify(&edge), "a".repeat(39));
    }

    #[test]
    fn test_suggestion_id() {
        let id = suggestion_id(at(), "경미한 빈혈");
        assert_eq!(id, format!("2025-03-04-{}-경미한-빈혈", at().timestamp_millis()));
    }
}
