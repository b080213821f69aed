use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const STATUS_PENDING: &str = "pending";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionTarget {
    Physical,
    Overall,
}

impl SuggestionTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionTarget::Physical => "physical",
            SuggestionTarget::Overall => "overall",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("target must be 'physical' or 'overall', got '{0}'")]
    InvalidTarget(String),
}

/// Body of POST /api/v1/suggestions. Every field is optional at the wire level
/// so a missing one surfaces as a field-specific 400 from `validate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSuggestion {
    pub target: Option<String>,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub tag: Option<String>,
    pub text: Option<String>,
    pub proposer: Option<String>,
    pub notes: Option<String>,
}

/// Body of POST /api/v1/suggestions/pr.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequestSuggestion {
    pub secret: Option<String>,
    pub target: Option<String>,
    pub category: Option<String>,
    pub sub: Option<String>,
    pub tag: Option<String>,
    pub text: Option<String>,
    pub notes: Option<String>,
    pub submitter: Option<String>,
}

impl PullRequestSuggestion {
    pub fn into_parts(self) -> (Option<String>, NewSuggestion) {
        let suggestion = NewSuggestion {
            target: self.target,
            major: self.category,
            minor: self.sub,
            tag: self.tag,
            text: self.text,
            proposer: self.submitter,
            notes: self.notes,
        };
        (self.secret, suggestion)
    }
}

/// A validated suggestion: required fields present, everything trimmed, blank
/// optionals dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionDraft {
    pub target: Option<SuggestionTarget>,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub tag: String,
    pub text: String,
    pub proposer: Option<String>,
    pub notes: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl NewSuggestion {
    pub fn validate(self) -> Result<SuggestionDraft, FieldError> {
        let target = match non_blank(self.target) {
            None => None,
            Some(t) if t == "physical" => Some(SuggestionTarget::Physical),
            Some(t) if t == "overall" => Some(SuggestionTarget::Overall),
            Some(other) => return Err(FieldError::InvalidTarget(other)),
        };
        let tag = non_blank(self.tag).ok_or(FieldError::Missing("tag"))?;
        let text = non_blank(self.text).ok_or(FieldError::Missing("text"))?;
        let major = non_blank(self.major);
        if target == Some(SuggestionTarget::Overall) && major.is_none() {
            return Err(FieldError::Missing("major"));
        }

        Ok(SuggestionDraft {
            target,
            major,
            minor: non_blank(self.minor),
            tag,
            text,
            proposer: non_blank(self.proposer),
            notes: non_blank(self.notes),
        })
    }
}

fn default_status() -> String {
    STATUS_PENDING.to_string()
}

/// One queue file. Reads accept both the direct-write field names
/// (`major`/`minor`/`proposer`/`ts`) and the pull-request ones
/// (`category`/`sub`/`submitter`/`createdAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Kept as written; anything but "physical" is treated as overall.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, alias = "category", skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, alias = "sub", skip_serializing_if = "Option::is_none")]
    pub minor: Option<String>,
    pub tag: String,
    pub text: String,
    #[serde(default, alias = "submitter", skip_serializing_if = "Option::is_none")]
    pub proposer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, alias = "ts", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

impl SuggestionRecord {
    pub fn pending(draft: &SuggestionDraft, id: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            target: draft.target.map(|t| t.as_str().to_string()),
            major: draft.major.clone(),
            minor: draft.minor.clone(),
            tag: draft.tag.clone(),
            text: draft.text.clone(),
            proposer: draft.proposer.clone(),
            notes: draft.notes.clone(),
            created_at: Some(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            status: default_status(),
        }
    }

    pub fn target(&self) -> SuggestionTarget {
        match self.target.as_deref() {
            Some("physical") => SuggestionTarget::Physical,
            _ => SuggestionTarget::Overall,
        }
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn suggestion(target: Option<&str>, major: Option<&str>, tag: &str, text: &str) -> NewSuggestion {
        NewSuggestion {
            target: target.map(str::to_string),
            major: major.map(str::to_string),
            tag: Some(tag.to_string()),
            text: Some(text.to_string()),
            ..NewSuggestion::default()
        }
    }

    #[test]
    fn test_tag_and_text_are_required() {
        assert_eq!(
            suggestion(Some("physical"), None, "  ", "x").validate(),
            Err(FieldError::Missing("tag"))
        );
        assert_eq!(
            suggestion(Some("physical"), None, "정상", "").validate(),
            Err(FieldError::Missing("text"))
        );
    }

    #[test]
    fn test_overall_requires_major() {
        assert_eq!(
            suggestion(Some("overall"), None, "빈혈", "재검 권장").validate(),
            Err(FieldError::Missing("major"))
        );
        assert!(suggestion(Some("overall"), Some("혈액검사"), "빈혈", "재검 권장")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_physical_and_untargeted_do_not_need_major() {
        assert!(suggestion(Some("physical"), None, "정상", "특이소견 없음")
            .validate()
            .is_ok());
        assert!(suggestion(None, None, "정상", "특이소견 없음").validate().is_ok());
    }

    #[test]
    fn test_unknown_target_rejected() {
        assert_eq!(
            suggestion(Some("dental"), None, "a", "b").validate(),
            Err(FieldError::InvalidTarget("dental".to_string()))
        );
    }

    #[test]
    fn test_draft_is_trimmed() {
        let draft = NewSuggestion {
            target: Some("overall".to_string()),
            major: Some(" 방사선 ".to_string()),
            minor: Some("   ".to_string()),
            tag: Some(" 심비대 ".to_string()),
            text: Some(" 심장 초음파 권장 ".to_string()),
            proposer: Some(" 김수의 ".to_string()),
            notes: None,
        }
        .validate()
        .unwrap();
        assert_eq!(draft.major.as_deref(), Some("방사선"));
        assert_eq!(draft.minor, None);
        assert_eq!(draft.tag, "심비대");
        assert_eq!(draft.proposer.as_deref(), Some("김수의"));
    }

    #[test]
    fn test_pending_record_shape() {
        let draft = suggestion(Some("physical"), None, "정상", "특이소견 없음")
            .validate()
            .unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        let record = SuggestionRecord::pending(&draft, None, now);
        let json: serde_json::Value =
            serde_json::from_str(&record.to_pretty_json().unwrap()).unwrap();

        assert_eq!(json["target"], "physical");
        assert_eq!(json["tag"], "정상");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["createdAt"], "2025-03-04T05:06:07.000Z");
        assert!(json.get("major").is_none());
    }

    #[test]
    fn test_reads_pull_request_field_names() {
        let raw = r#"{
            "id": "2025-03-04-1741064767000-빈혈",
            "createdAt": "2025-03-04T05:06:07.000Z",
            "category": "혈액검사",
            "sub": "CBC",
            "tag": "빈혈",
            "text": "재검 권장",
            "notes": "",
            "submitter": "kim",
            "status": "pending"
        }"#;
        let record: SuggestionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.major.as_deref(), Some("혈액검사"));
        assert_eq!(record.minor.as_deref(), Some("CBC"));
        assert_eq!(record.proposer.as_deref(), Some("kim"));
        assert_eq!(record.target(), SuggestionTarget::Overall);
    }

    #[test]
    fn test_reads_legacy_direct_write_with_ts() {
        let raw = r#"{"target":"physical","tag":"정상","text":"특이소견 없음","ts":"2025-03-04T05-06-07-000Z"}"#;
        let record: SuggestionRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.target(), SuggestionTarget::Physical);
        assert_eq!(record.created_at.as_deref(), Some("2025-03-04T05-06-07-000Z"));
        assert_eq!(record.status, "pending");
    }
}
