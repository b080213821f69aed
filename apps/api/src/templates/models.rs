use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sub-category label used when an overall entry carries none.
pub const DEFAULT_SUB: &str = "기타";

/// The template document. Keys this service does not model are carried
/// through `extra` so a write-back never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateStore {
    #[serde(default)]
    pub physical: PhysicalTemplates,
    #[serde(default)]
    pub overall: Vec<OverallEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalTemplates {
    #[serde(default)]
    pub looks: Vec<LookEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A physical-exam visual finding. `title` is the toggle key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookEntry {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallEntry {
    #[serde(default)]
    pub cat: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub tag: String,
    #[serde(default)]
    pub text: String,
}

impl OverallEntry {
    pub fn sub_or_default(&self) -> &str {
        match self.sub.as_deref() {
            Some(sub) if !sub.is_empty() => sub,
            _ => DEFAULT_SUB,
        }
    }
}

impl TemplateStore {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Two-space indented JSON with a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
pub(crate) const SEED_TEMPLATES: &str = include_str!("../../data/templates.seed.json");
