use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::bcs::{bcs_phrase, DEFAULT_BCS};
use crate::templates::TemplateStore;

pub const LOOKS_MARKER: &str = "<육안검사>";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalSelection {
    pub bcs: i32,
    /// Look toggles keyed by `LookEntry::title`.
    pub looks: BTreeMap<String, bool>,
}

impl Default for PhysicalSelection {
    fn default() -> Self {
        Self {
            bcs: DEFAULT_BCS,
            looks: BTreeMap::new(),
        }
    }
}

impl PhysicalSelection {
    pub fn is_look_on(&self, title: &str) -> bool {
        self.looks.get(title).copied().unwrap_or(false)
    }
}

/// BCS phrase, then the marker block with every toggled look in store order.
pub fn physical_text(store: &TemplateStore, selection: &PhysicalSelection) -> String {
    let base = bcs_phrase(selection.bcs);
    let chosen: Vec<&str> = store
        .physical
        .looks
        .iter()
        .filter(|look| selection.is_look_on(&look.title))
        .map(|look| look.text.as_str())
        .collect();

    if chosen.is_empty() {
        return base.to_string();
    }

    let mut lines = vec![base, "", LOOKS_MARKER];
    lines.extend(chosen);
    lines.join("\n")
}
