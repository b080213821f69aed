//! Overall assessment: tagged phrases picked from the Template Store, plus the
//! tag palette the editor shows for the exams that were performed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::assemble::normalize_text;
use crate::templates::{OverallEntry, TemplateStore};

pub const ENTRY_BULLET: &str = "⏹ ";
pub const ADDENDA_LABEL: &str = "추가 안내: ";

/// Which exams were performed. Drives the palette, not the rendered text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExamPicks {
    pub physical: bool,
    pub cbc: bool,
    pub chem: bool,
    pub ua: bool,
    pub xr: bool,
    pub us: bool,
    pub disease: bool,
}

impl Default for ExamPicks {
    fn default() -> Self {
        Self {
            physical: true,
            cbc: false,
            chem: false,
            ua: false,
            xr: false,
            us: false,
            disease: false,
        }
    }
}

impl ExamPicks {
    /// Template categories (`OverallEntry::cat`) unlocked by the picks.
    /// CBC and chemistry share the blood-work category.
    pub fn active_categories(&self) -> BTreeSet<&'static str> {
        [
            (self.physical, "신체검사"),
            (self.cbc, "혈액검사"),
            (self.chem, "혈액검사"),
            (self.ua, "소변검사"),
            (self.xr, "방사선"),
            (self.us, "복부초음파"),
            (self.disease, "특정질환"),
        ]
        .into_iter()
        .filter(|(on, _)| *on)
        .map(|(_, cat)| cat)
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverallSelection {
    pub picks: ExamPicks,
    /// Indices into `TemplateStore::overall`.
    pub selected: BTreeSet<usize>,
    pub addenda: String,
}

pub fn overall_text(store: &TemplateStore, selection: &OverallSelection) -> String {
    let mut lines: Vec<String> = store
        .overall
        .iter()
        .enumerate()
        .filter(|(id, _)| selection.selected.contains(id))
        .map(|(_, entry)| entry.text.trim())
        .filter(|text| !text.is_empty())
        .map(|text| format!("{ENTRY_BULLET}{text}"))
        .collect();

    let addenda = selection.addenda.trim();
    if !addenda.is_empty() {
        lines.push(format!("{ADDENDA_LABEL}{addenda}"));
    }

    normalize_text(&lines.join("\n"))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteEntry {
    pub id: usize,
    pub cat: String,
    pub sub: String,
    pub tag: String,
    pub text: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteGroup {
    pub sub: String,
    pub entries: Vec<PaletteEntry>,
}

fn matches_query(entry: &OverallEntry, query: &str) -> bool {
    query.is_empty()
        || entry.tag.to_lowercase().contains(query)
        || entry.text.to_lowercase().contains(query)
}

/// Entries of the active categories matching `query` (tag or text, case
/// insensitive), grouped by sub in first-appearance order.
pub fn palette(
    store: &TemplateStore,
    selection: &OverallSelection,
    query: &str,
) -> Vec<PaletteGroup> {
    let active = selection.picks.active_categories();
    let query = query.trim().to_lowercase();
    let mut groups: Vec<PaletteGroup> = Vec::new();

    for (id, entry) in store.overall.iter().enumerate() {
        if !active.contains(entry.cat.as_str()) || !matches_query(entry, &query) {
            continue;
        }
        let sub = entry.sub_or_default();
        let item = PaletteEntry {
            id,
            cat: entry.cat.clone(),
            sub: sub.to_string(),
            tag: entry.tag.clone(),
            text: entry.text.clone(),
            selected: selection.selected.contains(&id),
        };
        match groups.iter_mut().find(|g| g.sub == sub) {
            Some(group) => group.entries.push(item),
            None => groups.push(PaletteGroup {
                sub: sub.to_string(),
                entries: vec![item],
            }),
        }
    }

    groups
}
