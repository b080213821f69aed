//! Duplicate-aware appends. Uniqueness is a linear scan over the collection,
//! which keeps re-running an approval batch a no-op.

use super::models::{LookEntry, OverallEntry, TemplateStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Added,
    Duplicate,
}

impl TemplateStore {
    /// Appends a look unless one with the same `(title, text)` exists.
    pub fn merge_look(&mut self, entry: LookEntry) -> MergeOutcome {
        let looks = &mut self.physical.looks;
        if looks
            .iter()
            .any(|x| x.title == entry.title && x.text == entry.text)
        {
            return MergeOutcome::Duplicate;
        }
        looks.push(entry);
        MergeOutcome::Added
    }

    /// Appends an overall entry unless one with the same `(cat, sub, tag)`
    /// exists. A missing sub compares as the default sub.
    pub fn merge_overall(&mut self, entry: OverallEntry) -> MergeOutcome {
        let sub = entry.sub_or_default();
        if self
            .overall
            .iter()
            .any(|x| x.tag == entry.tag && x.cat == entry.cat && x.sub_or_default() == sub)
        {
            return MergeOutcome::Duplicate;
        }
        self.overall.push(entry);
        MergeOutcome::Added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn look(title: &str, text: &str) -> LookEntry {
        LookEntry {
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    fn overall(cat: &str, sub: Option<&str>, tag: &str, text: &str) -> OverallEntry {
        OverallEntry {
            cat: cat.to_string(),
            sub: sub.map(str::to_string),
            tag: tag.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_look_appended_then_deduplicated() {
        let mut store = TemplateStore::default();
        assert_eq!(
            store.merge_look(look("정상", "특이소견 없음")),
            MergeOutcome::Added
        );
        assert_eq!(
            store.merge_look(look("정상", "특이소견 없음")),
            MergeOutcome::Duplicate
        );
        assert_eq!(store.physical.looks.len(), 1);
    }

    #[test]
    fn test_look_with_same_title_but_new_text_is_added() {
        let mut store = TemplateStore::default();
        store.merge_look(look("피부", "각질"));
        assert_eq!(store.merge_look(look("피부", "발적")), MergeOutcome::Added);
        assert_eq!(store.physical.looks.len(), 2);
    }

    #[test]
    fn test_overall_identity_ignores_text() {
        let mut store = TemplateStore::default();
        store.merge_overall(overall("혈액검사", Some("CBC"), "빈혈", "a"));
        assert_eq!(
            store.merge_overall(overall("혈액검사", Some("CBC"), "빈혈", "b")),
            MergeOutcome::Duplicate
        );
    }

    #[test]
    fn test_overall_missing_sub_matches_default_sub() {
        let mut store = TemplateStore::default();
        store.merge_overall(overall("방사선", None, "심비대", "x"));
        assert_eq!(
            store.merge_overall(overall("방사선", Some("기타"), "심비대", "x")),
            MergeOutcome::Duplicate
        );
        assert_eq!(
            store.merge_overall(overall("방사선", Some("흉부"), "심비대", "x")),
            MergeOutcome::Added
        );
    }

    #[test]
    fn test_appends_preserve_order() {
        let mut store = TemplateStore::default();
        store.merge_overall(overall("신체검사", None, "b", "x"));
        store.merge_overall(overall("신체검사", None, "a", "x"));
        let tags: Vec<&str> = store.overall.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["b", "a"]);
    }
}
