use serde::{Deserialize, Serialize};

use crate::data::tags::normalize_tag;

// ---------------------------------------------------------------------------
// FilterSpec – all-of / none-of tag rule
// ---------------------------------------------------------------------------

/// A group rule: every `required` tag present, no `excluded` tag present.
///
/// Tags are normalized on construction so evaluation is a plain string
/// comparison against already-normalized record tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    required: Vec<String>,
    excluded: Vec<String>,
}

impl FilterSpec {
    pub fn new<I, J, S, T>(required: I, excluded: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            required: normalize_all(required),
            excluded: normalize_all(excluded),
        }
    }

    /// Rule with inclusions only.
    pub fn requiring<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(required, std::iter::empty::<&str>())
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }
}

fn normalize_all<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = normalize_tag(tag.as_ref());
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// True iff `tags` holds every required tag and none of the excluded ones.
pub fn matches(tags: &[String], spec: &FilterSpec) -> bool {
    spec.required.iter().all(|t| tags.contains(t))
        && !spec.excluded.iter().any(|t| tags.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_required_and_excluded() {
        let spec = FilterSpec::new(["puzzle"], ["horror"]);
        assert!(!matches(&tags(&["puzzle", "horror"]), &spec));
        assert!(matches(&tags(&["puzzle", "co-op"]), &spec));
    }

    #[test]
    fn test_all_required_must_be_present() {
        let spec = FilterSpec::requiring(["farming sim", "cozy"]);
        assert!(matches(&tags(&["cozy", "indie", "farming sim"]), &spec));
        assert!(!matches(&tags(&["cozy"]), &spec));
    }

    #[test]
    fn test_empty_tag_list_matches_only_empty_required() {
        let none: [&str; 0] = [];
        assert!(matches(&[], &FilterSpec::new(none, none)));
        assert!(matches(&[], &FilterSpec::new(none, ["horror"])));
        assert!(!matches(&[], &FilterSpec::requiring(["puzzle"])));
        assert!(!matches(&[], &FilterSpec::new(["puzzle"], ["horror"])));
    }

    #[test]
    fn test_spec_tags_are_normalized_once() {
        let spec = FilterSpec::new(["  Puzzle ", "PUZZLE", ""], ["Horror"]);
        assert_eq!(spec.required(), ["puzzle"]);
        assert_eq!(spec.excluded(), ["horror"]);
        assert!(matches(&tags(&["puzzle"]), &spec));
    }

    #[test]
    fn test_unknown_tags_never_match() {
        let spec = FilterSpec::requiring(["no such tag"]);
        assert!(!matches(&tags(&["puzzle", "rpg"]), &spec));
    }
}
