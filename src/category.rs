//! Admission category normalization.
//!
//! The professional directory and the exam subjects table encode admission
//! categories under two different schemes: the directory uses coded labels
//! ("09农林生物医药类"), the exam table uses the bare descriptive labels as
//! they appear in the source spreadsheet. This map bridges the two so the
//! cross-table join can succeed.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The mapping shipped with the 2025 dataset.
///
/// The agriculture/forestry/biology/medicine label carries an embedded
/// newline because the source spreadsheet wraps it across two cells, and
/// the exam table stores it that way.
static BUILTIN: Lazy<CategoryMap> = Lazy::new(|| {
    CategoryMap::from_pairs([
        ("01文史哲法类", "文史哲法类"),
        ("04教育类", "教育类"),
        ("07理工类1", "理工类1"),
        ("08理工类2", "理工类2"),
        ("09农林生物医药类", "农林生物\n医药类"),
        ("10医学类", "医学类"),
        ("12经管类", "经管类"),
        ("13艺术类", "艺术类"),
        ("医学", "医学类"),
        ("工学", "理工类1"),
    ])
});

/// Immutable directory-code -> exam-category mapping.
///
/// Injected into the resolver at construction so resolution stays a pure
/// function of (keyword, tables, mapping).
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    map: HashMap<String, String>,
}

impl CategoryMap {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            map: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// The mapping for the shipped dataset.
    pub fn builtin() -> &'static CategoryMap {
        &BUILTIN
    }

    /// Map a directory category code to the exam-table category label.
    ///
    /// `None` means the code has no mapping, which is a valid outcome:
    /// callers treat it as "no exam subjects found", never as an error.
    pub fn normalize(&self, directory_code: &str) -> Option<&str> {
        self.map.get(directory_code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_maps_coded_labels() {
        let map = CategoryMap::builtin();
        assert_eq!(map.normalize("01文史哲法类"), Some("文史哲法类"));
        assert_eq!(map.normalize("12经管类"), Some("经管类"));
    }

    #[test]
    fn test_builtin_preserves_wrapped_label() {
        let map = CategoryMap::builtin();
        assert_eq!(map.normalize("09农林生物医药类"), Some("农林生物\n医药类"));
    }

    #[test]
    fn test_builtin_maps_bare_discipline_names() {
        let map = CategoryMap::builtin();
        assert_eq!(map.normalize("医学"), Some("医学类"));
        assert_eq!(map.normalize("工学"), Some("理工类1"));
    }

    #[test]
    fn test_unmapped_code_is_none() {
        let map = CategoryMap::builtin();
        assert_eq!(map.normalize("99未知类"), None);
        assert_eq!(map.normalize(""), None);
    }

    #[test]
    fn test_injected_map_overrides_nothing_by_default() {
        let map = CategoryMap::from_pairs([("A", "B")]);
        assert_eq!(map.normalize("A"), Some("B"));
        assert_eq!(map.normalize("01文史哲法类"), None);
        assert_eq!(map.len(), 1);
    }
}
