//! Coarse grammatical categories and the tag table that maps fine tags to them.

use crate::errors::{Result, invalid_argument};
use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    All,
    Verb,
    Noun,
    Adjective,
    Adverb,
}

/// One row of the tag table.
pub struct TagEntry {
    pub category: Category,
    /// Prefix of Penn Treebank tags, e.g. `VB` covers `VB`, `VBD`, `VBZ`, ...
    pub treebank: &'static str,
    /// Tag name in the universal tagset.
    pub universal: &'static str,
}

/// Word categories in column order. `All` has no entry: it matches any word.
pub const TAG_TABLE: &[TagEntry] = &[
    TagEntry {
        category: Category::Verb,
        treebank: "VB",
        universal: "VERB",
    },
    TagEntry {
        category: Category::Noun,
        treebank: "NN",
        universal: "NOUN",
    },
    TagEntry {
        category: Category::Adjective,
        treebank: "JJ",
        universal: "ADJ",
    },
    TagEntry {
        category: Category::Adverb,
        treebank: "RB",
        universal: "ADV",
    },
];

impl Category {
    /// All categories, in report column order.
    pub const ALL: [Category; 5] = [
        Category::All,
        Category::Verb,
        Category::Noun,
        Category::Adjective,
        Category::Adverb,
    ];

    pub fn entry(self) -> Option<&'static TagEntry> {
        TAG_TABLE.iter().find(|e| e.category == self)
    }

    /// Does a tag produced by one of the taggers belong to this category?
    pub fn matches(self, tag: &str) -> bool {
        match self.entry() {
            None => true,
            Some(e) => tag.starts_with(e.treebank) || tag == e.universal,
        }
    }

    /// Column label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All Words",
            Category::Verb => "Verb",
            Category::Noun => "Noun",
            Category::Adjective => "Adjective",
            Category::Adverb => "Adverb",
        }
    }

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Verb => "verb",
            Category::Noun => "noun",
            Category::Adjective => "adjective",
            Category::Adverb => "adverb",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which category does a tag fall into, if any?
pub fn categorize(tag: &str) -> Option<Category> {
    TAG_TABLE
        .iter()
        .find(|e| tag.starts_with(e.treebank) || tag == e.universal)
        .map(|e| e.category)
}

/// Sorts the selection into column order and removes duplicates.
pub fn normalize_selection(selection: &[Category]) -> Result<Vec<Category>> {
    if selection.is_empty() {
        return Err(invalid_argument("no categories selected".to_owned()));
    }
    Ok(selection.iter().copied().sorted().dedup().collect_vec())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn matches_treebank_prefix() {
        assert!(Category::Verb.matches("VBD"));
        assert!(Category::Noun.matches("NNS"));
        assert!(Category::Noun.matches("NNP"));
        assert!(Category::Adjective.matches("JJR"));
        assert!(Category::Adverb.matches("RB"));
        assert!(!Category::Noun.matches("VB"));
        assert!(!Category::Verb.matches("DT"));
    }

    #[test]
    fn matches_universal() {
        assert!(Category::Verb.matches("VERB"));
        assert!(Category::Adjective.matches("ADJ"));
        assert!(Category::Adverb.matches("ADV"));
        assert!(!Category::Adjective.matches("ADV"));
    }

    #[test]
    fn all_matches_anything() {
        assert!(Category::All.matches("DT"));
        assert!(Category::All.matches("."));
    }

    #[test]
    fn categorize_basic() {
        assert_eq!(categorize("VBZ"), Some(Category::Verb));
        assert_eq!(categorize("NOUN"), Some(Category::Noun));
        assert_eq!(categorize("IN"), None);
    }

    #[test]
    fn selection_order() {
        let s = normalize_selection(&[Category::Adverb, Category::All, Category::Adverb]).unwrap();
        assert_eq!(s, [Category::All, Category::Adverb]);
        assert!(normalize_selection(&[]).is_err());
    }
}
