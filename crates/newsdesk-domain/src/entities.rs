//! Geopolitical entity categories and the bundle that holds them

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One of the four fixed entity buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityCategory {
    /// Country names ("France", "Japan")
    Countries,
    /// Nationality adjectives and demonyms ("French", "Japanese")
    Nationalities,
    /// Named people
    People,
    /// Named organizations (governments, companies, governing bodies)
    Organizations,
}

impl EntityCategory {
    /// Every category, in serialization order
    pub const ALL: [EntityCategory; 4] = [
        EntityCategory::Countries,
        EntityCategory::Nationalities,
        EntityCategory::People,
        EntityCategory::Organizations,
    ];

    /// The JSON key used for this category, both in prompts and in responses
    pub fn key(&self) -> &'static str {
        match self {
            EntityCategory::Countries => "countries",
            EntityCategory::Nationalities => "nationalities",
            EntityCategory::People => "people",
            EntityCategory::Organizations => "organizations",
        }
    }

    /// Look up a category by its JSON key (exact match)
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Entities extracted from an article, grouped into four fixed categories
///
/// All four fields are always present; a failed extraction is simply the
/// default, all-empty bundle. Each field is a set of trimmed, non-empty
/// strings deduplicated by exact (case-sensitive) match. Iteration order is
/// not part of the contract.
///
/// # Examples
///
/// ```
/// use newsdesk_domain::{EntityBundle, EntityCategory};
///
/// let mut bundle = EntityBundle::default();
/// bundle.insert(EntityCategory::Countries, "France");
/// bundle.insert(EntityCategory::Countries, " France ");
/// bundle.insert(EntityCategory::Countries, "   ");
/// assert_eq!(bundle.countries.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBundle {
    /// Country names
    #[serde(default)]
    pub countries: BTreeSet<String>,
    /// Nationality adjectives and demonyms
    #[serde(default)]
    pub nationalities: BTreeSet<String>,
    /// Named people
    #[serde(default)]
    pub people: BTreeSet<String>,
    /// Named organizations
    #[serde(default)]
    pub organizations: BTreeSet<String>,
}

impl EntityBundle {
    /// Borrow the set for a category
    pub fn get(&self, category: EntityCategory) -> &BTreeSet<String> {
        match category {
            EntityCategory::Countries => &self.countries,
            EntityCategory::Nationalities => &self.nationalities,
            EntityCategory::People => &self.people,
            EntityCategory::Organizations => &self.organizations,
        }
    }

    fn get_mut(&mut self, category: EntityCategory) -> &mut BTreeSet<String> {
        match category {
            EntityCategory::Countries => &mut self.countries,
            EntityCategory::Nationalities => &mut self.nationalities,
            EntityCategory::People => &mut self.people,
            EntityCategory::Organizations => &mut self.organizations,
        }
    }

    /// Trim `value` and add it to `category`
    ///
    /// Returns `true` only if the value was non-empty after trimming and not
    /// already present.
    pub fn insert(&mut self, category: EntityCategory, value: impl AsRef<str>) -> bool {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return false;
        }
        self.get_mut(category).insert(value.to_string())
    }

    /// Total number of entities across all categories
    pub fn len(&self) -> usize {
        EntityCategory::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    /// True when every category is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let bundle = EntityBundle::default();
        assert!(bundle.is_empty());
        for category in EntityCategory::ALL {
            assert!(bundle.get(category).is_empty());
        }
    }

    #[test]
    fn test_insert_dedups_after_trim() {
        let mut bundle = EntityBundle::default();
        assert!(bundle.insert(EntityCategory::Countries, "France"));
        assert!(!bundle.insert(EntityCategory::Countries, "France"));
        assert!(!bundle.insert(EntityCategory::Countries, " France "));

        assert_eq!(bundle.countries.len(), 1);
        assert!(bundle.countries.contains("France"));
    }

    #[test]
    fn test_insert_is_case_sensitive() {
        let mut bundle = EntityBundle::default();
        bundle.insert(EntityCategory::People, "Macron");
        bundle.insert(EntityCategory::People, "macron");
        assert_eq!(bundle.people.len(), 2);
    }

    #[test]
    fn test_insert_rejects_blank() {
        let mut bundle = EntityBundle::default();
        assert!(!bundle.insert(EntityCategory::Organizations, ""));
        assert!(!bundle.insert(EntityCategory::Organizations, " \t "));
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_category_keys() {
        for category in EntityCategory::ALL {
            assert_eq!(EntityCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(EntityCategory::from_key("peoples"), None);
        assert_eq!(EntityCategory::from_key("Countries"), None);
    }

    #[test]
    fn test_serializes_all_four_keys() {
        let json = serde_json::to_value(EntityBundle::default()).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 4);
        for category in EntityCategory::ALL {
            assert_eq!(obj[category.key()], serde_json::json!([]));
        }
    }

    #[test]
    fn test_len_counts_every_category() {
        let mut bundle = EntityBundle::default();
        bundle.insert(EntityCategory::Countries, "Germany");
        bundle.insert(EntityCategory::Nationalities, "German");
        bundle.insert(EntityCategory::People, "Olaf Scholz");
        bundle.insert(EntityCategory::Organizations, "Bundestag");
        assert_eq!(bundle.len(), 4);
    }
}
