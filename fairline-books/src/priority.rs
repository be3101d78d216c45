//! Resolves the relative priority of bookmakers, used to break ties between equal prices.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use crate::config::InvalidConfig;

#[derive(Debug, Clone, Default)]
pub struct BookmakerPriority {
    ranks: FxHashMap<String, usize>,
    keys: Vec<String>,
}
impl BookmakerPriority {
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn rank(&self, key: &str) -> Option<usize> {
        self.ranks.get(key).copied()
    }

    /// Orders bookmakers from highest to lowest priority. Ranked bookmakers precede unranked ones;
    /// unranked bookmakers are ordered alphabetically by key.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match (self.rank(a), self.rank(b)) {
            (Some(a_rank), Some(b_rank)) => a_rank.cmp(&b_rank),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }
}

impl TryFrom<Vec<String>> for BookmakerPriority {
    type Error = InvalidConfig;

    fn try_from(keys: Vec<String>) -> Result<Self, Self::Error> {
        let mut ranks = FxHashMap::with_capacity_and_hasher(keys.len(), Default::default());
        for (rank, key) in keys.iter().enumerate() {
            if ranks.insert(key.clone(), rank).is_some() {
                return Err(InvalidConfig::DuplicatePriority(key.clone()));
            }
        }
        Ok(Self { ranks, keys })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priority(keys: &[&str]) -> BookmakerPriority {
        BookmakerPriority::try_from(keys.iter().map(|&key| key.to_owned()).collect::<Vec<_>>())
            .unwrap()
    }

    #[test]
    fn ranked_in_list_order() {
        let priority = priority(&["pinnacle", "fanduel", "draftkings"]);
        assert_eq!(Some(0), priority.rank("pinnacle"));
        assert_eq!(Some(2), priority.rank("draftkings"));
        assert_eq!(None, priority.rank("bovada"));
        assert_eq!(Ordering::Less, priority.compare("fanduel", "draftkings"));
        assert_eq!(Ordering::Greater, priority.compare("draftkings", "pinnacle"));
        assert_eq!(Ordering::Equal, priority.compare("fanduel", "fanduel"));
    }

    #[test]
    fn unranked_after_ranked_and_alphabetical() {
        let priority = priority(&["fanduel"]);
        assert_eq!(Ordering::Less, priority.compare("fanduel", "betmgm"));
        assert_eq!(Ordering::Greater, priority.compare("betmgm", "fanduel"));
        assert_eq!(Ordering::Less, priority.compare("betmgm", "bovada"));

        let mut keys = vec!["unibet", "fanduel", "betmgm", "bovada"];
        keys.sort_by(|a, b| priority.compare(a, b));
        assert_eq!(vec!["fanduel", "betmgm", "bovada", "unibet"], keys);
    }

    #[test]
    fn empty_priority_is_alphabetical() {
        let priority = BookmakerPriority::default();
        assert!(priority.keys().is_empty());
        assert_eq!(Ordering::Less, priority.compare("a", "b"));
    }

    #[test]
    fn duplicate_rejected() {
        let err = BookmakerPriority::try_from(vec!["fanduel".to_owned(), "fanduel".to_owned()])
            .unwrap_err();
        assert_eq!(
            "bookmaker 'fanduel' appears more than once in the priority list",
            err.to_string()
        );
    }
}
