//! User-facing ways to name a record on the command line.
//!
//! ```text
//! 3          third record in collection order
//! f2         second favorite
//! 17000-ab   record id, or any unambiguous prefix of one
//! ```
//!
//! Positions are 1-based and follow the collection order shown by `list`.
//! Anything that parses as a number is a position, so an id prefix has to
//! reach past the timestamp.

use crate::collection::Collection;
use crate::error::{Result, ShelfError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordSelector {
    Position(usize),
    Favorite(usize),
    Id(String),
}

impl fmt::Display for RecordSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSelector::Position(n) => write!(f, "{}", n),
            RecordSelector::Favorite(n) => write!(f, "f{}", n),
            RecordSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for RecordSelector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty selector".to_string());
        }
        if let Some(rest) = s.strip_prefix('f') {
            if let Ok(n) = rest.parse() {
                return Ok(RecordSelector::Favorite(n));
            }
        }
        if let Ok(n) = s.parse() {
            return Ok(RecordSelector::Position(n));
        }
        Ok(RecordSelector::Id(s.to_string()))
    }
}

pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<RecordSelector>> {
    inputs
        .iter()
        .map(|s| s.as_ref().parse().map_err(ShelfError::Api))
        .collect()
}

/// Resolve one selector to a record id.
pub fn resolve(collection: &Collection, selector: &RecordSelector) -> Result<String> {
    let found = match selector {
        RecordSelector::Position(n) => n
            .checked_sub(1)
            .and_then(|i| collection.records().get(i))
            .map(|r| r.id.clone()),
        RecordSelector::Favorite(n) => n
            .checked_sub(1)
            .and_then(|i| collection.favorites().get(i).map(|r| r.id.clone())),
        RecordSelector::Id(id) => return resolve_id(collection, id),
    };
    found.ok_or_else(|| ShelfError::RecordNotFound(selector.to_string()))
}

pub fn resolve_all(collection: &Collection, selectors: &[RecordSelector]) -> Result<Vec<String>> {
    selectors.iter().map(|s| resolve(collection, s)).collect()
}

fn resolve_id(collection: &Collection, id: &str) -> Result<String> {
    if collection.contains(id) {
        return Ok(id.to_string());
    }
    let matches: Vec<&str> = collection
        .records()
        .iter()
        .filter(|r| r.id.starts_with(id))
        .map(|r| r.id.as_str())
        .collect();
    match matches.as_slice() {
        [only] => Ok(only.to_string()),
        [] => Err(ShelfError::RecordNotFound(id.to_string())),
        _ => Err(ShelfError::Api(format!(
            "'{}' matches {} records, use more of the id",
            id,
            matches.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::RecordFixture;

    fn shelf() -> Collection {
        Collection::new(
            RecordFixture::new()
                .with_record("1700-aaa", "A")
                .with_favorite("1700-abb", "B")
                .with_record("1800-ccc", "C")
                .with_favorite("1900-ddd", "D")
                .build(),
        )
    }

    #[test]
    fn parses_each_form() {
        assert_eq!("3".parse::<RecordSelector>(), Ok(RecordSelector::Position(3)));
        assert_eq!("f2".parse::<RecordSelector>(), Ok(RecordSelector::Favorite(2)));
        assert_eq!("1700-a".parse::<RecordSelector>(), Ok(RecordSelector::Id("1700-a".to_string())));
        assert_eq!("foo".parse::<RecordSelector>(), Ok(RecordSelector::Id("foo".to_string())));
        assert!("  ".parse::<RecordSelector>().is_err());
    }

    #[test]
    fn positions_are_one_based() {
        let c = shelf();
        assert_eq!(resolve(&c, &RecordSelector::Position(1)).unwrap(), "1700-aaa");
        assert_eq!(resolve(&c, &RecordSelector::Position(4)).unwrap(), "1900-ddd");
        assert!(resolve(&c, &RecordSelector::Position(0)).is_err());
        assert!(resolve(&c, &RecordSelector::Position(5)).is_err());
    }

    #[test]
    fn favorites_follow_favorite_order() {
        let c = shelf();
        assert_eq!(resolve(&c, &RecordSelector::Favorite(2)).unwrap(), "1900-ddd");
        assert!(resolve(&c, &RecordSelector::Favorite(3)).is_err());
    }

    #[test]
    fn ids_and_unambiguous_prefixes() {
        let c = shelf();
        let id = |s: &str| RecordSelector::Id(s.to_string());
        assert_eq!(resolve(&c, &id("1800-ccc")).unwrap(), "1800-ccc");
        assert_eq!(resolve(&c, &id("19")).unwrap(), "1900-ddd");
        assert!(matches!(resolve(&c, &id("1700-a")), Err(ShelfError::Api(_))));
        assert!(matches!(resolve(&c, &id("2000")), Err(ShelfError::RecordNotFound(_))));
    }

    #[test]
    fn resolve_all_fails_on_first_unknown() {
        let c = shelf();
        let selectors = parse_selectors(&["1", "f1", "nope"]).unwrap();
        assert!(resolve_all(&c, &selectors).is_err());
        let ok = parse_selectors(&["1", "f1"]).unwrap();
        assert_eq!(resolve_all(&c, &ok).unwrap(), vec!["1700-aaa", "1700-abb"]);
    }
}
