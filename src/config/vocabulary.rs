//! Global dimension vocabulary.

use std::collections::BTreeSet;

use crate::document::Scalar;
use crate::error::ValidationError;

/// The set of dimension names metrics are allowed to reference.
///
/// Built from the top-level `dimensions` list. Every name is non-empty and
/// was declared exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    names: BTreeSet<String>,
}

impl Vocabulary {
    /// Build a vocabulary from declared names, in declaration order.
    ///
    /// Stops at the first empty or repeated name.
    pub fn from_declared<I, S>(declared: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = BTreeSet::new();
        for name in declared {
            let name = name.into();
            if name.is_empty() {
                return Err(ValidationError::EmptyDimensionName);
            }
            if names.contains(&name) {
                return Err(ValidationError::DuplicateDimensionName(name));
            }
            names.insert(name);
        }
        Ok(Self { names })
    }

    /// Whether `name` was declared.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of declared names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names were declared.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Consume the vocabulary, yielding the declared names.
    pub fn into_names(self) -> BTreeSet<String> {
        self.names
    }
}

/// Build the vocabulary from the document's `dimensions` list.
///
/// A document without the list has an empty vocabulary.
pub(crate) fn parse_dimension_names(
    declared: Option<&[Scalar]>,
) -> Result<Vocabulary, ValidationError> {
    match declared {
        Some(declared) => Vocabulary::from_declared(declared.iter().map(Scalar::as_str)),
        None => Ok(Vocabulary::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalars(names: &[&str]) -> Vec<Scalar> {
        names.iter().map(|n| Scalar(n.to_string())).collect()
    }

    #[test]
    fn absent_list_is_empty_vocabulary() {
        let vocabulary = parse_dimension_names(None).unwrap();
        assert!(vocabulary.is_empty());
    }

    #[test]
    fn declared_names_are_collected() {
        let declared = scalars(&["model_name", "host_name", "level"]);
        let vocabulary = parse_dimension_names(Some(&declared)).unwrap();
        assert_eq!(vocabulary.len(), 3);
        assert!(vocabulary.contains("host_name"));
        assert!(!vocabulary.contains("region"));
    }

    #[test]
    fn duplicate_is_reported_by_name_at_any_position() {
        for declared in [
            scalars(&["a", "a"]),
            scalars(&["a", "b", "a"]),
            scalars(&["b", "a", "c", "a"]),
        ] {
            assert_eq!(
                parse_dimension_names(Some(&declared)),
                Err(ValidationError::DuplicateDimensionName("a".to_string()))
            );
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        let declared = scalars(&["a", ""]);
        assert_eq!(
            parse_dimension_names(Some(&declared)),
            Err(ValidationError::EmptyDimensionName)
        );
    }

    #[test]
    fn repeated_empty_name_reports_emptiness_first() {
        let declared = scalars(&["", ""]);
        assert_eq!(
            parse_dimension_names(Some(&declared)),
            Err(ValidationError::EmptyDimensionName)
        );
    }
}
