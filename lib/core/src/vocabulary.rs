//! Feature vocabulary: the finite set of feature names observed in a corpus.

use crate::{Case, Error, FeatureSet, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureVocabulary {
    features: FeatureSet,
}

impl FeatureVocabulary {
    /// Union of the features of every case
    pub fn from_cases<'a, I>(cases: I) -> Self
    where
        I: IntoIterator<Item = &'a Case>,
    {
        let mut features = FeatureSet::new();
        for case in cases {
            features.extend(case.features.iter().cloned());
        }
        Self { features }
    }

    /// Vocabulary from an explicit list of names, e.g. the indicator columns
    /// of a tabular source. Empty or repeated names are rejected.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut features = FeatureSet::new();
        for name in names {
            let name = name.into();
            if name.is_empty() {
                return Err(Error::MalformedVocabulary("empty feature name".to_string()));
            }
            if !features.insert(name.clone()) {
                return Err(Error::MalformedVocabulary(format!("repeated feature name '{}'", name)));
            }
        }
        Ok(Self { features })
    }

    #[inline]
    pub fn contains(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    /// Features of `set` that this vocabulary has never seen
    pub fn unknown<'a>(&self, set: &'a FeatureSet) -> Vec<&'a str> {
        set.iter()
            .filter(|f| !self.features.contains(f.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_set;

    #[test]
    fn test_vocabulary_is_union_of_case_features() {
        let cases = vec![
            Case::new(1u64, ["x", "y"], "flu"),
            Case::new(2u64, ["y", "z"], "cold"),
        ];
        let vocab = FeatureVocabulary::from_cases(&cases);
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_unknown_features_are_reported_not_rejected() {
        let cases = vec![Case::new(1u64, ["x"], "flu")];
        let vocab = FeatureVocabulary::from_cases(&cases);
        let query = feature_set(["x", "never_seen"]);
        assert_eq!(vocab.unknown(&query), vec!["never_seen"]);
    }

    #[test]
    fn test_from_names_rejects_malformed() {
        assert!(FeatureVocabulary::from_names(["a", ""]).is_err());
        assert!(FeatureVocabulary::from_names(["a", "a"]).is_err());
        assert_eq!(FeatureVocabulary::from_names(["a", "b"]).unwrap().len(), 2);
    }
}
