use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use crate::{Error, Result};

/// Set of symbolic features present in a case or query.
///
/// Ordered so that iterating an intersection or union visits features in the
/// same sequence no matter which operand comes first.
pub type FeatureSet = BTreeSet<String>;

/// Build a [`FeatureSet`] from anything yielding string-like items
pub fn feature_set<I, S>(features: I) -> FeatureSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    features.into_iter().map(Into::into).collect()
}

/// Stable case identifier. Serialized as a bare JSON number or string, so
/// `Integer` is tried first on the way back in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaseId {
    Integer(u64),
    String(String),
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseId::Integer(i) => write!(f, "{}", i),
            CaseId::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<String> for CaseId {
    fn from(s: String) -> Self {
        CaseId::String(s)
    }
}

impl From<&str> for CaseId {
    fn from(s: &str) -> Self {
        CaseId::String(s.to_string())
    }
}

impl From<u64> for CaseId {
    fn from(i: u64) -> Self {
        CaseId::Integer(i)
    }
}

/// A previously solved problem: the features observed and the known outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    pub features: FeatureSet,
    pub label: String,
    /// Recorded solution reused when this case is retrieved. Never scored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl Case {
    #[inline]
    #[must_use]
    pub fn new<I, S>(id: impl Into<CaseId>, features: I, label: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            features: feature_set(features),
            label: label.into(),
            solution: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }

    /// Check the record invariants: non-empty label, non-empty feature names
    pub fn validate(&self) -> Result<()> {
        if self.label.trim().is_empty() {
            return Err(Error::EmptyLabel(self.id.to_string()));
        }
        if self.features.iter().any(|f| f.is_empty()) {
            return Err(Error::MalformedVocabulary(format!(
                "case {} has an empty feature name",
                self.id
            )));
        }
        Ok(())
    }
}

/// A transient lookup input. The label is only read by the label-aware
/// aggregate score; leave-one-out evaluation builds queries without one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub features: FeatureSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Query {
    #[inline]
    #[must_use]
    pub fn new<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            features: feature_set(features),
            label: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl From<&Case> for Query {
    /// Query built from a case's features only; the label is withheld.
    fn from(case: &Case) -> Self {
        Self {
            features: case.features.clone(),
            label: None,
        }
    }
}
