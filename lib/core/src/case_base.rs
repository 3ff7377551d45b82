use crate::{Case, CaseId, Error, FeatureVocabulary, Result};
use ahash::AHashSet;
use std::sync::Arc;

/// An ordered, immutable collection of cases.
///
/// Iteration order is the construction order and decides ranking ties.
/// Views produced by [`CaseBase::excluding`] share the underlying case
/// records; nothing is copied beyond the `Arc` handles.
#[derive(Debug, Clone, Default)]
pub struct CaseBase {
    cases: Vec<Arc<Case>>,
}

impl CaseBase {
    /// Build a case base, rejecting duplicate ids and malformed cases
    pub fn new(cases: Vec<Case>) -> Result<Self> {
        Self::from_shared(cases.into_iter().map(Arc::new).collect())
    }

    /// Ids are compared by their text, so `1` and `"1"` count as the same id
    pub fn from_shared(cases: Vec<Arc<Case>>) -> Result<Self> {
        let mut seen: AHashSet<String> = AHashSet::with_capacity(cases.len());
        for case in &cases {
            case.validate()?;
            if !seen.insert(case.id.to_string()) {
                return Err(Error::DuplicateCaseId(case.id.to_string()));
            }
        }
        Ok(Self { cases })
    }

    #[inline]
    pub fn all(&self) -> &[Arc<Case>] {
        &self.cases
    }

    pub fn iter(&self) -> impl Iterator<Item = &Case> {
        self.cases.iter().map(|c| c.as_ref())
    }

    /// A view of every case except `id`, order preserved.
    ///
    /// The receiver is untouched. An id that is not present yields a view
    /// equal to the receiver.
    #[must_use]
    pub fn excluding(&self, id: &CaseId) -> CaseBase {
        let cases = self
            .cases
            .iter()
            .filter(|c| &c.id != id)
            .cloned()
            .collect();
        CaseBase { cases }
    }

    pub fn get(&self, id: &CaseId) -> Option<&Arc<Case>> {
        self.cases.iter().find(|c| &c.id == id)
    }

    #[inline]
    pub fn contains(&self, id: &CaseId) -> bool {
        self.get(id).is_some()
    }

    pub fn vocabulary(&self) -> FeatureVocabulary {
        FeatureVocabulary::from_cases(self.iter())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

impl<'a> IntoIterator for &'a CaseBase {
    type Item = &'a Case;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Arc<Case>>, fn(&'a Arc<Case>) -> &'a Case>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter().map(unwrap_shared as fn(&'a Arc<Case>) -> &'a Case)
    }
}

fn unwrap_shared(case: &Arc<Case>) -> &Case {
    case
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CaseBase {
        CaseBase::new(vec![
            Case::new(1u64, ["x", "y"], "flu"),
            Case::new(2u64, ["x"], "cold"),
            Case::new(3u64, ["z"], "allergy"),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = CaseBase::new(vec![
            Case::new(1u64, ["x"], "flu"),
            Case::new(1u64, ["y"], "cold"),
        ]);
        assert!(matches!(result, Err(Error::DuplicateCaseId(id)) if id == "1"));
    }

    #[test]
    fn test_ids_with_same_text_rejected() {
        let result = CaseBase::new(vec![
            Case::new(1u64, ["x"], "flu"),
            Case::new("1", ["y"], "cold"),
        ]);
        assert!(matches!(result, Err(Error::DuplicateCaseId(id)) if id == "1"));
    }

    #[test]
    fn test_empty_label_rejected() {
        let result = CaseBase::new(vec![Case::new(1u64, ["x"], "")]);
        assert!(matches!(result, Err(Error::EmptyLabel(_))));
    }

    #[test]
    fn test_excluding_preserves_order_and_receiver() {
        let base = sample();
        let view = base.excluding(&CaseId::Integer(2));

        let ids: Vec<_> = view.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids, vec![CaseId::Integer(1), CaseId::Integer(3)]);
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn test_excluding_shares_records() {
        let base = sample();
        let view = base.excluding(&CaseId::Integer(2));
        assert!(Arc::ptr_eq(&base.all()[0], &view.all()[0]));
        assert!(Arc::ptr_eq(&base.all()[2], &view.all()[1]));
    }

    #[test]
    fn test_excluding_unknown_id_is_identity() {
        let base = sample();
        let view = base.excluding(&CaseId::Integer(99));
        assert_eq!(view.len(), base.len());
    }

    #[test]
    fn test_excluding_single_case_gives_empty() {
        let base = CaseBase::new(vec![Case::new("only", ["x"], "flu")]).unwrap();
        assert!(base.excluding(&CaseId::from("only")).is_empty());
    }

    #[test]
    fn test_get_and_vocabulary() {
        let base = sample();
        assert_eq!(base.get(&CaseId::Integer(3)).map(|c| c.label.as_str()), Some("allergy"));
        assert!(!base.contains(&CaseId::Integer(4)));
        assert_eq!(base.vocabulary().len(), 3);
    }
}
