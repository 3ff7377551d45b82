// Smoothed IDF feature weights
use ahash::AHashMap;
use crate::Case;

/// Per-feature importance derived from corpus document frequency.
///
/// `weight(f) = ln((N + 1) / (df(f) + 1)) + 1`, the smoothed IDF rule. Every
/// observed feature gets a strictly positive weight, rarer ones a larger one.
/// Features never observed are absent and look up as 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightVector {
    weights: AHashMap<String, f64>,
    // feature -> number of cases containing it
    document_frequencies: AHashMap<String, u32>,
    total_cases: u64,
}

impl WeightVector {
    /// Compute weights from the full corpus. Row order is irrelevant.
    pub fn from_cases<'a, I>(cases: I) -> Self
    where
        I: IntoIterator<Item = &'a Case>,
    {
        let mut document_frequencies: AHashMap<String, u32> = AHashMap::new();
        let mut total_cases = 0u64;

        for case in cases {
            for feature in &case.features {
                *document_frequencies.entry(feature.clone()).or_insert(0) += 1;
            }
            total_cases += 1;
        }

        let n = total_cases as f64;
        let weights = document_frequencies
            .iter()
            .map(|(feature, &df)| {
                let idf = ((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0;
                (feature.clone(), idf)
            })
            .collect();

        Self {
            weights,
            document_frequencies,
            total_cases,
        }
    }

    /// Weight of `feature`, 0 if it never occurred in the corpus
    #[inline]
    pub fn get(&self, feature: &str) -> f64 {
        self.weights.get(feature).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn document_frequency(&self, feature: &str) -> u32 {
        self.document_frequencies.get(feature).copied().unwrap_or(0)
    }

    #[inline]
    pub fn total_cases(&self) -> u64 {
        self.total_cases
    }

    /// Features sorted by descending weight, ties by name
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(f, &w)| (f.as_str(), w))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Convenience wrapper for [`WeightVector::from_cases`]
pub fn compute_weights(corpus: &[Case]) -> WeightVector {
    WeightVector::from_cases(corpus)
}

/// How features are weighted when scoring similarity
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Weighting {
    /// Every feature, observed or not, weighs 1.0 (classic Jaccard)
    #[default]
    Uniform,
    /// Corpus-derived IDF weights; unseen features weigh 0.0
    Weighted(WeightVector),
}

impl Weighting {
    #[inline]
    pub fn weight(&self, feature: &str) -> f64 {
        match self {
            Weighting::Uniform => 1.0,
            Weighting::Weighted(weights) => weights.get(feature),
        }
    }

    #[inline]
    pub fn is_uniform(&self) -> bool {
        matches!(self, Weighting::Uniform)
    }
}

impl From<WeightVector> for Weighting {
    fn from(weights: WeightVector) -> Self {
        Weighting::Weighted(weights)
    }
}
