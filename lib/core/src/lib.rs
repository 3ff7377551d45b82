//! # cbrx Core
//!
//! Core data model for the cbrx case-based reasoning engine.
//!
//! - [`Case`] - A solved problem: feature set, outcome label, optional solution
//! - [`CaseBase`] - Immutable ordered collection with leave-one-out views
//! - [`FeatureVocabulary`] - Feature names observed across a corpus
//! - [`WeightVector`] - Smoothed IDF weights per feature
//! - [`Weighting`] - Uniform or IDF weighting handed to the similarity layer
//!
//! ## Example
//!
//! ```rust
//! use cbrx_core::{Case, CaseBase, CaseId, Weighting, compute_weights};
//!
//! let cases = vec![
//!     Case::new(1u64, ["itching", "skin_rash"], "Fungal infection"),
//!     Case::new(2u64, ["itching"], "Allergy"),
//! ];
//! let weights = compute_weights(&cases);
//! assert!(weights.get("skin_rash") > weights.get("itching"));
//!
//! let base = CaseBase::new(cases).unwrap();
//! let held_out = base.excluding(&CaseId::Integer(1));
//! assert_eq!(held_out.len(), 1);
//!
//! let weighting = Weighting::from(weights);
//! assert_eq!(weighting.weight("unseen"), 0.0);
//! ```

pub mod case;
pub mod case_base;
pub mod error;
pub mod vocabulary;
pub mod weights;

pub use case::{feature_set, Case, CaseId, FeatureSet, Query};
pub use case_base::CaseBase;
pub use error::{Error, Result};
pub use vocabulary::FeatureVocabulary;
pub use weights::{compute_weights, WeightVector, Weighting};
