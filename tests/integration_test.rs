// Integration tests for cbrx
use cbrx::prelude::*;
use cbrx::{jaccard, weighted_jaccard, ExplainedMatch, FeatureVocabulary, StorageError};
use cbrx_storage::write_json_cases;
use std::io::Write;

const TRAINING: &str = "\
itching,skin_rash,nodal_skin_eruptions,continuous_sneezing,shivering,chills,prognosis,
1,1,1,0,0,0,Fungal infection,
0,1,1,0,0,0,Fungal infection,
1,0,1,0,0,0,Fungal infection,
0,0,0,1,1,1,Allergy,
0,0,0,1,1,0,Allergy,
0,0,0,0,1,1,Allergy,
";

fn training_base() -> CaseBase {
    TabularLoader::new()
        .with_default_solution(true)
        .load_str(TRAINING)
        .unwrap()
        .into_case_base()
        .unwrap()
}

#[test]
fn test_unweighted_end_to_end() {
    let base = CaseBase::new(vec![
        Case::new("A", ["x", "y"], "flu"),
        Case::new("B", ["x"], "cold"),
    ])
    .unwrap();

    let ranking = retrieve(&feature_set(["x", "y"]), &base, &Weighting::Uniform, 1).unwrap();
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].case.id, CaseId::from("A"));
    assert_eq!(ranking[0].score, 1.0);
}

#[test]
fn test_weighted_end_to_end() {
    // z appears in 1 of 10 cases, x in 9 of 10
    let mut cases: Vec<Case> = (0..8u64).map(|i| Case::new(i, ["x"], "common")).collect();
    cases.push(Case::new(8u64, ["x", "w"], "shares-x"));
    cases.push(Case::new(9u64, ["z", "w"], "shares-z"));

    let weights = compute_weights(&cases);
    assert!(weights.get("z") > weights.get("x"));

    let base = CaseBase::new(cases).unwrap();
    let query = feature_set(["x", "z"]);
    let ranking = retrieve(&query, &base, &Weighting::from(weights), 10).unwrap();

    let pos = |label: &str| ranking.iter().position(|r| r.case.label == label).unwrap();
    assert!(pos("shares-z") < pos("shares-x"));
    assert_eq!(ranking[0].case.label, "shares-z");
}

#[test]
fn test_loo_twins_and_outlier() {
    let base = CaseBase::new(vec![
        Case::new(1u64, ["a", "b"], "L1"),
        Case::new(2u64, ["a", "b"], "L1"),
        Case::new(3u64, ["c"], "L2"),
    ])
    .unwrap();

    let report = evaluate(&base, &Weighting::Uniform);
    assert_eq!(report.total, 3);
    assert_eq!(report.correct, 2);
    assert!((report.accuracy - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_loo_on_tabular_corpus() {
    let base = training_base();
    let weighting = Weighting::from(WeightVector::from_cases(base.iter()));

    for weighting in [Weighting::Uniform, weighting] {
        let report = LooEvaluator::new(weighting, EvalConfig { parallel: true }).evaluate(&base);
        assert_eq!(report.total, base.len());
        assert_eq!(report.correct, report.total);
        assert_eq!(report.accuracy, 1.0);
        assert!(!report.cancelled);
    }
}

#[test]
fn test_loo_bounds() {
    let cases: Vec<Case> = (0..40u64)
        .map(|i| Case::new(i, [format!("s{}", i % 6), format!("t{}", i % 5)], format!("d{}", i % 3)))
        .collect();
    let base = CaseBase::new(cases).unwrap();
    let report = evaluate(&base, &Weighting::Uniform);

    assert!(report.total <= base.len());
    assert!(report.correct <= report.total);
    assert!((0.0..=1.0).contains(&report.accuracy));
}

#[test]
fn test_duplicate_ids_fail_before_retrieval() {
    let result = CaseBase::new(vec![
        Case::new(1u64, ["a"], "L1"),
        Case::new(1u64, ["a"], "L1"),
    ]);
    assert!(matches!(result, Err(Error::DuplicateCaseId(_))));
}

#[test]
fn test_lookup_reuses_solution() {
    let base = training_base();
    let ranking = Retriever::default()
        .retrieve(&feature_set(["itching", "skin_rash"]), &base, 3)
        .unwrap();
    let explained = ExplainedMatch::from_ranking(&ranking);

    assert_eq!(explained.len(), 3);
    assert_eq!(explained[0].label, "Fungal infection");
    assert_eq!(
        explained[0].solution.as_deref(),
        Some("Standard treatment for Fungal infection")
    );
    for pair in explained.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_label_aware_lookup() {
    let base = training_base();
    let query = Query::new(["itching", "skin_rash"]).with_label("Fungal infection");
    let results = Retriever::default()
        .lookup(&query, &base, 3, &AggregateSchema::default())
        .unwrap();

    for result in &results {
        assert_eq!(result.case.label, "Fungal infection");
        assert!((0.0..=1.0).contains(&result.score));
    }
}

#[test]
fn test_unknown_query_features_tolerated() {
    let base = training_base();
    let query = feature_set(["itching", "not_a_symptom"]);

    let vocabulary: FeatureVocabulary = base.vocabulary();
    assert_eq!(vocabulary.unknown(&query), vec!["not_a_symptom"]);

    let weighting = Weighting::from(WeightVector::from_cases(base.iter()));
    let ranking = retrieve(&query, &base, &weighting, 1).unwrap();
    assert_eq!(ranking[0].case.label, "Fungal infection");
}

#[test]
fn test_similarity_properties_on_fixtures() {
    let empty = FeatureSet::new();
    let a = feature_set(["x", "y"]);
    let b = feature_set(["z"]);

    assert_eq!(jaccard(&empty, &empty), 1.0);
    assert_eq!(jaccard(&a, &a), 1.0);
    assert_eq!(jaccard(&a, &b), 0.0);

    let weighting = Weighting::from(compute_weights(&[
        Case::new(1u64, ["x", "y"], "l"),
        Case::new(2u64, ["y", "z"], "l"),
    ]));
    let c = feature_set(["y", "z"]);
    assert_eq!(weighted_jaccard(&a, &c, &weighting), weighted_jaccard(&c, &a, &weighting));
}

#[test]
fn test_json_corpus_roundtrip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cases.json");
    let cases: Vec<Case> = training_base().iter().cloned().collect();

    write_json_cases(&path, &cases).unwrap();
    let base = CaseBase::new(cbrx::load_json_cases(&path).unwrap()).unwrap();
    assert_eq!(base.len(), cases.len());
    assert_eq!(evaluate(&base, &Weighting::Uniform).accuracy, 1.0);
}

#[test]
fn test_tabular_file_with_bad_label_column() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TRAINING.as_bytes()).unwrap();

    let result = TabularLoader::new().with_label_column("diagnosis").load_path(file.path());
    assert!(matches!(result, Err(StorageError::MissingLabelColumn(_))));
}

#[test]
fn test_cancellation_token_shared_with_evaluator() {
    let base = training_base();
    let token = CancellationToken::new();
    let evaluator = LooEvaluator::new(Weighting::Uniform, EvalConfig::default())
        .with_cancellation(token.clone());

    token.cancel();
    let report = evaluator.evaluate(&base);
    assert!(report.cancelled);
    assert_eq!(report.total, 0);
}
