use polars::prelude::*;
use prefer_train::dataset::build_training_table;
use prefer_train::frame::{column_values, Value};
use prefer_train::{
    read_csv, train_and_save_model, FeatureInput, FeatureSchema, PredictivePipeline,
    TrainingConfig, TrainingError,
};
use std::path::Path;

fn two_respondents() -> DataFrame {
    df!(
        "nomem_encr" => [1i64, 2],
        "age" => [30i64, 40],
        "cf20m128" => ["A", "B"],
        "oplzon_2020" => ["Z", "Y"],
        "nettohh_f_2020" => [1000.0, 2000.0],
    )
    .unwrap()
}

fn two_outcomes() -> DataFrame {
    df!(
        "nomem_encr" => [1i64, 2],
        "new_child" => [1i64, 0],
    )
    .unwrap()
}

fn values<'a>(frame: &'a DataFrame, name: &str) -> Vec<Value<'a>> {
    column_values(frame.column(name).unwrap()).unwrap()
}

const RESPONDENTS_CSV: &str = "\
nomem_encr,age,cf20m128,oplzon_2020,nettohh_f_2020
1,30,A,Z,1000
2,40,B,Y,2000
3,35,A,Y,1500
4,45,B,Z,2500
5,28,A,Z,1200
6,50,B,Y,3100
";

const OUTCOMES_CSV: &str = "\
nomem_encr,new_child
1,1
2,0
3,1
4,0
5,1
6,0
7,1
";

fn csv_frames() -> (DataFrame, DataFrame) {
    (
        read_csv(RESPONDENTS_CSV).unwrap(),
        read_csv(OUTCOMES_CSV).unwrap(),
    )
}

fn config_at(path: &Path) -> TrainingConfig {
    TrainingConfig::builder().output_path(path).build()
}

#[test]
fn test_two_row_scenario_fits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.bin");

    let report = train_and_save_model(&two_respondents(), &two_outcomes(), &config_at(&path)).unwrap();

    assert_eq!(report.joined_rows, 2);
    assert_eq!(report.training_rows, 2);
    assert_eq!(report.dropped_missing_label, 0);
    assert!(path.exists());

    let model = PredictivePipeline::load_from_file(&path).unwrap();
    assert_eq!(
        model.metadata().feature_columns,
        vec!["age", "cf20m128", "oplzon_2020", "nettohh_f_2020", "nomem_encr"]
    );
    assert_eq!(model.metadata().feature_input, FeatureInput::Raw);
    assert_eq!(model.metadata().seed, 1);
    assert_eq!(model.metadata().training_rows, 2);
    assert_eq!(model.model().n_features(), 5);
}

#[test]
fn test_same_inputs_give_identical_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.bin");
    let second = dir.path().join("second.bin");
    let (respondents, outcomes) = csv_frames();

    train_and_save_model(&respondents, &outcomes, &config_at(&first)).unwrap();
    train_and_save_model(&respondents, &outcomes, &config_at(&second)).unwrap();

    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[test]
fn test_rerun_overwrites_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.bin");
    std::fs::write(&path, vec![0u8; 64 * 1024]).unwrap();
    let (respondents, outcomes) = csv_frames();

    train_and_save_model(&respondents, &outcomes, &config_at(&path)).unwrap();
    let first = std::fs::read(&path).unwrap();
    train_and_save_model(&respondents, &outcomes, &config_at(&path)).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert!(first.len() < 64 * 1024);
    assert_eq!(first, second);
    assert!(PredictivePipeline::load_from_file(&path).is_ok());
}

#[test]
fn test_no_labelled_rows_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.bin");
    let outcomes = df!(
        "nomem_encr" => [1i64, 2, 9],
        "new_child" => [None, None, Some(1i64)],
    )
    .unwrap();

    let result = train_and_save_model(&two_respondents(), &outcomes, &config_at(&path));

    assert!(matches!(result, Err(TrainingError::EmptyTrainingSet { .. })));
    assert!(!path.exists());
}

#[test]
fn test_null_label_row_is_dropped() {
    let outcomes = df!(
        "nomem_encr" => [1i64, 2],
        "new_child" => [Some(1i64), None],
    )
    .unwrap();

    let table = build_training_table(&two_respondents(), &outcomes, &FeatureSchema::default()).unwrap();

    assert_eq!(table.joined_rows, 2);
    assert_eq!(table.frame.height(), 1);
    assert_eq!(values(&table.frame, "nomem_encr"), vec![Value::Int(1)]);
}

#[test]
fn test_outcome_without_respondent_is_dropped() {
    let respondents = two_respondents().head(Some(1));

    let table = build_training_table(&respondents, &two_outcomes(), &FeatureSchema::default()).unwrap();

    assert_eq!(table.joined_rows, 1);
    assert_eq!(values(&table.frame, "nomem_encr"), vec![Value::Int(1)]);
    assert_eq!(values(&table.frame, "new_child"), vec![Value::Int(1)]);
}

#[test]
fn test_csv_training_counts_rows() {
    let dir = tempfile::tempdir().unwrap();
    let (respondents, outcomes) = csv_frames();

    let report = train_and_save_model(
        &respondents,
        &outcomes,
        &config_at(&dir.path().join("model.bin")),
    )
    .unwrap();

    // id 7 has an outcome but no respondent row
    assert_eq!(report.joined_rows, 6);
    assert_eq!(report.training_rows, 6);
}

#[test]
fn test_reloaded_artifact_reproduces_probabilities() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.bin");
    let (respondents, outcomes) = csv_frames();
    let config = TrainingConfig::builder()
        .output_path(&path)
        .feature_input(FeatureInput::Preprocessed)
        .build();

    train_and_save_model(&respondents, &outcomes, &config).unwrap();
    let first = PredictivePipeline::load_from_file(&path).unwrap();
    let second = PredictivePipeline::load_from_file(&path).unwrap();

    assert_eq!(first.to_bytes().unwrap(), std::fs::read(&path).unwrap());

    let p = first.predict_proba(&respondents).unwrap();
    assert_eq!(p, second.predict_proba(&respondents).unwrap());
    assert_eq!(p.len(), 6);
    assert!(p.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_preprocessed_unknown_categories_encode_to_zeros() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.bin");
    let (respondents, outcomes) = csv_frames();
    let config = TrainingConfig::builder()
        .output_path(&path)
        .feature_input(FeatureInput::Preprocessed)
        .build();

    let report = train_and_save_model(&respondents, &outcomes, &config).unwrap();
    assert_eq!(report.n_features, 6);

    let model = PredictivePipeline::load_from_file(&path).unwrap();
    let unseen = df!(
        "nomem_encr" => [100i64],
        "age" => [33i64],
        "cf20m128" => ["Q"],
        "oplzon_2020" => ["W"],
        "nettohh_f_2020" => [1800.0],
    )
    .unwrap();

    let x = model.preprocess(&unseen).unwrap();
    assert_eq!(x.shape(), &[1, 6]);
    // cf20m128: A, B | oplzon_2020: Y, Z
    assert_eq!(x.row(0).iter().take(4).copied().collect::<Vec<_>>(), vec![0.0; 4]);
    assert_eq!(model.predict_proba(&unseen).unwrap().len(), 1);
}

#[test]
fn test_raw_mode_rejects_unseen_category_at_scoring() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.bin");
    let (respondents, outcomes) = csv_frames();

    train_and_save_model(&respondents, &outcomes, &config_at(&path)).unwrap();
    let model = PredictivePipeline::load_from_file(&path).unwrap();
    let mut unseen = respondents.clone();
    unseen
        .with_column(Series::new(
            "cf20m128".into(),
            ["A", "B", "A", "B", "A", "C"],
        ))
        .unwrap();

    assert!(model.predict_proba(&respondents).is_ok());
    assert!(model.predict_proba(&unseen).is_err());
}
