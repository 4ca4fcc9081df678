// demos/train_from_csv.rs
//
// Run with `RUST_LOG=debug cargo run --example train_from_csv [output-path]`.
use prefer_train::frame::column_values;
use prefer_train::{
    read_csv, train_and_save_model, FeatureInput, PredictivePipeline, TrainingConfig,
};
use std::error::Error;

const RESPONDENTS: &str = "\
nomem_encr,age,cf20m128,oplzon_2020,nettohh_f_2020
1,30,A,Z,1000
2,40,B,Y,2000
3,35,A,Y,1500
4,45,B,Z,2500
5,28,A,Z,1200
6,50,B,Y,3100
7,33,A,Y,NA
";

// id 8 has no respondent row, id 6 has no label
const OUTCOMES: &str = "\
nomem_encr,new_child
1,1
2,0
3,1
4,0
5,1
6,
8,1
";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| prefer_train::training::DEFAULT_MODEL_PATH.to_string());

    let respondents = read_csv(RESPONDENTS)?;
    let outcomes = read_csv(OUTCOMES)?;
    // Respondent 7 is unlabelled and has no income; score the complete rows.
    let complete = respondents.head(Some(6));
    let ids = column_values(complete.column("nomem_encr")?)?;

    let runs = [
        (FeatureInput::Raw, output.clone()),
        (FeatureInput::Preprocessed, format!("{output}.preprocessed")),
    ];
    for (feature_input, path) in runs {
        let config = TrainingConfig::builder()
            .output_path(&path)
            .feature_input(feature_input)
            .build();
        let report = train_and_save_model(&respondents, &outcomes, &config)?;
        println!("{}", serde_json::to_string_pretty(&report)?);

        let model = PredictivePipeline::load_from_file(&path)?;
        let probabilities = model.predict_proba(&complete)?;
        for (id, p) in ids.iter().zip(probabilities.iter()) {
            println!("{feature_input:?} nomem_encr={id} p(new_child)={p:.3}");
        }
    }
    Ok(())
}
