//! ColumnTransformer implementation.
//!
//! Applies different transformers to different named column subsets and
//! concatenates the results horizontally, in step order. Columns not named by
//! any step are dropped.

use crate::preprocessing::encoding::{
    FittedOneHotEncoder, FittedOrdinalEncoder, OneHotEncoder, OneHotEncoderParams, OrdinalEncoder,
    OrdinalEncoderParams,
};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::passthrough::{FittedPassthrough, Passthrough, PassthroughParams};
use crate::preprocessing::scaling::{FittedStandardScaler, StandardScaler, StandardScalerParams};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{concatenate, Array2, ArrayView2, Axis};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Enum of unfitted transformers that can be used in a ColumnTransformer.
#[derive(Clone, Debug)]
pub enum ColumnTransformerStep {
    OneHotEncoder(OneHotEncoder),
    OrdinalEncoder(OrdinalEncoder),
    Passthrough(Passthrough),
    StandardScaler(StandardScaler),
}

/// Enum of fitted transformers for ColumnTransformer.
#[derive(Clone, Debug)]
pub enum FittedColumnTransformerStep {
    OneHotEncoder(FittedOneHotEncoder),
    OrdinalEncoder(FittedOrdinalEncoder),
    Passthrough(FittedPassthrough),
    StandardScaler(FittedStandardScaler),
}

/// Serializable parameters of one fitted step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StepParams {
    OneHotEncoder(OneHotEncoderParams),
    OrdinalEncoder(OrdinalEncoderParams),
    Passthrough(PassthroughParams),
    StandardScaler(StandardScalerParams),
}

impl FittedColumnTransformerStep {
    fn transform(&self, data: &DataFrame) -> Result<Array2<f64>, PreprocessingError> {
        match self {
            FittedColumnTransformerStep::OneHotEncoder(t) => t.transform(data),
            FittedColumnTransformerStep::OrdinalEncoder(t) => t.transform(data),
            FittedColumnTransformerStep::Passthrough(t) => t.transform(data),
            FittedColumnTransformerStep::StandardScaler(t) => t.transform(data),
        }
    }

    /// Get the step name.
    pub fn step_name(&self) -> &'static str {
        match self {
            FittedColumnTransformerStep::OneHotEncoder(_) => "OneHotEncoder",
            FittedColumnTransformerStep::OrdinalEncoder(_) => "OrdinalEncoder",
            FittedColumnTransformerStep::Passthrough(_) => "Passthrough",
            FittedColumnTransformerStep::StandardScaler(_) => "StandardScaler",
        }
    }

    /// Get the number of output features.
    pub fn n_features_out(&self) -> usize {
        match self {
            FittedColumnTransformerStep::OneHotEncoder(t) => t.n_features_out(),
            FittedColumnTransformerStep::OrdinalEncoder(t) => t.n_features_out(),
            FittedColumnTransformerStep::Passthrough(t) => t.n_features_out(),
            FittedColumnTransformerStep::StandardScaler(t) => t.n_features_out(),
        }
    }

    fn extract_params(&self) -> StepParams {
        match self {
            FittedColumnTransformerStep::OneHotEncoder(t) => {
                StepParams::OneHotEncoder(t.extract_params())
            }
            FittedColumnTransformerStep::OrdinalEncoder(t) => {
                StepParams::OrdinalEncoder(t.extract_params())
            }
            FittedColumnTransformerStep::Passthrough(t) => {
                StepParams::Passthrough(t.extract_params())
            }
            FittedColumnTransformerStep::StandardScaler(t) => {
                StepParams::StandardScaler(t.extract_params())
            }
        }
    }

    fn from_params(params: StepParams) -> Result<Self, PreprocessingError> {
        Ok(match params {
            StepParams::OneHotEncoder(p) => {
                FittedColumnTransformerStep::OneHotEncoder(FittedOneHotEncoder::from_params(p)?)
            }
            StepParams::OrdinalEncoder(p) => {
                FittedColumnTransformerStep::OrdinalEncoder(FittedOrdinalEncoder::from_params(p)?)
            }
            StepParams::Passthrough(p) => {
                FittedColumnTransformerStep::Passthrough(FittedPassthrough::from_params(p)?)
            }
            StepParams::StandardScaler(p) => {
                FittedColumnTransformerStep::StandardScaler(FittedStandardScaler::from_params(p)?)
            }
        })
    }
}

/// Fit a column transformer step from an unfitted step.
fn fit_step(
    step: &ColumnTransformerStep,
    data: &DataFrame,
) -> Result<FittedColumnTransformerStep, PreprocessingError> {
    match step {
        ColumnTransformerStep::OneHotEncoder(t) => {
            t.fit(data).map(FittedColumnTransformerStep::OneHotEncoder)
        }
        ColumnTransformerStep::OrdinalEncoder(t) => {
            t.fit(data).map(FittedColumnTransformerStep::OrdinalEncoder)
        }
        ColumnTransformerStep::Passthrough(t) => {
            t.fit(data).map(FittedColumnTransformerStep::Passthrough)
        }
        ColumnTransformerStep::StandardScaler(t) => {
            t.fit(data).map(FittedColumnTransformerStep::StandardScaler)
        }
    }
}

fn to_names<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    columns.iter().map(|c| c.as_ref().to_string()).collect()
}

/// ColumnTransformer applies different transformers to different columns.
///
/// This is useful when a table mixes categorical and numeric features and each
/// group needs its own preprocessing.
///
/// # Example
/// ```rust
/// use polars::prelude::*;
/// use prefer_train::preprocessing::{
///     ColumnTransformer, FittedTransformer, HandleUnknown, OneHotEncoder, StandardScaler,
///     Transformer,
/// };
///
/// let data = df!(
///     "cf20m128" => ["A", "B"],
///     "age" => [30.0, 40.0],
/// )
/// .unwrap();
///
/// let ct = ColumnTransformer::new()
///     .add_one_hot_encoder(
///         OneHotEncoder::new().with_handle_unknown(HandleUnknown::Ignore),
///         &["cf20m128"],
///     )
///     .add_standard_scaler(StandardScaler::new(), &["age"]);
///
/// let fitted = ct.fit(&data).unwrap();
/// let transformed = fitted.transform(&data).unwrap();
/// assert_eq!(transformed.row(0).to_vec(), vec![1.0, 0.0, -1.0]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ColumnTransformer {
    steps: Vec<(Vec<String>, ColumnTransformerStep)>,
}

impl ColumnTransformer {
    /// Create a new empty ColumnTransformer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a OneHotEncoder for the named columns.
    pub fn add_one_hot_encoder<S: AsRef<str>>(self, encoder: OneHotEncoder, columns: &[S]) -> Self {
        self.add(ColumnTransformerStep::OneHotEncoder(encoder), columns)
    }

    /// Add an OrdinalEncoder for the named columns.
    pub fn add_ordinal_encoder<S: AsRef<str>>(self, encoder: OrdinalEncoder, columns: &[S]) -> Self {
        self.add(ColumnTransformerStep::OrdinalEncoder(encoder), columns)
    }

    /// Pass the named numeric columns through unchanged.
    pub fn add_passthrough<S: AsRef<str>>(self, columns: &[S]) -> Self {
        self.add(ColumnTransformerStep::Passthrough(Passthrough::new()), columns)
    }

    /// Add a StandardScaler for the named columns.
    pub fn add_standard_scaler<S: AsRef<str>>(
        self,
        scaler: StandardScaler,
        columns: &[S],
    ) -> Self {
        self.add(ColumnTransformerStep::StandardScaler(scaler), columns)
    }

    /// Add a generic step.
    pub fn add<S: AsRef<str>>(mut self, step: ColumnTransformerStep, columns: &[S]) -> Self {
        self.steps.push((to_names(columns), step));
        self
    }

    /// Get the number of transformer steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterates over `(columns, step)` pairs in order.
    pub fn steps(&self) -> impl Iterator<Item = (&[String], &ColumnTransformerStep)> + '_ {
        self.steps.iter().map(|(cols, step)| (cols.as_slice(), step))
    }
}

/// Serializable parameters for a fitted ColumnTransformer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransformerParams {
    /// Each step's input column names and fitted parameters, in order.
    pub steps: Vec<(Vec<String>, StepParams)>,
}

/// Fitted ColumnTransformer ready for inference.
#[derive(Clone, Debug)]
pub struct FittedColumnTransformer {
    fitted_steps: Vec<(Vec<String>, FittedColumnTransformerStep)>,
    /// Distinct input columns in first-use order.
    feature_names_in: Vec<String>,
    n_features_out: usize,
}

impl FittedColumnTransformer {
    fn build(fitted_steps: Vec<(Vec<String>, FittedColumnTransformerStep)>) -> Self {
        let mut feature_names_in: Vec<String> = Vec::new();
        for name in fitted_steps.iter().flat_map(|(cols, _)| cols) {
            if !feature_names_in.contains(name) {
                feature_names_in.push(name.clone());
            }
        }
        let n_features_out = fitted_steps.iter().map(|(_, s)| s.n_features_out()).sum();
        Self {
            fitted_steps,
            feature_names_in,
            n_features_out,
        }
    }

    /// Names of the input columns this transformer reads.
    pub fn feature_names_in(&self) -> &[String] {
        &self.feature_names_in
    }

    /// Get step names with their input columns.
    pub fn step_names(&self) -> Vec<(&'static str, &[String])> {
        self.fitted_steps
            .iter()
            .map(|(cols, step)| (step.step_name(), cols.as_slice()))
            .collect()
    }
}

impl Transformer for ColumnTransformer {
    type Params = ColumnTransformerParams;
    type Fitted = FittedColumnTransformer;

    fn fit(&self, data: &DataFrame) -> Result<Self::Fitted, PreprocessingError> {
        if data.height() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit ColumnTransformer on empty data".to_string(),
            ));
        }

        if self.steps.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "Cannot fit empty ColumnTransformer".to_string(),
            ));
        }

        let mut fitted_steps = Vec::with_capacity(self.steps.len());
        for (columns, step) in &self.steps {
            if columns.is_empty() {
                return Err(PreprocessingError::InvalidParameter(
                    "ColumnTransformer step has no columns".to_string(),
                ));
            }
            let col_data = data.select(columns.iter().map(String::as_str))?;
            fitted_steps.push((columns.clone(), fit_step(step, &col_data)?));
        }

        Ok(FittedColumnTransformer::build(fitted_steps))
    }
}

impl FittedTransformer for FittedColumnTransformer {
    type Params = ColumnTransformerParams;

    /// Transforms the named columns of `data`. Other columns are ignored, so
    /// `data` may be wider than the table seen during fit.
    fn transform(&self, data: &DataFrame) -> Result<Array2<f64>, PreprocessingError> {
        let outputs = self
            .fitted_steps
            .iter()
            .map(|(columns, step)| step.transform(&data.select(columns.iter().map(String::as_str))?))
            .collect::<Result<Vec<_>, _>>()?;

        let views: Vec<ArrayView2<'_, f64>> = outputs.iter().map(|o| o.view()).collect();
        concatenate(Axis(1), &views).map_err(|e| {
            PreprocessingError::InvalidParameter(format!("Cannot concatenate step outputs: {}", e))
        })
    }

    fn extract_params(&self) -> Self::Params {
        ColumnTransformerParams {
            steps: self
                .fitted_steps
                .iter()
                .map(|(columns, step)| (columns.clone(), step.extract_params()))
                .collect(),
        }
    }

    fn from_params(params: Self::Params) -> Result<Self, PreprocessingError> {
        let fitted_steps = params
            .steps
            .into_iter()
            .map(|(columns, p)| Ok((columns, FittedColumnTransformerStep::from_params(p)?)))
            .collect::<Result<Vec<_>, PreprocessingError>>()?;

        if fitted_steps.is_empty() {
            return Err(PreprocessingError::InvalidParameter(
                "ColumnTransformer parameters contain no steps".to_string(),
            ));
        }

        Ok(FittedColumnTransformer::build(fitted_steps))
    }

    fn n_features_in(&self) -> usize {
        self.feature_names_in.len()
    }

    fn n_features_out(&self) -> usize {
        self.n_features_out
    }
}
