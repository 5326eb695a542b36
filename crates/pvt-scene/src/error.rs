//! Scene errors.

use pvt_core::PvtError;
use pvt_eval::EvalError;
use thiserror::Error;

pub type SceneResult<T> = Result<T, SceneError>;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Evaluation failed: {0}")]
    Eval(#[from] EvalError),

    #[error("{0}")]
    Core(#[from] PvtError),

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SceneError {
    pub(crate) fn invalid(field: &str, value: impl ToString, reason: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
