use tkwire_core::{ConfigError, EvalError};

/// A checked selection change did not go through
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("can't select item {0}")]
    NoSuchItem(String),
    #[error("value {0:?} is not in the list")]
    ValueNotFound(String),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Building a window from a layout file failed
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Toolkit error: {0}")]
    Eval(#[from] EvalError),
}
