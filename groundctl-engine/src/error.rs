use thiserror::Error;

use groundctl_core::model::ConfigType;
use groundctl_core::{ClientError, EditError, InputError, PathError};

use crate::prompt::PromptError;

/// Failures that end an interactive session.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("Remote call failed: {0}")]
    Client(#[from] ClientError),

    #[error("Bad resource path: {0}")]
    Path(#[from] PathError),

    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error("Cannot render payload: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Expected a {expected} config, got {actual}")]
    UnexpectedConfig {
        expected: ConfigType,
        actual: ConfigType,
    },
}
