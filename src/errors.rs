use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("user input must not be empty")]
pub struct EmptyInputError;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("plan not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("plan artifact is corrupt ({}): {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize plan: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("missing or empty section: {0}")]
    MissingSection(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ValidationError {
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

/// Pipeline stage a composition failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Input,
    /// Never produced: plan building cannot fail once the input is a
    /// `UserInput`. Kept so stage names cover the whole pipeline.
    Build,
    Persist,
    Validate,
    Project,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Input => "input",
            Stage::Build => "build",
            Stage::Persist => "persist",
            Stage::Validate => "validate",
            Stage::Project => "project",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum FailureCause {
    #[error(transparent)]
    EmptyInput(#[from] EmptyInputError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to render plan: {0}")]
    Projection(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
#[error("prompt composition failed at {stage} stage: {cause}")]
pub struct CompositionError {
    pub stage: Stage,
    #[source]
    pub cause: FailureCause,
}

impl CompositionError {
    pub fn new(stage: Stage, cause: impl Into<FailureCause>) -> Self {
        Self { stage, cause: cause.into() }
    }
}

#[derive(Error, Debug)]
pub enum CollaboratorError {
    #[error("image description requires an API key")]
    MissingApiKey,
    #[error("image description request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("image description API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("image description API returned no text")]
    EmptyResponse,
}
