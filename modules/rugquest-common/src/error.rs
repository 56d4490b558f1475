use thiserror::Error;

#[derive(Error, Debug)]
pub enum RugQuestError {
    #[error("Supply error: {0}")]
    Supply(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
