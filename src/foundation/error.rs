pub type MorphResult<T> = Result<T, MorphError>;

#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("text error: {0}")]
    Text(String),

    #[error("tick error: {0}")]
    Tick(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    pub fn tick(msg: impl Into<String>) -> Self {
        Self::Tick(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
