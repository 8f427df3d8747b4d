use thiserror::Error;

/// Why a line or one of its fields failed to parse.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("malformed line")]
    Malformed,

    #[error("invalid plate {0:?}")]
    Plate(String),

    #[error("invalid road {0:?}")]
    Road(String),

    #[error("invalid distance {0:?}")]
    Distance(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("road category {0:?} must be a single uppercase ASCII letter")]
    InvalidCategory(char),

    #[error("motorway and ordinary roads cannot share the category {0:?}")]
    DuplicateCategory(char),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// The line an inconsistent journey was opened on, reported on the error
/// stream as `Error in line N: text`. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line_number: usize,
    pub line: String,
}
