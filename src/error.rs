use miette::Diagnostic;
use thiserror::Error;

use crate::parser::Location;

/// Main error type for map2tscn operations
#[derive(Error, Diagnostic, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    #[diagnostic(code(map2tscn::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(map2tscn::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error at {location}: {message}")]
    #[diagnostic(code(map2tscn::parse))]
    Parse {
        location: Location,
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(map2tscn::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Emit error: {message}")]
    #[diagnostic(code(map2tscn::emit))]
    Emit {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(map2tscn::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl ConvertError {
    /// Shorthand for a parse error at a location.
    pub fn parse(location: Location, message: impl Into<String>) -> Self {
        Self::Parse {
            location,
            message: message.into(),
            help: None,
        }
    }

    /// Attach help text to a parse error. Other variants are returned unchanged.
    pub fn with_help(self, text: impl Into<String>) -> Self {
        match self {
            Self::Parse {
                location, message, ..
            } => Self::Parse {
                location,
                message,
                help: Some(text.into()),
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
