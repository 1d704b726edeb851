use thiserror::Error;

pub mod codes;

pub use codes::{describe_error_code, ErrorCode};

/// The unified error type for the classifier service
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Server error: {message}")]
    Server {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ClassifierError {
    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a server error with specific code
    pub fn server_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Server {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach an underlying cause
    pub fn with_source(
        mut self,
        cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source, .. } | Self::Server { source, .. } => {
                *source = Some(cause.into());
            }
        }
        self
    }

    /// Numeric code from the error registry
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. } | Self::Server { code, .. } => *code,
        }
    }

    /// Process exit code for errors that abort startup
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Server { .. } => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
