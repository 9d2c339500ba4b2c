use serde_json::Value;
use thiserror::Error;

use crate::expr::ExpressionError;
use crate::query::QueryError;

#[derive(Error, Debug)]
pub enum RenderError {
    // Query errors
    #[error("QUERY_FAILED: error trying to render {query:?} using {data}: {source}")]
    Query {
        query: String,
        data: String,
        source: QueryError,
    },

    // Template shape errors
    #[error("UNSUPPORTED: {0} is not supported")]
    Unsupported(&'static str),

    // Expression errors surface as the expression engine reported them
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    // Config errors
    #[error("CONFIG_INVALID: {0}")]
    Config(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Wrap a query engine failure with the query text and the data it ran against
    pub(crate) fn query(query: &str, data: &Value, source: QueryError) -> Self {
        RenderError::Query {
            query: query.to_string(),
            data: serde_json::to_string(data).unwrap_or_else(|_| "<unprintable>".to_string()),
            source,
        }
    }

    /// Stable error code, the prefix of the display message
    pub fn code(&self) -> &'static str {
        match self {
            RenderError::Query { .. } => "QUERY_FAILED",
            RenderError::Unsupported(_) => "UNSUPPORTED",
            RenderError::Expression(err) => err.code(),
            RenderError::Config(_) => "CONFIG_INVALID",
            RenderError::Io(_) => "IO_ERROR",
        }
    }
}

impl From<toml::de::Error> for RenderError {
    fn from(err: toml::de::Error) -> Self {
        RenderError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
