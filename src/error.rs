//! Error type shared by the model, search, and I/O layers.

use thiserror::Error as ThisError;

/// Errors raised while building a problem, configuring a search, or doing I/O.
///
/// A search that finds no complete plan is *not* an error: it returns
/// `Ok(None)`.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("truck capacity must be positive, got {0}")]
    InvalidCapacity(i64),
    #[error("{kind} id {id} is outside the distance matrix (size {size})")]
    NodeOutOfRange {
        kind: &'static str,
        id: usize,
        size: usize,
    },
    #[error("edge {from} -> {to} has invalid weight {weight}")]
    InvalidWeight { from: usize, to: usize, weight: f64 },
    #[error("hub at node {node} has invalid activation cost {cost}")]
    InvalidActivationCost { node: usize, cost: f64 },
    #[error("{count} hubs exceed the enumerable maximum of {max}")]
    TooManyHubs { count: usize, max: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            Error::InvalidCapacity(0).to_string(),
            "truck capacity must be positive, got 0"
        );
        assert_eq!(
            Error::parse(3, "missing NODOS").to_string(),
            "line 3: missing NODOS"
        );
        let e = Error::NodeOutOfRange {
            kind: "depot",
            id: 9,
            size: 4,
        };
        assert_eq!(
            e.to_string(),
            "depot id 9 is outside the distance matrix (size 4)"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: Error = io.into();
        assert!(matches!(e, Error::Io(_)));
    }
}
