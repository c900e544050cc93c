//! Errors raised while loading boundary geometry.

/// Errors that can occur while fetching or decoding boundary data.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    /// The request could not be sent or the body could not be read.
    Network(String),
    /// The server answered with a non-success status.
    Http(u16),
    /// The document is not valid TopoJSON.
    Parse(String),
    /// The requested object is missing from the topology.
    MissingObject(String),
    /// A geometry references an arc that does not exist.
    InvalidArc(i64),
    /// The request was aborted because its owner was torn down.
    Cancelled,
}

impl std::fmt::Display for GeoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoError::Network(msg) => write!(f, "Network error: {}", msg),
            GeoError::Http(status) => write!(f, "HTTP status {}", status),
            GeoError::Parse(msg) => write!(f, "Invalid topology: {}", msg),
            GeoError::MissingObject(name) => write!(f, "Topology has no object '{}'", name),
            GeoError::InvalidArc(index) => write!(f, "Arc index {} out of range", index),
            GeoError::Cancelled => write!(f, "Request cancelled"),
        }
    }
}

impl std::error::Error for GeoError {}

impl From<serde_json::Error> for GeoError {
    fn from(e: serde_json::Error) -> Self {
        GeoError::Parse(e.to_string())
    }
}
