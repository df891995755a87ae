/// Errors a metadata provider can report.
#[derive(Debug)]
pub enum MetadataError {
    /// The accountability context is not allowed to perform the fetch.
    Forbidden(String),
    /// The backing store or transport failed.
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

impl MetadataError {
    /// Construct a `Storage` variant from any error type.
    ///
    /// Used by provider implementations to wrap driver or transport errors.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        MetadataError::Storage(Box::new(err))
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, MetadataError::Forbidden(_))
    }
}

impl std::fmt::Display for MetadataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            MetadataError::Storage(err) => write!(f, "Storage error: {err}"),
        }
    }
}

impl std::error::Error for MetadataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MetadataError::Storage(err) => Some(err.as_ref()),
            MetadataError::Forbidden(_) => None,
        }
    }
}

impl From<std::io::Error> for MetadataError {
    fn from(err: std::io::Error) -> Self {
        MetadataError::storage(err)
    }
}

impl From<serde_json::Error> for MetadataError {
    fn from(err: serde_json::Error) -> Self {
        MetadataError::storage(err)
    }
}

/// Which metadata fetch an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataSource {
    Collections,
    Fields,
    Relations,
}

impl MetadataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataSource::Collections => "collections",
            MetadataSource::Fields => "fields",
            MetadataSource::Relations => "relations",
        }
    }
}

impl std::fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
