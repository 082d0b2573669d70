use thiserror::Error;

/// Error type for `ssi-status-list`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A required input is missing or has the wrong shape.
    #[error("\"{field}\" {reason}")]
    InvalidArgument { field: String, reason: String },
    /// The document is well-formed JSON but violates the status list shape.
    #[error("{0}")]
    Structural(String),
    #[error("Status purpose mismatch. Credential status: \"{claim}\", status list: \"{list}\"")]
    PurposeMismatch { claim: String, list: String },
    #[error("Issuer of the status list credential does not match the credential issuer. Credential: \"{credential}\", status list: \"{list}\"")]
    IssuerMismatch { credential: String, list: String },
    #[error("Could not load \"StatusList2021Credential\"; reason: {reason}")]
    Resolution { url: String, reason: String },
    #[error("\"StatusList2021Credential\" not verified; reason: {}", .errors.join("; "))]
    Proof { errors: Vec<String> },
    #[error("Could not decode encoded status list; reason: {reason}")]
    Decode { reason: String },
    #[error("Could not encode status list; reason: {reason}")]
    Encode { reason: String },
    #[error("{0}")]
    NotFound(String),
    #[error("Index out of range: {index}, list length is {length}")]
    IndexOutOfRange { index: usize, length: usize },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    Structural,
    Resolution,
    Proof,
    Decode,
    Encode,
    NotFound,
    IndexOutOfRange,
}

impl Error {
    pub(crate) fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::Structural(_) | Self::PurposeMismatch { .. } | Self::IssuerMismatch { .. } => {
                ErrorKind::Structural
            }
            Self::Resolution { .. } => ErrorKind::Resolution,
            Self::Proof { .. } => ErrorKind::Proof,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Encode { .. } => ErrorKind::Encode,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
        }
    }
}
