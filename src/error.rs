/*!
 * Error types for esi-remote
 */

use std::fmt;
use std::io;

use esi_core_interface::TransportError;

pub type Result<T> = std::result::Result<T, EsiError>;

/// Exit code constants for structured process exit
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_REJECTED: i32 = 3;

#[derive(Debug)]
pub enum EsiError {
    /// Talking to the FwESI server failed
    Transport(TransportError),

    /// FwESI replied to a change with something other than its usual confirmation
    UnexpectedAnswer { expected: String, actual: String },

    /// A response body did not have the expected shape
    Protocol(String),

    /// Configuration error
    Config(String),

    /// I/O error
    Io(io::Error),

    /// No OperatorActor with this id in the current snapshot
    ActorNotFound(i64),

    /// No save (or sub save) with this absolute path
    SaveNotFound(String),

    /// The actor has no property, enum or action of this name
    MemberNotFound {
        actor_id: i64,
        kind: &'static str,
        name: String,
    },

    /// A value could not be converted to the type the server expects
    InvalidValue(String),

    /// Enum value is not one of the enum's allowed values
    UnknownEnumValue { enum_name: String, value: String },

    /// Attribute exists but cannot be written, or the operation is not supported
    Unsupported(String),

    /// Generic error with message
    Other(String),
}

impl EsiError {
    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            EsiError::Config(_)
            | EsiError::InvalidValue(_)
            | EsiError::UnknownEnumValue { .. }
            | EsiError::Unsupported(_) => EXIT_USAGE,
            EsiError::UnexpectedAnswer { .. } => EXIT_REJECTED,
            _ => EXIT_FAILURE,
        }
    }

    /// Check if this error is transient (temporary, worth retrying)
    pub fn is_transient(&self) -> bool {
        match self {
            EsiError::Transport(err) => err.is_transient(),
            EsiError::Io(io_err) => matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionRefused
                    | io::ErrorKind::ConnectionReset
                    | io::ErrorKind::TimedOut
                    | io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> ErrorCategory {
        match self {
            EsiError::Transport(_) => ErrorCategory::Network,
            EsiError::UnexpectedAnswer { .. } | EsiError::Protocol(_) => ErrorCategory::Protocol,
            EsiError::Config(_) => ErrorCategory::Configuration,
            EsiError::Io(_) => ErrorCategory::IoError,
            EsiError::ActorNotFound(_)
            | EsiError::SaveNotFound(_)
            | EsiError::MemberNotFound { .. } => ErrorCategory::Lookup,
            EsiError::InvalidValue(_)
            | EsiError::UnknownEnumValue { .. }
            | EsiError::Unsupported(_) => ErrorCategory::Validation,
            EsiError::Other(_) => ErrorCategory::Unknown,
        }
    }
}

/// Error category for classification and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection or HTTP level failures
    Network,
    /// Unexpected payloads or answers from FwESI
    Protocol,
    /// Configuration errors
    Configuration,
    /// Local I/O errors
    IoError,
    /// Unknown actor, save or member
    Lookup,
    /// Rejected values
    Validation,
    /// Uncategorized errors
    Unknown,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Network => write!(f, "network"),
            ErrorCategory::Protocol => write!(f, "protocol"),
            ErrorCategory::Configuration => write!(f, "configuration"),
            ErrorCategory::IoError => write!(f, "io"),
            ErrorCategory::Lookup => write!(f, "lookup"),
            ErrorCategory::Validation => write!(f, "validation"),
            ErrorCategory::Unknown => write!(f, "unknown"),
        }
    }
}

impl fmt::Display for EsiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EsiError::Transport(err) => write!(f, "{}", err),
            EsiError::UnexpectedAnswer { expected, actual } => {
                write!(
                    f,
                    "Answer from server not as expected: wanted '{}', got {}",
                    expected, actual
                )
            }
            EsiError::Protocol(msg) => write!(f, "Protocol error: {}", msg),
            EsiError::Config(msg) => write!(f, "Configuration error: {}", msg),
            EsiError::Io(err) => write!(f, "I/O error: {}", err),
            EsiError::ActorNotFound(id) => write!(f, "No OperatorActor with id {}", id),
            EsiError::SaveNotFound(path) => write!(f, "No save file at '{}'", path),
            EsiError::MemberNotFound {
                actor_id,
                kind,
                name,
            } => {
                write!(f, "OperatorActor {} has no {} named '{}'", actor_id, kind, name)
            }
            EsiError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
            EsiError::UnknownEnumValue { enum_name, value } => {
                write!(f, "Value '{}' is not in all_values of '{}'", value, enum_name)
            }
            EsiError::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
            EsiError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for EsiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EsiError::Transport(err) => Some(err),
            EsiError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for EsiError {
    fn from(err: TransportError) -> Self {
        EsiError::Transport(err)
    }
}

impl From<io::Error> for EsiError {
    fn from(err: io::Error) -> Self {
        EsiError::Io(err)
    }
}

impl From<serde_json::Error> for EsiError {
    fn from(err: serde_json::Error) -> Self {
        EsiError::Protocol(format!("JSON decode error: {}", err))
    }
}

impl From<esi_connect::ConnectError> for EsiError {
    fn from(err: esi_connect::ConnectError) -> Self {
        EsiError::Config(err.to_string())
    }
}
