use flowdump_core_types::SessionName;
use thiserror::Error;

/// Result type alias using FlowDumpError
pub type Result<T> = std::result::Result<T, FlowDumpError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in logs and CLI diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Setup
    InvalidInput,
    Config,
    Io,
    Serialization,

    // Environment
    WrongDeviceRole,
    ExternalCommand,
    Store,

    // Session
    SessionFailed,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::WrongDeviceRole => "ERR_WRONG_DEVICE_ROLE",
            ExErrorKind::ExternalCommand => "ERR_EXTERNAL_COMMAND",
            ExErrorKind::Store => "ERR_STORE",
            ExErrorKind::SessionFailed => "ERR_SESSION_FAILED",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus the context needed to report the failure:
/// the operation that failed and the session it belonged to.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    session: Option<SessionName>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            session: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add session context
    pub fn with_session(mut self, session: SessionName) -> Self {
        self.session = Some(session);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn session(&self) -> Option<&SessionName> {
        self.session.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(session) = &self.session {
            write!(f, " (session: {})", session)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for flow dump operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowDumpError {
    /// A caller-supplied value is out of range
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Configuration file missing, unreadable or invalid
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The working directory for the request file could not be created
    #[error("Failed to create directory {path}: {message}")]
    CreateDir { path: String, message: String },

    /// The request file could not be written
    #[error("Failed to write {path}: {message}")]
    WriteFile { path: String, message: String },

    /// JSON encoding failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// The apply command could not be started
    #[error("Failed to run '{program}': {message}")]
    CommandSpawn { program: String, message: String },

    /// The apply command ran but reported failure
    #[error("'{program}' exited with {status}")]
    CommandFailed { program: String, status: String },

    /// Host is not the device role this tool runs on
    #[error("This command is only supported on a {expected} (switch_type: {found})")]
    WrongDeviceRole { expected: String, found: String },

    /// Database or notification channel failure
    #[error("Store error during {op}: {message}")]
    Store { op: String, message: String },

    /// The producer marked the session as failed
    #[error("Flow dump session {session} failed")]
    SessionFailed { session: SessionName },

    /// Process-level setup outside the session itself, e.g. signal handlers
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl FlowDumpError {
    pub fn kind(&self) -> ExErrorKind {
        match self {
            FlowDumpError::InvalidInput { .. } => ExErrorKind::InvalidInput,
            FlowDumpError::Config { .. } => ExErrorKind::Config,
            FlowDumpError::CreateDir { .. } | FlowDumpError::WriteFile { .. } => ExErrorKind::Io,
            FlowDumpError::Serialization { .. } => ExErrorKind::Serialization,
            FlowDumpError::CommandSpawn { .. } | FlowDumpError::CommandFailed { .. } => {
                ExErrorKind::ExternalCommand
            }
            FlowDumpError::WrongDeviceRole { .. } => ExErrorKind::WrongDeviceRole,
            FlowDumpError::Store { .. } => ExErrorKind::Store,
            FlowDumpError::SessionFailed { .. } => ExErrorKind::SessionFailed,
            FlowDumpError::Internal { .. } => ExErrorKind::Internal,
        }
    }

    /// Build a store error from any displayable cause
    pub fn store(op: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        FlowDumpError::Store {
            op: op.into(),
            message: cause.to_string(),
        }
    }
}

impl From<FlowDumpError> for ExError {
    fn from(err: FlowDumpError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            FlowDumpError::CreateDir { .. } => ExError::new(kind)
                .with_op("create_request_dir")
                .with_message(message),
            FlowDumpError::WriteFile { .. } => ExError::new(kind)
                .with_op("write_request")
                .with_message(message),
            FlowDumpError::CommandSpawn { .. } | FlowDumpError::CommandFailed { .. } => {
                ExError::new(kind)
                    .with_op("apply_request")
                    .with_message(message)
            }
            FlowDumpError::WrongDeviceRole { .. } => ExError::new(kind)
                .with_op("check_device_role")
                .with_message(message),
            FlowDumpError::Store { op, .. } => ExError::new(kind).with_op(op).with_message(message),
            FlowDumpError::SessionFailed { session } => ExError::new(kind)
                .with_op("wait_for_session")
                .with_session(session)
                .with_message(message),
            FlowDumpError::InvalidInput { .. }
            | FlowDumpError::Config { .. }
            | FlowDumpError::Serialization { .. }
            | FlowDumpError::Internal { .. } => ExError::new(kind).with_message(message),
        }
    }
}

impl From<serde_json::Error> for FlowDumpError {
    fn from(err: serde_json::Error) -> Self {
        FlowDumpError::Serialization {
            message: err.to_string(),
        }
    }
}
