use thiserror::Error;

/// Failures reported by the remote service or by device resources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("network or server error: {0}")]
    NetworkOrServer(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("cancelled by user")]
    UserCancelled,
}

impl ClientError {
    pub fn server(message: impl Into<String>) -> Self {
        ClientError::NetworkOrServer(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            ClientError::NetworkOrServer(_) => "network_or_server",
            ClientError::PermissionDenied(_) => "permission_denied",
            ClientError::UserCancelled => "user_cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BinderError {
    #[error("screen is no longer mounted")]
    Unmounted,
    #[error("a mutation is already in flight for this screen")]
    MutationInFlight,
    #[error("screen has no loaded data yet")]
    NotReady,
}

impl BinderError {
    pub fn code(&self) -> &'static str {
        match self {
            BinderError::Unmounted => "unmounted",
            BinderError::MutationInFlight => "mutation_in_flight",
            BinderError::NotReady => "not_ready",
        }
    }
}

/// Protocol-level misuse of the screen host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("no session; call session.start first")]
    NoSession,
    #[error("unknown screen kind: {0}")]
    UnknownScreenKind(String),
    #[error("screen {kind} is not available for role {role}")]
    Forbidden { kind: String, role: String },
    #[error("unknown screen id: {0}")]
    UnknownScreen(String),
    #[error("unknown confirmation id: {0}")]
    UnknownConfirmation(String),
    #[error("missing parameter: {0}")]
    MissingParam(&'static str),
    #[error("{action} is not supported by screen {kind}")]
    Unsupported { kind: String, action: &'static str },
    #[error("record {0} is not on this screen")]
    UnknownRecord(String),
    #[error("no image selected")]
    NoSelection,
    #[error(transparent)]
    Binder(#[from] BinderError),
}

impl HostError {
    pub fn code(&self) -> &'static str {
        match self {
            HostError::NoSession => "no_session",
            HostError::UnknownScreenKind(_) => "unknown_screen_kind",
            HostError::Forbidden { .. } => "forbidden",
            HostError::UnknownScreen(_) => "unknown_screen",
            HostError::UnknownConfirmation(_) => "unknown_confirmation",
            HostError::MissingParam(_) => "bad_params",
            HostError::Unsupported { .. } => "unsupported",
            HostError::UnknownRecord(_) => "not_found",
            HostError::NoSelection => "no_selection",
            HostError::Binder(e) => e.code(),
        }
    }
}
