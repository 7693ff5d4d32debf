// ============================================================================
// ERRORES - Taxonomía de fallos de API, almacenamiento y sesión
// ============================================================================

use thiserror::Error;

pub const FALLBACK_LOGIN_MESSAGE: &str = "Login failed. Please check your credentials.";
pub const FALLBACK_SIGNUP_MESSAGE: &str = "Signup failed. Please check the form and try again.";
pub const FALLBACK_CONFLICT_MESSAGE: &str = "An account with this email already exists.";
pub const FALLBACK_NETWORK_MESSAGE: &str = "Cannot reach the server. Please try again later.";
pub const FALLBACK_UNKNOWN_MESSAGE: &str = "Something went wrong. Please try again.";
pub const FALLBACK_SESSION_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Endpoint que originó el fallo; decide cómo se clasifica un status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    Login,
    Signup,
    CurrentUser,
    Chatbots,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Sin respuesta del servidor
    #[error("network error: {0}")]
    Network(String),
    /// Credenciales o token rechazados
    #[error("authentication failed ({status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Auth { status: u16, message: Option<String> },
    #[error("validation failed ({status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Validation { status: u16, message: Option<String> },
    #[error("conflict ({status}): {}", .message.as_deref().unwrap_or("no detail"))]
    Conflict { status: u16, message: Option<String> },
    #[error("unexpected response{}: {}", .status.map(|s| format!(" ({})", s)).unwrap_or_default(), .message.as_deref().unwrap_or("no detail"))]
    Unknown { status: Option<u16>, message: Option<String> },
}

impl ApiError {
    /// Clasifica una respuesta no-2xx según la operación que la produjo.
    ///
    /// - login: 400 (usuario inactivo), 401 y 403 son fallos de autenticación
    /// - signup: 400 y 409 son conflicto (email duplicado), el resto de 4xx validación
    /// - endpoints con bearer: 401, 403 y 404 significan token rechazado
    pub fn from_status(operation: ApiOperation, status: u16, message: Option<String>) -> Self {
        match (operation, status) {
            (_, 422) => ApiError::Validation { status, message },
            (ApiOperation::Login, 400 | 401 | 403) => ApiError::Auth { status, message },
            (ApiOperation::Signup, 401 | 403) => ApiError::Auth { status, message },
            (ApiOperation::Signup, 400 | 409) => ApiError::Conflict { status, message },
            (ApiOperation::Signup, 402..=499) => ApiError::Validation { status, message },
            (ApiOperation::CurrentUser | ApiOperation::Chatbots, 401 | 403 | 404) => {
                ApiError::Auth { status, message }
            }
            _ => ApiError::Unknown { status: Some(status), message },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network(_) => None,
            ApiError::Auth { status, .. }
            | ApiError::Validation { status, .. }
            | ApiError::Conflict { status, .. } => Some(*status),
            ApiError::Unknown { status, .. } => *status,
        }
    }

    /// Mensaje del backend, si lo hubo
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Network(_) => None,
            ApiError::Auth { message, .. }
            | ApiError::Validation { message, .. }
            | ApiError::Conflict { message, .. }
            | ApiError::Unknown { message, .. } => message.as_deref(),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }

    /// Texto para el formulario: mensaje del backend o fallback genérico
    pub fn user_message(&self) -> String {
        if let Some(message) = self.backend_message() {
            return message.to_string();
        }
        match self {
            ApiError::Network(_) => FALLBACK_NETWORK_MESSAGE,
            ApiError::Auth { .. } => FALLBACK_LOGIN_MESSAGE,
            ApiError::Validation { .. } => FALLBACK_SIGNUP_MESSAGE,
            ApiError::Conflict { .. } => FALLBACK_CONFLICT_MESSAGE,
            ApiError::Unknown { .. } => FALLBACK_UNKNOWN_MESSAGE,
        }
        .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("could not write to localStorage: {0}")]
    Write(String),
}

/// Fallos de las operaciones del AuthStore
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Ya hay un login/signup/restore en curso
    #[error("another session operation is already in progress")]
    Busy,
    /// login/signup antes de que el store lea (y valide) el token guardado
    #[error("the session has not been initialized yet")]
    NotReady,
    /// La sesión cambió (logout) mientras se esperaba la respuesta
    #[error("the session changed while the request was in flight")]
    Superseded,
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Api(error) => error.user_message(),
            SessionError::Storage(_) => FALLBACK_UNKNOWN_MESSAGE.to_string(),
            SessionError::Busy => "Please wait for the current request to finish.".to_string(),
            SessionError::NotReady => "Still checking your session, please try again.".to_string(),
            SessionError::Superseded => FALLBACK_SESSION_MESSAGE.to_string(),
        }
    }

    pub fn api(&self) -> Option<&ApiError> {
        match self {
            SessionError::Api(error) => Some(error),
            _ => None,
        }
    }
}
