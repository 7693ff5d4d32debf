use serde::{Deserialize, Serialize};

/// Credenciales de formulario. Nunca se persisten, solo viajan como parámetros.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Debug manual para que el password nunca acabe en un log
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Respuesta de `POST /login/token`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Body JSON de `POST /users/`
#[derive(Clone, PartialEq, Serialize, Debug)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

/// Cuerpo de error del backend. `detail` es un string, o una lista de
/// `{loc, msg, type}` cuando falla la validación del body (422).
#[derive(Clone, PartialEq, Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<ErrorDetail>,
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Items(Vec<ErrorItem>),
}

#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct ErrorItem {
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    /// Mensaje legible para mostrar al usuario, si el backend envió alguno
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            ErrorDetail::Message(message) => {
                let message = message.trim();
                (!message.is_empty()).then(|| message.to_string())
            }
            ErrorDetail::Items(items) => {
                let joined = items
                    .iter()
                    .filter_map(|item| item.msg.as_deref())
                    .map(str::trim)
                    .filter(|msg| !msg.is_empty())
                    .collect::<Vec<_>>()
                    .join("; ");
                (!joined.is_empty()).then_some(joined)
            }
        }
    }

    /// Parsea un body crudo; cualquier cosa que no sea JSON se ignora
    pub fn parse_message(raw: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(raw).ok()?.message()
    }
}
