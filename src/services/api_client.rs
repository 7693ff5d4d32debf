// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de sesión: un request, una respuesta, sin retry ni cache
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::UrlSearchParams;

use crate::config::CONFIG;
use crate::errors::{ApiError, ApiOperation};
use crate::models::{Chatbot, ErrorBody, SignupRequest, TokenResponse, User};

/// Operaciones del backend que necesita el AuthStore.
///
/// `ApiClient` es la implementación real; los tests del store usan un backend
/// en memoria.
#[async_trait(?Send)]
pub trait AuthApi {
    /// `POST /login/token` (form-urlencoded: `username`, `password`)
    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError>;

    /// `POST /users/` (JSON: `email`, `password`)
    async fn signup(&self, email: &str, password: &str) -> Result<User, ApiError>;

    /// `GET /users/me` con `Authorization: Bearer <token>`
    async fn get_current_user(&self, token: &str) -> Result<User, ApiError>;
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.api_base_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Listar chatbots del usuario autenticado
    pub async fn list_chatbots(&self, token: &str) -> Result<Vec<Chatbot>, ApiError> {
        let url = self.url("/chatbots/");
        log::info!("🤖 Obteniendo chatbots del usuario...");

        let response = Request::get(&url)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let chatbots = parse_response::<Vec<Chatbot>>(ApiOperation::Chatbots, response).await?;
        log::info!("✅ Chatbots obtenidos: {}", chatbots.len());
        Ok(chatbots)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let url = self.url("/login/token");
        log::info!("🔐 Solicitando token para: {}", email);

        let body = form_body(&[("username", email), ("password", password)])?;
        let response = Request::post(&url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .map_err(|e| ApiError::Unknown { status: None, message: Some(e.to_string()) })?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        parse_response(ApiOperation::Login, response).await
    }

    async fn signup(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let url = self.url("/users/");
        log::info!("📝 Creando cuenta para: {}", email);

        let request = SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = Request::post(&url)
            .json(&request)
            .map_err(|e| ApiError::Unknown { status: None, message: Some(e.to_string()) })?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        parse_response(ApiOperation::Signup, response).await
    }

    async fn get_current_user(&self, token: &str) -> Result<User, ApiError> {
        let url = self.url("/users/me");

        let response = Request::get(&url)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        parse_response(ApiOperation::CurrentUser, response).await
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

fn form_body(fields: &[(&str, &str)]) -> Result<String, ApiError> {
    let params = UrlSearchParams::new().map_err(|e| ApiError::Unknown {
        status: None,
        message: Some(format!("{:?}", e)),
    })?;
    for (name, value) in fields {
        params.append(name, value);
    }
    Ok(params.to_string().into())
}

/// 2xx → body parseado; cualquier otro status → error clasificado por operación
async fn parse_response<T: DeserializeOwned>(
    operation: ApiOperation,
    response: Response,
) -> Result<T, ApiError> {
    let status = response.status();

    if !response.ok() {
        let message = response
            .text()
            .await
            .ok()
            .and_then(|raw| ErrorBody::parse_message(&raw));
        let error = ApiError::from_status(operation, status, message);
        log::warn!("⚠️ {:?} rechazado: {}", operation, error);
        return Err(error);
    }

    response.json::<T>().await.map_err(|e| {
        log::error!("❌ Respuesta inválida de {:?}: {}", operation, e);
        ApiError::Unknown {
            status: Some(status),
            message: None,
        }
    })
}
