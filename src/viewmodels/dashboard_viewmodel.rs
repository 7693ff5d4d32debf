// ============================================================================
// DASHBOARD VIEWMODEL - Chatbots del usuario autenticado
// ============================================================================

use crate::errors::ApiError;
use crate::models::Chatbot;
use crate::services::ApiClient;
use crate::state::AuthStore;

#[derive(Debug, Clone, PartialEq)]
pub enum ChatbotsState {
    Loading,
    Loaded(Vec<Chatbot>),
    Failed(String),
    /// El backend rechazó el token: el store ya cerró la sesión
    SessionExpired,
}

/// ViewModel del dashboard - SOLO lógica, la vista guarda el resultado
pub struct DashboardViewModel {
    api_client: ApiClient,
}

impl DashboardViewModel {
    pub fn new() -> Self {
        Self {
            api_client: ApiClient::new(),
        }
    }

    pub async fn load_chatbots(&self, store: &AuthStore) -> ChatbotsState {
        let Some(token) = store.token() else {
            return ChatbotsState::SessionExpired;
        };
        let result = self.api_client.list_chatbots(&token).await;
        Self::resolve(result, &token, store)
    }

    /// Un 401/403 aquí es un logout implícito, salvo que `token_used` ya no sea
    /// el de la sesión actual. Otros errores se muestran inline.
    pub fn resolve(
        result: Result<Vec<Chatbot>, ApiError>,
        token_used: &str,
        store: &AuthStore,
    ) -> ChatbotsState {
        match result {
            Ok(chatbots) => ChatbotsState::Loaded(chatbots),
            Err(error) if store.expire_if_unauthorized(token_used, &error) => {
                ChatbotsState::SessionExpired
            }
            Err(error) => {
                log::error!("❌ Error obteniendo chatbots: {}", error);
                ChatbotsState::Failed(error.user_message())
            }
        }
    }
}

impl Default for DashboardViewModel {
    fn default() -> Self {
        Self::new()
    }
}
