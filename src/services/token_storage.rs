// ============================================================================
// TOKEN STORAGE - Persistencia del bearer token
// ============================================================================
// Una sola clave en localStorage con el token como string plano.
// Clave ausente = anónimo.
// ============================================================================

use web_sys::{window, Storage};

use crate::config::CONFIG;
use crate::errors::StorageError;

/// Almacenamiento durable del token
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), StorageError>;
    fn clear(&self);
}

/// localStorage del navegador
#[derive(Clone, Debug, PartialEq)]
pub struct LocalTokenStore {
    key: String,
}

impl LocalTokenStore {
    pub fn new() -> Self {
        Self::with_key(CONFIG.token_storage_key.clone())
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Default for LocalTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        let token = get_local_storage()?.get_item(&self.key).ok()??;
        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        get_local_storage()
            .ok_or(StorageError::Unavailable)?
            .set_item(&self.key, token)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn clear(&self) {
        let removed = get_local_storage()
            .map(|storage| storage.remove_item(&self.key).is_ok())
            .unwrap_or(false);
        if !removed {
            log::warn!("⚠️ No se pudo eliminar {} de localStorage", self.key);
        }
    }
}
