// ============================================================================
// SESSION STATE - Máquina de estados de autenticación (pura, sin I/O)
// ============================================================================
// El AuthStore hace los efectos (red, localStorage) y luego llama a
// `Session::apply` con el evento resultante.
// ============================================================================

use crate::models::User;

/// Fase derivada de la sesión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// Antes de leer localStorage
    Uninitialized,
    /// Hay token guardado y se está validando con `/users/me`
    Restoring,
    Authenticated,
    Anonymous,
}

/// Resultado de una operación del store, ya resuelto
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    /// Arranque: token leído de localStorage (o ninguno)
    Started { stored_token: Option<String> },
    /// `/users/me` aceptó el token restaurado
    Validated(User),
    /// Login completo: token emitido y usuario obtenido
    LoggedIn { token: String, user: User },
    /// Logout explícito o implícito (token inválido, login fallido)
    Cleared,
}

/// Sesión en memoria. Solo el AuthStore la modifica.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
    loading: bool,
    initialized: bool,
}

impl Session {
    /// Sesión vacía al arrancar (`loading` hasta saber si hay token)
    pub fn new() -> Self {
        Self {
            token: None,
            user: None,
            loading: true,
            initialized: false,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Autenticado = token validado y usuario presente
    pub fn is_authenticated(&self) -> bool {
        !self.loading && self.token.is_some() && self.user.is_some()
    }

    pub fn phase(&self) -> AuthPhase {
        if !self.initialized {
            AuthPhase::Uninitialized
        } else if self.loading {
            AuthPhase::Restoring
        } else if self.is_authenticated() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Anonymous
        }
    }

    /// Función de transición. Eventos que no aplican a la fase actual
    /// dejan la sesión igual.
    pub fn apply(&self, event: AuthEvent) -> Session {
        match (self.phase(), event) {
            (_, AuthEvent::Started { stored_token }) => {
                let token = stored_token.filter(|token| !token.trim().is_empty());
                Session {
                    loading: token.is_some(),
                    token,
                    user: None,
                    initialized: true,
                }
            }
            (AuthPhase::Restoring, AuthEvent::Validated(user)) => Session {
                token: self.token.clone(),
                user: Some(user),
                loading: false,
                initialized: true,
            },
            (AuthPhase::Uninitialized | AuthPhase::Restoring, AuthEvent::LoggedIn { .. }) => {
                self.clone()
            }
            (_, AuthEvent::LoggedIn { token, user }) => Session {
                token: Some(token),
                user: Some(user),
                loading: false,
                initialized: true,
            },
            (_, AuthEvent::Cleared) => Session::anonymous(),
            (_, AuthEvent::Validated(_)) => self.clone(),
        }
    }

    fn anonymous() -> Session {
        Session {
            token: None,
            user: None,
            loading: false,
            initialized: true,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
