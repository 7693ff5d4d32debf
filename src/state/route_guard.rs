use crate::state::Session;

/// Qué hace una ruta protegida con la sesión actual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Validación pendiente: placeholder, sin redirigir todavía
    Wait,
    /// Anónimo: a `/login` (sin recordar el destino)
    RedirectToLogin,
    Allow,
}

pub fn guard_decision(session: &Session) -> GuardDecision {
    if session.is_loading() {
        GuardDecision::Wait
    } else if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectToLogin
    }
}
