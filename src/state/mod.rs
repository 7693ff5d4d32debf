// ============================================================================
// STATE MODULE - Sesión de autenticación + notificaciones
// ============================================================================

pub mod reactivity;
pub mod session_state;
pub mod auth_state;
pub mod route_guard;

#[cfg(test)]
pub(crate) mod testing;

pub use reactivity::*;
pub use session_state::*;
pub use auth_state::*;
pub use route_guard::*;
