use yew::prelude::*;

use crate::hooks::AuthContext;

/// Sesión + store del `AuthProvider` más cercano.
///
/// Usarlo fuera de `<AuthProvider>` es un error de programación.
#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("use_auth must be used within an <AuthProvider>")
}
