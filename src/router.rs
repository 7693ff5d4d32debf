use yew_router::prelude::*;

/// Superficie de navegación de la app
#[derive(Clone, Debug, PartialEq, Eq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    /// Protegida por `ProtectedRoute`
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard)
    }
}
