use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_auth;
use crate::router::Route;
use crate::state::{guard_decision, GuardDecision};

#[derive(Properties, PartialEq)]
pub struct ProtectedRouteProps {
    pub children: Children,
}

/// Renderiza los hijos solo con sesión autenticada.
///
/// Mientras la sesión carga muestra un placeholder; sin sesión reemplaza la
/// entrada del historial por `/login` (el destino original no se guarda).
#[function_component(ProtectedRoute)]
pub fn protected_route(props: &ProtectedRouteProps) -> Html {
    let auth = use_auth();
    let navigator = use_navigator();
    let decision = guard_decision(&auth.session);

    use_effect_with(decision, move |decision| {
        if *decision == GuardDecision::RedirectToLogin {
            log::info!("🔒 Ruta protegida sin sesión, redirigiendo a /login");
            if let Some(navigator) = navigator {
                navigator.replace(&Route::Login);
            }
        }
        || ()
    });

    match decision {
        GuardDecision::Wait => html! {
            <div class="loading">{"Loading..."}</div>
        },
        GuardDecision::RedirectToLogin => html! {},
        GuardDecision::Allow => html! { <>{props.children.clone()}</> },
    }
}
