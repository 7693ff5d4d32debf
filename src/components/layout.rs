use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_auth;
use crate::router::Route;

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

/// Cabecera de navegación + contenido. Todo derivado de la sesión.
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let auth = use_auth();
    let navigator = use_navigator();

    let on_logout = {
        let store = auth.store.clone();
        Callback::from(move |_: MouseEvent| {
            store.logout();
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Login);
            }
        })
    };

    let session_links = match auth.session.user() {
        Some(user) if auth.is_authenticated() => html! {
            <>
                <span class="nav-user">{user.email.clone()}</span>
                <button type="button" class="btn-logout" onclick={on_logout}>{"Logout"}</button>
            </>
        },
        // Validando el token guardado: ni login ni logout todavía
        _ if auth.is_loading() => html! {},
        _ => html! {
            <>
                <Link<Route> to={Route::Login}>{"Login"}</Link<Route>>
                <Link<Route> to={Route::Signup}>{"Sign Up"}</Link<Route>>
            </>
        },
    };

    html! {
        <div class="layout">
            <header class="app-header">
                <nav class="app-nav">
                    <Link<Route> to={Route::Home}>{"Home"}</Link<Route>>
                    <Link<Route> to={Route::Dashboard}>{"Dashboard"}</Link<Route>>
                    {session_links}
                </nav>
            </header>
            <main class="app-main">
                {props.children.clone()}
            </main>
        </div>
    }
}
