use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::{
    DashboardPage, HomePage, Layout, LoginPage, NotFound, ProtectedRoute, SignupPage,
};
use crate::hooks::AuthProvider;
use crate::router::Route;

fn page(route: &Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Signup => html! { <SignupPage /> },
        Route::Dashboard => html! { <DashboardPage /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

fn switch(route: Route) -> Html {
    if route.is_protected() {
        html! { <ProtectedRoute>{page(&route)}</ProtectedRoute> }
    } else {
        page(&route)
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <AuthProvider>
                <Layout>
                    <Switch<Route> render={switch} />
                </Layout>
            </AuthProvider>
        </BrowserRouter>
    }
}
