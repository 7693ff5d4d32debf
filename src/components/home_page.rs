use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <div class="home-page">
            <h2>{"Home Page"}</h2>
            <nav>
                <ul>
                    <li><Link<Route> to={Route::Login}>{"Login"}</Link<Route>></li>
                    <li><Link<Route> to={Route::Signup}>{"Sign Up"}</Link<Route>></li>
                    <li><Link<Route> to={Route::Dashboard}>{"Dashboard (Protected)"}</Link<Route>></li>
                </ul>
            </nav>
        </div>
    }
}
