use yew::prelude::*;

use crate::components::AuthFormView;
use crate::viewmodels::FormMode;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    html! { <AuthFormView mode={FormMode::Login} /> }
}
