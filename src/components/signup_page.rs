use yew::prelude::*;

use crate::components::AuthFormView;
use crate::viewmodels::FormMode;

/// Crea la cuenta y, si va bien, entra directamente con esas credenciales
#[function_component(SignupPage)]
pub fn signup_page() -> Html {
    html! { <AuthFormView mode={FormMode::Signup} /> }
}
