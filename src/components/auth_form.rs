use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::{use_auth, use_mounted};
use crate::router::Route;
use crate::viewmodels::{AuthForm, FormAction, FormMode};

#[derive(Properties, PartialEq)]
pub struct AuthFormViewProps {
    pub mode: FormMode,
}

/// Formulario compartido de login y signup
#[function_component(AuthFormView)]
pub fn auth_form_view(props: &AuthFormViewProps) -> Html {
    let mode = props.mode;
    let form = use_reducer(move || AuthForm::new(mode));
    let auth = use_auth();
    let navigator = use_navigator();
    let mounted = use_mounted();

    let on_email_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.dispatch(FormAction::SetEmail(input.value()));
        })
    };

    let on_password_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.dispatch(FormAction::SetPassword(input.value()));
        })
    };

    let on_confirm_input = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.dispatch(FormAction::SetPasswordConfirm(input.value()));
        })
    };

    let on_submit = {
        let form = form.clone();
        let store = auth.store.clone();
        let navigator = navigator.clone();
        let mounted = mounted.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !form.can_submit() {
                return;
            }

            let credentials = match form.validate() {
                Ok(credentials) => credentials,
                Err(message) => {
                    form.dispatch(FormAction::Rejected(message));
                    return;
                }
            };
            form.dispatch(FormAction::Submitted);

            let form = form.clone();
            let store = store.clone();
            let navigator = navigator.clone();
            let mounted = mounted.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match mode {
                    FormMode::Login => store.login(&credentials.email, &credentials.password).await,
                    FormMode::Signup => store.signup(&credentials.email, &credentials.password).await,
                };

                // Respuesta tardía: el formulario ya no existe
                if !*mounted.borrow() {
                    return;
                }

                match result {
                    Ok(_) => {
                        form.dispatch(FormAction::Succeeded);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(error) => {
                        log::error!("❌ Error en {:?}: {}", mode, error);
                        form.dispatch(FormAction::Failed(error.user_message()));
                    }
                }
            });
        })
    };

    let confirm_field = if mode == FormMode::Signup {
        html! {
            <div class="form-group">
                <label for="password-confirm">{"Confirm password:"}</label>
                <input
                    type="password"
                    id="password-confirm"
                    value={form.password_confirm.clone()}
                    oninput={on_confirm_input}
                    required=true
                />
            </div>
        }
    } else {
        html! {}
    };

    let footer = match mode {
        FormMode::Login => html! {
            <p>
                {"Don't have an account? "}
                <Link<Route> to={Route::Signup}>{"Sign Up"}</Link<Route>>
            </p>
        },
        FormMode::Signup => html! {
            <p>
                {"Already have an account? "}
                <Link<Route> to={Route::Login}>{"Login"}</Link<Route>>
            </p>
        },
    };

    html! {
        <div class="auth-page">
            <h2>{form.title()}</h2>
            <form class="auth-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="email">{"Email:"}</label>
                    <input
                        type="email"
                        id="email"
                        value={form.email.clone()}
                        oninput={on_email_input}
                        required=true
                    />
                </div>
                <div class="form-group">
                    <label for="password">{"Password:"}</label>
                    <input
                        type="password"
                        id="password"
                        value={form.password.clone()}
                        oninput={on_password_input}
                        required=true
                    />
                </div>
                {confirm_field}
                if let Some(error) = form.error.clone() {
                    <p class="form-error">{error}</p>
                }
                <button type="submit" disabled={!form.can_submit()}>
                    {form.button_label()}
                </button>
            </form>
            {footer}
        </div>
    }
}
