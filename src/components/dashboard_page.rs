use yew::prelude::*;

use crate::hooks::{use_auth, use_mounted};
use crate::viewmodels::{ChatbotsState, DashboardViewModel};

/// Perfil del usuario + sus chatbots. Solo se monta dentro de `ProtectedRoute`.
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let auth = use_auth();
    let mounted = use_mounted();
    let chatbots = use_state(|| ChatbotsState::Loading);

    {
        let store = auth.store.clone();
        let chatbots = chatbots.clone();
        let mounted = mounted.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                let vm = DashboardViewModel::new();
                let state = vm.load_chatbots(&store).await;
                if *mounted.borrow() {
                    chatbots.set(state);
                }
            });
            || ()
        });
    }

    let Some(user) = auth.session.user().cloned() else {
        return html! {};
    };

    let chatbot_section = match &*chatbots {
        ChatbotsState::Loading => html! { <p>{"Loading chatbots..."}</p> },
        ChatbotsState::Loaded(list) if list.is_empty() => html! {
            <p>{"You don't have any chatbots yet."}</p>
        },
        ChatbotsState::Loaded(list) => html! {
            <table class="chatbot-table">
                <thead>
                    <tr><th>{"Name"}</th><th>{"Created"}</th></tr>
                </thead>
                <tbody>
                    { for list.iter().map(|bot| html! {
                        <tr key={bot.id.to_string()}>
                            <td>{bot.name.clone()}</td>
                            <td>{bot.created_label()}</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        },
        ChatbotsState::Failed(message) => html! {
            <p class="form-error">{message.clone()}</p>
        },
        // El guard redirige en cuanto la sesión cambia
        ChatbotsState::SessionExpired => html! {},
    };

    html! {
        <div class="dashboard-page">
            <h2>{"Dashboard"}</h2>
            <section class="profile">
                <p>{format!("Signed in as {}", user.email)}</p>
                if let Some(id) = user.id {
                    <p>{format!("User #{}", id)}</p>
                }
                if user.is_superuser {
                    <p class="badge">{"Administrator"}</p>
                }
            </section>
            <section class="chatbots">
                <h3>{"Your chatbots"}</h3>
                {chatbot_section}
            </section>
        </div>
    }
}
