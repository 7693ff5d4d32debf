// ============================================================================
// AUTH CONTEXT - Compartir el AuthStore entre componentes
// ============================================================================
// Usa Context API de Yew. El provider crea el store UNA vez, se suscribe a
// sus cambios y lanza la restauración del token al montarse.
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::services::{ApiClient, LocalTokenStore};
use crate::state::{AuthStore, Session};

/// Lo que reciben los consumidores: el store (para operar) y un snapshot de
/// la sesión (para pintar). Cambia de valor en cada transición.
#[derive(Clone)]
pub struct AuthContext {
    pub store: Rc<AuthStore>,
    pub session: Session,
}

impl PartialEq for AuthContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store) && self.session == other.session
    }
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Children,
}

/// Provider que envuelve la app y proporciona el estado de autenticación
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let store = use_memo((), |_| AuthStore::new(ApiClient::new(), LocalTokenStore::new()));
    let session = use_state(|| store.session());

    {
        let store = store.clone();
        let session = session.clone();
        use_effect_with((), move |_| {
            let subscription = {
                let weak = Rc::downgrade(&store);
                let session = session.clone();
                store.subscribe(move || {
                    if let Some(store) = weak.upgrade() {
                        session.set(store.session());
                    }
                })
            };

            {
                let store = store.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match store.initialize().await {
                        Ok(phase) => log::info!("🔑 [AUTH] Sesión inicial: {:?}", phase),
                        Err(e) => log::warn!("⚠️ [AUTH] Restauración interrumpida: {}", e),
                    }
                });
            }

            move || store.unsubscribe(subscription)
        });
    }

    let context = AuthContext {
        store: store.clone(),
        session: (*session).clone(),
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}
