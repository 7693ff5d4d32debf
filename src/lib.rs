// ============================================================================
// CHATBOT PORTAL - FRONTEND YEW (RUST + WASM)
// ============================================================================
// - Models: Estructuras compartidas con backend
// - Services: SOLO comunicación API + localStorage
// - State: Sesión de autenticación (máquina de estados + AuthStore)
// - ViewModels: Estado + lógica de formularios/dashboard
// - Hooks: Context del AuthStore para los componentes
// - Components: Páginas, layout y guard de rutas
// ============================================================================

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod viewmodels;
pub mod hooks;
pub mod router;
pub mod components;

use crate::config::CONFIG;

/// Inicializa panic hook + logging y monta la app en `<body>`
pub fn run() {
    console_error_panic_hook::set_once();

    if CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
    }
    log::info!(
        "🚀 Chatbot Portal ({}) → {}",
        CONFIG.environment,
        CONFIG.api_base_url()
    );

    yew::Renderer::<components::App>::new().render();
}
