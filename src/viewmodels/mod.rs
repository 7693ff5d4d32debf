pub mod auth_form;
pub mod dashboard_viewmodel;

pub use auth_form::{AuthForm, FormAction, FormMode};
pub use dashboard_viewmodel::{ChatbotsState, DashboardViewModel};
