pub mod app;
pub mod layout;
pub mod protected_route;
pub mod auth_form;
pub mod login_page;
pub mod signup_page;
pub mod home_page;
pub mod dashboard_page;
pub mod not_found;

pub use app::App;
pub use layout::Layout;
pub use protected_route::ProtectedRoute;
pub use auth_form::AuthFormView;
pub use login_page::LoginPage;
pub use signup_page::SignupPage;
pub use home_page::HomePage;
pub use dashboard_page::DashboardPage;
pub use not_found::NotFound;
