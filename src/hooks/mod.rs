pub mod auth_context;
pub mod use_auth;
pub mod use_mounted;

pub use auth_context::{AuthContext, AuthProvider};
pub use use_auth::use_auth;
pub use use_mounted::use_mounted;
