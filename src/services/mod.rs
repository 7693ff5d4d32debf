pub mod api_client;
pub mod token_storage;

pub use api_client::{ApiClient, AuthApi};
pub use token_storage::{LocalTokenStore, TokenStore};
