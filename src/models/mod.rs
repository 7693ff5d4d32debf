pub mod auth;
pub mod user;
pub mod chatbot;

pub use auth::{Credentials, ErrorBody, SignupRequest, TokenResponse};
pub use user::User;
pub use chatbot::Chatbot;
