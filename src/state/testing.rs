//! Dobles en memoria del backend y de localStorage para los tests del store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::errors::{ApiError, ApiOperation, StorageError};
use crate::models::{TokenResponse, User};
use crate::services::{AuthApi, TokenStore};

#[derive(Default)]
struct BackendState {
    /// email → (password, token)
    accounts: HashMap<String, (String, String)>,
    /// token → email
    tokens: HashMap<String, String>,
    login_detail: Option<String>,
    signup_error: Option<(u16, Option<String>)>,
    /// token que se asigna a las cuentas creadas por signup
    signup_token: Option<String>,
    offline: bool,
    login_gate: Option<oneshot::Receiver<()>>,
    calls: Vec<String>,
}

/// Backend programable: cuentas, tokens revocados, errores de signup
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Rc<RefCell<BackendState>>,
}

/// Suelta un login retenido con `hold_next_login`
pub struct Gate(oneshot::Sender<()>);

impl Gate {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(self, email: &str, password: &str, token: &str) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state
                .accounts
                .insert(email.to_string(), (password.to_string(), token.to_string()));
            state.tokens.insert(token.to_string(), email.to_string());
        }
        self
    }

    pub fn with_login_detail(self, detail: &str) -> Self {
        self.state.borrow_mut().login_detail = Some(detail.to_string());
        self
    }

    pub fn with_signup_status(self, status: u16, detail: Option<&str>) -> Self {
        self.state.borrow_mut().signup_error = Some((status, detail.map(str::to_string)));
        self
    }

    pub fn allow_signup(self, token: &str) -> Self {
        self.state.borrow_mut().signup_token = Some(token.to_string());
        self
    }

    /// El token sigue emitiéndose en login pero `/users/me` lo rechaza
    pub fn revoke(self, token: &str) -> Self {
        self.state.borrow_mut().tokens.remove(token);
        self
    }

    pub fn offline(self) -> Self {
        self.state.borrow_mut().offline = true;
        self
    }

    pub fn hold_next_login(&self) -> Gate {
        let (sender, receiver) = oneshot::channel();
        self.state.borrow_mut().login_gate = Some(receiver);
        Gate(sender)
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        if state.offline {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthApi for FakeBackend {
    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        self.record(format!("login {}", email))?;

        let gate = self.state.borrow_mut().login_gate.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let state = self.state.borrow();
        match state.accounts.get(email) {
            Some((expected, token)) if expected == password => Ok(TokenResponse {
                access_token: token.clone(),
                token_type: "bearer".to_string(),
            }),
            _ => Err(ApiError::from_status(
                ApiOperation::Login,
                401,
                state.login_detail.clone(),
            )),
        }
    }

    async fn signup(&self, email: &str, password: &str) -> Result<User, ApiError> {
        self.record(format!("signup {}", email))?;

        let mut state = self.state.borrow_mut();
        if let Some((status, detail)) = state.signup_error.clone() {
            return Err(ApiError::from_status(ApiOperation::Signup, status, detail));
        }
        let token = state
            .signup_token
            .clone()
            .unwrap_or_else(|| format!("tok-{}", email));
        state
            .accounts
            .insert(email.to_string(), (password.to_string(), token.clone()));
        state.tokens.insert(token, email.to_string());
        Ok(User::new(email))
    }

    async fn get_current_user(&self, token: &str) -> Result<User, ApiError> {
        self.record(format!("me {}", token))?;

        let state = self.state.borrow();
        match state.tokens.get(token) {
            Some(email) => Ok(User::new(email.as_str())),
            None => Err(ApiError::from_status(
                ApiOperation::CurrentUser,
                401,
                Some("Could not validate credentials".to_string()),
            )),
        }
    }
}

/// localStorage en memoria
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
    failing: bool,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        *store.token.borrow_mut() = Some(token.to_string());
        store
    }

    /// Escrituras siempre fallan (modo privado sin localStorage)
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn get(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.get()
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable);
        }
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}
