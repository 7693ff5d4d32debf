// ============================================================================
// AUTH FORM VIEWMODEL - Estado + lógica de los formularios de login/signup
// ============================================================================
// Sin DOM: la vista despacha acciones y pinta lo que hay aquí
// ============================================================================

use std::rc::Rc;

use yew::Reducible;

use crate::models::Credentials;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Login,
    Signup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthForm {
    pub mode: FormMode,
    pub email: String,
    pub password: String,
    /// Solo en signup
    pub password_confirm: String,
    pub error: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SetEmail(String),
    SetPassword(String),
    SetPasswordConfirm(String),
    /// Validación local fallida; no se llamó al store
    Rejected(String),
    /// Llamada al store en curso
    Submitted,
    Failed(String),
    Succeeded,
}

impl AuthForm {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            email: String::new(),
            password: String::new(),
            password_confirm: String::new(),
            error: None,
            submitting: false,
        }
    }

    pub fn login() -> Self {
        Self::new(FormMode::Login)
    }

    pub fn signup() -> Self {
        Self::new(FormMode::Signup)
    }

    /// Validación antes de tocar la red
    pub fn validate(&self) -> Result<Credentials, String> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err("Please fill in all fields.".to_string());
        }
        if !email.contains('@') {
            return Err("Please enter a valid email address.".to_string());
        }
        if self.mode == FormMode::Signup && self.password != self.password_confirm {
            return Err("Passwords do not match.".to_string());
        }
        Ok(Credentials::new(email, self.password.clone()))
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting
    }

    pub fn button_label(&self) -> &'static str {
        match (self.mode, self.submitting) {
            (FormMode::Login, false) => "Login",
            (FormMode::Login, true) => "Logging in...",
            (FormMode::Signup, false) => "Sign Up",
            (FormMode::Signup, true) => "Creating account...",
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Login => "Login",
            FormMode::Signup => "Sign Up",
        }
    }
}

impl Reducible for AuthForm {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FormAction::SetEmail(email) => next.email = email,
            FormAction::SetPassword(password) => next.password = password,
            FormAction::SetPasswordConfirm(confirm) => next.password_confirm = confirm,
            FormAction::Rejected(message) => next.error = Some(message),
            FormAction::Submitted => {
                next.error = None;
                next.submitting = true;
            }
            FormAction::Failed(message) => {
                next.error = Some(message);
                next.submitting = false;
                // El password se vuelve a pedir, el email se conserva
                next.password.clear();
                next.password_confirm.clear();
            }
            FormAction::Succeeded => {
                next.error = None;
                next.submitting = false;
                next.password.clear();
                next.password_confirm.clear();
            }
        }
        Rc::new(next)
    }
}
