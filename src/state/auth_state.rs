// ============================================================================
// AUTH STORE - Dueño único de la Session
// ============================================================================
// Hace los efectos (API + localStorage) y aplica el evento resultante con
// `Session::apply`. Los consumidores solo leen snapshots y se suscriben.
// ============================================================================

use std::cell::Cell;

use crate::errors::{ApiError, SessionError};
use crate::models::User;
use crate::services::{AuthApi, TokenStore};
use crate::state::{AuthEvent, AuthPhase, ReactiveState, Session, SubscriptionId};

pub struct AuthStore {
    api: Box<dyn AuthApi>,
    storage: Box<dyn TokenStore>,
    session: ReactiveState<Session>,
    /// login/signup/restore en curso
    in_flight: Cell<bool>,
    /// Se incrementa en cada logout: respuestas de una época anterior se descartan
    epoch: Cell<u64>,
}

/// Libera el flag `in_flight` aunque el future se abandone a mitad
struct InFlightGuard<'a>(&'a Cell<bool>);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl AuthStore {
    pub fn new(api: impl AuthApi + 'static, storage: impl TokenStore + 'static) -> Self {
        Self {
            api: Box::new(api),
            storage: Box::new(storage),
            session: ReactiveState::new(Session::new()),
            in_flight: Cell::new(false),
            epoch: Cell::new(0),
        }
    }

    /// Snapshot de la sesión actual
    pub fn session(&self) -> Session {
        self.session.get()
    }

    pub fn phase(&self) -> AuthPhase {
        self.session.with(Session::phase)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.session.with(Session::is_loading)
    }

    pub fn token(&self) -> Option<String> {
        self.session.with(|session| session.token().map(str::to_string))
    }

    pub fn user(&self) -> Option<User> {
        self.session.with(|session| session.user().cloned())
    }

    /// Hay un login/signup/restore esperando respuesta
    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) -> SubscriptionId {
        self.session.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.session.unsubscribe(id);
    }

    fn transition(&self, event: AuthEvent) {
        let before = self.phase();
        self.session.update(|session| session.apply(event));
        let after = self.phase();
        if before != after {
            log::info!("🔄 [AUTH] {:?} → {:?}", before, after);
        }
    }

    fn begin(&self) -> Result<InFlightGuard<'_>, SessionError> {
        if self.in_flight.replace(true) {
            log::warn!("⚠️ [AUTH] Operación rechazada: ya hay otra en curso");
            return Err(SessionError::Busy);
        }
        Ok(InFlightGuard(&self.in_flight))
    }

    /// Sin `start` + `restore` un login guardaría un token que la sesión ignora
    fn ensure_ready(&self) -> Result<(), SessionError> {
        match self.phase() {
            AuthPhase::Uninitialized | AuthPhase::Restoring => {
                log::warn!("⚠️ [AUTH] Operación rechazada: sesión sin inicializar");
                Err(SessionError::NotReady)
            }
            _ => Ok(()),
        }
    }

    /// localStorage primero, memoria después
    fn clear_session(&self) {
        self.storage.clear();
        self.transition(AuthEvent::Cleared);
    }

    /// Lee el token de localStorage: `Restoring` si existe, si no `Anonymous`
    pub fn start(&self) -> AuthPhase {
        let stored_token = self.storage.load();
        if stored_token.is_some() {
            log::info!("🔑 [AUTH] Token encontrado en localStorage, validando...");
        }
        self.transition(AuthEvent::Started { stored_token });
        self.phase()
    }

    /// Valida el token restaurado con `/users/me`.
    ///
    /// Si el backend lo rechaza (o no hay red) la sesión se limpia como en un
    /// logout y el resultado es `Ok(Anonymous)`. Fuera de `Restoring` no hace nada.
    pub async fn restore(&self) -> Result<AuthPhase, SessionError> {
        let token = match (self.phase(), self.token()) {
            (AuthPhase::Restoring, Some(token)) => token,
            (phase, _) => return Ok(phase),
        };
        let _guard = self.begin()?;
        let epoch = self.epoch.get();

        let result = self.api.get_current_user(&token).await;

        if self.epoch.get() != epoch {
            log::info!("ℹ️ [AUTH] Validación descartada: la sesión cambió mientras tanto");
            return Err(SessionError::Superseded);
        }

        match result {
            Ok(user) => {
                log::info!("✅ [AUTH] Sesión restaurada: {}", user.email);
                self.transition(AuthEvent::Validated(user));
            }
            Err(error) => {
                log::warn!("⚠️ [AUTH] Token guardado rechazado ({}), cerrando sesión", error);
                self.clear_session();
            }
        }
        Ok(self.phase())
    }

    /// `start` + `restore`: lo que hace el provider al montarse
    pub async fn initialize(&self) -> Result<AuthPhase, SessionError> {
        match self.start() {
            AuthPhase::Restoring => self.restore().await,
            phase => Ok(phase),
        }
    }

    /// Login: token → localStorage → `/users/me` → `Authenticated`.
    ///
    /// Cualquier fallo deja la sesión en `Anonymous` sin token guardado y se
    /// propaga a la vista.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let _guard = self.begin()?;
        self.ensure_ready()?;
        self.login_inner(email, password).await
    }

    /// Signup y, si va bien, el login completo con las mismas credenciales.
    /// Un fallo de signup no intenta login ni toca la sesión.
    pub async fn signup(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let _guard = self.begin()?;
        self.ensure_ready()?;
        let epoch = self.epoch.get();

        if let Err(error) = self.api.signup(email, password).await {
            log::warn!("⚠️ [AUTH] Signup rechazado para {}: {}", email, error);
            return Err(error.into());
        }
        log::info!("✅ [AUTH] Cuenta creada: {}", email);

        if self.epoch.get() != epoch {
            return Err(SessionError::Superseded);
        }
        self.login_inner(email, password).await
    }

    async fn login_inner(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let epoch = self.epoch.get();

        let token = match self.api.login(email, password).await {
            Ok(response) => response.access_token,
            Err(error) => return Err(self.fail_login(epoch, error.into())),
        };
        if self.epoch.get() != epoch {
            return Err(SessionError::Superseded);
        }

        if let Err(error) = self.storage.save(&token) {
            log::error!("❌ [AUTH] No se pudo guardar el token: {}", error);
            return Err(self.fail_login(epoch, error.into()));
        }

        let user = match self.api.get_current_user(&token).await {
            Ok(user) => user,
            Err(error) => return Err(self.fail_login(epoch, error.into())),
        };
        if self.epoch.get() != epoch {
            // El logout ya borró localStorage
            return Err(SessionError::Superseded);
        }

        log::info!("✅ [AUTH] Login correcto: {}", user.email);
        self.transition(AuthEvent::LoggedIn {
            token,
            user: user.clone(),
        });
        Ok(user)
    }

    fn fail_login(&self, epoch: u64, error: SessionError) -> SessionError {
        log::warn!("⚠️ [AUTH] Login fallido: {}", error);
        if self.epoch.get() == epoch {
            self.clear_session();
        }
        error
    }

    /// Logout explícito. Idempotente; invalida cualquier respuesta en vuelo.
    pub fn logout(&self) {
        self.epoch.set(self.epoch.get() + 1);
        if self.phase() != AuthPhase::Anonymous || self.storage.load().is_some() {
            log::info!("👋 [AUTH] Logout");
        }
        self.clear_session();
    }

    /// Logout implícito cuando otra llamada con bearer devuelve 401/403.
    /// Devuelve `true` si el error era de autenticación. Solo cierra la sesión
    /// si `token_used` sigue siendo el token actual.
    pub fn expire_if_unauthorized(&self, token_used: &str, error: &ApiError) -> bool {
        if !error.is_auth() {
            return false;
        }
        if self.token().as_deref() != Some(token_used) {
            log::info!("ℹ️ [AUTH] 401 de un token anterior, se ignora");
            return true;
        }
        log::warn!("⚠️ [AUTH] Token rechazado por el backend, cerrando sesión");
        self.logout();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StorageError;
    use crate::state::testing::{FakeBackend, MemoryTokenStore};
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::rc::Rc;

    fn store_with(backend: &FakeBackend, storage: &MemoryTokenStore) -> AuthStore {
        AuthStore::new(backend.clone(), storage.clone())
    }

    #[test]
    fn login_with_valid_credentials_authenticates() {
        let backend = FakeBackend::new().with_account("a@x.com", "secret", "tok-a");
        let storage = MemoryTokenStore::new();
        let store = store_with(&backend, &storage);
        block_on(store.initialize()).unwrap();

        let user = block_on(store.login("a@x.com", "secret")).unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_eq!(store.phase(), AuthPhase::Authenticated);
        assert_eq!(store.user(), Some(user));
        assert_eq!(store.token().as_deref(), Some("tok-a"));
        assert_eq!(storage.get().as_deref(), Some("tok-a"));
        assert!(!store.is_busy());
        assert_eq!(backend.calls(), vec!["login a@x.com", "me tok-a"]);
    }

    #[test]
    fn invalid_credentials_stay_anonymous_with_backend_message() {
        let backend = FakeBackend::new()
            .with_account("a@x.com", "secret", "tok-a")
            .with_login_detail("Incorrect credentials");
        let storage = MemoryTokenStore::new();
        let store = store_with(&backend, &storage);
        block_on(store.initialize()).unwrap();

        let error = block_on(store.login("a@x.com", "wrong")).unwrap_err();

        assert!(error.api().map_or(false, ApiError::is_auth));
        assert_eq!(error.user_message(), "Incorrect credentials");
        assert_eq!(store.phase(), AuthPhase::Anonymous);
        assert_eq!(storage.get(), None);
    }

    #[test]
    fn failed_login_clears_previous_session() {
        let backend = FakeBackend::new().with_account("a@x.com", "secret", "tok-a");
        let storage = MemoryTokenStore::new();
        let store = store_with(&backend, &storage);
        block_on(store.initialize()).unwrap();
        block_on(store.login("a@x.com", "secret")).unwrap();

        assert!(block_on(store.login("a@x.com", "nope")).is_err());

        assert_eq!(store.phase(), AuthPhase::Anonymous);
        assert_eq!(store.token(), None);
        assert_eq!(store.user(), None);
        assert_eq!(storage.get(), None);
    }

    #[test]
    fn token_rejected_right_after_login_leaves_nothing_behind() {
        let backend = FakeBackend::new()
            .with_account("a@x.com", "secret", "tok-a")
            .revoke("tok-a");
        let storage = MemoryTokenStore::new();
        let store = store_with(&backend, &storage);
        block_on(store.initialize()).unwrap();

        let error = block_on(store.login("a@x.com", "secret")).unwrap_err();

        assert!(error.api().map_or(false, ApiError::is_auth));
        assert_eq!(store.phase(), AuthPhase::Anonymous);
        assert_eq!(storage.get(), None);
    }

    #[test]
    fn storage_failure_aborts_login_before_fetching_user() {
        let backend = FakeBackend::new().with_account("a@x.com", "secret", "tok-a");
        let storage = MemoryTokenStore::failing();
        let store = store_with(&backend, &storage);
        block_on(store.initialize()).unwrap();

        let error = block_on(store.login("a@x.com", "secret")).unwrap_err();

        assert_eq!(error, SessionError::Storage(StorageError::Unavailable));
        assert_eq!(store.phase(), AuthPhase::Anonymous);
        assert_eq!(backend.calls(), vec!["login a@x.com"]);
    }

    #[test]
    fn stored_token_is_restored() {
        let backend = FakeBackend::new().with_account("a@x.com", "secret", "abc123");
        let storage = MemoryTokenStore::with_token("abc123");
        let store = store_with(&backend, &storage);

        assert_eq!(store.start(), AuthPhase::Restoring);
        assert!(store.is_loading());
        assert!(!store.is_authenticated());

        let phase = block_on(store.restore()).unwrap();

        assert_eq!(phase, AuthPhase::Authenticated);
        assert_eq!(store.user().map(|u| u.email), Some("a@x.com".to_string()));
        assert_eq!(storage.get().as_deref(), Some("abc123"));
    }

    #[test]
    fn rejected_stored_token_is_erased_and_restart_is_anonymous() {
        let backend = FakeBackend::new();
        let storage = MemoryTokenStore::with_token("expired");
        let store = store_with(&backend, &storage);

        assert_eq!(block_on(store.initialize()).unwrap(), AuthPhase::Anonymous);
        assert_eq!(store.token(), None);
        assert_eq!(storage.get(), None);

        // Segundo intento: igual que un arranque anónimo, sin llamadas a la API
        let calls_before = backend.calls().len();
        assert_eq!(block_on(store.initialize()).unwrap(), AuthPhase::Anonymous);
        assert_eq!(backend.calls().len(), calls_before);
    }

    #[test]
    fn network_failure_during_restore_is_an_implicit_logout() {
        let backend = FakeBackend::new().offline();
        let storage = MemoryTokenStore::with_token("abc123");
        let store = store_with(&backend, &storage);

        assert_eq!(block_on(store.initialize()).unwrap(), AuthPhase::Anonymous);
        assert_eq!(storage.get(), None);
    }

    #[test]
    fn restore_outside_restoring_does_nothing() {
        let backend = FakeBackend::new();
        let storage = MemoryTokenStore::new();
        let store = store_with(&backend, &storage);
        assert_eq!(block_on(store.restore()).unwrap(), AuthPhase::Uninitialized);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn logout_clears_memory_and_storage() {
        let backend = FakeBackend::new().with_account("a@x.com", "secret", "tok-a");
        let storage = MemoryTokenStore::new();
        let store = store_with(&backend, &storage);
        block_on(store.initialize()).unwrap();
        block_on(store.login("a@x.com", "secret")).unwrap();

        store.logout();

        assert_eq!(store.phase(), AuthPhase::Anonymous);
        assert_eq!(store.user(), None);
        assert_eq!(storage.get(), None);
    }

    #[test]
    fn logout_when_anonymous_is_idempotent() {
        let backend = FakeBackend::new();
        let storage = MemoryTokenStore::new();
        let store = store_with(&backend, &storage);
        block_on(store.initialize()).unwrap();
        let before = store.session();

        let notified = Rc::new(Cell::new(0));
        let counter = notified.clone();
        store.subscribe(move || counter.set(counter.get() + 1));

        store.logout();
        store.logout();

        assert_eq!(store.session(), before);
        assert_eq!(storage.get(), None);
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn signup_then_login_matches_plain_login() {
        let signup_backend = FakeBackend::new().allow_signup("tok-new");
        let signup_storage = MemoryTokenStore::new();
        let signup_store = store_with(&signup_backend, &signup_storage);
        block_on(signup_store.initialize()).unwrap();
        block_on(signup_store.signup("new@x.com", "pw")).unwrap();

        let login_backend = FakeBackend::new().with_account("new@x.com", "pw", "tok-new");
        let login_storage = MemoryTokenStore::new();
        let login_store = store_with(&login_backend, &login_storage);
        block_on(login_store.initialize()).unwrap();
        block_on(login_store.login("new@x.com", "pw")).unwrap();

        assert_eq!(signup_store.session(), login_store.session());
        assert_eq!(signup_storage.get(), login_storage.get());
        assert_eq!(
            signup_backend.calls(),
            vec!["signup new@x.com", "login new@x.com", "me tok-new"]
        );
    }

    #[test]
    fn signup_conflict_never_attempts_login() {
        let backend = FakeBackend::new()
            .with_account("dup@x.com", "p", "tok-dup")
            .with_signup_status(409, Some("The user with this email already exists in the system."));
        let storage = MemoryTokenStore::new();
        let store = store_with(&backend, &storage);
        block_on(store.initialize()).unwrap();

        let error = block_on(store.signup("dup@x.com", "p")).unwrap_err();

        assert!(matches!(error, SessionError::Api(ApiError::Conflict { status: 409, .. })));
        assert_eq!(
            error.user_message(),
            "The user with this email already exists in the system."
        );
        assert_eq!(backend.calls(), vec!["signup dup@x.com"]);
        assert_eq!(store.phase(), AuthPhase::Anonymous);
        assert_eq!(storage.get(), None);
    }

    #[test]
    fn overlapping_login_is_rejected_as_busy() {
        let backend = FakeBackend::new().with_account("a@x.com", "secret", "tok-a");
        let gate = backend.hold_next_login();
        let storage = MemoryTokenStore::new();
        let store = Rc::new(store_with(&backend, &storage));
        block_on(store.initialize()).unwrap();

        let mut pool = LocalPool::new();
        let first = {
            let store = store.clone();
            pool.spawner()
                .spawn_local_with_handle(async move { store.login("a@x.com", "secret").await })
                .unwrap()
        };
        pool.run_until_stalled();
        assert!(store.is_busy());

        let second = block_on(store.login("a@x.com", "secret"));
        assert_eq!(second.unwrap_err(), SessionError::Busy);

        gate.release();
        let first = pool.run_until(first);
        assert!(first.is_ok());
        assert_eq!(store.phase(), AuthPhase::Authenticated);
        assert!(!store.is_busy());
    }

    #[test]
    fn logout_during_login_discards_the_late_response() {
        let backend = FakeBackend::new().with_account("a@x.com", "secret", "tok-a");
        let gate = backend.hold_next_login();
        let storage = MemoryTokenStore::new();
        let store = Rc::new(store_with(&backend, &storage));
        block_on(store.initialize()).unwrap();

        let mut pool = LocalPool::new();
        let pending = {
            let store = store.clone();
            pool.spawner()
                .spawn_local_with_handle(async move { store.login("a@x.com", "secret").await })
                .unwrap()
        };
        pool.run_until_stalled();

        store.logout();
        gate.release();

        assert_eq!(pool.run_until(pending).unwrap_err(), SessionError::Superseded);
        assert_eq!(store.phase(), AuthPhase::Anonymous);
        assert_eq!(storage.get(), None);
    }

    #[test]
    fn subscribers_see_each_transition() {
        let backend = FakeBackend::new().with_account("a@x.com", "secret", "tok-a");
        let storage = MemoryTokenStore::new();
        let store = Rc::new(store_with(&backend, &storage));
        let phases = Rc::new(std::cell::RefCell::new(Vec::new()));
        {
            let weak = Rc::downgrade(&store);
            let phases = phases.clone();
            store.subscribe(move || {
                if let Some(store) = weak.upgrade() {
                    phases.borrow_mut().push(store.phase());
                }
            });
        }

        block_on(store.initialize()).unwrap();
        block_on(store.login("a@x.com", "secret")).unwrap();
        store.logout();

        assert_eq!(
            *phases.borrow(),
            vec![AuthPhase::Anonymous, AuthPhase::Authenticated, AuthPhase::Anonymous]
        );
    }

    #[test]
    fn unauthorized_resource_call_expires_session() {
        let backend = FakeBackend::new().with_account("a@x.com", "secret", "tok-a");
        let storage = MemoryTokenStore::new();
        let store = store_with(&backend, &storage);
        block_on(store.initialize()).unwrap();
        block_on(store.login("a@x.com", "secret")).unwrap();

        assert!(!store.expire_if_unauthorized("tok-a", &ApiError::Network("offline".into())));
        assert!(store.is_authenticated());

        let unauthorized = ApiError::Auth { status: 401, message: None };
        assert!(store.expire_if_unauthorized("tok-a", &unauthorized));
        assert_eq!(store.phase(), AuthPhase::Anonymous);
        assert_eq!(storage.get(), None);
    }

    #[test]
    fn unauthorized_reply_for_previous_token_keeps_current_session() {
        let backend = FakeBackend::new()
            .with_account("a@x.com", "secret", "tok-a")
            .with_account("b@x.com", "secret", "tok-b");
        let storage = MemoryTokenStore::new();
        let store = store_with(&backend, &storage);
        block_on(store.initialize()).unwrap();
        block_on(store.login("a@x.com", "secret")).unwrap();
        store.logout();
        block_on(store.login("b@x.com", "secret")).unwrap();

        let unauthorized = ApiError::Auth { status: 401, message: None };
        assert!(store.expire_if_unauthorized("tok-a", &unauthorized));
        assert_eq!(store.phase(), AuthPhase::Authenticated);
        assert_eq!(store.token().as_deref(), Some("tok-b"));
        assert_eq!(storage.get().as_deref(), Some("tok-b"));
    }

    #[test]
    fn login_before_start_is_rejected_without_touching_storage() {
        let backend = FakeBackend::new().with_account("a@x.com", "secret", "tok-a");
        let storage = MemoryTokenStore::new();
        let store = store_with(&backend, &storage);

        let error = block_on(store.login("a@x.com", "secret")).unwrap_err();

        assert_eq!(error, SessionError::NotReady);
        assert_eq!(storage.get(), None);
        assert_eq!(store.phase(), AuthPhase::Uninitialized);
        assert!(backend.calls().is_empty());
        assert!(!store.is_busy());
    }

    #[test]
    fn signup_while_stored_token_is_unvalidated_is_rejected() {
        let backend = FakeBackend::new().allow_signup("tok-new");
        let storage = MemoryTokenStore::with_token("abc123");
        let store = store_with(&backend, &storage);
        assert_eq!(store.start(), AuthPhase::Restoring);

        let error = block_on(store.signup("new@x.com", "pw")).unwrap_err();

        assert_eq!(error, SessionError::NotReady);
        assert_eq!(storage.get().as_deref(), Some("abc123"));
        assert!(backend.calls().is_empty());
    }
}
