//! Test doubles shared by the controller tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use api::{
    ApiError, ApiKeyResponse, AuthPayload, Backend, CheckoutRequest, CheckoutSession,
    Credentials, HealthStatus, LanguageKeys, SpellcheckRequest, SpellcheckResponse,
    UpgradeResponse,
};
use store::{Language, MemoryStorage, SessionStore, SubscriptionType, UserRecord};

pub fn user(id: &str) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        subscription_type: SubscriptionType::Free,
        api_key: Some(format!("fs_{id}")),
        ..Default::default()
    }
}

pub type SharedSession = Rc<RefCell<SessionStore<MemoryStorage>>>;

pub fn shared_session() -> (MemoryStorage, SharedSession) {
    let storage = MemoryStorage::new();
    let session = Rc::new(RefCell::new(SessionStore::new(storage.clone())));
    (storage, session)
}

pub fn signed_in(id: &str) -> (MemoryStorage, SharedSession) {
    let (storage, session) = shared_session();
    session.borrow_mut().install(format!("token-{id}"), user(id));
    (storage, session)
}

type Queue<T> = VecDeque<Result<T, ApiError>>;

#[derive(Default)]
struct Script {
    calls: Vec<&'static str>,
    tokens: Vec<Option<String>>,
    args: Vec<String>,
    login: Queue<AuthPayload>,
    register: Queue<AuthPayload>,
    me: Queue<UserRecord>,
    spellcheck: Queue<SpellcheckResponse>,
    generate_api_key: Queue<ApiKeyResponse>,
    upgrade_plan: Queue<UpgradeResponse>,
    language_keys: Queue<LanguageKeys>,
    create_language_key: Queue<ApiKeyResponse>,
    regenerate_language_key: Queue<ApiKeyResponse>,
    delete_language_key: Queue<()>,
    checkout: Queue<CheckoutSession>,
    before: HashMap<&'static str, Box<dyn Fn()>>,
}

/// Scripted [`Backend`]: answers come from per-endpoint queues, and every
/// call is recorded. An unscripted call fails with a transport error.
#[derive(Default)]
pub struct MockBackend {
    script: RefCell<Script>,
}

fn next<T>(queue: &mut Queue<T>, name: &str) -> Result<T, ApiError> {
    queue
        .pop_front()
        .unwrap_or_else(|| Err(ApiError::Transport(format!("unscripted call to {name}"))))
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.script.borrow().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.script.borrow().calls.len()
    }

    pub fn tokens(&self) -> Vec<Option<String>> {
        self.script.borrow().tokens.clone()
    }

    /// Languages, plan names and price ids passed along with calls.
    pub fn args(&self) -> Vec<String> {
        self.script.borrow().args.clone()
    }

    pub fn on_login(&self, r: Result<AuthPayload, ApiError>) {
        self.script.borrow_mut().login.push_back(r);
    }

    pub fn on_register(&self, r: Result<AuthPayload, ApiError>) {
        self.script.borrow_mut().register.push_back(r);
    }

    pub fn on_me(&self, r: Result<UserRecord, ApiError>) {
        self.script.borrow_mut().me.push_back(r);
    }

    pub fn on_spellcheck(&self, r: Result<SpellcheckResponse, ApiError>) {
        self.script.borrow_mut().spellcheck.push_back(r);
    }

    pub fn on_generate_api_key(&self, r: Result<ApiKeyResponse, ApiError>) {
        self.script.borrow_mut().generate_api_key.push_back(r);
    }

    pub fn on_upgrade_plan(&self, r: Result<UpgradeResponse, ApiError>) {
        self.script.borrow_mut().upgrade_plan.push_back(r);
    }

    pub fn on_language_keys(&self, r: Result<LanguageKeys, ApiError>) {
        self.script.borrow_mut().language_keys.push_back(r);
    }

    pub fn on_create_language_key(&self, r: Result<ApiKeyResponse, ApiError>) {
        self.script.borrow_mut().create_language_key.push_back(r);
    }

    pub fn on_regenerate_language_key(&self, r: Result<ApiKeyResponse, ApiError>) {
        self.script.borrow_mut().regenerate_language_key.push_back(r);
    }

    pub fn on_delete_language_key(&self, r: Result<(), ApiError>) {
        self.script.borrow_mut().delete_language_key.push_back(r);
    }

    pub fn on_checkout(&self, r: Result<CheckoutSession, ApiError>) {
        self.script.borrow_mut().checkout.push_back(r);
    }

    /// Run `hook` once when `endpoint` is next called, before its answer
    /// is returned.
    pub fn before(&self, endpoint: &'static str, hook: impl Fn() + 'static) {
        self.script.borrow_mut().before.insert(endpoint, Box::new(hook));
    }

    pub fn before_me(&self, hook: impl Fn() + 'static) {
        self.before("me", hook);
    }

    fn record(&self, name: &'static str, token: Option<&str>) {
        let hook = {
            let mut script = self.script.borrow_mut();
            script.calls.push(name);
            script.tokens.push(token.map(str::to_string));
            script.before.remove(name)
        };
        if let Some(hook) = hook {
            hook();
        }
    }

    fn record_arg(&self, arg: impl Into<String>) {
        self.script.borrow_mut().args.push(arg.into());
    }
}

impl Backend for MockBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        self.record("login", None);
        self.record_arg(credentials.email.clone());
        next(&mut self.script.borrow_mut().login, "login")
    }

    async fn register(&self, credentials: &Credentials) -> Result<AuthPayload, ApiError> {
        self.record("register", None);
        self.record_arg(credentials.email.clone());
        next(&mut self.script.borrow_mut().register, "register")
    }

    async fn me(&self, token: &str) -> Result<UserRecord, ApiError> {
        self.record("me", Some(token));
        next(&mut self.script.borrow_mut().me, "me")
    }

    async fn spellcheck(
        &self,
        token: Option<&str>,
        request: &SpellcheckRequest,
    ) -> Result<SpellcheckResponse, ApiError> {
        self.record("spellcheck", token);
        self.record_arg(request.language.code());
        next(&mut self.script.borrow_mut().spellcheck, "spellcheck")
    }

    async fn generate_api_key(&self, token: &str) -> Result<ApiKeyResponse, ApiError> {
        self.record("generate_api_key", Some(token));
        next(&mut self.script.borrow_mut().generate_api_key, "generate_api_key")
    }

    async fn upgrade_plan(
        &self,
        token: &str,
        plan: SubscriptionType,
    ) -> Result<UpgradeResponse, ApiError> {
        self.record("upgrade_plan", Some(token));
        self.record_arg(plan.as_str());
        next(&mut self.script.borrow_mut().upgrade_plan, "upgrade_plan")
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.record("health", None);
        Ok(HealthStatus {
            status: Some("ok".into()),
        })
    }

    async fn language_keys(&self, token: &str) -> Result<LanguageKeys, ApiError> {
        self.record("language_keys", Some(token));
        next(&mut self.script.borrow_mut().language_keys, "language_keys")
    }

    async fn create_language_key(
        &self,
        token: &str,
        language: Language,
    ) -> Result<ApiKeyResponse, ApiError> {
        self.record("create_language_key", Some(token));
        self.record_arg(language.code());
        next(&mut self.script.borrow_mut().create_language_key, "create_language_key")
    }

    async fn regenerate_language_key(
        &self,
        token: &str,
        language: Language,
    ) -> Result<ApiKeyResponse, ApiError> {
        self.record("regenerate_language_key", Some(token));
        self.record_arg(language.code());
        next(
            &mut self.script.borrow_mut().regenerate_language_key,
            "regenerate_language_key",
        )
    }

    async fn delete_language_key(&self, token: &str, language: Language) -> Result<(), ApiError> {
        self.record("delete_language_key", Some(token));
        self.record_arg(language.code());
        next(&mut self.script.borrow_mut().delete_language_key, "delete_language_key")
    }

    async fn create_checkout_session(
        &self,
        token: &str,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, ApiError> {
        self.record("create_checkout_session", Some(token));
        self.record_arg(request.price_id.clone());
        next(&mut self.script.borrow_mut().checkout, "create_checkout_session")
    }
}
