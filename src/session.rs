//! Session collaborators read by the `@message`, `@errors` and `@csrf` directives.
//!
//! Stores are one-shot: taking a value removes it. Implementations must make
//! the take atomic since several renders can share one session.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use rand::Rng;

/// Flash messages set by a previous request
pub trait FlashStore: Sync + Send {
    /// Returns and removes the message stored under `name`
    fn take_message(&self, name: &str) -> Option<String>;

    /// Returns the message stored under `name` without removing it
    fn peek_message(&self, name: &str) -> Option<String>;
}

/// Validation errors set by a previous request
pub trait ErrorStore: Sync + Send {
    /// Returns the first error of `field` and forgets every error of that field
    fn take_error(&self, field: &str) -> Option<String>;

    /// Returns the first error of `field` without removing it
    fn peek_error(&self, field: &str) -> Option<String>;
}

/// Source of the CSRF token of the current session
pub trait CsrfProvider: Sync + Send {
    /// The token forms must send back
    fn current(&self) -> String;
}

impl<F> CsrfProvider for F
where
    F: Fn() -> String + Sync + Send,
{
    fn current(&self) -> String {
        self()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<T> {
    // a poisoned lock only means another render panicked, the map itself is fine
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// In-memory flash messages and validation errors
#[derive(Debug, Default)]
pub struct MemoryStore {
    messages: Mutex<HashMap<String, String>>,
    errors: Mutex<HashMap<String, Vec<String>>>,
}

impl MemoryStore {
    /// An empty store
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Stores a message for the next `@message(name)` block
    pub fn flash<N: Into<String>, M: Into<String>>(&self, name: N, message: M) {
        lock(&self.messages).insert(name.into(), message.into());
    }

    /// Stores the validation errors of a field, replacing previous ones
    pub fn put_errors<N: Into<String>>(&self, field: N, errors: Vec<String>) {
        lock(&self.errors).insert(field.into(), errors);
    }

    /// Adds one validation error to a field
    pub fn add_error<N: Into<String>, M: Into<String>>(&self, field: N, error: M) {
        lock(&self.errors).entry(field.into()).or_insert_with(Vec::new).push(error.into());
    }

    /// Drops every stored validation error
    pub fn forget_errors(&self) {
        lock(&self.errors).clear();
    }

    /// Whether any validation error is stored
    pub fn has_errors(&self) -> bool {
        !lock(&self.errors).is_empty()
    }
}

impl FlashStore for MemoryStore {
    fn take_message(&self, name: &str) -> Option<String> {
        lock(&self.messages).remove(name)
    }

    fn peek_message(&self, name: &str) -> Option<String> {
        lock(&self.messages).get(name).cloned()
    }
}

impl ErrorStore for MemoryStore {
    fn take_error(&self, field: &str) -> Option<String> {
        lock(&self.errors).remove(field).and_then(|errors| errors.into_iter().next())
    }

    fn peek_error(&self, field: &str) -> Option<String> {
        lock(&self.errors).get(field).and_then(|errors| errors.first().cloned())
    }
}

/// How long a CSRF token stays valid before being rotated
pub const CSRF_TOKEN_LIFETIME: Duration = Duration::from_secs(600);

#[derive(Debug)]
struct IssuedToken {
    value: String,
    issued_at: Instant,
}

/// A per-session CSRF token, regenerated once it is older than its lifetime
#[derive(Debug)]
pub struct CsrfToken {
    token: Mutex<IssuedToken>,
    lifetime: Duration,
}

impl CsrfToken {
    /// Issues a fresh random token
    pub fn new() -> CsrfToken {
        CsrfToken::with_lifetime(CSRF_TOKEN_LIFETIME)
    }

    /// Issues a fresh random token rotated after `lifetime`
    pub fn with_lifetime(lifetime: Duration) -> CsrfToken {
        CsrfToken {
            token: Mutex::new(IssuedToken { value: generate_token(), issued_at: Instant::now() }),
            lifetime,
        }
    }

    /// Returns the current token, rotating it first if it expired
    pub fn token(&self) -> String {
        let mut token = lock(&self.token);
        if token.issued_at.elapsed() > self.lifetime {
            *token = IssuedToken { value: generate_token(), issued_at: Instant::now() };
        }
        token.value.clone()
    }

    /// Checks a token sent back by a form against the current one
    pub fn validate(&self, candidate: &str) -> bool {
        let token = lock(&self.token);
        if token.issued_at.elapsed() > self.lifetime {
            return false;
        }
        constant_time_eq(token.value.as_bytes(), candidate.as_bytes())
    }
}

impl Default for CsrfToken {
    fn default() -> CsrfToken {
        CsrfToken::new()
    }
}

impl CsrfProvider for CsrfToken {
    fn current(&self) -> String {
        self.token()
    }
}

fn generate_token() -> String {
    let bytes: [u8; 16] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// The collaborators of one user session, shared by every render done for it
#[derive(Clone)]
pub struct Session {
    flash: Arc<dyn FlashStore>,
    errors: Arc<dyn ErrorStore>,
    csrf: Arc<dyn CsrfProvider>,
}

impl Session {
    /// Builds a session out of its three collaborators
    pub fn new(
        flash: Arc<dyn FlashStore>,
        errors: Arc<dyn ErrorStore>,
        csrf: Arc<dyn CsrfProvider>,
    ) -> Session {
        Session { flash, errors, csrf }
    }

    /// A session backed by one `MemoryStore` and a fresh `CsrfToken`.
    ///
    /// The store is returned too so callers can flash messages and errors into it.
    pub fn in_memory() -> (Session, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone(), store.clone(), Arc::new(CsrfToken::new()));
        (session, store)
    }

    /// Flash message store
    pub fn flash(&self) -> &dyn FlashStore {
        &*self.flash
    }

    /// Validation error store
    pub fn errors(&self) -> &dyn ErrorStore {
        &*self.errors
    }

    /// CSRF token provider
    pub fn csrf(&self) -> &dyn CsrfProvider {
        &*self.csrf
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::in_memory().0
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Session").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_one_shot() {
        let store = MemoryStore::new();
        store.flash("success", "Saved!");
        assert_eq!(store.peek_message("success"), Some("Saved!".to_string()));
        assert_eq!(store.take_message("success"), Some("Saved!".to_string()));
        assert_eq!(store.take_message("success"), None);
    }

    #[test]
    fn taking_an_error_forgets_the_field() {
        let store = MemoryStore::new();
        store.put_errors("email", vec!["Email is required".into(), "Email is invalid".into()]);
        assert_eq!(store.peek_error("email"), Some("Email is required".to_string()));
        assert_eq!(store.take_error("email"), Some("Email is required".to_string()));
        assert_eq!(store.take_error("email"), None);
    }

    #[test]
    fn can_add_and_forget_errors() {
        let store = MemoryStore::new();
        store.add_error("name", "Name is required");
        store.add_error("name", "Name is too short");
        assert!(store.has_errors());
        store.forget_errors();
        assert!(!store.has_errors());
        assert_eq!(store.take_error("name"), None);
    }

    #[test]
    fn csrf_token_is_stable_and_validates() {
        let csrf = CsrfToken::new();
        let token = csrf.current();
        assert_eq!(token.len(), 32);
        assert_eq!(csrf.current(), token);
        assert!(csrf.validate(&token));
        assert!(!csrf.validate("nope"));
    }

    #[test]
    fn expired_csrf_token_is_rotated() {
        let csrf = CsrfToken::with_lifetime(Duration::from_secs(0));
        let first = csrf.current();
        std::thread::sleep(Duration::from_millis(5));
        assert!(!csrf.validate(&first));
        assert_ne!(csrf.current(), first);
    }

    #[test]
    fn closures_are_csrf_providers() {
        let session = Session::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(|| "fixed".to_string()),
        );
        assert_eq!(session.csrf().current(), "fixed");
    }
}
