//! Observable application-state store.
//!
//! A [`Store`] owns one state value and changes it only through a pure
//! reducer applied to typed actions.  Listeners subscribe for change
//! notifications; persistence is a separate, optional hook
//! ([`StatePersistence`]) so the in-memory propagation works the same
//! whether state is backed by browser storage, a test double, or nothing.
//!
//! ```
//! use miqat_core::store::{AuthAction, AuthState, Store, User, reduce_auth};
//!
//! let mut store = Store::new(AuthState::default(), reduce_auth);
//! store.dispatch(AuthAction::LoggedIn {
//!     user: User::new(7, "Khadija"),
//!     token: "t0k3n".into(),
//! });
//! assert!(store.state().is_authenticated());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Loads and saves a store's state.
pub trait StatePersistence<S> {
    /// Previously saved state, if any.
    fn load(&self) -> Option<S>;

    /// Save `state`.  Failures are the implementation's concern; the
    /// store never blocks propagation on persistence.
    fn save(&self, state: &S);
}

/// In-memory persistence, shareable between stores and tests.
#[derive(Debug)]
pub struct MemoryPersistence<S> {
    slot: Rc<RefCell<Option<S>>>,
}

impl<S> MemoryPersistence<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }

    /// Another handle onto the same slot.
    #[must_use]
    pub fn handle(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<S> Default for MemoryPersistence<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> StatePersistence<S> for MemoryPersistence<S> {
    fn load(&self) -> Option<S> {
        self.slot.borrow().clone()
    }

    fn save(&self, state: &S) {
        *self.slot.borrow_mut() = Some(state.clone());
    }
}

type Listener<S> = Box<dyn Fn(&S)>;

/// A single-threaded observable store.
pub struct Store<S, A> {
    state: S,
    reducer: fn(&S, A) -> S,
    listeners: Vec<(SubscriptionId, Listener<S>)>,
    next_id: u64,
    persistence: Option<Box<dyn StatePersistence<S>>>,
}

impl<S, A> Store<S, A> {
    /// Create a store holding `initial`.
    #[must_use]
    pub fn new(initial: S, reducer: fn(&S, A) -> S) -> Self {
        Self {
            state: initial,
            reducer,
            listeners: Vec::new(),
            next_id: 0,
            persistence: None,
        }
    }

    /// Attach persistence.  Previously saved state, if any, replaces the
    /// current state (without notifying listeners).
    #[must_use]
    pub fn with_persistence(mut self, persistence: impl StatePersistence<S> + 'static) -> Self {
        if let Some(saved) = persistence.load() {
            self.state = saved;
        }
        self.persistence = Some(Box::new(persistence));
        self
    }

    /// The current state.
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Apply `action`, persist the new state, then notify listeners in
    /// subscription order.
    pub fn dispatch(&mut self, action: A) {
        self.state = (self.reducer)(&self.state, action);
        if let Some(persistence) = &self.persistence {
            persistence.save(&self.state);
        }
        for (_, listener) in &self.listeners {
            listener(&self.state);
        }
    }

    /// Register `listener` to be called after every dispatch.
    pub fn subscribe(&mut self, listener: impl Fn(&S) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener.  Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

// ---------------------------------------------------------------------------
// Authentication state
// ---------------------------------------------------------------------------

/// The signed-in back-office user.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl User {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Session state shared across pages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl AuthState {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

/// Changes to [`AuthState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    LoggedIn { user: User, token: String },
    /// Profile edited elsewhere in the app.  Ignored when signed out.
    UserUpdated(User),
    LoggedOut,
}

/// Reducer for [`AuthState`].
#[must_use]
pub fn reduce_auth(state: &AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::LoggedIn { user, token } => AuthState {
            user: Some(user),
            token: Some(token),
        },
        AuthAction::UserUpdated(user) => {
            if state.user.is_some() {
                AuthState {
                    user: Some(user),
                    token: state.token.clone(),
                }
            } else {
                state.clone()
            }
        }
        AuthAction::LoggedOut => AuthState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(name: &str) -> AuthAction {
        AuthAction::LoggedIn {
            user: User::new(1, name),
            token: "abc".into(),
        }
    }

    #[test]
    fn dispatch_runs_reducer() {
        let mut store = Store::new(AuthState::default(), reduce_auth);
        assert!(!store.state().is_authenticated());
        store.dispatch(login("Hamza"));
        assert!(store.state().is_authenticated());
        store.dispatch(AuthAction::LoggedOut);
        assert_eq!(store.state(), &AuthState::default());
    }

    #[test]
    fn user_update_keeps_token() {
        let mut store = Store::new(AuthState::default(), reduce_auth);
        store.dispatch(login("Hamza"));
        store.dispatch(AuthAction::UserUpdated(User::new(1, "Hamza A.")));
        assert_eq!(store.state().token.as_deref(), Some("abc"));
        assert_eq!(
            store.state().user.as_ref().map(|u| u.name.as_str()),
            Some("Hamza A.")
        );
    }

    #[test]
    fn user_update_while_signed_out_is_ignored() {
        let mut store = Store::new(AuthState::default(), reduce_auth);
        store.dispatch(AuthAction::UserUpdated(User::new(1, "Ghost")));
        assert!(store.state().user.is_none());
    }

    #[test]
    fn listeners_fire_in_subscription_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut store = Store::new(AuthState::default(), reduce_auth);
        for tag in ["first", "second"] {
            let calls = Rc::clone(&calls);
            store.subscribe(move |_| calls.borrow_mut().push(tag));
        }
        store.dispatch(login("Hamza"));
        assert_eq!(*calls.borrow(), ["first", "second"]);
    }

    #[test]
    fn listeners_see_new_state() {
        let seen = Rc::new(RefCell::new(None));
        let mut store = Store::new(AuthState::default(), reduce_auth);
        {
            let seen = Rc::clone(&seen);
            store.subscribe(move |s: &AuthState| {
                *seen.borrow_mut() = s.user.as_ref().map(|u| u.name.clone());
            });
        }
        store.dispatch(login("Maryam"));
        assert_eq!(seen.borrow().as_deref(), Some("Maryam"));
    }

    #[test]
    fn unsubscribed_listener_does_not_fire() {
        let count = Rc::new(RefCell::new(0));
        let mut store = Store::new(AuthState::default(), reduce_auth);
        let id = {
            let count = Rc::clone(&count);
            store.subscribe(move |_| *count.borrow_mut() += 1)
        };
        store.dispatch(login("a"));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(AuthAction::LoggedOut);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn persistence_saves_after_dispatch() {
        let persistence = MemoryPersistence::new();
        let probe = persistence.handle();
        let mut store = Store::new(AuthState::default(), reduce_auth).with_persistence(persistence);
        assert!(probe.load().is_none());
        store.dispatch(login("Yusuf"));
        assert_eq!(probe.load().as_ref(), Some(store.state()));
    }

    #[test]
    fn persistence_restores_on_construction() {
        let persistence = MemoryPersistence::new();
        let probe = persistence.handle();
        {
            let mut store =
                Store::new(AuthState::default(), reduce_auth).with_persistence(persistence);
            store.dispatch(login("Yusuf"));
        }
        let restored = Store::new(AuthState::default(), reduce_auth).with_persistence(probe);
        assert!(restored.state().is_authenticated());
    }
}
