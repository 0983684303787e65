//! Screen-set decisions derived from session state.

use auth_client_core::SessionSnapshot;
use tokio::sync::watch;

/// A navigable screen, named by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Pre-auth entry screen.
    Entry,
    SignIn,
    SignUp,
    /// Post-auth landing screen.
    Landing,
}

/// The screen set reachable in a given session state.
///
/// Exactly one of the two ready sets is navigable once the session is ready;
/// none before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSet {
    /// Restore still running: a neutral indicator, no screen reachable.
    Loading,
    Unauthenticated,
    Authenticated,
}

impl RouteSet {
    /// Decide the reachable set for a session state.
    #[must_use]
    pub fn for_session(session: &SessionSnapshot) -> Self {
        if !session.is_ready() {
            Self::Loading
        } else if session.is_authenticated() {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }

    /// The navigable screens, in presentation order.
    #[must_use]
    pub fn screens(self) -> &'static [Screen] {
        match self {
            Self::Loading => &[],
            Self::Unauthenticated => &[Screen::Entry, Screen::SignIn, Screen::SignUp],
            Self::Authenticated => &[Screen::Landing],
        }
    }

    /// First screen of the set, shown when the set becomes active.
    #[must_use]
    pub fn initial_screen(self) -> Option<Screen> {
        self.screens().first().copied()
    }

    /// Whether `screen` is reachable in this set.
    #[must_use]
    pub fn allows(self, screen: Screen) -> bool {
        self.screens().contains(&screen)
    }
}

/// Re-evaluates the route decision on every session change and wakes its
/// consumer only when the decision itself changes.
#[derive(Debug)]
pub struct RouteGate {
    rx: watch::Receiver<SessionSnapshot>,
    current: RouteSet,
}

impl RouteGate {
    #[must_use]
    pub fn new(rx: watch::Receiver<SessionSnapshot>) -> Self {
        let current = RouteSet::for_session(&rx.borrow());
        Self { rx, current }
    }

    /// The currently navigable set.
    #[must_use]
    pub fn current(&self) -> RouteSet {
        self.current
    }

    /// Wait for the next route-set change. `None` once the session
    /// publisher is gone.
    pub async fn changed(&mut self) -> Option<RouteSet> {
        loop {
            self.rx.changed().await.ok()?;
            let next = RouteSet::for_session(&self.rx.borrow_and_update());
            if next != self.current {
                self.current = next;
                return Some(next);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use auth_client_core::UserProfile;

    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: "1".to_string(),
            email: "nina@example.com".to_string(),
            username: "nina".to_string(),
            first_name: "Nina".to_string(),
            last_name: "Reed".to_string(),
            is_admin: false,
            is_active: true,
        }
    }

    #[test]
    fn test_decision_per_state() {
        assert_eq!(
            RouteSet::for_session(&SessionSnapshot::initializing()),
            RouteSet::Loading
        );
        assert_eq!(
            RouteSet::for_session(&SessionSnapshot::anonymous()),
            RouteSet::Unauthenticated
        );
        assert_eq!(
            RouteSet::for_session(&SessionSnapshot::authenticated(
                "abc".to_string(),
                profile()
            )),
            RouteSet::Authenticated
        );
    }

    #[test]
    fn test_ready_sets_are_disjoint_and_nonempty() {
        let authed = RouteSet::Authenticated.screens();
        let anon = RouteSet::Unauthenticated.screens();

        assert!(RouteSet::Loading.screens().is_empty());
        assert!(!authed.is_empty());
        assert!(!anon.is_empty());
        for screen in authed {
            assert!(!anon.contains(screen));
        }
    }

    #[test]
    fn test_screen_reachability() {
        assert!(RouteSet::Unauthenticated.allows(Screen::SignIn));
        assert!(!RouteSet::Unauthenticated.allows(Screen::Landing));
        assert!(RouteSet::Authenticated.allows(Screen::Landing));
        assert!(!RouteSet::Loading.allows(Screen::Entry));
        assert_eq!(RouteSet::Unauthenticated.initial_screen(), Some(Screen::Entry));
        assert_eq!(RouteSet::Loading.initial_screen(), None);
    }

    #[tokio::test]
    async fn test_gate_wakes_only_on_decision_changes() {
        let (tx, rx) = watch::channel(SessionSnapshot::initializing());
        let mut gate = RouteGate::new(rx);
        assert_eq!(gate.current(), RouteSet::Loading);

        tx.send(SessionSnapshot::anonymous()).unwrap();
        assert_eq!(gate.changed().await, Some(RouteSet::Unauthenticated));

        // a same-decision publish followed by a real transition: the gate
        // reports only the transition
        tx.send(SessionSnapshot::anonymous()).unwrap();
        tx.send(SessionSnapshot::authenticated("abc".to_string(), profile()))
            .unwrap();
        assert_eq!(gate.changed().await, Some(RouteSet::Authenticated));
        assert_eq!(gate.current(), RouteSet::Authenticated);
    }

    #[tokio::test]
    async fn test_gate_ends_when_publisher_drops() {
        let (tx, rx) = watch::channel(SessionSnapshot::anonymous());
        let mut gate = RouteGate::new(rx);
        drop(tx);
        assert_eq!(gate.changed().await, None);
    }
}
