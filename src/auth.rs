//! Identity provider abstraction.
//!
//! Resolution is asynchronous from the UI's point of view: the app stays
//! in a "resolving" state until the worker delivers the first identity
//! reply. Fetching records before that reply is never attempted.

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub email: String,
}

/// Session source consumed by the store worker.
pub trait IdentityProvider: Send {
    /// Resolves the current session. Returns `None` when no user is
    /// signed in (or after `sign_out`).
    fn resolve(&mut self) -> Option<Identity>;

    /// Ends the session. Subsequent `resolve` calls return `None`.
    fn sign_out(&mut self);
}

/// Identity resolved from the environment: `CELLAR_USER` (falling back to
/// `PGUSER`, then `USER`) and `CELLAR_EMAIL` (falling back to
/// `<user>@local`).
#[derive(Debug, Default)]
pub struct EnvIdentity {
    signed_out: bool,
}

impl EnvIdentity {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityProvider for EnvIdentity {
    fn resolve(&mut self) -> Option<Identity> {
        if self.signed_out {
            return None;
        }
        let id = std::env::var("CELLAR_USER")
            .or_else(|_| std::env::var("PGUSER"))
            .or_else(|_| std::env::var("USER"))
            .ok()?;
        let email = std::env::var("CELLAR_EMAIL").unwrap_or_else(|_| format!("{}@local", id));
        Some(Identity { id, email })
    }

    fn sign_out(&mut self) {
        self.signed_out = true;
    }
}

/// Fixed identity for demo mode and tests.
#[derive(Debug)]
pub struct StaticIdentity {
    identity: Option<Identity>,
}

impl StaticIdentity {
    pub fn new(id: &str, email: &str) -> Self {
        Self {
            identity: Some(Identity {
                id: id.to_string(),
                email: email.to_string(),
            }),
        }
    }

    /// Provider that never resolves a user (tests).
    pub fn signed_out() -> Self {
        Self { identity: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn resolve(&mut self) -> Option<Identity> {
        self.identity.clone()
    }

    fn sign_out(&mut self) {
        self.identity = None;
    }
}
