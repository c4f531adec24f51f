use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::AuthError;

/// Opaque bearer token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
	pub fn new(secret: impl Into<String>) -> Self {
		Self(secret.into())
	}

	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for AuthToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("AuthToken(<redacted>)")
	}
}

#[derive(Debug, Clone, Default)]
enum AuthState {
	#[default]
	Uninitialized,
	Anonymous,
	Authenticated(AuthToken),
}

/// Shared auth state with an explicit `init`/`set`/`clear` lifecycle.
///
/// Clones share state; pass a clone to each request issuer.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
	state: Arc<RwLock<AuthState>>,
}

impl AuthContext {
	/// Creates an uninitialized context.
	pub fn new() -> Self {
		Self::default()
	}

	/// Initializes the context once, e.g. from a persisted token.
	pub fn init(&self, token: Option<AuthToken>) -> Result<(), AuthError> {
		let mut state = self.state.write();
		if !matches!(*state, AuthState::Uninitialized) {
			return Err(AuthError::AlreadyInitialized);
		}
		*state = match token {
			Some(token) => AuthState::Authenticated(token),
			None => AuthState::Anonymous,
		};
		tracing::debug!(authenticated = matches!(*state, AuthState::Authenticated(_)), "session.auth.init");
		Ok(())
	}

	/// Replaces the token after a login.
	pub fn set(&self, token: AuthToken) -> Result<(), AuthError> {
		let mut state = self.state.write();
		if matches!(*state, AuthState::Uninitialized) {
			return Err(AuthError::NotInitialized);
		}
		*state = AuthState::Authenticated(token);
		tracing::debug!("session.auth.set");
		Ok(())
	}

	/// Drops the token (logout). Leaves the context initialized.
	pub fn clear(&self) {
		let mut state = self.state.write();
		if matches!(*state, AuthState::Authenticated(_)) {
			tracing::debug!("session.auth.clear");
		}
		*state = AuthState::Anonymous;
	}

	pub fn is_initialized(&self) -> bool {
		!matches!(*self.state.read(), AuthState::Uninitialized)
	}

	/// Snapshot of the current token.
	pub fn token(&self) -> Result<Option<AuthToken>, AuthError> {
		match &*self.state.read() {
			AuthState::Uninitialized => Err(AuthError::NotInitialized),
			AuthState::Anonymous => Ok(None),
			AuthState::Authenticated(token) => Ok(Some(token.clone())),
		}
	}

	/// `Authorization` header value for the current token.
	pub fn bearer(&self) -> Result<Option<String>, AuthError> {
		Ok(self.token()?.map(|token| format!("Bearer {}", token.expose())))
	}
}
