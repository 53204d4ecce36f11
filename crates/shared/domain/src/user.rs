//! User domain entity.

/// Registered account.
///
/// Created once by registration and immutable afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Argon2 PHC string, never the plaintext
    pub pass_hash: String,
}

impl User {
    pub fn new(id: i64, email: impl Into<String>, pass_hash: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            pass_hash: pass_hash.into(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("pass_hash", &"[REDACTED]")
            .finish()
    }
}
