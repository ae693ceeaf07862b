use serde::{Deserialize, Serialize};

/// Username/password pair presented to `authenticate`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome of `authenticate`.
///
/// A `None` token means the credentials matched no author. This is a normal
/// result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthenticationResult {
    pub token: Option<String>,
}

impl AuthenticationResult {
    pub fn issued(token: String) -> Self {
        Self { token: Some(token) }
    }

    pub fn rejected() -> Self {
        Self { token: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_password() {
        let rendered = format!("{:?}", Credentials::new("jkrowling", "hunter2"));
        assert!(rendered.contains("jkrowling"));
        assert!(!rendered.contains("hunter2"));
    }
}
