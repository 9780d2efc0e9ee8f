use core_config::{ConfigError, FromEnv, env_required};

pub const MIN_TOKEN_LENGTH: usize = 16;

/// Admin credential configuration.
///
/// Loaded from `ADMIN_TOKEN` (required, at least 16 characters).
///
/// ```ignore
/// use axum_helpers::AdminAuthConfig;
/// use core_config::FromEnv;
///
/// let config = AdminAuthConfig::from_env()?;
///
/// // Manual construction (for testing)
/// let config = AdminAuthConfig::new("a-long-enough-admin-token")?;
/// ```
#[derive(Clone)]
pub struct AdminAuthConfig {
    token: String,
}

impl AdminAuthConfig {
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.len() < MIN_TOKEN_LENGTH {
            return Err(ConfigError::ParseError {
                key: "ADMIN_TOKEN".to_string(),
                details: format!(
                    "must be at least {} characters (got {}). Generate one with: openssl rand -hex 24",
                    MIN_TOKEN_LENGTH,
                    token.len()
                ),
            });
        }
        Ok(Self { token })
    }

    /// Compare without short-circuiting on the first differing byte.
    pub fn verify(&self, candidate: &str) -> bool {
        let expected = self.token.as_bytes();
        let candidate = candidate.as_bytes();
        if expected.len() != candidate.len() {
            return false;
        }
        expected
            .iter()
            .zip(candidate)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl std::fmt::Debug for AdminAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuthConfig")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl FromEnv for AdminAuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::new(env_required("ADMIN_TOKEN")?)
    }
}
