use std::env;

use anyhow::{Context, bail};

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
}

impl JwtConfig {
    /// Loads the signing secret from `JWT_SECRET`.
    ///
    /// An absent or empty secret is a startup failure, never a silent
    /// fallback to a known default — a deployment that forgets to set the
    /// secret must not serve forgeable tokens.
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        if secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        Ok(Self { secret })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state; run serially within this module.
    use std::sync::Mutex;
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_from_env_missing_secret_fails() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe { env::remove_var("JWT_SECRET") };
        assert!(JwtConfig::from_env().is_err());
    }

    #[test]
    fn test_from_env_empty_secret_fails() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe { env::set_var("JWT_SECRET", "   ") };
        assert!(JwtConfig::from_env().is_err());
        unsafe { env::remove_var("JWT_SECRET") };
    }

    #[test]
    fn test_from_env_reads_secret() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe { env::set_var("JWT_SECRET", "a-real-secret-for-tests") };
        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.secret, "a-real-secret-for-tests");
        unsafe { env::remove_var("JWT_SECRET") };
    }
}
