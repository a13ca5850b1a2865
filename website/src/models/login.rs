use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use validator::Validate;

/// External sign-in providers offered on the login page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Github,
}

impl OAuthProvider {
    pub const ALL: [OAuthProvider; 2] = [OAuthProvider::Google, OAuthProvider::Github];

    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Github => "github",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "Google",
            OAuthProvider::Github => "GitHub",
        }
    }
}

impl TryFrom<&str> for OAuthProvider {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "google" => Ok(OAuthProvider::Google),
            "github" => Ok(OAuthProvider::Github),
            _ => Err(format!("Unsupported sign-in provider: {}", value)),
        }
    }
}

impl core::fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reason a sign-in ended back on the login page, carried as `?error=`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    AccessDenied,
    Expired,
    Failed,
}

impl LoginError {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginError::AccessDenied => "access_denied",
            LoginError::Expired => "expired",
            LoginError::Failed => "failed",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            LoginError::AccessDenied => "Sign in was cancelled.",
            LoginError::Expired => "Sign in expired. Try again.",
            LoginError::Failed => "Unable to complete sign in. Try again.",
        }
    }

    /// Only known codes are shown, anything else is dropped
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "access_denied" => Some(LoginError::AccessDenied),
            "expired" => Some(LoginError::Expired),
            "failed" => Some(LoginError::Failed),
            _ => None,
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct CsrfFormPayload {
    #[validate(length(min = 1, max = 500))]
    pub token: String,
}

/// Sign-in state of the login form.
///
/// There is one busy flag shared by every provider button.
#[derive(Debug, Default)]
pub struct LoginForm {
    busy: AtomicBool,
}

/// Clears the busy flag when dropped, whatever the sign-in outcome
pub struct BusyGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

impl LoginForm {
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// `None` while another sign-in is still in flight
    pub fn begin_sign_in(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard { busy: &self.busy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!(
            OAuthProvider::try_from("google").unwrap(),
            OAuthProvider::Google
        );
        assert_eq!(
            OAuthProvider::try_from("github").unwrap(),
            OAuthProvider::Github
        );
        assert!(OAuthProvider::try_from("facebook").is_err());
    }

    #[test]
    fn test_login_error_codes() {
        for err in [LoginError::AccessDenied, LoginError::Expired, LoginError::Failed] {
            assert_eq!(LoginError::from_code(err.as_str()), Some(err));
        }
        assert_eq!(LoginError::from_code("Your account is locked"), None);
        assert_eq!(LoginError::from_code(""), None);
        assert_eq!(LoginError::Expired.message(), "Sign in expired. Try again.");
    }

    #[test]
    fn test_busy_flag_is_cleared_on_drop() {
        let form = LoginForm::default();
        assert!(!form.is_busy());

        {
            let _guard = form.begin_sign_in().unwrap();
            assert!(form.is_busy());
            assert!(form.begin_sign_in().is_none());
        }

        assert!(!form.is_busy());
        assert!(form.begin_sign_in().is_some());
    }

    #[test]
    fn test_busy_flag_is_cleared_on_failure() {
        let form = LoginForm::default();
        let outcome: Result<(), String> = (|| {
            let _guard = form.begin_sign_in().ok_or("busy")?;
            Err("provider unavailable".to_string())
        })();

        assert!(outcome.is_err());
        assert!(!form.is_busy());
    }
}
