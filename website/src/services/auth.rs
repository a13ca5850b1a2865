use async_trait::async_trait;
use base64::prelude::*;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use snafu::ResultExt;
use std::time::Duration;
use tracing::warn;

use crate::{
    Result,
    config::SupabaseConfig,
    error::{HttpClientSnafu, HttpResponseParseSnafu},
    models::OAuthProvider,
    run::AppState,
    services::handle_identity_error,
};
use tenancy::actor::{Actor, ActorDto};

/// Where to send the browser to continue an OAuth sign-in
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthRedirect {
    pub url: String,
    /// PKCE secret to keep until the callback arrives
    pub code_verifier: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub expires_in: Option<i64>,
}

/// Seam to the external identity backend
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<OAuthRedirect>;

    async fn exchange_code(&self, auth_code: &str, code_verifier: &str) -> Result<AuthSession>;

    /// `None` when the token is invalid or expired
    async fn get_user(&self, token: &str) -> Result<Option<ActorDto>>;

    async fn sign_out(&self, token: &str) -> Result<()>;
}

pub fn create_code_verifier() -> String {
    let bytes: [u8; 32] = rand::random();
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

/// S256 code challenge for the verifier
pub fn code_challenge(code_verifier: &str) -> String {
    BASE64_URL_SAFE_NO_PAD.encode(Sha256::digest(code_verifier.as_bytes()))
}

#[derive(Serialize)]
struct PkceGrantBody<'a> {
    auth_code: &'a str,
    code_verifier: &'a str,
}

#[derive(Deserialize)]
struct IdentityUser {
    id: String,
    email: Option<String>,
}

/// GoTrue REST client for a Supabase project
pub struct SupabaseAuth {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseAuth {
    pub fn new(config: &SupabaseConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(10))
            .build()
            .context(HttpClientSnafu {
                msg: "Unable to create HTTP client".to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
        })
    }

    fn authorize_url(&self, provider: OAuthProvider, redirect_to: &str, challenge: &str) -> String {
        format!(
            "{}/auth/v1/authorize?provider={}&redirect_to={}&code_challenge={}&code_challenge_method=s256",
            self.base_url,
            provider.as_str(),
            urlencoding::encode(redirect_to),
            urlencoding::encode(challenge),
        )
    }
}

#[async_trait]
impl IdentityProvider for SupabaseAuth {
    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
    ) -> Result<OAuthRedirect> {
        let code_verifier = create_code_verifier();
        let challenge = code_challenge(&code_verifier);

        Ok(OAuthRedirect {
            url: self.authorize_url(provider, redirect_to, &challenge),
            code_verifier,
        })
    }

    async fn exchange_code(&self, auth_code: &str, code_verifier: &str) -> Result<AuthSession> {
        let url = format!("{}/auth/v1/token?grant_type=pkce", self.base_url);
        let response = self
            .client
            .post(url.as_str())
            .header("apikey", &self.anon_key)
            .json(&PkceGrantBody {
                auth_code,
                code_verifier,
            })
            .send()
            .await
            .context(HttpClientSnafu {
                msg: "Unable to complete sign in. Try again later.".to_string(),
            })?;

        match response.status() {
            StatusCode::OK => {
                let session = response
                    .json::<AuthSession>()
                    .await
                    .context(HttpResponseParseSnafu {
                        msg: "Unable to parse sign in session".to_string(),
                    })?;
                Ok(session)
            }
            _ => Err(handle_identity_error(response, "complete sign in").await),
        }
    }

    async fn get_user(&self, token: &str) -> Result<Option<ActorDto>> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .client
            .get(url.as_str())
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .context(HttpClientSnafu {
                msg: "Unable to process auth information. Try again later.".to_string(),
            })?;

        match response.status() {
            StatusCode::OK => {
                let user = response
                    .json::<IdentityUser>()
                    .await
                    .context(HttpResponseParseSnafu {
                        msg: "Unable to parse auth information".to_string(),
                    })?;
                Ok(Some(ActorDto {
                    id: user.id,
                    email: user.email.unwrap_or_default(),
                }))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Err(handle_identity_error(response, "load the signed in user").await),
        }
    }

    async fn sign_out(&self, token: &str) -> Result<()> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let response = self
            .client
            .post(url.as_str())
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .context(HttpClientSnafu {
                msg: "Unable to sign out".to_string(),
            })?;

        match response.status() {
            // Already expired sessions count as signed out
            s if s.is_success() || s == StatusCode::UNAUTHORIZED => Ok(()),
            _ => Err(handle_identity_error(response, "sign out").await),
        }
    }
}

/// Resolves a session token into the actor, anonymous when the token is no good
pub async fn authenticate_token(state: &AppState, token: &str) -> Actor {
    // Get from cache first
    if let Some(actor) = state.auth_cache.get(token) {
        return actor;
    }

    match state.auth.get_user(token).await {
        Ok(Some(user)) => {
            let actor = Actor::new(user);
            state.auth_cache.insert(token.to_string(), actor.clone());
            actor
        }
        Ok(None) => Actor::default(),
        Err(e) => {
            warn!("Unable to verify session: {}", e);
            Actor::default()
        }
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::Error;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub const TEST_TOKEN: &str = "test-token";
    pub const LONELY_TOKEN: &str = "lonely-token";

    /// Records sign-in calls and serves a fixed set of sessions
    #[derive(Default)]
    pub struct MockIdentityProvider {
        pub fail_sign_in: bool,
        pub sign_in_calls: Mutex<Vec<(String, String)>>,
        pub get_user_calls: Mutex<usize>,
        pub sessions: HashMap<String, ActorDto>,
    }

    impl MockIdentityProvider {
        pub fn new() -> Self {
            use db::user::{TEST_LONELY_USER_ID, TEST_USER_ID};

            let mut sessions = HashMap::new();
            sessions.insert(
                TEST_TOKEN.to_string(),
                ActorDto {
                    id: TEST_USER_ID.to_string(),
                    email: "jorge@example.com".to_string(),
                },
            );
            sessions.insert(
                LONELY_TOKEN.to_string(),
                ActorDto {
                    id: TEST_LONELY_USER_ID.to_string(),
                    email: "lonely@example.com".to_string(),
                },
            );

            Self {
                sessions,
                ..Default::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail_sign_in: true,
                ..Self::new()
            }
        }

        pub fn sign_in_calls(&self) -> Vec<(String, String)> {
            self.sign_in_calls.lock().unwrap().clone()
        }

        pub fn get_user_calls(&self) -> usize {
            *self.get_user_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl IdentityProvider for MockIdentityProvider {
        async fn sign_in_with_oauth(
            &self,
            provider: OAuthProvider,
            redirect_to: &str,
        ) -> Result<OAuthRedirect> {
            self.sign_in_calls
                .lock()
                .unwrap()
                .push((provider.to_string(), redirect_to.to_string()));

            if self.fail_sign_in {
                return Err(Error::Identity {
                    msg: "Provider is not enabled".to_string(),
                });
            }

            Ok(OAuthRedirect {
                url: format!("https://auth.example.com/authorize?provider={}", provider),
                code_verifier: "test-verifier".to_string(),
            })
        }

        async fn exchange_code(&self, auth_code: &str, code_verifier: &str) -> Result<AuthSession> {
            if auth_code == "good-code" && code_verifier == "test-verifier" {
                return Ok(AuthSession {
                    access_token: TEST_TOKEN.to_string(),
                    expires_in: Some(3600),
                });
            }
            Err(Error::Identity {
                msg: "Invalid code".to_string(),
            })
        }

        async fn get_user(&self, token: &str) -> Result<Option<ActorDto>> {
            *self.get_user_calls.lock().unwrap() += 1;
            Ok(self.sessions.get(token).cloned())
        }

        async fn sign_out(&self, _token: &str) -> Result<()> {
            Ok(())
        }
    }
}
