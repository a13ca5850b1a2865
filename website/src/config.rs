use std::env;

use crate::{Error, Result};
use tenancy::utils::origin_of;

#[derive(Clone)]
pub struct Config {
    pub server: ServerConfig,
    /// Public origin of this deployment, ie: `https://app.example.com`
    pub site_url: String,
    pub supabase: SupabaseConfig,
    pub database_url: String,
    pub jwt_secret: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub https: bool,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl Config {
    /// Builds the config from ENV vars
    pub fn build() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            match var(key) {
                Some(val) if !val.trim().is_empty() => Ok(val.trim().to_string()),
                _ => Err(Error::Config {
                    msg: format!("{} is required", key),
                }),
            }
        };

        let port = required("PORT")?
            .parse::<u16>()
            .map_err(|_| Error::Config {
                msg: "PORT must be a valid u16".to_string(),
            })?;

        if port == 0 {
            return Err(Error::Config {
                msg: "PORT is required".to_string(),
            });
        }

        let https = var("HTTPS").is_some_and(|val| val == "1");

        let site_url = origin_of(&required("SITE_URL")?).map_err(|e| Error::Config {
            msg: format!("SITE_URL is invalid: {}", e),
        })?;

        let supabase_url = required("SUPABASE_URL")?
            .trim_end_matches('/')
            .to_string();

        Ok(Config {
            server: ServerConfig { port, https },
            site_url,
            supabase: SupabaseConfig {
                url: supabase_url,
                anon_key: required("SUPABASE_ANON_KEY")?,
            },
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
        })
    }
}

#[cfg(test)]
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            port: 3000,
            https: false,
        },
        site_url: "http://localhost:3000".to_string(),
        supabase: SupabaseConfig {
            url: "http://localhost:54321".to_string(),
            anon_key: "anon-key".to_string(),
        },
        database_url: "postgres://localhost/test".to_string(),
        jwt_secret: "secret".to_string(),
    }
}
