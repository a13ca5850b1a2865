pub mod access;
pub mod auth;
pub mod dashboard;
pub mod orgs;
pub mod token;

use serde::Deserialize;

use crate::Error;

/// Error body returned by the identity backend, the fields vary by endpoint
#[derive(Debug, Default, Deserialize)]
struct IdentityErrorBody {
    error: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl IdentityErrorBody {
    fn message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

/// Converts a non-success identity backend response into an error.
///
/// Assumes that ok responses are already handled.
pub async fn handle_identity_error(response: reqwest::Response, action: &str) -> Error {
    let status = response.status();
    let detail = match response.json::<IdentityErrorBody>().await {
        Ok(body) => body.message(),
        Err(_) => None,
    };

    Error::Identity {
        msg: match detail {
            Some(detail) => format!("Unable to {}: {} {}", action, status.as_u16(), detail),
            None => format!("Unable to {}: {}", action, status.as_u16()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_error_message_priority() {
        let body: IdentityErrorBody = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"Invalid code verifier"}"#,
        )
        .unwrap();
        assert_eq!(body.message().as_deref(), Some("Invalid code verifier"));

        let body: IdentityErrorBody = serde_json::from_str(r#"{"msg":"Unsupported provider"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("Unsupported provider"));

        assert_eq!(IdentityErrorBody::default().message(), None);
    }
}
