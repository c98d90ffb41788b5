use crate::adapters::http::{ApiClient, TOKEN_KEY};
use crate::domain::model::{
    AuthReply, IdentityClaims, LoginRequest, RegisterRequest, RegistrationForm,
    SocialAuthRequest,
};
use crate::domain::ports::{Navigator, StatusLevel, StatusSink, TokenStore};
use crate::utils::error::{ClientError, Result};
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use std::sync::Arc;
use std::time::Duration;

pub const MSG_MISSING_CREDENTIALS: &str = "Please enter both username and password.";
pub const MSG_SIGNED_IN: &str = "Successful Entry";
pub const MSG_NO_TOKEN: &str = "No token received. Please try again.";
pub const MSG_UNEXPECTED: &str = "An error occurred. Please try again later.";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords are not the same.";
pub const MSG_MISSING_FIELDS: &str = "Please fill the gaps!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Token stored; the redirect has already happened.
    SignedIn { token: String },
    Registered { message: String },
    /// Nothing stored, no redirect. The message was shown to the user.
    Rejected { message: String },
}

impl AuthOutcome {
    /// Turns a rejection into an error so callers that only look at success can't miss it.
    pub fn into_result(self) -> Result<Self> {
        match self {
            AuthOutcome::Rejected { message } => Err(ClientError::AuthRejected { message }),
            outcome => Ok(outcome),
        }
    }
}

pub struct AuthClient {
    api: ApiClient,
    status: Arc<dyn StatusSink>,
    navigator: Arc<dyn Navigator>,
    redirect_url: String,
    redirect_delay: Duration,
}

impl AuthClient {
    pub fn new(
        api: ApiClient,
        status: Arc<dyn StatusSink>,
        navigator: Arc<dyn Navigator>,
        redirect_url: impl Into<String>,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            api,
            status,
            navigator,
            redirect_url: redirect_url.into(),
            redirect_delay,
        }
    }

    fn reject(&self, message: impl Into<String>) -> AuthOutcome {
        let message = message.into();
        self.status.show(StatusLevel::Error, &message);
        AuthOutcome::Rejected { message }
    }

    fn unexpected(&self, e: ClientError) -> ClientError {
        tracing::error!("Error during auth request: {}", e);
        self.status.show(StatusLevel::Error, MSG_UNEXPECTED);
        e
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthOutcome> {
        if username.is_empty() || password.is_empty() {
            return Ok(self.reject(MSG_MISSING_CREDENTIALS));
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let reply = self
            .api
            .login(&request)
            .await
            .map_err(|e| self.unexpected(e))?;
        self.finish_sign_in(reply).await
    }

    pub async fn register(&self, form: &RegistrationForm) -> Result<AuthOutcome> {
        if form.password != form.password_again {
            return Ok(self.reject(MSG_PASSWORD_MISMATCH));
        }
        if form.username.is_empty()
            || form.email.is_empty()
            || form.password.is_empty()
            || form.password_again.is_empty()
        {
            return Ok(self.reject(MSG_MISSING_FIELDS));
        }

        let reply = self
            .api
            .register(&RegisterRequest::from(form))
            .await
            .map_err(|e| self.unexpected(e))?;

        if reply.ok {
            let message = reply.body.message.unwrap_or_default();
            self.status.show(StatusLevel::Success, &message);
            Ok(AuthOutcome::Registered { message })
        } else {
            tracing::error!("Registration rejected with {}", reply.status);
            Ok(self.reject(reply.body.detail_text().unwrap_or_default()))
        }
    }

    /// Handles the identity provider's callback: decodes the credential's claims and
    /// trades them for a backend token.
    pub async fn sign_in_with_google(&self, credential: &str) -> Result<AuthOutcome> {
        let claims = decode_credential(credential)?;
        tracing::debug!("Identity credential for subject {}", claims.sub);

        let reply = self
            .api
            .social_auth_google(&SocialAuthRequest::from(claims))
            .await
            .map_err(|e| self.unexpected(e))?;
        self.finish_sign_in(reply).await
    }

    async fn finish_sign_in(&self, reply: AuthReply) -> Result<AuthOutcome> {
        if !reply.ok {
            tracing::error!("Failed to authenticate: {}", reply.status);
            return Ok(self.reject(reply.body.detail_text().unwrap_or_default()));
        }

        let Some(token) = reply.body.access_token.filter(|t| !t.is_empty()) else {
            tracing::error!("No token received in response");
            return Ok(self.reject(MSG_NO_TOKEN));
        };

        self.api
            .tokens()
            .set(TOKEN_KEY, &token)
            .map_err(|e| self.unexpected(e))?;
        tracing::info!("🔑 Token saved to storage");
        self.status.show(StatusLevel::Success, MSG_SIGNED_IN);

        tokio::time::sleep(self.redirect_delay).await;
        self.navigator.redirect(&self.redirect_url);

        Ok(AuthOutcome::SignedIn { token })
    }
}

/// Reads the claims from the payload (middle) segment of a JWT. The signature is not checked
/// here; the backend does that.
pub fn decode_credential(credential: &str) -> Result<IdentityClaims> {
    let mut segments = credential.split('.');
    let payload = match (segments.next(), segments.next()) {
        (Some(_), Some(payload)) if !payload.is_empty() => payload,
        _ => {
            return Err(ClientError::CredentialError {
                message: "credential has no payload segment".to_string(),
            })
        }
    };

    let trimmed = payload.trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| ClientError::CredentialError {
            message: format!("payload is not base64: {}", e),
        })?;

    serde_json::from_slice(&bytes).map_err(|e| ClientError::CredentialError {
        message: format!("payload is not valid claims JSON: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(claims: serde_json::Value) -> String {
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("eyJhbGciOiJSUzI1NiJ9.{}.c2lnbmF0dXJl", payload)
    }

    #[test]
    fn test_rejected_outcome_becomes_error() {
        let rejected = AuthOutcome::Rejected {
            message: MSG_PASSWORD_MISMATCH.to_string(),
        };
        let err = rejected.into_result().unwrap_err();
        assert!(matches!(err, ClientError::AuthRejected { message } if message == MSG_PASSWORD_MISMATCH));

        let signed_in = AuthOutcome::SignedIn {
            token: "jwt".to_string(),
        };
        assert_eq!(signed_in.clone().into_result().unwrap(), signed_in);
    }

    #[test]
    fn test_decode_credential_claims() {
        let token = jwt(serde_json::json!({
            "sub": "10769150350006150715113082367",
            "email": "leyla@example.com",
            "picture": "https://lh3.googleusercontent.com/a/x",
            "given_name": "Leyla",
            "name": "Leyla M."
        }));

        let claims = decode_credential(&token).unwrap();
        assert_eq!(claims.sub, "10769150350006150715113082367");
        assert_eq!(claims.given_name.as_deref(), Some("Leyla"));
        assert!(claims.family_name.is_none());
    }

    #[test]
    fn test_decode_credential_tolerates_padding() {
        let payload = base64::engine::general_purpose::URL_SAFE
            .encode(serde_json::json!({"sub": "1", "email": "a@b.c"}).to_string());
        let token = format!("h.{}.s", payload);
        assert_eq!(decode_credential(&token).unwrap().sub, "1");
    }

    #[test]
    fn test_decode_credential_rejects_garbage() {
        assert!(matches!(
            decode_credential("not-a-jwt"),
            Err(ClientError::CredentialError { .. })
        ));
        assert!(matches!(
            decode_credential("a.!!!.c"),
            Err(ClientError::CredentialError { .. })
        ));
        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("hello"));
        assert!(decode_credential(&not_json).is_err());
    }
}
