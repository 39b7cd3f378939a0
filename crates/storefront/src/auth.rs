//! Account registration and login against the external auth endpoints.
//!
//! The backend issues a compact token whose payload embeds a `role` claim.
//! The client decodes that claim without verifying the signature - it
//! cannot verify it - so the decoded role is treated strictly as a display
//! hint. Authorization happens on the backend, per privileged call.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;

use voltpeak_core::{Email, EmailError, Role};

use crate::api::{ApiError, AuthGateway};
use crate::session::Identity;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Password too short; blocked before any network call.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// Email failed structural validation; blocked before any network call.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The backend rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The access token is not a decodable compact token.
    #[error("malformed access token")]
    MalformedToken,
}

/// Create an account.
///
/// # Errors
///
/// Returns [`AuthError::WeakPassword`] or [`AuthError::InvalidEmail`]
/// before any network call, and [`AuthError::Api`] when the backend
/// rejects the account (typically an already-registered email).
#[instrument(skip_all)]
pub async fn register<G: AuthGateway>(
    gateway: &G,
    name: &str,
    email: &str,
    password: &SecretString,
) -> Result<(), AuthError> {
    let email = Email::parse(email)?;
    validate_password(password)?;

    gateway
        .sign_up(name, email.as_str(), password.expose_secret())
        .await?;
    tracing::info!(email = %email, "account created");
    Ok(())
}

/// Exchange credentials for a signed-in identity.
///
/// The display name falls back to the email's local part; the role comes
/// from the token's unverified `role` claim.
///
/// # Errors
///
/// Returns [`AuthError::InvalidEmail`] before any network call,
/// [`AuthError::Api`] for rejected credentials, and
/// [`AuthError::MalformedToken`] when the issued token cannot be decoded.
#[instrument(skip_all)]
pub async fn login<G: AuthGateway>(
    gateway: &G,
    email: &str,
    password: &SecretString,
) -> Result<Identity, AuthError> {
    let email = Email::parse(email)?;

    let response = gateway
        .sign_in(email.as_str(), password.expose_secret())
        .await?;
    let role = decode_role(&response.access_token)?;

    tracing::info!(email = %email, role = role.as_str(), "signed in");
    Ok(Identity {
        display_name: email.local_part().to_owned(),
        email: email.as_str().to_owned(),
        role,
        access_token: response.access_token,
    })
}

/// Reject passwords shorter than [`MIN_PASSWORD_LENGTH`].
///
/// # Errors
///
/// Returns [`AuthError::WeakPassword`] for short passwords.
pub fn validate_password(password: &SecretString) -> Result<(), AuthError> {
    if password.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword);
    }
    Ok(())
}

/// Decode the `role` claim from a compact token's payload segment.
///
/// No signature verification is performed - the result is a hint for which
/// surfaces to show, nothing more. A missing or unknown claim degrades to
/// [`Role::User`].
///
/// # Errors
///
/// Returns [`AuthError::MalformedToken`] when the token has no decodable
/// payload segment.
pub fn decode_role(token: &str) -> Result<Role, AuthError> {
    let payload = token.split('.').nth(1).ok_or(AuthError::MalformedToken)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| AuthError::MalformedToken)?;
    let claims: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|_| AuthError::MalformedToken)?;

    Ok(claims
        .get("role")
        .and_then(serde_json::Value::as_str)
        .map(Role::from_claim)
        .unwrap_or_default())
}
