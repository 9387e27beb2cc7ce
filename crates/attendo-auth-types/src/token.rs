//! JWT session tokens.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "issuer", test))]
use serde::Serialize;
use uuid::Uuid;

use attendo_domain::Role;

/// Identity carried by a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub role: Role,
    pub expires_at: u64,
}

/// Errors returned by [`validate_access_token`].
///
/// Every variant means "no session"; callers must never fall back to a role.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("unknown role")]
    UnknownRole,
    #[error("token encoding failed")]
    Encoding,
}

/// JWT claims payload.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user ID (UUID string) |
/// | `role` | role wire name, see [`Role`] |
/// | `exp` | expiration, seconds since UNIX epoch |
///
/// [`Serialize`] is only derived with the **`issuer`** feature.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "issuer", test), derive(Serialize))]
pub struct JwtClaims {
    pub sub: String,
    pub role: String,
    pub exp: u64,
}

fn validation() -> Validation {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}

/// Validate an access token, returning the verified identity.
///
/// Signature and expiry are checked first; then `sub` must be a UUID and
/// `role` a known role name.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, TokenError> {
    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    let claims = data.claims;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;
    let role = claims
        .role
        .parse::<Role>()
        .map_err(|_| TokenError::UnknownRole)?;
    Ok(TokenInfo {
        user_id,
        role,
        expires_at: claims.exp,
    })
}

/// Mint an HS256 access token expiring at `exp` (seconds since epoch).
#[cfg(any(feature = "issuer", test))]
pub fn issue_access_token(
    user_id: Uuid,
    role: Role,
    exp: u64,
    secret: &str,
) -> Result<String, TokenError> {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let claims = JwtClaims {
        sub: user_id.to_string(),
        role: role.as_str().to_owned(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| TokenError::Encoding)
}
