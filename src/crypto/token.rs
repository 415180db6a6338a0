use ed25519_dalek::{Signer, SigningKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Stable identifier of the signed-in user.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    /// Unique per token so repeated sign-ins never produce the same string.
    pub jti: String,
}

/// Signs bearer tokens of the form `base64url(claims).base64url(signature)`.
/// Whether a token is still valid is decided by the session registry.
pub struct TokenIssuer {
    signing_key: SigningKey,
}

impl TokenIssuer {
    /// Issuer with a fresh random key. Tokens survive restarts only through
    /// the session registry, never through signature checks.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Issuer from a base64 encoded 32-byte seed.
    pub fn from_base64_seed(seed: &str) -> Result<Self, AppError> {
        let bytes = base64_simd::STANDARD
            .decode_to_vec(seed.trim())
            .map_err(|e| AppError::Config(format!("Invalid TOKEN_SIGNING_KEY: {}", e)))?;
        let seed: [u8; 32] = bytes
            .try_into()
            .map_err(|_| AppError::Config("TOKEN_SIGNING_KEY must decode to 32 bytes".to_string()))?;

        Ok(Self {
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    pub fn issue(&self, user_uuid: &str, issued_at: i64, expires_at: i64) -> Result<String, AppError> {
        let claims = TokenClaims {
            sub: user_uuid.to_string(),
            iat: issued_at,
            exp: expires_at,
            jti: Uuid::new_v4().to_string(),
        };

        let payload = serde_json::to_vec(&claims)
            .map_err(|e| AppError::Crypto(format!("Failed to encode token claims: {}", e)))?;
        let signature = self.signing_key.sign(&payload);

        Ok(format!(
            "{}.{}",
            base64_simd::URL_SAFE_NO_PAD.encode_to_string(&payload),
            base64_simd::URL_SAFE_NO_PAD.encode_to_string(signature.to_bytes()),
        ))
    }
}
