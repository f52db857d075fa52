//! Sealed session tokens carrying a job id and, once authenticated, its artifact.
//!
//! Tokens are `base64url(nonce || AES-256-GCM(claims json) || tag)`. The AEAD
//! key is derived from the configured secret with HMAC-SHA256, so any secret
//! length works. A fresh random nonce is used per token; two encodings of the
//! same claims differ.

use chrono::Utc;
use hmac::{Hmac, Mac};
use ring::aead::{AES_256_GCM, Aad, LessSafeKey, NONCE_LEN, Nonce, UnboundKey};
use sha2::Sha256;
use std::fmt;

use crate::job::Directionality;
use crate::provider::AuthData;
use crate::utils::{base64url_decode, base64url_encode, gen_random_bytes};

use super::config::SESSION_TOKEN_SECRET;
use super::errors::SessionError;
use super::types::SessionClaims;

type HmacSha256 = Hmac<Sha256>;

const KEY_DERIVATION_LABEL: &[u8] = b"portability-session-token-key-v1";
const TOKEN_AAD: &[u8] = b"portability-session-token-v1";

pub struct SessionTokenCodec {
    key: LessSafeKey,
}

impl fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokenCodec").finish_non_exhaustive()
    }
}

impl SessionTokenCodec {
    pub fn new(secret: &[u8]) -> Result<Self, SessionError> {
        if secret.is_empty() {
            return Err(SessionError::Crypto(
                "Session token secret must not be empty".to_string(),
            ));
        }

        let mut mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| SessionError::Crypto(format!("Invalid secret: {e}")))?;
        mac.update(KEY_DERIVATION_LABEL);
        let derived = mac.finalize().into_bytes();

        let unbound = UnboundKey::new(&AES_256_GCM, &derived)
            .map_err(|_| SessionError::Crypto("Failed to create AEAD key".to_string()))?;

        Ok(Self {
            key: LessSafeKey::new(unbound),
        })
    }

    /// Codec keyed by the process-wide `SESSION_TOKEN_SECRET`.
    pub fn from_env() -> Result<Self, SessionError> {
        Self::new(&SESSION_TOKEN_SECRET)
    }

    /// Issue the pre-authentication token for a newly created job.
    pub fn encode_job_id(&self, job_id: &str) -> Result<String, SessionError> {
        self.seal(&SessionClaims {
            job_id: job_id.to_string(),
            direction: None,
            auth_data: None,
            issued_at: Utc::now(),
        })
    }

    /// Issue a token binding `auth_data` to the directionality it authenticates.
    pub fn encode(
        &self,
        job_id: &str,
        direction: Directionality,
        auth_data: &AuthData,
    ) -> Result<String, SessionError> {
        self.seal(&SessionClaims {
            job_id: job_id.to_string(),
            direction: Some(direction),
            auth_data: Some(auth_data.clone()),
            issued_at: Utc::now(),
        })
    }

    /// Job id carried by `token`.
    pub fn decode(&self, token: &str) -> Result<String, SessionError> {
        Ok(self.decode_claims(token)?.job_id)
    }

    pub fn decode_claims(&self, token: &str) -> Result<SessionClaims, SessionError> {
        if token.is_empty() {
            return Err(SessionError::InvalidToken("token is missing".to_string()));
        }

        let bytes = base64url_decode(token)
            .map_err(|_| SessionError::InvalidToken("token is not base64url".to_string()))?;

        if bytes.len() < NONCE_LEN + AES_256_GCM.tag_len() {
            return Err(SessionError::InvalidToken("token is too short".to_string()));
        }

        let (nonce_bytes, sealed) = bytes.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
            .map_err(|_| SessionError::InvalidToken("bad nonce".to_string()))?;

        let mut in_out = sealed.to_vec();
        let plaintext = self
            .key
            .open_in_place(nonce, Aad::from(TOKEN_AAD), &mut in_out)
            .map_err(|_| SessionError::InvalidToken("token failed verification".to_string()))?;

        serde_json::from_slice(plaintext)
            .map_err(|_| SessionError::InvalidToken("token payload is malformed".to_string()))
    }

    fn seal(&self, claims: &SessionClaims) -> Result<String, SessionError> {
        let mut in_out = serde_json::to_vec(claims)
            .map_err(|e| SessionError::Crypto(format!("Failed to serialize claims: {e}")))?;

        let mut token = gen_random_bytes(NONCE_LEN)?;
        let nonce = Nonce::try_assume_unique_for_key(&token)
            .map_err(|_| SessionError::Crypto("Failed to create nonce".to_string()))?;

        self.key
            .seal_in_place_append_tag(nonce, Aad::from(TOKEN_AAD), &mut in_out)
            .map_err(|_| SessionError::Crypto("Failed to seal token".to_string()))?;

        token.extend_from_slice(&in_out);
        Ok(base64url_encode(token))
    }
}
