/// Request authentication for Upbit exchange endpoints.
///
/// Every exchange request carries `Authorization: Bearer <jwt>`, where the JWT
/// (HS256, keyed by the secret key) holds the access key, a fresh UUID v4
/// nonce and, when the request has parameters, the SHA-512 hash of the
/// percent-decoded query string.
use std::fmt;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};

use crate::errors::UpbitError;
use crate::params::Params;

type HmacSha256 = Hmac<Sha256>;

/// Value of `query_hash_alg` in signed tokens.
pub const QUERY_HASH_ALG: &str = "SHA512";

/// Environment variable holding the access key.
pub const ACCESS_KEY_ENV: &str = "UPBIT_OPEN_API_ACCESS_KEY";
/// Environment variable holding the secret key.
pub const SECRET_KEY_ENV: &str = "UPBIT_OPEN_API_SECRET_KEY";

/// Compact JWT header for HS256.
const JWT_HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Upbit Open API key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Read credentials from `UPBIT_OPEN_API_ACCESS_KEY` and `UPBIT_OPEN_API_SECRET_KEY`.
    pub fn from_env() -> Result<Self, UpbitError> {
        let access_key = std::env::var(ACCESS_KEY_ENV)
            .map_err(|_| UpbitError::Configuration(format!("{ACCESS_KEY_ENV} is not set")))?;
        let secret_key = std::env::var(SECRET_KEY_ENV)
            .map_err(|_| UpbitError::Configuration(format!("{SECRET_KEY_ENV} is not set")))?;
        Ok(Self::new(access_key, secret_key))
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    fn validate(&self) -> Result<(), UpbitError> {
        if self.access_key.is_empty() {
            return Err(UpbitError::Configuration("access key is empty".into()));
        }
        if self.secret_key.is_empty() {
            return Err(UpbitError::Configuration("secret key is empty".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: String = self.access_key.chars().take(6).collect();
        f.debug_struct("Credentials")
            .field("access_key", &format!("{shown}..."))
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// JWT payload of an exchange request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub access_key: String,
    pub nonce: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_hash_alg: Option<String>,
}

impl TokenClaims {
    /// Claims for one request, with a fresh nonce.
    pub fn for_request(access_key: &str, params: &Params) -> Self {
        let nonce = uuid::Uuid::new_v4().to_string();
        if params.is_empty() {
            Self {
                access_key: access_key.to_string(),
                nonce,
                query_hash: None,
                query_hash_alg: None,
            }
        } else {
            Self {
                access_key: access_key.to_string(),
                nonce,
                query_hash: Some(query_hash(params)),
                query_hash_alg: Some(QUERY_HASH_ALG.to_string()),
            }
        }
    }
}

/// Lowercase hex SHA-512 of [`Params::hash_input`].
pub fn query_hash(params: &Params) -> String {
    hex::encode(Sha512::digest(params.hash_input().as_bytes()))
}

fn hmac_sha256(secret: &str) -> Result<HmacSha256, UpbitError> {
    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| UpbitError::Configuration(format!("invalid signing key: {e}")))
}

/// Sign claims into a compact HS256 JWT.
pub fn encode_token(claims: &TokenClaims, secret_key: &str) -> Result<String, UpbitError> {
    let header = BASE64_URL.encode(JWT_HEADER);
    let payload = BASE64_URL.encode(serde_json::to_vec(claims)?);
    let signing_input = format!("{header}.{payload}");

    let mut mac = hmac_sha256(secret_key)?;
    mac.update(signing_input.as_bytes());
    let signature = BASE64_URL.encode(mac.finalize().into_bytes());

    Ok(format!("{signing_input}.{signature}"))
}

/// Verify an HS256 JWT against `secret_key` and return its claims.
pub fn decode_token(token: &str, secret_key: &str) -> Result<TokenClaims, UpbitError> {
    let malformed = || UpbitError::InvalidRequest("malformed token".into());

    let mut parts = token.split('.');
    let (header, payload, signature) = match (parts.next(), parts.next(), parts.next(), parts.next())
    {
        (Some(h), Some(p), Some(s), None) => (h, p, s),
        _ => return Err(malformed()),
    };

    let header_json: serde_json::Value =
        serde_json::from_slice(&BASE64_URL.decode(header).map_err(|_| malformed())?)?;
    if header_json.get("alg").and_then(|a| a.as_str()) != Some("HS256") {
        return Err(UpbitError::InvalidRequest("unsupported token algorithm".into()));
    }

    let signature = BASE64_URL.decode(signature).map_err(|_| malformed())?;
    let mut mac = hmac_sha256(secret_key)?;
    mac.update(format!("{header}.{payload}").as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| UpbitError::InvalidRequest("token signature mismatch".into()))?;

    let payload = BASE64_URL.decode(payload).map_err(|_| malformed())?;
    Ok(serde_json::from_slice(&payload)?)
}

/// Build the `Authorization` header value for one exchange request.
pub fn authorization_header(
    credentials: &Credentials,
    params: &Params,
) -> Result<String, UpbitError> {
    credentials.validate()?;
    let claims = TokenClaims::for_request(&credentials.access_key, params);
    let token = encode_token(&claims, &credentials.secret_key)?;
    Ok(format!("Bearer {token}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_of(header: &str, secret: &str) -> TokenClaims {
        let token = header.strip_prefix("Bearer ").unwrap();
        decode_token(token, secret).unwrap()
    }

    #[test]
    fn test_empty_params_have_no_hash() {
        let creds = Credentials::new("access", "secret");
        let header = authorization_header(&creds, &Params::new()).unwrap();
        let claims = claims_of(&header, "secret");
        assert_eq!(claims.access_key, "access");
        assert!(claims.query_hash.is_none());
        assert!(claims.query_hash_alg.is_none());

        let token = header.strip_prefix("Bearer ").unwrap();
        let payload = token.split('.').nth(1).unwrap();
        let raw: serde_json::Value =
            serde_json::from_slice(&BASE64_URL.decode(payload).unwrap()).unwrap();
        let keys: Vec<_> = raw.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"access_key".to_string()));
        assert!(keys.contains(&"nonce".to_string()));
    }

    #[test]
    fn test_hash_of_single_market() {
        let params = Params::new().with("market", "KRW-BTC");
        let expected = hex::encode(Sha512::digest(b"market=KRW-BTC"));
        assert_eq!(query_hash(&params), expected);
        assert_eq!(expected.len(), 128);
        assert_eq!(expected, expected.to_lowercase());
    }

    #[test]
    fn test_nonce_is_only_difference() {
        let creds = Credentials::new("access", "secret");
        let params = Params::new().with("market", "KRW-BTC");
        let a = claims_of(&authorization_header(&creds, &params).unwrap(), "secret");
        let b = claims_of(&authorization_header(&creds, &params).unwrap(), "secret");
        assert_ne!(a.nonce, b.nonce);
        assert_eq!(a.access_key, b.access_key);
        assert_eq!(a.query_hash, b.query_hash);
        assert_eq!(a.query_hash_alg.as_deref(), Some(QUERY_HASH_ALG));
        assert!(uuid::Uuid::parse_str(&a.nonce).is_ok());
    }

    #[test]
    fn test_empty_keys_rejected() {
        let params = Params::new();
        let err = authorization_header(&Credentials::new("", "secret"), &params).unwrap_err();
        assert!(matches!(err, UpbitError::Configuration(_)));
        let err = authorization_header(&Credentials::new("access", ""), &params).unwrap_err();
        assert!(matches!(err, UpbitError::Configuration(_)));
    }

    #[test]
    fn test_wrong_secret_fails_verification() {
        let claims = TokenClaims::for_request("access", &Params::new());
        let token = encode_token(&claims, "secret").unwrap();
        assert_eq!(decode_token(&token, "secret").unwrap(), claims);
        assert!(matches!(
            decode_token(&token, "other"),
            Err(UpbitError::InvalidRequest(_))
        ));
        assert!(decode_token("not-a-token", "secret").is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("abcdefghijkl", "topsecret");
        let printed = format!("{creds:?}");
        assert!(!printed.contains("topsecret"));
        assert!(!printed.contains("abcdefghijkl"));
        assert!(printed.contains("abcdef..."));
    }
}
