// JWT token creation and verification
// Handles authentication tokens with 8-hour expiry

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifetime of an issued token
pub const TOKEN_TTL_HOURS: i64 = 8;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (user_id)
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID (subject)
    pub sub: Uuid,
    /// Expiry timestamp (seconds since epoch)
    pub exp: usize,
}

/// Signing and verification keys derived once from the shared secret
///
/// # Example
/// ```
/// use league_planner_api::auth::jwt::JwtKeys;
/// use uuid::Uuid;
///
/// let keys = JwtKeys::new("your-secret-key");
/// let user_id = Uuid::new_v4();
/// let token = keys.create_token(user_id).expect("valid token");
///
/// let claims = keys.verify_token(&token).expect("valid token");
/// assert_eq!(claims.sub, user_id);
/// ```
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Creates an HS256 token for a user, expiring after [`TOKEN_TTL_HOURS`]
    pub fn create_token(&self, user_id: Uuid) -> Result<String, jsonwebtoken::errors::Error> {
        let expiry = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
        let claims = Claims {
            sub: user_id,
            exp: expiry.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verifies signature and expiry, returning the decoded claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding, &Validation::default()).map(|data| data.claims)
    }
}
