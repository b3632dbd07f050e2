use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{debug, instrument};

use super::domain::{Claims, CurrentUser};
use super::errors::AuthError;

/// Signs and verifies HS256 bearer tokens, independent of web framework
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Issue a token for `user`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{TokenService, domain::{CurrentUser, Role}};
    /// let tokens = TokenService::new("secret", 3600);
    /// let user = CurrentUser { id: 42, email: "u@e.com".into(), roles: vec![Role::User] };
    /// let token = tokens.issue(&user).unwrap();
    /// assert_eq!(tokens.verify(&token).unwrap(), user);
    /// ```
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub fn issue(&self, user: &CurrentUser) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.email.clone(),
            uid: user.id,
            roles: user.roles.clone(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };
        encode(&JwtHeader::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Verify signature and expiry, returning the caller the token names.
    pub fn verify(&self, token: &str) -> Result<CurrentUser, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        debug!(user_id = data.claims.uid, "token verified");
        Ok(data.claims.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::domain::Role;

    fn admin() -> CurrentUser {
        CurrentUser { id: 1, email: "admin@example.com".into(), roles: vec![Role::User, Role::Admin] }
    }

    #[test]
    fn issued_token_round_trips_identity() {
        let svc = TokenService::new("secret", 60);
        let token = svc.issue(&admin()).unwrap();
        let user = svc.verify(&token).unwrap();
        assert_eq!(user, admin());
        assert!(user.has_role(Role::Admin));
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = TokenService::new("secret", 60).issue(&admin()).unwrap();
        let err = TokenService::new("other", 60).verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn expired_token_rejected() {
        let svc = TokenService::new("secret", 60);
        let claims = Claims {
            sub: "old@example.com".into(),
            uid: 9,
            roles: vec![Role::User],
            iat: 1_000,
            exp: 2_000,
        };
        let token = encode(&JwtHeader::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(b"secret")).unwrap();
        assert!(matches!(svc.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn garbage_rejected() {
        let svc = TokenService::new("secret", 60);
        assert!(svc.verify("not-a-jwt").is_err());
    }
}
