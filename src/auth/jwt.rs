use std::collections::HashSet;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::state::AppState;

/// Token payload. Carries the user id and nothing else: no `exp`, `iss` or `aud`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::from_secret(&state.config.jwt.secret)
    }
}

impl JwtKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn sign(&self, user_id: Uuid) -> anyhow::Result<String> {
        let claims = Claims { id: user_id };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }

    /// Checks the signature only; tokens never expire.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = false;
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.id, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = JwtKeys::from_secret("dev-secret");
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.id, user_id);
    }

    #[test]
    fn signing_is_deterministic() {
        let keys = JwtKeys::from_secret("dev-secret");
        let user_id = Uuid::new_v4();
        assert_eq!(keys.sign(user_id).unwrap(), keys.sign(user_id).unwrap());
    }

    #[test]
    fn payload_holds_only_the_id() {
        let keys = JwtKeys::from_secret("dev-secret");
        let token = keys.sign(Uuid::nil()).unwrap();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = false;
        let raw = decode::<serde_json::Value>(&token, &keys.decoding, &validation).unwrap();
        let obj = raw.claims.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["id"], Uuid::nil().to_string());
    }

    #[test]
    fn verify_rejects_other_secret() {
        let good = JwtKeys::from_secret("same-secret");
        let bad = JwtKeys::from_secret("other-secret");
        let token = good.sign(Uuid::new_v4()).unwrap();
        assert!(bad.verify(&token).is_err());
    }

    #[test]
    fn keys_come_from_app_state() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let id = Uuid::new_v4();
        let token = keys.sign(id).unwrap();
        let direct = JwtKeys::from_secret(&state.config.jwt.secret);
        assert_eq!(direct.verify(&token).unwrap().id, id);
    }
}
