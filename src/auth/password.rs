use tracing::error;

/// bcrypt work factor for stored digests.
pub const PASSWORD_COST: u32 = 10;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    bcrypt::hash(plain, PASSWORD_COST).map_err(|e| {
        error!(error = %e, "bcrypt hash error");
        anyhow::anyhow!(e.to_string())
    })
}

/// `Ok(false)` on mismatch; `Err` only when `hash` is not a bcrypt digest.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    bcrypt::verify(plain, hash).map_err(|e| {
        error!(error = %e, "bcrypt verify error");
        anyhow::anyhow!(e.to_string())
    })
}

/// Runs [`hash_password`] on the blocking pool.
pub async fn hash_password_blocking(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain)).await?
}

/// Runs [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(plain: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash)).await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_digest_accepts_the_same_login_password() {
        let digest = hash_password("Jhon@123").unwrap();
        assert!(digest.starts_with("$2b$10$"), "unexpected digest prefix: {digest}");
        assert_eq!(digest.len(), 60);
        assert!(verify_password("Jhon@123", &digest).unwrap());
    }

    #[test]
    fn login_with_near_miss_password_is_a_plain_mismatch() {
        let digest = hash_password("Jhon@123").unwrap();
        for attempt in ["jhon@123", "Jhon@1234", "", " Jhon@123"] {
            assert!(!verify_password(attempt, &digest).unwrap(), "{attempt:?} matched");
        }
    }

    #[test]
    fn digests_are_salted_per_call() {
        let a = hash_password("Jhon@123").unwrap();
        let b = hash_password("Jhon@123").unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("Jhon@123"));
        assert!(verify_password("Jhon@123", &b).unwrap());
    }

    #[test]
    fn stored_plaintext_is_not_a_digest() {
        assert!(verify_password("Jhon@123", "Jhon@123").is_err());
        assert!(verify_password("Jhon@123", "$2b$10$truncated").is_err());
    }

    #[test]
    fn digests_from_other_costs_still_verify() {
        let digest = bcrypt::hash("Jhon@123", 4).unwrap();
        assert!(digest.starts_with("$2b$04$"));
        assert!(verify_password("Jhon@123", &digest).unwrap());
    }

    #[tokio::test]
    async fn blocking_helpers_match_sync_versions() {
        let digest = hash_password_blocking("pw".into()).await.unwrap();
        assert!(verify_password_blocking("pw".into(), digest.clone()).await.unwrap());
        assert!(!verify_password_blocking("nope".into(), digest).await.unwrap());
    }
}
