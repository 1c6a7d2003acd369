use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// User record in the database.
///
/// `password` holds the bcrypt digest. It is serialized as-is by the list and
/// get endpoints; the login response uses [`LoginUser`](super::dto::LoginUser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    /// Profile picture, base64 text.
    pub profile: String,
    pub description: String,
}

/// Fields accepted by [`UserStore::create`](super::repo::UserStore::create).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    /// Partial update: a field changes only when the incoming value is present
    /// and non-empty.
    pub fn apply_changes(
        &mut self,
        name: Option<String>,
        description: Option<String>,
        profile: Option<String>,
    ) {
        fn pick(incoming: Option<String>, current: &mut String) {
            if let Some(v) = incoming.filter(|v| !v.is_empty()) {
                *current = v;
            }
        }
        pick(description, &mut self.description);
        pick(profile, &mut self.profile);
        pick(name, &mut self.name);
    }
}
