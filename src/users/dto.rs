use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Request body for login.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({"email": "jhon@gmail.com", "password": "Jhon@123"}))]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for registration. `profile` and `description` are accepted
/// but a new account always starts with both empty.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(example = json!({"name": "Jhon", "email": "jhon@gmail.com", "password": "Jhon@123"}))]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RegisterRequest {
    pub fn has_required_fields(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.password.is_empty()
    }
}

/// Request body for profile edits. Empty strings count as absent.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
}

/// Response returned after login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

/// Public part of the user returned on login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginUser {
    pub id: Uuid,
    pub name: String,
    pub profile: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_accepts_and_tolerates_profile_fields() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"name":"Jhon","email":"jhon@gmail.com","password":"pw","profile":"abc"}"#,
        )
        .unwrap();
        assert_eq!(req.profile.as_deref(), Some("abc"));
        assert!(req.description.is_none());
        assert!(req.has_required_fields());
    }

    #[test]
    fn register_requires_password_key() {
        let parsed: Result<RegisterRequest, _> =
            serde_json::from_str(r#"{"name":"Jhon","email":"jhon@gmail.com"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn empty_register_fields_fail_presence_check() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"name":"","email":"a@b.c","password":"pw"}"#).unwrap();
        assert!(!req.has_required_fields());
    }

    #[test]
    fn update_fields_are_all_optional() {
        let req: UpdateUserRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_none() && req.description.is_none() && req.profile.is_none());
    }

    #[test]
    fn login_response_exposes_only_public_user_fields() {
        let response = LoginResponse {
            token: "t".into(),
            user: LoginUser {
                id: Uuid::nil(),
                name: "Jhon".into(),
                profile: String::new(),
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        let user = json["user"].as_object().unwrap();
        assert_eq!(user.len(), 3);
        assert!(user.get("email").is_none());
        assert!(user.get("password").is_none());
    }
}
