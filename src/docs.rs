use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::MessageResponse,
    state::AppState,
    users::{
        dto::{LoginRequest, LoginResponse, LoginUser, RegisterRequest, UpdateUserRequest},
        handlers,
        repo_types::User,
    },
};

pub const SWAGGER_UI_PATH: &str = "/api-docs";
pub const OPENAPI_PATH: &str = "/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "userbase", description = "User accounts API"),
    paths(
        handlers::login,
        handlers::register,
        handlers::list_users,
        handlers::get_user,
        handlers::update_user
    ),
    components(schemas(
        User,
        LoginRequest,
        LoginResponse,
        LoginUser,
        RegisterRequest,
        UpdateUserRequest,
        MessageResponse
    )),
    tags((name = "Users", description = "The Users API"))
)]
pub struct ApiDoc;

/// Interactive UI at `/api-docs/`, raw document at [`OPENAPI_PATH`].
pub fn router() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_user_operation() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for p in ["/login", "/register", "/users", "/users/{id}"] {
            assert!(paths.contains_key(p), "missing {p}");
        }
        assert!(paths["/users/{id}"].get("put").is_some());
        assert!(doc["components"]["schemas"].get("User").is_some());
    }
}
