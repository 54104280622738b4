pub mod auth;
pub mod comment;
pub mod meetup;
pub mod question;

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde_json::json;

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .nest("/auth", auth::router())
        .nest("/meetups", meetup::router())
        .nest("/questions", question::router())
        .nest("/comments", comment::router())
}

/// GET /api/v1
async fn welcome() -> impl IntoResponse {
    Json(json!({ "status": 200, "message": "Welcome to Questioner!" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    use crate::test_utils::TestAppStateBuilder;

    #[tokio::test]
    async fn root_greets() {
        let app_state = TestAppStateBuilder::new().build();
        let server = TestServer::new(router().with_state(app_state)).unwrap();

        let response = server.get("/").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": 200, "message": "Welcome to Questioner!" }));
    }
}
