use axum::{Router, routing::get};
use db::DBService;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::routes;

pub fn router(db: DBService) -> Router {
    let api_routes = Router::new()
        .merge(routes::tasks::router(&db))
        .route("/health", get(routes::health::health_check))
        .layer(CorsLayer::permissive());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use db::DBService;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn setup_router() -> Router {
        let temp_root = std::env::temp_dir().join(format!("task-server-test-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&temp_root).unwrap();
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            temp_root.join("db.sqlite").to_string_lossy()
        );

        let db = DBService::new(&db_url).await.unwrap();
        super::router(db)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn health_check_reports_running() {
        let app = setup_router().await;

        let (status, body) = send(&app, "GET", "/api/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Server is running");
    }

    #[tokio::test]
    async fn listing_starts_with_the_seeded_tasks() {
        let app = setup_router().await;

        let (status, body) = send(&app, "GET", "/api/tasks", None).await;

        assert_eq!(status, StatusCode::OK);
        let tasks = body.as_array().unwrap();
        assert_eq!(tasks.len(), 3);
        for task in tasks {
            assert_eq!(task["completed"], 0);
            assert!(task["created_at"].as_str().is_some());
        }
    }

    #[tokio::test]
    async fn create_task_returns_created_record() {
        let app = setup_router().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/tasks",
            Some(json!({"title": "Write release notes", "description": "cover the migration"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["id"].as_i64().unwrap() > 0);
        assert_eq!(body["title"], "Write release notes");
        assert_eq!(body["description"], "cover the migration");
        assert_eq!(body["completed"], 0);
        assert!(body["created_at"].as_str().is_some());
        assert!(body["updated_at"].as_str().is_some());
    }

    #[tokio::test]
    async fn create_task_requires_title_and_persists_nothing() {
        let app = setup_router().await;

        for body in [json!({}), json!({"title": "   "})] {
            let (status, body) = send(&app, "POST", "/api/tasks", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Title is required");
        }

        let (_, body) = send(&app, "GET", "/api/tasks", None).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn listing_returns_newest_first() {
        let app = setup_router().await;

        for title in ["first", "second"] {
            let (status, _) =
                send(&app, "POST", "/api/tasks", Some(json!({"title": title}))).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, body) = send(&app, "GET", "/api/tasks", None).await;
        let tasks = body.as_array().unwrap();
        assert_eq!(tasks.len(), 5);
        assert_eq!(tasks[0]["title"], "second");
        assert_eq!(tasks[1]["title"], "first");
    }

    #[tokio::test]
    async fn update_is_a_full_record_replace() {
        let app = setup_router().await;

        let (_, created) = send(
            &app,
            "POST",
            "/api/tasks",
            Some(json!({"title": "draft", "description": "first pass"})),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/tasks/{id}"),
            Some(json!({"title": "final", "completed": true})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "final");
        assert_eq!(updated["description"], "");
        assert_eq!(updated["completed"], 1);

        let (_, fetched) = send(&app, "GET", &format!("/api/tasks/{id}"), None).await;
        assert_eq!(fetched["completed"], 1);
        assert_eq!(fetched["created_at"], created["created_at"]);
    }

    #[tokio::test]
    async fn update_accepts_integer_completed_flag() {
        let app = setup_router().await;

        let (_, created) = send(&app, "POST", "/api/tasks", Some(json!({"title": "t"}))).await;
        let id = created["id"].as_i64().unwrap();

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/tasks/{id}"),
            Some(json!({"title": "t", "completed": 1})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["completed"], 1);
    }

    #[tokio::test]
    async fn task_lifecycle_round_trip() {
        let app = setup_router().await;

        let (status, created) = send(&app, "POST", "/api/tasks", Some(json!({"title": "A"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["completed"], 0);

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/tasks/{id}"),
            Some(json!({"title": "A", "completed": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["completed"], 1);

        let (status, deleted) = send(&app, "DELETE", &format!("/api/tasks/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["success"], true);
        assert_eq!(deleted["message"], "Task deleted");

        let (status, body) = send(&app, "GET", &format!("/api/tasks/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");
    }

    #[tokio::test]
    async fn fetching_a_missing_task_returns_not_found() {
        let app = setup_router().await;

        let (status, body) = send(&app, "GET", "/api/tasks/9999", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");
    }

    #[tokio::test]
    async fn updating_a_missing_task_returns_not_found() {
        let app = setup_router().await;

        let (status, body) = send(
            &app,
            "PUT",
            "/api/tasks/9999",
            Some(json!({"title": "ghost", "completed": false})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Task not found");
    }

    #[tokio::test]
    async fn deleting_a_missing_task_still_reports_success() {
        let app = setup_router().await;

        let (status, body) = send(&app, "DELETE", "/api/tasks/9999", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }
}
