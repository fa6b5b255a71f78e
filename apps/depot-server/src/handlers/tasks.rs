//! Task handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use depot_core::domain::Task;
use depot_core::ports::TaskRequest;
use depot_shared::ApiResponse;
use depot_shared::dto::{EnqueueTaskRequest, TaskFailure, TaskResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Only the failure record leaves the server; diagnostics never do.
fn task_response(task: Task) -> TaskResponse {
    TaskResponse {
        id: task.id,
        name: task.name,
        state: task.state.as_str().to_string(),
        error: task.error.map(|record| TaskFailure {
            code: record.code,
            description: record.description,
            http_status: record.http_status,
        }),
        created_at: task.created_at,
        started_at: task.started_at,
        finished_at: task.finished_at,
    }
}

/// POST /api/tasks
pub async fn enqueue_task(
    state: web::Data<AppState>,
    body: web::Json<EnqueueTaskRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.kind.trim().is_empty() {
        return Err(AppError::BadRequest("Task kind is required".to_string()));
    }

    let task = state
        .queue
        .enqueue(TaskRequest::new(req.kind, req.payload))
        .await?;

    Ok(HttpResponse::Accepted().json(ApiResponse::ok(task_response(task))))
}

/// GET /api/tasks/{id}
pub async fn get_task(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let task = state
        .tasks
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(task_response(task))))
}

/// GET /api/tasks
pub async fn list_tasks(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tasks: Vec<TaskResponse> = state
        .tasks
        .list()
        .await?
        .into_iter()
        .map(task_response)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(tasks)))
}

/// GET /api/tasks/stats
pub async fn queue_stats(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state.queue.stats().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use depot_core::TaskBoundary;
    use depot_core::error::ErrorRegistry;
    use depot_core::ports::{TaskQueue, TaskRepository};
    use depot_infra::{
        DownloaderConfig, HttpDownloader, InMemoryDiagnosticSink, InMemoryTaskQueue,
        InMemoryTaskQueueConfig, InMemoryTaskRepository,
    };

    use crate::background;
    use crate::handlers::configure_routes;
    use crate::state::AppState;

    async fn state(sink: Arc<InMemoryDiagnosticSink>) -> AppState {
        let registry = Arc::new(ErrorRegistry::builtin());
        let tasks: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository::new());
        let boundary = TaskBoundary::new(registry.clone(), sink);
        let queue: Arc<dyn TaskQueue> = Arc::new(InMemoryTaskQueue::new(
            InMemoryTaskQueueConfig::default(),
            boundary,
            tasks.clone(),
        ));

        let downloader = HttpDownloader::new(DownloaderConfig::default()).unwrap();
        queue
            .start_worker(background::handlers(downloader))
            .await
            .unwrap();

        AppState {
            queue,
            tasks,
            registry,
        }
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(actix_web::web::Data::new($state))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_failed_task_exposes_only_the_record() {
        let sink = Arc::new(InMemoryDiagnosticSink::new());
        let app = app!(state(sink.clone()).await);

        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .set_json(json!({ "kind": "download", "payload": { "url": "ftp://x" } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        let body: Value = test::read_body_json(resp).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let mut task = Value::Null;
        for _ in 0..100 {
            let req = test::TestRequest::get()
                .uri(&format!("/api/tasks/{id}"))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            task = body["data"].clone();
            if task["state"] == "failed" {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(task["state"], "failed");
        assert_eq!(
            task["error"],
            json!({
                "code": "DPT0008",
                "description": "URL: ftp://x not supported.",
                "http_status": 400,
            })
        );
        assert_eq!(sink.len(), 1);
    }

    #[actix_web::test]
    async fn test_unknown_kind_fails_with_missing_plugin() {
        let app = app!(state(Arc::new(InMemoryDiagnosticSink::new())).await);

        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .set_json(json!({ "kind": "rpm.sync" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let mut task = Value::Null;
        for _ in 0..100 {
            let req = test::TestRequest::get()
                .uri(&format!("/api/tasks/{id}"))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            task = body["data"].clone();
            if task["state"] == "failed" {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(task["error"]["code"], "DPT0002");
        assert_eq!(
            task["error"]["description"],
            "Plugin with app label rpm.sync is not installed."
        );
    }

    #[actix_web::test]
    async fn test_unknown_task_is_not_found() {
        let app = app!(state(Arc::new(InMemoryDiagnosticSink::new())).await);

        let req = test::TestRequest::get()
            .uri(&format!("/api/tasks/{}", uuid::Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_empty_kind_is_rejected() {
        let app = app!(state(Arc::new(InMemoryDiagnosticSink::new())).await);

        let req = test::TestRequest::post()
            .uri("/api/tasks")
            .set_json(json!({ "kind": " " }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_error_catalogue_lists_builtin_codes() {
        let app = app!(state(Arc::new(InMemoryDiagnosticSink::new())).await);

        let req = test::TestRequest::get().uri("/api/errors").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let entries = body["data"].as_array().unwrap();

        assert_eq!(entries.len(), 11);
        assert_eq!(entries[0]["code"], "DPT0000");
        assert_eq!(
            entries[9],
            json!({ "code": "DPT0009", "name": "ProxyAuthenticationError", "http_status": 407 })
        );
        assert!(entries.iter().all(|e| e.get("template").is_none()));
    }

    #[actix_web::test]
    async fn test_stats() {
        let app = app!(state(Arc::new(InMemoryDiagnosticSink::new())).await);

        let req = test::TestRequest::get().uri("/api/tasks/stats").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
