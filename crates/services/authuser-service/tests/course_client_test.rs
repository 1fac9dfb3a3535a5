//! Course client tests against an in-process HTTP backend.
//!
//! Exercises the reqwest transport end to end: status classification,
//! retry counts, query encoding and the empty-page fallback.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use authuser_service_lib::clients::{CourseClient, CourseClientError};
use common::{CourseServiceConfig, RetryConfig};
use domain::{PageRequest, Sort, SortDirection};

/// Scripted course service: fails `failures` times with `failure_status`, then answers.
struct Backend {
    failures: u32,
    failure_status: StatusCode,
    hits: AtomicU32,
    queries: Mutex<Vec<Option<String>>>,
}

impl Backend {
    fn new(failures: u32, failure_status: StatusCode) -> Arc<Self> {
        Arc::new(Self {
            failures,
            failure_status,
            hits: AtomicU32::new(0),
            queries: Mutex::new(Vec::new()),
        })
    }

    fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    /// True while the scripted failures are not used up.
    fn should_fail(&self) -> bool {
        self.hits.fetch_add(1, Ordering::SeqCst) < self.failures
    }
}

async fn list_courses(
    State(backend): State<Arc<Backend>>,
    Path(user_id): Path<Uuid>,
    RawQuery(query): RawQuery,
) -> Response {
    backend.queries.lock().unwrap().push(query);

    if backend.should_fail() {
        return backend.failure_status.into_response();
    }

    Json(json!({
        "content": [
            {"courseId": Uuid::new_v4(), "name": "Ownership", "level": "BEGINNER"},
            {"courseId": Uuid::new_v4(), "name": "Lifetimes", "level": "INTERMEDIATE"}
        ],
        "totalElements": 2,
        "number": 0,
        "size": 10,
        "totalPages": 1,
        "owner": user_id
    }))
    .into_response()
}

async fn delete_enrollments(State(backend): State<Arc<Backend>>) -> StatusCode {
    if backend.should_fail() {
        backend.failure_status
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn spawn_backend(backend: Arc<Backend>) -> SocketAddr {
    let app = Router::new()
        .route(
            "/courses/users/:user_id",
            get(list_courses).delete(delete_enrollments),
        )
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr, max_attempts: u32) -> CourseClient {
    CourseClient::from_config(
        &CourseServiceConfig {
            base_url: format!("http://{}", addr),
            request_timeout_ms: 2_000,
        },
        &RetryConfig {
            max_attempts,
            initial_delay_ms: 5,
            multiplier: 1.0,
            max_delay_ms: 5,
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_recovers_after_transient_failures() {
    let backend = Backend::new(2, StatusCode::SERVICE_UNAVAILABLE);
    let addr = spawn_backend(backend.clone()).await;

    let page = client_for(addr, 3)
        .get_courses_for_user(Uuid::new_v4(), &PageRequest::default())
        .await;

    assert_eq!(backend.hits(), 3);
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total_elements, 2);
    assert_eq!(page.content[0].name, "Ownership");
    assert_eq!(page.content[0].details["level"], "BEGINNER");
}

#[tokio::test]
async fn test_always_failing_service_yields_empty_page_after_max_attempts() {
    let backend = Backend::new(u32::MAX, StatusCode::SERVICE_UNAVAILABLE);
    let addr = spawn_backend(backend.clone()).await;
    let request = PageRequest::new(4, 25, Sort::default()).unwrap();

    let page = client_for(addr, 3)
        .get_courses_for_user(Uuid::new_v4(), &request)
        .await;

    assert_eq!(backend.hits(), 3);
    assert!(page.is_empty());
    assert_eq!(page.total_elements, 0);
    assert_eq!(page.page_number, 4);
    assert_eq!(page.page_size, 25);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let backend = Backend::new(u32::MAX, StatusCode::BAD_REQUEST);
    let addr = spawn_backend(backend.clone()).await;

    let page = client_for(addr, 3)
        .get_courses_for_user(Uuid::new_v4(), &PageRequest::default())
        .await;

    assert_eq!(backend.hits(), 1);
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_query_string_order() {
    let backend = Backend::new(0, StatusCode::SERVICE_UNAVAILABLE);
    let addr = spawn_backend(backend.clone()).await;
    let request = PageRequest::new(1, 20, Sort::new("name", SortDirection::Desc).unwrap()).unwrap();

    client_for(addr, 3)
        .get_courses_for_user(Uuid::new_v4(), &request)
        .await;

    let queries = backend.queries.lock().unwrap();
    assert_eq!(
        queries.as_slice(),
        &[Some("page=1&size=20&sort=name,DESC".to_string())]
    );
}

#[tokio::test]
async fn test_unreachable_service_yields_empty_page() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let page = client_for(addr, 2)
        .get_courses_for_user(Uuid::new_v4(), &PageRequest::default())
        .await;

    assert!(page.is_empty());
}

#[tokio::test]
async fn test_delete_failure_propagates_after_single_attempt() {
    let backend = Backend::new(u32::MAX, StatusCode::SERVICE_UNAVAILABLE);
    let addr = spawn_backend(backend.clone()).await;

    let result = client_for(addr, 3)
        .delete_enrollment_link(Uuid::new_v4())
        .await;

    assert_eq!(backend.hits(), 1);
    assert!(matches!(result, Err(CourseClientError::Unavailable(_))));
}

#[tokio::test]
async fn test_delete_success() {
    let backend = Backend::new(0, StatusCode::SERVICE_UNAVAILABLE);
    let addr = spawn_backend(backend.clone()).await;

    let result = client_for(addr, 3)
        .delete_enrollment_link(Uuid::new_v4())
        .await;

    tokio_test::assert_ok!(result);
    assert_eq!(backend.hits(), 1);
}
