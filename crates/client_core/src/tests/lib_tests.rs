use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::error::ErrorCode;
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
struct RosterState {
    students: Arc<Mutex<Vec<Student>>>,
    next_id: Arc<Mutex<i64>>,
}

fn seeded(students: Vec<Student>) -> RosterState {
    let next_id = students.iter().map(|s| s.id.0).max().unwrap_or(0) + 1;
    RosterState {
        students: Arc::new(Mutex::new(students)),
        next_id: Arc::new(Mutex::new(next_id)),
    }
}

fn student(id: i64, name: &str, email: &str) -> Student {
    Student {
        id: StudentId(id),
        name: name.to_string(),
        address: None,
        city: None,
        state: None,
        email: email.to_string(),
        phone: None,
    }
}

fn not_found(student_id: i64) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(
            ErrorCode::NotFound,
            format!("student {student_id} not found"),
        )),
    )
}

async fn handle_list(State(state): State<RosterState>) -> Json<Vec<Student>> {
    Json(state.students.lock().await.clone())
}

async fn handle_create(
    State(state): State<RosterState>,
    Json(payload): Json<StudentPayload>,
) -> Json<Student> {
    let mut next_id = state.next_id.lock().await;
    let created = Student {
        id: StudentId(*next_id),
        name: payload.name,
        address: payload.address,
        city: payload.city,
        state: payload.state,
        email: payload.email,
        phone: payload.phone,
    };
    *next_id += 1;
    state.students.lock().await.push(created.clone());
    Json(created)
}

async fn handle_update(
    State(state): State<RosterState>,
    Path(student_id): Path<i64>,
    Json(payload): Json<StudentPayload>,
) -> Result<Json<Student>, (StatusCode, Json<ApiError>)> {
    let mut students = state.students.lock().await;
    let Some(slot) = students.iter_mut().find(|s| s.id.0 == student_id) else {
        return Err(not_found(student_id));
    };
    *slot = Student {
        id: StudentId(student_id),
        name: payload.name,
        address: payload.address,
        city: payload.city,
        state: payload.state,
        email: payload.email,
        phone: payload.phone,
    };
    Ok(Json(slot.clone()))
}

async fn handle_delete(
    State(state): State<RosterState>,
    Path(student_id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    let mut students = state.students.lock().await;
    let before = students.len();
    students.retain(|s| s.id.0 != student_id);
    if students.len() == before {
        return Err(not_found(student_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn spawn_roster_server(state: RosterState) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/students", get(handle_list).post(handle_create))
        .route(
            "/students/:id",
            axum::routing::put(handle_update).delete(handle_delete),
        )
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn list_students_returns_roster_in_server_order() {
    let state = seeded(vec![
        student(1, "Ann", "a@x.com"),
        student(2, "Bob", "b@x.com"),
    ]);
    let url = spawn_roster_server(state).await.expect("spawn server");
    let client = RosterClient::new(url);

    let students = client.list_students().await.expect("list");
    assert_eq!(students.len(), 2);
    assert_eq!(students[0].id, StudentId(1));
    assert_eq!(students[0].name, "Ann");
    assert_eq!(students[1].id, StudentId(2));
    assert_eq!(students[1].email, "b@x.com");
}

#[tokio::test]
async fn create_student_returns_record_with_server_assigned_id() {
    let state = seeded(vec![student(4, "Ann", "a@x.com")]);
    let url = spawn_roster_server(state.clone()).await.expect("spawn server");
    let client = RosterClient::new(url);

    let payload = StudentPayload {
        name: "Cara Miles".to_string(),
        address: Some("12 Elm St".to_string()),
        city: None,
        state: None,
        email: "cara@school.edu".to_string(),
        phone: None,
    };
    let created = client.create_student(&payload).await.expect("create");

    assert_eq!(created.id, StudentId(5));
    assert_eq!(created.name, "Cara Miles");
    assert_eq!(created.address.as_deref(), Some("12 Elm St"));
    assert_eq!(state.students.lock().await.len(), 2);
}

#[tokio::test]
async fn update_student_replaces_fields_for_existing_id() {
    let state = seeded(vec![student(7, "Ann", "a@x.com")]);
    let url = spawn_roster_server(state.clone()).await.expect("spawn server");
    let client = RosterClient::new(url);

    let payload = StudentPayload {
        name: "Ann Updated".to_string(),
        address: None,
        city: Some("Springfield".to_string()),
        state: None,
        email: "ann@x.com".to_string(),
        phone: Some("+1 555 0100".to_string()),
    };
    let updated = client
        .update_student(StudentId(7), &payload)
        .await
        .expect("update");

    assert_eq!(updated.id, StudentId(7));
    assert_eq!(updated.name, "Ann Updated");
    assert_eq!(updated.city.as_deref(), Some("Springfield"));
    let on_server = state.students.lock().await;
    assert_eq!(on_server[0].phone.as_deref(), Some("+1 555 0100"));
}

#[tokio::test]
async fn delete_student_removes_record() {
    let state = seeded(vec![
        student(1, "Ann", "a@x.com"),
        student(2, "Bob", "b@x.com"),
    ]);
    let url = spawn_roster_server(state.clone()).await.expect("spawn server");
    let client = RosterClient::new(url);

    client.delete_student(StudentId(1)).await.expect("delete");

    let remaining = state.students.lock().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, StudentId(2));
}

#[tokio::test]
async fn structured_error_body_surfaces_in_error_chain() {
    let state = seeded(Vec::new());
    let url = spawn_roster_server(state).await.expect("spawn server");
    let client = RosterClient::new(url);

    let err = client
        .delete_student(StudentId(99))
        .await
        .expect_err("missing id must fail");
    let message = format!("{err:#}");
    assert!(message.contains("NotFound"), "unexpected error: {message}");
    assert!(
        message.contains("student 99 not found"),
        "unexpected error: {message}"
    );
}

#[tokio::test]
async fn bodyless_error_status_falls_back_to_status_code() {
    async fn handle_broken() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/students", get(handle_broken));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = RosterClient::new(format!("http://{addr}"));
    let err = client.list_students().await.expect_err("500 must fail");
    assert!(
        format!("{err:#}").contains("500"),
        "unexpected error: {err:#}"
    );
}

#[test]
fn trailing_slashes_are_stripped_from_server_url() {
    let client = RosterClient::new("http://localhost:8443///");
    assert_eq!(client.server_url(), "http://localhost:8443");
}
