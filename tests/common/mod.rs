//! In-process fake of the task API, served by axum on an ephemeral port.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tokio::net::TcpListener;

#[derive(Clone, Debug)]
pub struct GroupRow {
    pub id: i64,
    pub name: String,
    pub owner: String,
}

#[derive(Clone, Debug)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub group_id: i64,
    pub is_completed: bool,
}

#[derive(Default, Debug)]
pub struct Data {
    /// username -> password
    pub users: HashMap<String, String>,
    pub groups: Vec<GroupRow>,
    pub tasks: Vec<TaskRow>,
    pub next_id: i64,
    /// "METHOD /path" -> number of requests
    pub hits: HashMap<String, usize>,
    /// raw query strings seen on `GET /tasks`
    pub task_queries: Vec<String>,
}

#[derive(Clone, Default)]
pub struct Backend {
    pub data: Arc<Mutex<Data>>,
}

impl Backend {
    pub fn with_user(self, username: &str, password: &str) -> Self {
        self.data
            .lock()
            .unwrap()
            .users
            .insert(username.to_string(), password.to_string());
        self
    }

    pub fn with_group(self, owner: &str, name: &str) -> Self {
        {
            let mut data = self.data.lock().unwrap();
            data.next_id += 1;
            let id = data.next_id;
            data.groups.push(GroupRow {
                id,
                name: name.to_string(),
                owner: owner.to_string(),
            });
        }
        self
    }

    pub fn with_task(self, group_id: i64, title: &str, is_completed: bool) -> Self {
        {
            let mut data = self.data.lock().unwrap();
            data.next_id += 1;
            let id = data.next_id;
            data.tasks.push(TaskRow {
                id,
                title: title.to_string(),
                description: None,
                group_id,
                is_completed,
            });
        }
        self
    }

    pub fn hits(&self, route: &str) -> usize {
        self.data
            .lock()
            .unwrap()
            .hits
            .get(route)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.data.lock().unwrap().hits.values().sum()
    }

    pub fn task_queries(&self) -> Vec<String> {
        self.data.lock().unwrap().task_queries.clone()
    }

    pub fn group_ids(&self) -> Vec<i64> {
        self.data.lock().unwrap().groups.iter().map(|g| g.id).collect()
    }

    /// Serves the fake on 127.0.0.1 and returns the API base URL.
    pub async fn spawn(&self) -> String {
        let router = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/groups", get(list_groups).post(create_group))
            .route("/api/groups/:id", put(rename_group).delete(delete_group))
            .route("/api/tasks", get(list_tasks).post(create_task))
            .route("/api/tasks/:id", put(update_task).delete(delete_task))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router.into_make_service())
                .await
                .unwrap();
        });

        format!("http://{addr}/api")
    }

    fn hit(&self, route: &str) {
        *self
            .data
            .lock()
            .unwrap()
            .hits
            .entry(route.to_string())
            .or_default() += 1;
    }
}

pub fn token_for(username: &str) -> String {
    format!("token-{username}")
}

fn detail(status: StatusCode, detail: Value) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

/// Username for a valid bearer token.
fn authorize(backend: &Backend, headers: &HeaderMap) -> Result<String, Response> {
    let unauthorized = || {
        detail(
            StatusCode::UNAUTHORIZED,
            json!("Could not validate credentials"),
        )
    };
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(unauthorized)?;

    let data = backend.data.lock().unwrap();
    data.users
        .keys()
        .find(|user| token_for(user) == token)
        .cloned()
        .ok_or_else(unauthorized)
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login(State(backend): State<Backend>, Json(body): Json<LoginBody>) -> Response {
    backend.hit("POST /auth/login");
    let data = backend.data.lock().unwrap();
    if data.users.get(&body.username) == Some(&body.password) {
        Json(json!({
            "access_token": token_for(&body.username),
            "token_type": "bearer",
        }))
        .into_response()
    } else {
        detail(
            StatusCode::UNAUTHORIZED,
            json!("Incorrect username or password"),
        )
    }
}

#[derive(Deserialize)]
struct RegisterBody {
    username: String,
    email: String,
    password: String,
}

async fn register(State(backend): State<Backend>, Json(body): Json<RegisterBody>) -> Response {
    backend.hit("POST /auth/register");

    let mut problems = Vec::new();
    if body.password.chars().count() < 8 {
        problems.push(json!({ "loc": ["body", "password"], "msg": "Password must be at least 8 characters" }));
    }
    if !body.email.contains('@') {
        problems.push(json!({ "loc": ["body", "email"], "msg": "Invalid email" }));
    }
    if !problems.is_empty() {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, Value::Array(problems));
    }

    let mut data = backend.data.lock().unwrap();
    if data.users.contains_key(&body.username) {
        return detail(StatusCode::BAD_REQUEST, json!("Username already registered"));
    }
    data.users.insert(body.username.clone(), body.password);
    (
        StatusCode::CREATED,
        Json(json!({ "username": body.username, "email": body.email })),
    )
        .into_response()
}

async fn list_groups(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    backend.hit("GET /groups");
    let user = match authorize(&backend, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let data = backend.data.lock().unwrap();
    let groups: Vec<Value> = data
        .groups
        .iter()
        .filter(|group| group.owner == user)
        .map(|group| json!({ "id": group.id, "name": group.name }))
        .collect();
    Json(groups).into_response()
}

#[derive(Deserialize)]
struct GroupBody {
    name: String,
}

async fn create_group(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<GroupBody>,
) -> Response {
    backend.hit("POST /groups");
    let user = match authorize(&backend, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let mut data = backend.data.lock().unwrap();
    data.next_id += 1;
    let id = data.next_id;
    data.groups.push(GroupRow {
        id,
        name: body.name.clone(),
        owner: user,
    });
    Json(json!({ "id": id, "name": body.name })).into_response()
}

async fn rename_group(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<GroupBody>,
) -> Response {
    backend.hit("PUT /groups/{id}");
    if let Err(response) = authorize(&backend, &headers) {
        return response;
    }

    let mut data = backend.data.lock().unwrap();
    match data.groups.iter_mut().find(|group| group.id == id) {
        Some(group) => {
            group.name = body.name;
            // some backends answer updates with an empty body
            StatusCode::NO_CONTENT.into_response()
        }
        None => detail(StatusCode::NOT_FOUND, json!("Group not found")),
    }
}

async fn delete_group(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    backend.hit("DELETE /groups/{id}");
    if let Err(response) = authorize(&backend, &headers) {
        return response;
    }

    let mut data = backend.data.lock().unwrap();
    let before = data.groups.len();
    data.groups.retain(|group| group.id != id);
    if data.groups.len() == before {
        return detail(StatusCode::NOT_FOUND, json!("Group not found"));
    }
    data.tasks.retain(|task| task.group_id != id);
    Json(json!({ "message": "Group deleted" })).into_response()
}

#[derive(Deserialize)]
struct TaskQuery {
    group: Option<i64>,
    completed: Option<bool>,
}

async fn list_tasks(
    State(backend): State<Backend>,
    headers: HeaderMap,
    uri: axum::http::Uri,
    Query(query): Query<TaskQuery>,
) -> Response {
    backend.hit("GET /tasks");
    let user = match authorize(&backend, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };

    let mut data = backend.data.lock().unwrap();
    data.task_queries
        .push(uri.query().unwrap_or_default().to_string());

    let tasks: Vec<Value> = data
        .tasks
        .iter()
        .filter_map(|task| {
            let group = data
                .groups
                .iter()
                .find(|group| group.id == task.group_id && group.owner == user)?;
            let wanted = query.group.map_or(true, |id| id == task.group_id)
                && query.completed.map_or(true, |c| c == task.is_completed);
            wanted.then(|| {
                json!({
                    "id": task.id,
                    "title": task.title,
                    "description": task.description,
                    "group_id": task.group_id,
                    "is_completed": task.is_completed,
                    "group_name": group.name,
                })
            })
        })
        .collect();
    Json(tasks).into_response()
}

#[derive(Deserialize)]
struct NewTaskBody {
    title: String,
    description: Option<String>,
    group_id: i64,
}

async fn create_task(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<NewTaskBody>,
) -> Response {
    backend.hit("POST /tasks");
    if let Err(response) = authorize(&backend, &headers) {
        return response;
    }

    let mut data = backend.data.lock().unwrap();
    if !data.groups.iter().any(|group| group.id == body.group_id) {
        return detail(StatusCode::NOT_FOUND, json!("Group not found"));
    }
    data.next_id += 1;
    let id = data.next_id;
    data.tasks.push(TaskRow {
        id,
        title: body.title,
        description: body.description,
        group_id: body.group_id,
        is_completed: false,
    });
    Json(json!({ "id": id })).into_response()
}

#[derive(Deserialize)]
struct TaskPatch {
    title: Option<String>,
    description: Option<String>,
    is_completed: Option<bool>,
    group_id: Option<i64>,
}

async fn update_task(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<TaskPatch>,
) -> Response {
    backend.hit("PUT /tasks/{id}");
    if let Err(response) = authorize(&backend, &headers) {
        return response;
    }

    let mut data = backend.data.lock().unwrap();
    let Some(task) = data.tasks.iter_mut().find(|task| task.id == id) else {
        return detail(StatusCode::NOT_FOUND, json!("Task not found"));
    };
    if let Some(title) = body.title {
        task.title = title;
    }
    if body.description.is_some() {
        task.description = body.description;
    }
    if let Some(is_completed) = body.is_completed {
        task.is_completed = is_completed;
    }
    if let Some(group_id) = body.group_id {
        task.group_id = group_id;
    }
    Json(json!({ "id": id })).into_response()
}

async fn delete_task(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    backend.hit("DELETE /tasks/{id}");
    if let Err(response) = authorize(&backend, &headers) {
        return response;
    }

    let mut data = backend.data.lock().unwrap();
    let before = data.tasks.len();
    data.tasks.retain(|task| task.id != id);
    if data.tasks.len() == before {
        return detail(StatusCode::NOT_FOUND, json!("Task not found"));
    }
    StatusCode::NO_CONTENT.into_response()
}
