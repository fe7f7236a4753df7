use std::{collections::BTreeMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListFilter {
    #[serde(rename = "userId")]
    pub user_id: Option<u64>,
    pub completed: Option<bool>,
}

/// What `/echo` saw on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

pub struct Store {
    todos: BTreeMap<u64, Todo>,
    next_id: u64,
}

impl Store {
    fn with_todos(todos: Vec<Todo>) -> Self {
        let next_id = todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            todos: todos.into_iter().map(|t| (t.id, t)).collect(),
            next_id,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

/// The first few todos of the public jsonplaceholder data set.
pub fn seed_todos() -> Vec<Todo> {
    vec![
        Todo {
            user_id: 1,
            id: 1,
            title: "delectus aut autem".to_string(),
            completed: false,
        },
        Todo {
            user_id: 1,
            id: 2,
            title: "quis ut nam facilis et officia qui".to_string(),
            completed: false,
        },
        Todo {
            user_id: 1,
            id: 3,
            title: "fugiat veniam minus".to_string(),
            completed: false,
        },
        Todo {
            user_id: 1,
            id: 4,
            title: "et porro tempora".to_string(),
            completed: true,
        },
        Todo {
            user_id: 2,
            id: 5,
            title: "suscipit repellat esse quibusdam voluptatem incidunt".to_string(),
            completed: false,
        },
    ]
}

/// Router seeded with `seed_todos`.
pub fn app() -> Router {
    app_with(seed_todos())
}

pub fn app_with(todos: Vec<Todo>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with_todos(todos)));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(update_todo).delete(delete_todo))
        .route("/echo", any(echo))
        .route("/empty", get(empty))
        .route("/malformed", get(malformed))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Decode a JSON body whatever its content type; clients are not required to
/// send one.
fn json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, StatusCode> {
    serde_json::from_slice(body).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)
}

async fn list_todos(State(db): State<Db>, Query(filter): Query<ListFilter>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    let todos = store
        .todos
        .values()
        .filter(|t| filter.user_id.is_none_or(|u| t.user_id == u))
        .filter(|t| filter.completed.is_none_or(|c| t.completed == c))
        .cloned()
        .collect();
    Json(todos)
}

async fn create_todo(
    State(db): State<Db>,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    let input: CreateTodo = json_body(&body)?;
    let mut store = db.write().await;
    let todo = Todo {
        user_id: input.user_id,
        id: store.next_id,
        title: input.title,
        completed: input.completed,
    };
    store.next_id += 1;
    store.todos.insert(todo.id, todo.clone());
    tracing::debug!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Todo>, StatusCode> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    body: Bytes,
) -> Result<Json<Todo>, StatusCode> {
    let input: UpdateTodo = json_body(&body)?;
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| Json(serde_json::json!({})))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn echo(
    method: Method,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: String,
) -> Json<Echo> {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(Echo {
        method: method.as_str().to_string(),
        query,
        headers,
        body: (!body.is_empty()).then_some(body),
    })
}

async fn empty() -> StatusCode {
    StatusCode::OK
}

async fn malformed() -> &'static str {
    "this is not json"
}
