//! Request descriptors for a jsonplaceholder-style todo API.
//!
//! # Design
//! One descriptor type per endpoint, each naming its response type. The
//! descriptors carry their endpoint fully resolved against `base_url`, so
//! they are ready to hand to `NetworkClient` without further context.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http::HttpMethod;
use crate::request::{Headers, NetworkRequest, Parameters};

/// A single todo item as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

/// Body of a successful delete: an empty JSON object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deleted {}

fn todos_url(base_url: &str) -> String {
    format!("{}/todos", base_url.trim_end_matches('/'))
}

fn todo_url(base_url: &str, id: u64) -> String {
    format!("{}/todos/{id}", base_url.trim_end_matches('/'))
}

fn into_parameters(value: serde_json::Value) -> Parameters {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Parameters::new(),
    }
}

/// `GET /todos/{id}`
#[derive(Debug, Clone)]
pub struct GetTodo {
    endpoint: String,
    headers: Option<Headers>,
}

impl GetTodo {
    pub fn new(base_url: &str, id: u64) -> Self {
        Self {
            endpoint: todo_url(base_url, id),
            headers: None,
        }
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }
}

impl NetworkRequest for GetTodo {
    type Response = Todo;

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn headers(&self) -> Option<&Headers> {
        self.headers.as_ref()
    }
}

/// `GET /todos`, optionally filtered by owner and completion.
#[derive(Debug, Clone)]
pub struct ListTodos {
    endpoint: String,
    filters: Option<Parameters>,
}

impl ListTodos {
    pub fn new(base_url: &str) -> Self {
        Self {
            endpoint: todos_url(base_url),
            filters: None,
        }
    }

    pub fn user(self, user_id: u64) -> Self {
        self.filter("userId", user_id)
    }

    pub fn completed(self, completed: bool) -> Self {
        self.filter("completed", completed)
    }

    fn filter(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.filters
            .get_or_insert_with(Parameters::new)
            .insert(key.to_string(), value.into());
        self
    }
}

impl NetworkRequest for ListTodos {
    type Response = Vec<Todo>;

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn parameters(&self) -> Option<&Parameters> {
        self.filters.as_ref()
    }
}

/// `POST /todos`
#[derive(Debug, Clone)]
pub struct CreateTodo {
    endpoint: String,
    body: Parameters,
}

impl CreateTodo {
    pub fn new(base_url: &str, user_id: u64, title: &str, completed: bool) -> Self {
        Self {
            endpoint: todos_url(base_url),
            body: into_parameters(json!({
                "userId": user_id,
                "title": title,
                "completed": completed,
            })),
        }
    }
}

impl NetworkRequest for CreateTodo {
    type Response = Todo;

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn parameters(&self) -> Option<&Parameters> {
        Some(&self.body)
    }
}

/// `PUT /todos/{id}`. Only the fields that were set are sent; the server
/// leaves the others unchanged.
#[derive(Debug, Clone)]
pub struct UpdateTodo {
    endpoint: String,
    changes: Parameters,
}

impl UpdateTodo {
    pub fn new(base_url: &str, id: u64) -> Self {
        Self {
            endpoint: todo_url(base_url, id),
            changes: Parameters::new(),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.changes.insert("title".to_string(), title.into());
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.changes.insert("completed".to_string(), completed.into());
        self
    }
}

impl NetworkRequest for UpdateTodo {
    type Response = Todo;

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn parameters(&self) -> Option<&Parameters> {
        Some(&self.changes)
    }
}

/// `DELETE /todos/{id}`
#[derive(Debug, Clone)]
pub struct DeleteTodo {
    endpoint: String,
}

impl DeleteTodo {
    pub fn new(base_url: &str, id: u64) -> Self {
        Self {
            endpoint: todo_url(base_url, id),
        }
    }
}

impl NetworkRequest for DeleteTodo {
    type Response = Deleted;

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Delete
    }
}
