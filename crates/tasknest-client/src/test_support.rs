//! In-memory stand-in for the TaskNest API.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::models::{Item, ItemId};
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

#[derive(Default)]
struct FakeState {
    users: HashMap<String, String>,
    tokens: HashMap<String, String>,
    issued: u32,
    items: Vec<Item>,
    next_id: ItemId,
    list_title: Option<String>,
    scripted: VecDeque<ApiResponse>,
    offline: bool,
    requests: Vec<ApiRequest>,
}

pub struct FakeApi {
    state: RefCell<FakeState>,
}

#[derive(Deserialize)]
struct Credentials {
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
struct NewItemBody {
    title: String,
    checked: bool,
    favourite: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TitleBody {
    list_title: String,
}

impl FakeApi {
    /// Knows user `alice` / `secret1`
    pub fn new() -> Rc<Self> {
        let mut state = FakeState { next_id: 1, ..Default::default() };
        state.users.insert("alice".into(), "secret1".into());
        Rc::new(Self { state: RefCell::new(state) })
    }

    pub fn issue_token(&self, username: &str) -> String {
        let mut state = self.state.borrow_mut();
        state.issued += 1;
        let token = format!("token-{}-{}", username, state.issued);
        state.tokens.insert(token.clone(), username.to_string());
        token
    }

    pub fn revoke_tokens(&self) {
        self.state.borrow_mut().tokens.clear();
    }

    pub fn seed_items(&self, titles: &[&str]) {
        let mut state = self.state.borrow_mut();
        for title in titles {
            let id = state.next_id;
            state.next_id += 1;
            state.items.push(Item {
                id,
                title: title.to_string(),
                checked: false,
                favourite: false,
            });
        }
    }

    pub fn set_list_title(&self, title: &str) {
        self.state.borrow_mut().list_title = Some(title.to_string());
    }

    pub fn list_title(&self) -> Option<String> {
        self.state.borrow().list_title.clone()
    }

    pub fn items(&self) -> Vec<Item> {
        self.state.borrow().items.clone()
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.borrow_mut().offline = offline;
    }

    /// Next request gets this response regardless of route
    pub fn respond_next(&self, status: u16, body: &str) {
        self.state.borrow_mut().scripted.push_back(ApiResponse::new(status, body));
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state.borrow().requests.last().cloned()
    }

    fn route(&self, request: &ApiRequest) -> ApiResponse {
        let path = request.path.as_str();
        match (request.method, path) {
            (Method::Post, "/api/auth/login") => self.login(request),
            (Method::Post, "/api/auth/register") => self.register(request),
            _ => {
                let authorized = {
                    let state = self.state.borrow();
                    request.bearer.as_ref().is_some_and(|t| state.tokens.contains_key(t))
                };
                if !authorized {
                    return ApiResponse::new(401, "");
                }
                self.protected(request)
            }
        }
    }

    fn login(&self, request: &ApiRequest) -> ApiResponse {
        let Some(creds) = body::<Credentials>(request) else {
            return ApiResponse::new(400, "Error: malformed request");
        };
        let known = self.state.borrow().users.get(&creds.username) == Some(&creds.password);
        if !known {
            return ApiResponse::new(401, "Error: Invalid username or password!");
        }
        grant(&self.issue_token(&creds.username), &creds.username)
    }

    fn register(&self, request: &ApiRequest) -> ApiResponse {
        let Some(creds) = body::<Credentials>(request) else {
            return ApiResponse::new(400, "Error: malformed request");
        };
        if self.state.borrow().users.contains_key(&creds.username) {
            return ApiResponse::new(400, "Error: Username is already taken!");
        }
        self.state.borrow_mut().users.insert(creds.username.clone(), creds.password);
        grant(&self.issue_token(&creds.username), &creds.username)
    }

    fn protected(&self, request: &ApiRequest) -> ApiResponse {
        let mut state = self.state.borrow_mut();
        let item_id = request
            .path
            .strip_prefix("/api/items/")
            .and_then(|id| id.parse::<ItemId>().ok());

        match (request.method, request.path.as_str(), item_id) {
            (Method::Get, "/api/auth/validate", _) => ApiResponse::new(200, "Token is valid"),
            (Method::Get, "/api/user/profile", _) => {
                ApiResponse::new(200, json!({ "listTitle": state.list_title }).to_string())
            }
            (Method::Put, "/api/user/list-title", _) => match body::<TitleBody>(request) {
                Some(body) => {
                    state.list_title = Some(body.list_title);
                    ApiResponse::new(200, "")
                }
                None => ApiResponse::new(400, ""),
            },
            (Method::Get, "/api/items", _) => ApiResponse::new(200, json!(state.items).to_string()),
            (Method::Post, "/api/items", _) => {
                let Some(new_item) = body::<NewItemBody>(request) else {
                    return ApiResponse::new(400, "");
                };
                let item = Item {
                    id: state.next_id,
                    title: new_item.title,
                    checked: new_item.checked,
                    favourite: new_item.favourite,
                };
                state.next_id += 1;
                state.items.push(item.clone());
                ApiResponse::new(200, json!(item).to_string())
            }
            (Method::Put, _, Some(id)) => {
                let Some(item) = body::<Item>(request) else {
                    return ApiResponse::new(400, "");
                };
                match state.items.iter_mut().find(|existing| existing.id == id) {
                    Some(slot) => {
                        *slot = Item { id, ..item };
                        ApiResponse::new(200, "")
                    }
                    None => ApiResponse::new(404, ""),
                }
            }
            (Method::Delete, _, Some(id)) => {
                let before = state.items.len();
                state.items.retain(|item| item.id != id);
                if state.items.len() == before {
                    ApiResponse::new(404, "")
                } else {
                    ApiResponse::new(200, "")
                }
            }
            _ => ApiResponse::new(404, ""),
        }
    }
}

fn body<T: serde::de::DeserializeOwned>(request: &ApiRequest) -> Option<T> {
    request.body.clone().and_then(|value| serde_json::from_value(value).ok())
}

fn grant(token: &str, username: &str) -> ApiResponse {
    let body = json!({
        "token": token,
        "username": username,
        "email": format!("{}@example.com", username),
        "message": "Login successful!",
    });
    ApiResponse::new(200, body.to_string())
}

#[async_trait(?Send)]
impl Transport for FakeApi {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let (offline, scripted) = {
            let mut state = self.state.borrow_mut();
            if state.offline {
                (true, None)
            } else {
                state.requests.push(request.clone());
                (false, state.scripted.pop_front())
            }
        };
        if offline {
            return Err(ApiError::Network("connection refused".into()));
        }
        Ok(scripted.unwrap_or_else(|| self.route(&request)))
    }
}
