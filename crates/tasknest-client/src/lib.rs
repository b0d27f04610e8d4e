//! TaskNest Client Core
//!
//! Layered architecture:
//! - transport: HTTP seam and the reqwest implementation
//! - session: token/username mirror over a key-value store
//! - auth: login, register and token validation
//! - repository: item and list-title endpoints
//! - state / controller: screen state machine and the flows that drive it

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod repository;
pub mod session;
pub mod state;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use auth::{AuthGateway, LoginForm, RegistrationForm};
pub use config::ClientConfig;
pub use controller::{LocalState, StateHandle, ViewController};
pub use error::{ApiError, AuthError, RepoError, RepoResult, StorageError};
pub use models::{AuthGrant, Item, ItemId, NewItem, Profile, DEFAULT_LIST_TITLE};
pub use repository::ListRepository;
pub use session::{KeyValueStore, MemoryStore, Session, SessionStore};
pub use state::{AuthForm, RequestTicket, Screen, ViewState};
pub use transport::{ApiRequest, ApiResponse, Method, ReqwestTransport, Transport};
