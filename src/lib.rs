pub mod analytics;
pub mod auth;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod health;
pub mod intern;
pub mod middleware;
pub mod notification;
pub mod routes;
pub mod state;
pub mod task;
pub mod user;

pub use routes::create_router;
pub use state::{AppState, Config};
