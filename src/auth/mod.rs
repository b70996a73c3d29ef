pub mod jwt;
pub mod password;

pub mod auth_models;
pub mod auth_dto;
pub mod auth_repository;
pub mod auth_handlers;
pub mod auth_service;
pub mod credentials;

pub use jwt::{create_access_token, create_refresh_token, verify_jwt, Claims, TokenType};
pub use password::{hash_password, verify_password};
pub use auth_dto::{AuthResponse, LoginRequest, RefreshTokenRequest, RefreshTokenResponse};
pub use auth_handlers::{login, logout, me, refresh_token};
pub use auth_service::{AuthService, TokenPair};
