use crate::{
    analytics::AnalyticsService,
    auth::{auth_repository::RefreshTokenRepository, AuthService},
    dashboard::DashboardService,
    db::DbPool,
    intern::{InternRepository, InternService},
    notification::{NotificationRepository, NotificationService},
    task::{TaskRepository, TaskService},
    user::{UserRepository, UserService},
};
use anyhow::Context;
use std::{path::PathBuf, str::FromStr, sync::Arc};
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub user_repository: UserRepository,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub intern_service: InternService,
    pub task_service: TaskService,
    pub notification_service: NotificationService,
    pub dashboard_service: DashboardService,
    pub analytics_service: AnalyticsService,
}

impl AppState {
    pub fn new(db: DbPool, config: Arc<Config>) -> Self {
        let (notification_tx, _) = broadcast::channel(100);

        let user_repository = UserRepository::new(db.clone());
        let intern_repository = InternRepository::new(db.clone());
        let task_repository = TaskRepository::new(db.clone());
        let notification_repository = NotificationRepository::new(db.clone());
        let refresh_token_repository = RefreshTokenRepository::new(db.clone());

        let notification_service =
            NotificationService::new(notification_repository, notification_tx);
        let auth_service = AuthService::new(
            db.clone(),
            user_repository.clone(),
            refresh_token_repository,
            config.clone(),
        );
        let user_service = UserService::new(user_repository.clone(), config.clone());
        let intern_service = InternService::new(
            intern_repository.clone(),
            task_repository.clone(),
            notification_service.clone(),
        );
        let task_service = TaskService::new(
            task_repository.clone(),
            intern_repository.clone(),
            notification_service.clone(),
        );
        let dashboard_service =
            DashboardService::new(intern_repository.clone(), task_repository.clone());
        let analytics_service =
            AnalyticsService::new(intern_repository.clone(), task_repository.clone());

        Self {
            db,
            config,
            user_repository,
            auth_service,
            user_service,
            intern_service,
            task_service,
            notification_service,
            dashboard_service,
            analytics_service,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_days: i64,
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub cors_origins: Vec<String>,
    pub overdue_sweep_cron: String,
    pub admin_username: String,
    pub admin_email: String,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            jwt_secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            access_token_expire_minutes: parse_var("ACCESS_TOKEN_EXPIRE_MINUTES", 30)?,
            refresh_token_expire_days: parse_var("REFRESH_TOKEN_EXPIRE_DAYS", 7)?,
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 8000)?,
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", 5 * 1024 * 1024)?,
            cors_origins: parse_origins(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
            overdue_sweep_cron: std::env::var("OVERDUE_SWEEP_CRON")
                .unwrap_or_else(|_| "0 * * * * *".to_string()),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@example.com".to_string()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://localhost:5173/, https://admin.example.com ,,"),
            vec!["http://localhost:5173", "https://admin.example.com"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_parse_var_falls_back_to_default() {
        let value: i64 = parse_var("INTERN_MANAGER_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
