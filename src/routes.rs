use crate::{
    analytics::{self, AnalyticsData, DepartmentStat, MonthlyGrowth, PerformanceMetric, RecentActivity},
    auth::{self, AuthResponse, LoginRequest, RefreshTokenRequest, RefreshTokenResponse},
    dashboard::{self, DashboardStats, DepartmentStats, TopPerformer},
    health::{self, HealthResponse},
    intern::{
        self, CreateInternRequest, Intern, InternDraft, InternStatus, InternWithStats,
        InternsListResponse, TaskStats, UpdateInternRequest, UpdateInternStatusRequest,
        WizardStep, WizardValidateRequest, WizardValidateResponse,
    },
    middleware::{auth_middleware, require_admin},
    notification::{self, MessageResponse, Notification, Priority, UnreadCountResponse},
    state::AppState,
    task::{self, CreateTaskRequest, Task, TaskStatus, UpdateTaskRequest},
    user::{self, AvatarResponse, UpdateProfileRequest, UserResponse},
};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::user::user_service::UPLOADS_URL_PREFIX;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health_check,
        auth::auth_handlers::login,
        auth::auth_handlers::refresh_token,
        auth::auth_handlers::logout,
        auth::auth_handlers::me,
        intern::intern_handlers::get_interns,
        intern::intern_handlers::get_intern,
        intern::intern_handlers::create_intern,
        intern::intern_handlers::update_intern,
        intern::intern_handlers::update_intern_status,
        intern::intern_handlers::delete_intern,
        intern::intern_handlers::validate_wizard_step,
        task::task_handlers::get_intern_tasks,
        task::task_handlers::get_task,
        task::task_handlers::create_task,
        task::task_handlers::update_task,
        task::task_handlers::complete_task,
        task::task_handlers::delete_task,
        dashboard::dashboard_handlers::get_dashboard_stats,
        dashboard::dashboard_handlers::get_department_stats,
        dashboard::dashboard_handlers::get_top_performers,
        analytics::analytics_handlers::get_analytics,
        notification::notification_handlers::get_notifications,
        notification::notification_handlers::get_unread_count,
        notification::notification_handlers::mark_notification_read,
        notification::notification_handlers::mark_all_read,
        notification::notification_handlers::notification_stream,
        user::user_handlers::list_users,
        user::user_handlers::get_profile,
        user::user_handlers::update_profile,
        user::user_handlers::upload_avatar,
        user::user_handlers::get_user,
        user::user_handlers::delete_user,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            AuthResponse,
            RefreshTokenRequest,
            RefreshTokenResponse,
            UserResponse,
            UpdateProfileRequest,
            AvatarResponse,
            Intern,
            InternStatus,
            InternWithStats,
            TaskStats,
            InternsListResponse,
            CreateInternRequest,
            UpdateInternRequest,
            UpdateInternStatusRequest,
            InternDraft,
            WizardStep,
            WizardValidateRequest,
            WizardValidateResponse,
            Task,
            TaskStatus,
            CreateTaskRequest,
            UpdateTaskRequest,
            DashboardStats,
            DepartmentStats,
            TopPerformer,
            AnalyticsData,
            DepartmentStat,
            MonthlyGrowth,
            PerformanceMetric,
            RecentActivity,
            Notification,
            Priority,
            UnreadCountResponse,
            MessageResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "interns", description = "Intern management endpoints"),
        (name = "tasks", description = "Task management endpoints"),
        (name = "dashboard", description = "Dashboard aggregates"),
        (name = "analytics", description = "Analytics charts data"),
        (name = "notifications", description = "Notification endpoints"),
        (name = "users", description = "User and profile endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    if state.config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state);
    // Multipart framing needs some room on top of the file itself.
    let avatar_body_limit = state.config.max_upload_bytes + 64 * 1024;

    // Public routes (no auth required)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh_token))
        .route("/logout", post(auth::logout))
        .route(
            "/me",
            get(auth::me).route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        );

    // Protected routes (auth required)
    let intern_routes = Router::new()
        .route("/", get(intern::get_interns).post(intern::create_intern))
        .route("/wizard/validate", post(intern::validate_wizard_step))
        .route(
            "/:id",
            get(intern::get_intern)
                .put(intern::update_intern)
                .delete(intern::delete_intern),
        )
        .route("/:id/status", patch(intern::update_intern_status))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let task_routes = Router::new()
        .route("/", post(task::create_task))
        .route("/intern/:intern_id", get(task::get_intern_tasks))
        .route(
            "/:id",
            get(task::get_task)
                .put(task::update_task)
                .delete(task::delete_task),
        )
        .route("/:id/complete", patch(task::complete_task))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let dashboard_routes = Router::new()
        .route("/stats", get(dashboard::get_dashboard_stats))
        .route("/departments", get(dashboard::get_department_stats))
        .route("/top-performers", get(dashboard::get_top_performers))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let analytics_routes = Router::new()
        .route("/", get(analytics::get_analytics))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // The feed is served with and without the trailing slash.
    let notification_feed = get(notification::get_notifications).route_layer(
        middleware::from_fn_with_state(state.clone(), auth_middleware),
    );

    let notification_routes = Router::new()
        .route("/unread-count", get(notification::get_unread_count))
        .route("/mark-all-read", put(notification::mark_all_read))
        .route("/stream", get(notification::notification_stream))
        .route("/:id/read", put(notification::mark_notification_read))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let user_routes = Router::new()
        .route("/", get(user::list_users))
        .route(
            "/profile",
            get(user::get_profile).put(user::update_profile),
        )
        .route(
            "/profile/avatar",
            post(user::upload_avatar).layer(DefaultBodyLimit::max(avatar_body_limit)),
        )
        .route(
            "/:user_id",
            get(user::get_user).merge(
                delete(user::delete_user).route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    require_admin,
                )),
            ),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/interns", intern_routes)
        .nest("/tasks", task_routes)
        .nest("/dashboard", dashboard_routes)
        .nest("/analytics", analytics_routes)
        .route("/notifications", notification_feed.clone())
        .route("/notifications/", notification_feed)
        .nest("/notifications", notification_routes)
        .nest("/users", user_routes);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .nest_service(UPLOADS_URL_PREFIX, ServeDir::new(&state.config.upload_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
