pub mod dashboard_dto;
pub mod dashboard_handlers;
pub mod dashboard_service;

pub use dashboard_dto::{DashboardStats, DepartmentStats, TopPerformer, TopPerformersQuery};
pub use dashboard_handlers::{get_dashboard_stats, get_department_stats, get_top_performers};
pub use dashboard_service::DashboardService;
