pub mod aggregate;
pub mod analytics_dto;
pub mod analytics_handlers;
pub mod analytics_service;

pub use analytics_dto::{
    AnalyticsData, AnalyticsQuery, DepartmentStat, MonthlyGrowth, PerformanceMetric,
    RecentActivity, TimeRange,
};
pub use analytics_handlers::get_analytics;
pub use analytics_service::AnalyticsService;
