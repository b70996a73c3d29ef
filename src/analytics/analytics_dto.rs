use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Reporting window selected by the `timeRange` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl TimeRange {
    /// Unknown values fall back to the 30 day window. The window is reported
    /// back in logs; every section of the document has its own fixed span.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("7d") => TimeRange::Week,
            Some("90d") => TimeRange::Quarter,
            Some("1y") => TimeRange::Year,
            _ => TimeRange::Month,
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::Year => 365,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    /// One of `7d`, `30d`, `90d`, `1y`
    pub time_range: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DepartmentStat {
    pub name: String,
    pub value: i64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthlyGrowth {
    pub month: String,
    pub interns: i64,
    pub tasks: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PerformanceMetric {
    pub department: String,
    pub completion: f64,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecentActivity {
    pub date: String,
    pub active: i64,
    pub joined: i64,
    pub completed: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub total_interns: i64,
    pub active_interns: i64,
    pub inactive_interns: i64,
    pub completed_tasks: i64,
    pub pending_tasks: i64,
    pub overdue_tasks: i64,
    pub department_stats: Vec<DepartmentStat>,
    pub monthly_growth: Vec<MonthlyGrowth>,
    pub performance_metrics: Vec<PerformanceMetric>,
    pub recent_activity: Vec<RecentActivity>,
}
