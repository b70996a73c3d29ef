use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_interns: i64,
    pub active_interns: i64,
    pub pending_tasks: i64,
    pub completed_tasks: i64,
    pub overdue_tasks: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DepartmentStats {
    pub department: String,
    pub intern_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TopPerformer {
    pub intern_id: i64,
    pub full_name: String,
    pub department: String,
    pub total_tasks: i64,
    pub completed_tasks: i64,
    pub completion_rate: f64,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopPerformersQuery {
    /// Number of interns to return (1-50, default 5)
    pub limit: Option<usize>,
}
