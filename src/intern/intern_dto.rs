use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::intern_models::{Intern, InternStatus};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateInternRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub full_name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, max = 20, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, max = 50, message = "Department is required"))]
    pub department: String,
    #[validate(length(max = 100))]
    pub position: Option<String>,
    #[validate(length(max = 150))]
    pub university: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl CreateInternRequest {
    /// Trim text fields, drop blank optionals and clean up the skill list.
    pub fn normalized(self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            department: self.department.trim().to_string(),
            position: non_blank(self.position),
            university: non_blank(self.university),
            skills: normalize_skills(self.skills),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateInternRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub full_name: Option<String>,
    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 20, message = "Phone is required"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Department is required"))]
    pub department: Option<String>,
    #[validate(length(max = 100))]
    pub position: Option<String>,
    #[validate(length(max = 150))]
    pub university: Option<String>,
    pub skills: Option<Vec<String>>,
    pub status: Option<InternStatus>,
}

impl UpdateInternRequest {
    pub fn normalized(self) -> Self {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        Self {
            full_name: trim(self.full_name),
            email: trim(self.email),
            phone: trim(self.phone),
            department: trim(self.department),
            position: trim(self.position),
            university: trim(self.university),
            skills: self.skills.map(normalize_skills),
            status: self.status,
        }
    }
}

/// Explicit status, or `null`/absent to flip the current one.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateInternStatusRequest {
    pub status: Option<InternStatus>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InternListQuery {
    /// Page number, starting at 1
    pub page: Option<i64>,
    /// Items per page (1-100)
    pub limit: Option<i64>,
    /// Case-insensitive match on name or email
    pub search: Option<String>,
    pub department: Option<String>,
    pub status: Option<InternStatus>,
    /// full_name, email, department, join_date or created_at
    pub sort_by: Option<String>,
    /// asc or desc
    pub sort_order: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InternsListResponse {
    pub interns: Vec<Intern>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim skills, drop empty entries and case-insensitive duplicates, keeping
/// first-seen order.
pub fn normalize_skills(skills: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    skills
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && seen.insert(s.to_lowercase()))
        .collect()
}
