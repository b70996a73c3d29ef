//! Pure aggregation over fetched intern and task rows.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::{
    intern::{
        intern_models::{completion_rate, round1},
        intern_repository::InternActivityRow,
        InternStatus,
    },
    task::{task_repository::TaskActivityRow, TaskStatus},
};
use super::analytics_dto::{
    AnalyticsData, DepartmentStat, MonthlyGrowth, PerformanceMetric, RecentActivity,
};

pub const DEPARTMENT_COLORS: [&str; 6] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4",
];

const GROWTH_MONTHS: i32 = 6;
/// `recentActivity` always covers the last week, whatever the time range.
const ACTIVITY_DAYS: i64 = 7;

pub fn build_analytics(
    interns: &[InternActivityRow],
    tasks: &[TaskActivityRow],
    now: DateTime<Utc>,
) -> AnalyticsData {
    let total_interns = interns.len() as i64;
    let active_interns = interns
        .iter()
        .filter(|i| i.status == InternStatus::Active)
        .count() as i64;

    let count_tasks = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count() as i64;

    let departments = department_headcount(interns);

    AnalyticsData {
        total_interns,
        active_interns,
        inactive_interns: total_interns - active_interns,
        completed_tasks: count_tasks(TaskStatus::Completed),
        pending_tasks: count_tasks(TaskStatus::Pending),
        overdue_tasks: count_tasks(TaskStatus::Overdue),
        department_stats: department_stats(&departments),
        monthly_growth: monthly_growth(interns, tasks, now),
        performance_metrics: performance_metrics(&departments, interns, tasks),
        recent_activity: recent_activity(interns, tasks, now),
    }
}

/// Departments by headcount, largest first.
fn department_headcount(interns: &[InternActivityRow]) -> Vec<(String, i64)> {
    let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
    for intern in interns {
        *counts.entry(intern.department.as_str()).or_default() += 1;
    }

    let mut departments: Vec<(String, i64)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    departments.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    departments
}

fn department_stats(departments: &[(String, i64)]) -> Vec<DepartmentStat> {
    departments
        .iter()
        .enumerate()
        .map(|(i, (name, count))| DepartmentStat {
            name: name.clone(),
            value: *count,
            color: DEPARTMENT_COLORS[i % DEPARTMENT_COLORS.len()].to_string(),
        })
        .collect()
}

/// First day of the month `offset` months away from the month of `date`.
fn month_start(date: NaiveDate, offset: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + offset;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
        .unwrap_or(date)
}

pub fn monthly_growth(
    interns: &[InternActivityRow],
    tasks: &[TaskActivityRow],
    now: DateTime<Utc>,
) -> Vec<MonthlyGrowth> {
    let today = now.date_naive();

    (0..GROWTH_MONTHS)
        .rev()
        .map(|back| {
            let start = month_start(today, -back);
            let end = month_start(today, 1 - back);
            let in_month = |ts: &DateTime<Utc>| {
                let day = ts.date_naive();
                day >= start && day < end
            };

            MonthlyGrowth {
                month: start.format("%b %Y").to_string(),
                interns: interns.iter().filter(|i| in_month(&i.created_at)).count() as i64,
                tasks: tasks.iter().filter(|t| in_month(&t.created_at)).count() as i64,
            }
        })
        .collect()
}

pub fn performance_metrics(
    departments: &[(String, i64)],
    interns: &[InternActivityRow],
    tasks: &[TaskActivityRow],
) -> Vec<PerformanceMetric> {
    departments
        .iter()
        .map(|(name, _)| {
            let members: HashSet<i64> = interns
                .iter()
                .filter(|i| &i.department == name)
                .map(|i| i.id)
                .collect();

            let mut total = 0;
            let mut completed = 0;
            let mut completion_days = 0;
            for task in tasks.iter().filter(|t| members.contains(&t.intern_id)) {
                total += 1;
                if task.status == TaskStatus::Completed {
                    completed += 1;
                    completion_days += (task.updated_at - task.created_at).num_days().max(1);
                }
            }

            PerformanceMetric {
                department: name.clone(),
                completion: completion_rate(completed, total),
                efficiency: efficiency(completion_days, completed),
            }
        })
        .collect()
}

/// `100 - min(avg_days * 10, 100)`, or 0 when nothing was completed.
pub fn efficiency(completion_days: i64, completed: i64) -> f64 {
    if completed == 0 {
        return 0.0;
    }
    let avg_days = completion_days as f64 / completed as f64;
    round1(100.0 - (avg_days * 10.0).min(100.0))
}

pub fn recent_activity(
    interns: &[InternActivityRow],
    tasks: &[TaskActivityRow],
    now: DateTime<Utc>,
) -> Vec<RecentActivity> {
    let today = now.date_naive();

    (0..ACTIVITY_DAYS)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let on_day = |ts: &DateTime<Utc>| ts.date_naive() == date;

            RecentActivity {
                date: date.format("%Y-%m-%d").to_string(),
                active: interns
                    .iter()
                    .filter(|i| i.status == InternStatus::Active && on_day(&i.updated_at))
                    .count() as i64,
                joined: interns.iter().filter(|i| on_day(&i.created_at)).count() as i64,
                completed: tasks
                    .iter()
                    .filter(|t| t.status == TaskStatus::Completed && on_day(&t.updated_at))
                    .count() as i64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn intern(id: i64, dept: &str, status: InternStatus, created: DateTime<Utc>) -> InternActivityRow {
        InternActivityRow {
            id,
            department: dept.to_string(),
            status,
            created_at: created,
            updated_at: created,
        }
    }

    fn task(
        intern_id: i64,
        status: TaskStatus,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> TaskActivityRow {
        TaskActivityRow {
            intern_id,
            status,
            created_at: created,
            updated_at: updated,
        }
    }

    #[test]
    fn test_month_start_crosses_year() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 17).unwrap();
        assert_eq!(month_start(date, 0), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(month_start(date, -2), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(month_start(date, -14), NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(month_start(date, 11), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_monthly_growth_covers_six_calendar_months() {
        let now = at(2025, 3, 15);
        let interns = vec![
            intern(1, "Engineering", InternStatus::Active, at(2025, 3, 1)),
            intern(2, "Design", InternStatus::Active, at(2025, 1, 31)),
            intern(3, "Design", InternStatus::Active, at(2024, 9, 30)),
        ];
        let tasks = vec![task(1, TaskStatus::Pending, at(2024, 10, 1), at(2024, 10, 1))];

        let growth = monthly_growth(&interns, &tasks, now);
        let labels: Vec<&str> = growth.iter().map(|g| g.month.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Oct 2024", "Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025", "Mar 2025"]
        );
        assert_eq!(growth[0].tasks, 1);
        assert_eq!(growth[3].interns, 1);
        assert_eq!(growth[5].interns, 1);
        // September is outside the window.
        assert_eq!(growth.iter().map(|g| g.interns).sum::<i64>(), 2);
    }

    #[test]
    fn test_efficiency() {
        assert_eq!(efficiency(0, 0), 0.0);
        assert_eq!(efficiency(2, 2), 90.0);
        assert_eq!(efficiency(30, 2), 0.0);
        assert_eq!(efficiency(7, 3), 76.7);
    }

    #[test]
    fn test_performance_metrics_per_department() {
        let created = at(2025, 3, 1);
        let interns = vec![
            intern(1, "Engineering", InternStatus::Active, created),
            intern(2, "Design", InternStatus::Active, created),
        ];
        let tasks = vec![
            // Same-day completion counts as one day.
            task(1, TaskStatus::Completed, created, created),
            task(1, TaskStatus::Completed, created, at(2025, 3, 4)),
            task(1, TaskStatus::Pending, created, created),
            task(1, TaskStatus::Overdue, created, created),
            task(2, TaskStatus::Pending, created, created),
        ];

        let departments = department_headcount(&interns);
        let metrics = performance_metrics(&departments, &interns, &tasks);

        let design = metrics.iter().find(|m| m.department == "Design").unwrap();
        assert_eq!(design.completion, 0.0);
        assert_eq!(design.efficiency, 0.0);

        let engineering = metrics.iter().find(|m| m.department == "Engineering").unwrap();
        assert_eq!(engineering.completion, 50.0);
        assert_eq!(engineering.efficiency, 80.0);
    }

    #[test]
    fn test_recent_activity_window() {
        let now = at(2025, 3, 15);
        let interns = vec![
            intern(1, "Engineering", InternStatus::Active, at(2025, 3, 15)),
            intern(2, "Engineering", InternStatus::Inactive, at(2025, 3, 14)),
        ];
        let tasks = vec![task(1, TaskStatus::Completed, at(2025, 3, 10), at(2025, 3, 14))];

        let week = recent_activity(&interns, &tasks, now);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, "2025-03-09");
        assert_eq!(week[6].date, "2025-03-15");
        assert_eq!(week[6].active, 1);
        assert_eq!(week[6].joined, 1);
        assert_eq!(week[5].active, 0);
        assert_eq!(week[5].joined, 1);
        assert_eq!(week[5].completed, 1);

        // Older events fall outside the week.
        let old = vec![intern(3, "Design", InternStatus::Active, at(2025, 3, 1))];
        assert!(recent_activity(&old, &[], now).iter().all(|d| d.joined == 0));
    }

    #[test]
    fn test_build_analytics_totals_and_colors() {
        let now = at(2025, 3, 15);
        let depts = ["A", "B", "C", "D", "E", "F", "G"];
        let interns: Vec<InternActivityRow> = depts
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let status = if i % 2 == 0 { InternStatus::Active } else { InternStatus::Inactive };
                intern(i as i64 + 1, d, status, now)
            })
            .collect();
        let tasks = vec![
            task(1, TaskStatus::Pending, now, now),
            task(2, TaskStatus::Overdue, now, now),
        ];

        let data = build_analytics(&interns, &tasks, now);
        assert_eq!(data.total_interns, 7);
        assert_eq!(data.active_interns, 4);
        assert_eq!(data.inactive_interns, 3);
        assert_eq!(data.pending_tasks, 1);
        assert_eq!(data.overdue_tasks, 1);
        assert_eq!(data.completed_tasks, 0);
        assert_eq!(data.department_stats.len(), 7);
        assert_eq!(data.department_stats[6].color, DEPARTMENT_COLORS[0]);
        assert_eq!(data.recent_activity.len(), 7);
        assert_eq!(data.monthly_growth.len(), 6);
    }
}
