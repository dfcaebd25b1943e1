//! Dashboard and compliance-overview projections.
//!
//! # Responsibility
//! - Derive headline statistics, follow-up completion, incident volume
//!   groupings, and reminder orderings from the entity collections.
//!
//! # Invariants
//! - Reminder-facing functions expect an already-normalized collection;
//!   they compare stored status values and never consult the clock.

use chrono::{Duration, NaiveDate};

use crate::model::reminder::{ComplianceReminder, ReminderStatus};
use crate::model::report::{BehaviorEmergencyReport, ReportStatus};

/// Headline counters shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_reports: usize,
    pub closed_reports: usize,
    pub physical_interventions: usize,
    pub debriefs_completed: usize,
    pub open_reminders: usize,
}

pub fn dashboard_stats(
    reports: &[BehaviorEmergencyReport],
    reminders: &[ComplianceReminder],
) -> DashboardStats {
    DashboardStats {
        total_reports: reports.len(),
        closed_reports: reports
            .iter()
            .filter(|report| report.status == ReportStatus::Closed)
            .count(),
        physical_interventions: reports
            .iter()
            .filter(|report| report.physical_intervention_used)
            .count(),
        debriefs_completed: reports
            .iter()
            .filter(|report| report.debrief_completed)
            .count(),
        open_reminders: reminders
            .iter()
            .filter(|reminder| reminder.status != ReminderStatus::Complete)
            .count(),
    }
}

/// Follow-up task completion across all reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpCompletion {
    pub completed: usize,
    pub total: usize,
    /// Rounded percentage; 0 when no tasks exist.
    pub percent: u32,
}

pub fn follow_up_completion(reports: &[BehaviorEmergencyReport]) -> FollowUpCompletion {
    let mut completed = 0;
    let mut total = 0;
    for report in reports {
        total += report.follow_up_actions.len();
        completed += report
            .follow_up_actions
            .iter()
            .filter(|action| action.completed)
            .count();
    }

    let percent = if total == 0 {
        0
    } else {
        ((completed as f64 / total as f64) * 100.0).round() as u32
    };

    FollowUpCompletion {
        completed,
        total,
        percent,
    }
}

/// Incident count for one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteCount {
    pub site: String,
    pub count: usize,
}

/// Incident counts grouped by site (falling back to the in-school
/// location when the site is blank), descending, capped at `top_n`.
/// Ties keep first-seen order.
pub fn incidents_by_site(reports: &[BehaviorEmergencyReport], top_n: usize) -> Vec<SiteCount> {
    let mut counts: Vec<SiteCount> = Vec::new();
    for report in reports {
        let key = if report.site.is_empty() {
            report.location.as_str()
        } else {
            report.site.as_str()
        };
        match counts.iter_mut().find(|entry| entry.site == key) {
            Some(entry) => entry.count += 1,
            None => counts.push(SiteCount {
                site: key.to_string(),
                count: 1,
            }),
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}

/// Incident count for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCount {
    pub day: NaiveDate,
    pub count: usize,
}

/// Incident volume over the seven consecutive days ending at `today`.
/// Reports whose incident date falls outside the window are not counted.
pub fn incidents_by_day(reports: &[BehaviorEmergencyReport], today: NaiveDate) -> Vec<DayCount> {
    let mut days: Vec<DayCount> = (0..7)
        .map(|offset| DayCount {
            day: today - Duration::days(6 - offset),
            count: 0,
        })
        .collect();

    for report in reports {
        if let Some(entry) = days.iter_mut().find(|entry| entry.day == report.incident_date) {
            entry.count += 1;
        }
    }

    days
}

/// Open reminders sorted by due date ascending, capped at `limit`.
pub fn upcoming_reminders(
    reminders: &[ComplianceReminder],
    limit: usize,
) -> Vec<ComplianceReminder> {
    let mut open: Vec<ComplianceReminder> = reminders
        .iter()
        .filter(|reminder| reminder.status != ReminderStatus::Complete)
        .cloned()
        .collect();
    open.sort_by_key(|reminder| reminder.due_date);
    open.truncate(limit);
    open
}

/// Mean restraint duration over reports that recorded one.
pub fn average_restraint_minutes(reports: &[BehaviorEmergencyReport]) -> Option<f64> {
    let durations: Vec<u32> = reports
        .iter()
        .filter_map(|report| report.restraint_duration_minutes)
        .collect();
    if durations.is_empty() {
        return None;
    }

    let sum: u32 = durations.iter().sum();
    Some(f64::from(sum) / durations.len() as f64)
}

/// Status counts for the compliance overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSummary {
    pub total: usize,
    pub overdue: usize,
    pub pending: usize,
    pub complete: usize,
}

pub fn reminder_summary(reminders: &[ComplianceReminder]) -> ReminderSummary {
    let count = |status: ReminderStatus| {
        reminders
            .iter()
            .filter(|reminder| reminder.status == status)
            .count()
    };

    ReminderSummary {
        total: reminders.len(),
        overdue: count(ReminderStatus::Overdue),
        pending: count(ReminderStatus::Pending),
        complete: count(ReminderStatus::Complete),
    }
}

/// Full reminder list sorted by due date ascending.
pub fn reminders_by_due_date(reminders: &[ComplianceReminder]) -> Vec<ComplianceReminder> {
    let mut sorted = reminders.to_vec();
    sorted.sort_by_key(|reminder| reminder.due_date);
    sorted
}
