use bertrack_core::insights::dashboard::{
    average_restraint_minutes, dashboard_stats, follow_up_completion, incidents_by_day,
    incidents_by_site, reminder_summary, reminders_by_due_date, upcoming_reminders,
};
use bertrack_core::insights::filter::{filter_reports, known_sites, ReportFilter};
use bertrack_core::{
    BehaviorEmergencyReport, ComplianceReminder, FollowUpAction, ReminderStatus, ReportDraft,
    ReportStatus, UserRole,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

#[test]
fn dashboard_stats_count_each_dimension() {
    let reports = vec![
        report("Alex Martinez", "Sunset Middle School", |draft| {
            draft.status = Some(ReportStatus::Closed);
            draft.physical_intervention_used = true;
            draft.debrief_completed = true;
        }),
        report("Skylar Johnson", "Pacific High School", |draft| {
            draft.physical_intervention_used = true;
        }),
        report("Jordan Diaz", "Harbor Elementary", |_| {}),
    ];
    let reminders = vec![
        reminder(ReminderStatus::Pending, 24),
        reminder(ReminderStatus::Overdue, -2),
        reminder(ReminderStatus::Complete, -48),
    ];

    let stats = dashboard_stats(&reports, &reminders);
    assert_eq!(stats.total_reports, 3);
    assert_eq!(stats.closed_reports, 1);
    assert_eq!(stats.physical_interventions, 2);
    assert_eq!(stats.debriefs_completed, 1);
    assert_eq!(stats.open_reminders, 2);
}

#[test]
fn follow_up_completion_rounds_the_percentage() {
    let reports = vec![report("Alex Martinez", "Sunset Middle School", |draft| {
        draft.follow_up_actions = vec![
            completed_action("Schedule debrief"),
            FollowUpAction::new("Update behavior plan"),
            FollowUpAction::new("Submit summary"),
        ];
    })];

    let completion = follow_up_completion(&reports);
    assert_eq!(completion.completed, 1);
    assert_eq!(completion.total, 3);
    assert_eq!(completion.percent, 33);
}

#[test]
fn follow_up_completion_is_zero_without_tasks() {
    let completion = follow_up_completion(&[]);
    assert_eq!(completion.total, 0);
    assert_eq!(completion.percent, 0);
}

#[test]
fn incidents_by_site_sorts_descending_and_caps() {
    let reports = vec![
        report("A", "Sunset Middle School", |_| {}),
        report("B", "Pacific High School", |_| {}),
        report("C", "Sunset Middle School", |_| {}),
        report("D", "Harbor Elementary", |_| {}),
    ];

    let counts = incidents_by_site(&reports, 2);
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].site, "Sunset Middle School");
    assert_eq!(counts[0].count, 2);
    assert_eq!(counts[1].site, "Pacific High School");
}

#[test]
fn incidents_by_site_falls_back_to_location_for_blank_site() {
    let reports = vec![report("A", "", |draft| {
        draft.location = "District Office".to_string();
    })];

    let counts = incidents_by_site(&reports, 5);
    assert_eq!(counts[0].site, "District Office");
}

#[test]
fn incidents_by_day_covers_a_seven_day_window() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
    let reports = vec![
        report("A", "Site", |draft| draft.incident_date = today),
        report("B", "Site", |draft| {
            draft.incident_date = today - Duration::days(1)
        }),
        report("C", "Site", |draft| draft.incident_date = today),
        report("D", "Site", |draft| {
            draft.incident_date = today - Duration::days(10)
        }),
    ];

    let days = incidents_by_day(&reports, today);
    assert_eq!(days.len(), 7);
    assert_eq!(days[0].day, today - Duration::days(6));
    assert_eq!(days[6].day, today);
    assert_eq!(days[6].count, 2);
    assert_eq!(days[5].count, 1);
    assert_eq!(days.iter().map(|entry| entry.count).sum::<usize>(), 3);
}

#[test]
fn upcoming_reminders_excludes_complete_and_orders_by_due_date() {
    let reminders = vec![
        reminder(ReminderStatus::Pending, 48),
        reminder(ReminderStatus::Complete, 1),
        reminder(ReminderStatus::Overdue, -2),
        reminder(ReminderStatus::Pending, 24),
    ];

    let upcoming = upcoming_reminders(&reminders, 2);
    assert_eq!(upcoming.len(), 2);
    assert_eq!(upcoming[0].status, ReminderStatus::Overdue);
    assert!(upcoming[0].due_date <= upcoming[1].due_date);
}

#[test]
fn average_restraint_minutes_skips_reports_without_a_duration() {
    let reports = vec![
        report("A", "Site", |draft| {
            draft.restraint_duration_minutes = Some(4)
        }),
        report("B", "Site", |draft| {
            draft.restraint_duration_minutes = Some(6)
        }),
        report("C", "Site", |_| {}),
    ];

    assert_eq!(average_restraint_minutes(&reports), Some(5.0));
    assert_eq!(average_restraint_minutes(&[]), None);
}

#[test]
fn reminder_summary_counts_each_status() {
    let reminders = vec![
        reminder(ReminderStatus::Pending, 24),
        reminder(ReminderStatus::Pending, 48),
        reminder(ReminderStatus::Overdue, -2),
        reminder(ReminderStatus::Complete, -48),
    ];

    let summary = reminder_summary(&reminders);
    assert_eq!(summary.total, 4);
    assert_eq!(summary.pending, 2);
    assert_eq!(summary.overdue, 1);
    assert_eq!(summary.complete, 1);
}

#[test]
fn reminders_by_due_date_sorts_ascending() {
    let reminders = vec![
        reminder(ReminderStatus::Pending, 48),
        reminder(ReminderStatus::Overdue, -2),
        reminder(ReminderStatus::Pending, 24),
    ];

    let sorted = reminders_by_due_date(&reminders);
    assert!(sorted
        .windows(2)
        .all(|pair| pair[0].due_date <= pair[1].due_date));
}

#[test]
fn filter_matches_search_across_name_site_and_description() {
    let reports = vec![
        report("Alex Martinez", "Sunset Middle School", |draft| {
            draft.incident_description = "Peer conflict during science lab.".to_string();
        }),
        report("Skylar Johnson", "Pacific High School", |_| {}),
    ];

    let by_name = filter_reports(
        &reports,
        &ReportFilter {
            search: "alex".to_string(),
            ..ReportFilter::default()
        },
    );
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].student_name, "Alex Martinez");

    let by_description = filter_reports(
        &reports,
        &ReportFilter {
            search: "SCIENCE LAB".to_string(),
            ..ReportFilter::default()
        },
    );
    assert_eq!(by_description.len(), 1);
}

#[test]
fn filter_combines_status_site_and_physical_flags() {
    let reports = vec![
        report("Alex Martinez", "Sunset Middle School", |draft| {
            draft.status = Some(ReportStatus::Closed);
            draft.physical_intervention_used = true;
        }),
        report("Skylar Johnson", "Sunset Middle School", |draft| {
            draft.status = Some(ReportStatus::Closed);
        }),
        report("Jordan Diaz", "Harbor Elementary", |draft| {
            draft.physical_intervention_used = true;
        }),
    ];

    let filtered = filter_reports(
        &reports,
        &ReportFilter {
            status: Some(ReportStatus::Closed),
            site: Some("Sunset Middle School".to_string()),
            physical_only: true,
            search: String::new(),
        },
    );
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].student_name, "Alex Martinez");
}

#[test]
fn empty_filter_keeps_every_report_in_order() {
    let reports = vec![
        report("Alex Martinez", "Sunset Middle School", |_| {}),
        report("Skylar Johnson", "Pacific High School", |_| {}),
    ];

    let filtered = filter_reports(&reports, &ReportFilter::default());
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered[0].student_name, "Alex Martinez");
}

#[test]
fn known_sites_are_unique_in_first_seen_order() {
    let reports = vec![
        report("A", "Sunset Middle School", |_| {}),
        report("B", "Pacific High School", |_| {}),
        report("C", "Sunset Middle School", |_| {}),
    ];

    assert_eq!(
        known_sites(&reports),
        vec![
            "Sunset Middle School".to_string(),
            "Pacific High School".to_string()
        ]
    );
}

fn report(
    student_name: &str,
    site: &str,
    customize: impl FnOnce(&mut ReportDraft),
) -> BehaviorEmergencyReport {
    let mut draft = ReportDraft {
        student_name: student_name.to_string(),
        student_id: "S-1".to_string(),
        grade_level: "6".to_string(),
        guardian_contacted: false,
        guardian_contacted_on: None,
        guardian_contact_method: None,
        site: site.to_string(),
        district: "Bay Unified".to_string(),
        location: "Room 1".to_string(),
        incident_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        incident_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        precipitating_factors: String::new(),
        incident_description: "desc".to_string(),
        interventions_attempted: String::new(),
        physical_intervention_used: false,
        physical_intervention_type: None,
        restraint_duration_minutes: None,
        injuries_reported: false,
        medical_follow_up_required: false,
        follow_up_due_date: None,
        follow_up_actions: Vec::new(),
        behavior_specialist_assigned: None,
        status: None,
        debrief_completed: false,
        debrief_notes: None,
        reviewed_by: None,
    };
    customize(&mut draft);
    draft.materialize(Uuid::new_v4(), Utc::now(), "Tester")
}

fn completed_action(label: &str) -> FollowUpAction {
    FollowUpAction {
        label: label.to_string(),
        completed: true,
        completed_on: Some(Utc::now()),
    }
}

fn reminder(status: ReminderStatus, due_offset_hours: i64) -> ComplianceReminder {
    let now: DateTime<Utc> = Utc::now();
    ComplianceReminder {
        id: Uuid::new_v4(),
        title: "Compliance checkpoint".to_string(),
        description: String::new(),
        due_date: now + Duration::hours(due_offset_hours),
        status,
        related_report_id: None,
        owner_role: UserRole::ProgramSpecialist,
        created_at: now,
    }
}
