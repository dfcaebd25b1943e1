//! Report list filtering.
//!
//! # Responsibility
//! - Apply the report table's status/site/search/physical-intervention
//!   filters over a read-only report slice.

use crate::model::report::{BehaviorEmergencyReport, ReportStatus};

/// Filter criteria for the report list. `None`/empty fields match
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub site: Option<String>,
    pub physical_only: bool,
    /// Case-insensitive substring match over student name, site, and
    /// incident description.
    pub search: String,
}

/// Applies `filter` to `reports`, preserving input order.
pub fn filter_reports<'a>(
    reports: &'a [BehaviorEmergencyReport],
    filter: &ReportFilter,
) -> Vec<&'a BehaviorEmergencyReport> {
    let needle = filter.search.to_lowercase();

    reports
        .iter()
        .filter(|report| {
            if let Some(status) = filter.status {
                if report.status != status {
                    return false;
                }
            }
            if let Some(site) = &filter.site {
                if &report.site != site {
                    return false;
                }
            }
            if filter.physical_only && !report.physical_intervention_used {
                return false;
            }

            let haystack = format!(
                "{} {} {}",
                report.student_name, report.site, report.incident_description
            )
            .to_lowercase();
            haystack.contains(&needle)
        })
        .collect()
}

/// Unique sites in first-seen order, for populating the site filter.
pub fn known_sites(reports: &[BehaviorEmergencyReport]) -> Vec<String> {
    let mut sites: Vec<String> = Vec::new();
    for report in reports {
        if !sites.contains(&report.site) {
            sites.push(report.site.clone());
        }
    }
    sites
}
