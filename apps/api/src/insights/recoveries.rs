//! Daily recovery log. Only users who finished their program get the log and
//! its statistics; everyone else gets a progress summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::insights::{date, rounded_percent};
use crate::users::models::UserRecord;
use crate::users::projections::remaining_days;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AddictionCategory {
    Gaming,
    SocialMedia,
    Substance,
    Other,
}

impl AddictionCategory {
    pub const ALL: [AddictionCategory; 4] = [
        AddictionCategory::Gaming,
        AddictionCategory::SocialMedia,
        AddictionCategory::Substance,
        AddictionCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AddictionCategory::Gaming => "Gaming Addiction",
            AddictionCategory::SocialMedia => "Social Media",
            AddictionCategory::Substance => "Substance Abuse",
            AddictionCategory::Other => "Other Addictions",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecoveryDay {
    pub day: u32,
    pub date: NaiveDate,
    pub category: AddictionCategory,
    pub completed_tasks: Vec<String>,
    pub pending_tasks: Vec<String>,
    pub notes: String,
}

impl RecoveryDay {
    pub fn total_tasks(&self) -> usize {
        self.completed_tasks.len() + self.pending_tasks.len()
    }

    pub fn is_perfect(&self) -> bool {
        self.pending_tasks.is_empty()
    }

    /// Share of the day's tasks that were completed; a day with no tasks is 0.
    pub fn progress_percent(&self) -> f64 {
        let total = self.total_tasks();
        if total == 0 {
            0.0
        } else {
            self.completed_tasks.len() as f64 / total as f64 * 100.0
        }
    }
}

fn tasks(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn sample_recovery_log() -> Vec<RecoveryDay> {
    vec![
        RecoveryDay {
            day: 1,
            date: date(2024, 1, 1),
            category: AddictionCategory::Gaming,
            completed_tasks: tasks(&[
                "30 minutes meditation",
                "No gaming before 6 PM",
                "Outdoor activity for 1 hour",
            ]),
            pending_tasks: tasks(&["Read a book for 30 minutes"]),
            notes: "Felt strong cravings in the evening".to_string(),
        },
        RecoveryDay {
            day: 2,
            date: date(2024, 1, 2),
            category: AddictionCategory::Gaming,
            completed_tasks: tasks(&[
                "30 minutes meditation",
                "Read a book for 30 minutes",
                "Gym workout",
            ]),
            pending_tasks: tasks(&["No gaming before 6 PM"]),
            notes: "Managed to control impulses better".to_string(),
        },
        RecoveryDay {
            day: 3,
            date: date(2024, 1, 3),
            category: AddictionCategory::Gaming,
            completed_tasks: tasks(&[
                "All tasks completed successfully!",
                "No gaming entire day",
                "Social activity with friends",
            ]),
            pending_tasks: Vec::new(),
            notes: "Excellent progress today!".to_string(),
        },
    ]
}

/// Query filter; an absent field matches everything.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct RecoveryFilter {
    pub category: Option<AddictionCategory>,
    pub day: Option<u32>,
}

impl RecoveryFilter {
    pub fn matches(&self, entry: &RecoveryDay) -> bool {
        self.category.map_or(true, |c| c == entry.category)
            && self.day.map_or(true, |d| d == entry.day)
    }
}

pub fn filter_log<'a>(log: &'a [RecoveryDay], filter: &RecoveryFilter) -> Vec<&'a RecoveryDay> {
    log.iter().filter(|entry| filter.matches(entry)).collect()
}

/// Distinct day numbers in ascending order.
pub fn available_days(log: &[RecoveryDay]) -> Vec<u32> {
    let mut days: Vec<u32> = log.iter().map(|e| e.day).collect();
    days.sort_unstable();
    days.dedup();
    days
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecoveryStats {
    pub days_tracked: usize,
    pub perfect_days: usize,
    pub tasks_completed: usize,
    pub average_progress_percent: u32,
}

/// Statistics are always taken over the whole log, not the filtered view.
pub fn recovery_stats(log: &[RecoveryDay]) -> RecoveryStats {
    let progress_sum: f64 = log.iter().map(RecoveryDay::progress_percent).sum();
    RecoveryStats {
        days_tracked: log.len(),
        perfect_days: log.iter().filter(|e| e.is_perfect()).count(),
        tasks_completed: log.iter().map(|e| e.completed_tasks.len()).sum(),
        average_progress_percent: rounded_percent(progress_sum, log.len() as f64 * 100.0),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryOption {
    pub value: AddictionCategory,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecoveryEntryView {
    #[serde(flatten)]
    pub entry: RecoveryDay,
    pub progress_percent: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecoveryReport {
    InProgress {
        user_id: u32,
        name: String,
        days: u32,
        target_days: u32,
        remaining_days: u32,
        progress_percent: u32,
    },
    Tracked {
        user_id: u32,
        name: String,
        categories: Vec<CategoryOption>,
        available_days: Vec<u32>,
        entries: Vec<RecoveryEntryView>,
        stats: RecoveryStats,
    },
}

pub fn recovery_report(
    user: &UserRecord,
    log: &[RecoveryDay],
    filter: &RecoveryFilter,
) -> RecoveryReport {
    if !user.is_recovered() {
        return RecoveryReport::InProgress {
            user_id: user.id,
            name: user.name.clone(),
            days: user.days,
            target_days: user.target_days,
            remaining_days: remaining_days(user),
            progress_percent: rounded_percent(user.days as f64, user.target_days as f64).min(100),
        };
    }

    RecoveryReport::Tracked {
        user_id: user.id,
        name: user.name.clone(),
        categories: AddictionCategory::ALL
            .iter()
            .map(|c| CategoryOption {
                value: *c,
                label: c.label(),
            })
            .collect(),
        available_days: available_days(log),
        entries: filter_log(log, filter)
            .into_iter()
            .map(|entry| RecoveryEntryView {
                progress_percent: entry.progress_percent().round() as u32,
                entry: entry.clone(),
            })
            .collect(),
        stats: recovery_stats(log),
    }
}
