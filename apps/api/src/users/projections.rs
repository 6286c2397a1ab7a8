//! Derived views: pure aggregates over a registry snapshot.
//!
//! Nothing here mutates its input or caches; the same snapshot always yields
//! the same result.

use serde::Serialize;

use crate::users::models::{RecoveryStatus, UserRecord};

/// Formats with one decimal place, halves rounding away from zero.
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// `part / whole * 100`, or 0 for an empty whole.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

pub fn count(users: &[UserRecord], predicate: impl Fn(&UserRecord) -> bool) -> usize {
    users.iter().filter(|u| predicate(u)).count()
}

pub fn total_users(users: &[UserRecord]) -> usize {
    users.len()
}

pub fn recovered_count(users: &[UserRecord]) -> usize {
    count(users, |u| u.status == RecoveryStatus::Recovered)
}

pub fn not_recovered_count(users: &[UserRecord]) -> usize {
    count(users, |u| u.status == RecoveryStatus::NotRecovered)
}

pub fn blocked_count(users: &[UserRecord]) -> usize {
    count(users, |u| u.is_blocked)
}

pub fn active_journeys(users: &[UserRecord]) -> usize {
    count(users, |u| u.days > 0)
}

pub fn total_days_clean(users: &[UserRecord]) -> u64 {
    users.iter().map(|u| u.days as u64).sum()
}

pub fn recovery_rate_percent(users: &[UserRecord]) -> String {
    one_decimal(percent(recovered_count(users), total_users(users)))
}

pub fn average_days_clean(users: &[UserRecord]) -> String {
    let total = total_users(users);
    if total == 0 {
        return one_decimal(0.0);
    }
    one_decimal(total_days_clean(users) as f64 / total as f64)
}

// ────────────────────────────────────────────────────────────────────────────
// Day buckets
// ────────────────────────────────────────────────────────────────────────────

pub const FIRST_WEEK_DAYS: u32 = 7;
pub const FIRST_MONTH_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayBucket {
    UnderWeek,
    WeekToMonth,
    MonthPlus,
}

impl DayBucket {
    pub fn for_days(days: u32) -> Self {
        match days {
            d if d < FIRST_WEEK_DAYS => DayBucket::UnderWeek,
            d if d < FIRST_MONTH_DAYS => DayBucket::WeekToMonth,
            _ => DayBucket::MonthPlus,
        }
    }
}

#[derive(Debug, Default)]
pub struct DayPartition<'a> {
    pub under_week: Vec<&'a UserRecord>,
    pub week_to_month: Vec<&'a UserRecord>,
    pub month_plus: Vec<&'a UserRecord>,
}

pub fn partition_by_days(users: &[UserRecord]) -> DayPartition<'_> {
    let mut partition = DayPartition::default();
    for user in users {
        match DayBucket::for_days(user.days) {
            DayBucket::UnderWeek => partition.under_week.push(user),
            DayBucket::WeekToMonth => partition.week_to_month.push(user),
            DayBucket::MonthPlus => partition.month_plus.push(user),
        }
    }
    partition
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayBucketCounts {
    pub under_week: usize,
    pub week_to_month: usize,
    pub month_plus: usize,
}

impl From<&DayPartition<'_>> for DayBucketCounts {
    fn from(p: &DayPartition<'_>) -> Self {
        DayBucketCounts {
            under_week: p.under_week.len(),
            week_to_month: p.week_to_month.len(),
            month_plus: p.month_plus.len(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-record derived values
// ────────────────────────────────────────────────────────────────────────────

/// Days left before the goal; zero once recovered.
pub fn remaining_days(user: &UserRecord) -> u32 {
    if user.is_recovered() {
        0
    } else {
        user.target_days.saturating_sub(user.days)
    }
}

/// Days beyond the goal a recovered user needed; zero otherwise.
pub fn over_days(user: &UserRecord) -> u32 {
    if user.is_recovered() {
        user.days.saturating_sub(user.target_days)
    } else {
        0
    }
}

/// Days a recovered user finished ahead of the goal; zero otherwise.
pub fn ahead_of_target_days(user: &UserRecord) -> u32 {
    if user.is_recovered() {
        user.target_days.saturating_sub(user.days)
    } else {
        0
    }
}

/// Progress towards the goal, capped at 100.
pub fn progress_percent(user: &UserRecord) -> f64 {
    if user.target_days == 0 {
        return 0.0;
    }
    (user.days as f64 / user.target_days as f64 * 100.0).min(100.0)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserProgress {
    pub remaining_days: u32,
    pub over_days: u32,
    pub ahead_of_target_days: u32,
    pub progress_percent: f64,
}

pub fn user_progress(user: &UserRecord) -> UserProgress {
    UserProgress {
        remaining_days: remaining_days(user),
        over_days: over_days(user),
        ahead_of_target_days: ahead_of_target_days(user),
        progress_percent: progress_percent(user),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// View models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub total_users: usize,
    pub recovered: usize,
    pub not_recovered: usize,
    pub blocked: usize,
    pub active_journeys: usize,
    pub recovery_rate_percent: String,
    pub total_days_clean: u64,
    pub average_days_clean: String,
    pub day_buckets: DayBucketCounts,
}

pub fn dashboard_summary(users: &[UserRecord]) -> DashboardSummary {
    DashboardSummary {
        total_users: total_users(users),
        recovered: recovered_count(users),
        not_recovered: not_recovered_count(users),
        blocked: blocked_count(users),
        active_journeys: active_journeys(users),
        recovery_rate_percent: recovery_rate_percent(users),
        total_days_clean: total_days_clean(users),
        average_days_clean: average_days_clean(users),
        day_buckets: DayBucketCounts::from(&partition_by_days(users)),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserRow {
    pub id: u32,
    pub name: String,
    pub status: RecoveryStatus,
    pub status_label: &'static str,
    pub days: u32,
    pub is_blocked: bool,
}

pub fn user_rows(users: &[UserRecord]) -> Vec<UserRow> {
    users
        .iter()
        .map(|u| UserRow {
            id: u.id,
            name: u.name.clone(),
            status: u.status,
            status_label: u.status.label(),
            days: u.days,
            is_blocked: u.is_blocked,
        })
        .collect()
}
