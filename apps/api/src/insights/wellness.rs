//! Activities, achievements and the exercise catalogs.

use chrono::NaiveDate;
use serde::Serialize;

use crate::insights::{date, rounded_percent};
use crate::users::models::Milestone;

// ────────────────────────────────────────────────────────────────────────────
// Activities
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ActivityStatus {
    Completed,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Activity {
    pub id: u32,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub duration: &'static str,
    pub date: NaiveDate,
    pub status: ActivityStatus,
    pub points: u32,
}

pub fn sample_activities() -> Vec<Activity> {
    let completed = |id, name, kind, duration, date, points| Activity {
        id,
        name,
        kind,
        duration,
        date,
        status: ActivityStatus::Completed,
        points,
    };
    vec![
        completed(1, "Morning Meditation", "Mindfulness", "15 minutes", date(2024, 1, 15), 50),
        completed(2, "Evening Walk", "Exercise", "30 minutes", date(2024, 1, 15), 30),
        completed(3, "Breathing Exercise", "Wellness", "10 minutes", date(2024, 1, 14), 20),
        completed(4, "Yoga Session", "Exercise", "45 minutes", date(2024, 1, 14), 60),
        completed(5, "Reading Therapy", "Mental Health", "20 minutes", date(2024, 1, 13), 40),
    ]
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActivitySummary {
    pub total: usize,
    pub completed: usize,
    pub total_points: u32,
    pub completion_percent: u32,
}

pub fn activity_summary(activities: &[Activity]) -> ActivitySummary {
    let completed = activities
        .iter()
        .filter(|a| a.status == ActivityStatus::Completed)
        .count();
    ActivitySummary {
        total: activities.len(),
        completed,
        total_points: activities.iter().map(|a| a.points).sum(),
        completion_percent: rounded_percent(completed as f64, activities.len() as f64),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Achievements
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AchievementStatus {
    Earned,
    Locked,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum AchievementLevel {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Achievement {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub earned_date: Option<NaiveDate>,
    pub points: u32,
    pub status: AchievementStatus,
    pub level: AchievementLevel,
    /// Percent towards unlocking; only set while locked.
    pub progress: Option<u32>,
}

pub fn sample_achievements() -> Vec<Achievement> {
    use AchievementLevel::*;

    let earned = |id, title, description, category, on, points, level| Achievement {
        id,
        title,
        description,
        category,
        earned_date: Some(on),
        points,
        status: AchievementStatus::Earned,
        level,
        progress: None,
    };
    let locked = |id, title, description, category, points, level, progress| Achievement {
        id,
        title,
        description,
        category,
        earned_date: None,
        points,
        status: AchievementStatus::Locked,
        level,
        progress: Some(progress),
    };
    vec![
        earned(
            1,
            "7-Day Streak Champion",
            "Completed activities for 7 consecutive days",
            "Consistency",
            date(2024, 1, 15),
            100,
            Gold,
        ),
        earned(
            2,
            "Breathing Master",
            "Completed 20+ breathing exercises",
            "Wellness",
            date(2024, 1, 14),
            75,
            Silver,
        ),
        earned(
            3,
            "Walking Warrior",
            "Walked 50+ kilometers total",
            "Fitness",
            date(2024, 1, 13),
            150,
            Gold,
        ),
        earned(
            4,
            "Early Riser",
            "Completed 10+ morning activities",
            "Routine",
            date(2024, 1, 12),
            50,
            Bronze,
        ),
        locked(
            5,
            "Meditation Guru",
            "Meditated for 500+ minutes total",
            "Mindfulness",
            200,
            Platinum,
            65,
        ),
        locked(
            6,
            "Social Butterfly",
            "Shared 5+ posts with community",
            "Social",
            80,
            Silver,
            40,
        ),
    ]
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AchievementSummary {
    pub total: usize,
    pub earned: usize,
    pub earned_points: u32,
    pub completion_percent: u32,
}

pub fn achievement_summary(achievements: &[Achievement]) -> AchievementSummary {
    let earned: Vec<&Achievement> = achievements
        .iter()
        .filter(|a| a.status == AchievementStatus::Earned)
        .collect();
    AchievementSummary {
        total: achievements.len(),
        earned: earned.len(),
        earned_points: earned.iter().map(|a| a.points).sum(),
        completion_percent: rounded_percent(earned.len() as f64, achievements.len() as f64),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AchievementsPage {
    pub user_id: u32,
    pub name: String,
    /// Milestones stored on the user record itself.
    pub milestones: Vec<Milestone>,
    pub achievements: Vec<Achievement>,
    pub summary: AchievementSummary,
}

// ────────────────────────────────────────────────────────────────────────────
// Exercise catalogs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BreathingTechnique {
    pub id: u32,
    pub name: &'static str,
    pub duration: &'static str,
    pub cycles: &'static str,
    pub time_per_cycle: &'static str,
}

pub fn breathing_catalog() -> Vec<BreathingTechnique> {
    let technique = |id, name, duration, cycles, time_per_cycle| BreathingTechnique {
        id,
        name,
        duration,
        cycles,
        time_per_cycle,
    };
    vec![
        technique(1, "Box Breathing", "5-10 minutes", "5-10 cycles", "16 seconds per cycle"),
        technique(2, "4-7-8 Breathing", "2-4 minutes", "4 cycles", "19 seconds per cycle"),
        technique(3, "Deep Belly Breathing", "5-10 minutes", "Continuous", "10 seconds per cycle"),
        technique(4, "Alternate Nostril", "5-10 minutes", "10-20 cycles", "12 seconds per cycle"),
        technique(5, "Lion's Breath", "1-2 minutes", "3-5 cycles", "15 seconds per cycle"),
        technique(6, "Humming Bee Breath", "3-5 minutes", "5-7 cycles", "20 seconds per cycle"),
    ]
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Intensity {
    Light,
    Moderate,
    High,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WalkingRoutine {
    pub id: u32,
    pub name: &'static str,
    pub duration_minutes: u32,
    pub intensity: Intensity,
    pub steps: u32,
    pub pace: &'static str,
}

pub fn walking_catalog() -> Vec<WalkingRoutine> {
    use Intensity::*;

    let routine = |id, name, duration_minutes, intensity, steps, pace| WalkingRoutine {
        id,
        name,
        duration_minutes,
        intensity,
        steps,
        pace,
    };
    vec![
        routine(1, "Morning Brisk Walk", 30, Moderate, 3_000, "6-7 min/km"),
        routine(2, "Evening Relaxation Walk", 45, Light, 4_500, "8-9 min/km"),
        routine(3, "Interval Power Walking", 25, High, 2_500, "5-6 min/km"),
        routine(4, "Nature Trail Walk", 60, Moderate, 6_000, "7-8 min/km"),
        routine(5, "Lunch Break Walk", 20, Light, 2_000, "8-10 min/km"),
        routine(6, "Weekend Long Walk", 90, Moderate, 8_000, "7-8 min/km"),
    ]
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WalkingGoal {
    pub id: u32,
    pub name: &'static str,
    pub target: u32,
    pub current: u32,
    pub unit: &'static str,
    pub progress_percent: u32,
}

impl WalkingGoal {
    fn new(id: u32, name: &'static str, target: u32, current: u32, unit: &'static str) -> Self {
        WalkingGoal {
            id,
            name,
            target,
            current,
            unit,
            progress_percent: (current as f64 / target as f64 * 100.0).floor().min(100.0) as u32,
        }
    }
}

pub fn walking_goals() -> Vec<WalkingGoal> {
    vec![
        WalkingGoal::new(1, "Daily Steps", 10_000, 8_452, "steps"),
        WalkingGoal::new(2, "Weekly Active Days", 5, 3, "days"),
        WalkingGoal::new(3, "Monthly Walking", 30, 18, "sessions"),
    ]
}
