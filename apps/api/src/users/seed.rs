use crate::users::models::{Milestone, RecoveryStatus, UserRecord};

fn starter_milestones() -> Vec<Milestone> {
    vec![
        Milestone {
            title: "7 Days Streak".to_string(),
            description: "Completed 7 continuous days of recovery.".to_string(),
        },
        Milestone {
            title: "First Breathing Session".to_string(),
            description: "Completed first guided breathing activity.".to_string(),
        },
    ]
}

fn user(
    id: u32,
    name: &str,
    status: RecoveryStatus,
    days: u32,
    target_days: u32,
    activities: &[&str],
) -> UserRecord {
    UserRecord {
        id,
        name: name.to_string(),
        status,
        days,
        target_days,
        activities: activities.iter().map(|a| a.to_string()).collect(),
        achievements: starter_milestones(),
        is_blocked: false,
    }
}

/// The fixed registry the store starts from on every boot.
pub fn seed_users() -> Vec<UserRecord> {
    vec![
        user(
            1,
            "Ahsan Ali",
            RecoveryStatus::Recovered,
            120,
            150,
            &["Daily Exercise", "Meditation", "Counseling"],
        ),
        user(2, "Basit Khan", RecoveryStatus::NotRecovered, 12, 30, &[]),
        user(
            3,
            "Kashif Raza",
            RecoveryStatus::Recovered,
            200,
            180,
            &["Support Group", "Therapy", "Journaling"],
        ),
        user(4, "Hamza Ahmed", RecoveryStatus::NotRecovered, 5, 60, &[]),
    ]
}
