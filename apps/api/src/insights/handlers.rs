use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::insights::community::{
    financial_summary, post_summary, sample_financials, sample_leaderboard, sample_posts,
    FinancialSummary, Leaderboard, Post, PostSummary,
};
use crate::insights::recoveries::{
    recovery_report, sample_recovery_log, RecoveryFilter, RecoveryReport,
};
use crate::insights::wellness::{
    achievement_summary, activity_summary, breathing_catalog, sample_achievements,
    sample_activities, walking_catalog, walking_goals, AchievementsPage, Activity,
    ActivitySummary, BreathingTechnique, WalkingGoal, WalkingRoutine,
};
use crate::state::AppState;
use crate::users::models::UserRecord;

fn require_user(state: &AppState, id: u32) -> Result<UserRecord, AppError> {
    state.users.find(id).ok_or_else(|| AppError::user_not_found(id))
}

#[derive(Debug, Serialize)]
pub struct UserPage<T: Serialize> {
    pub user_id: u32,
    pub name: String,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> UserPage<T> {
    fn new(user: &UserRecord, body: T) -> Json<Self> {
        Json(UserPage {
            user_id: user.id,
            name: user.name.clone(),
            body,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ActivitiesBody {
    pub activities: Vec<Activity>,
    pub summary: ActivitySummary,
}

#[derive(Debug, Serialize)]
pub struct PostsBody {
    pub posts: Vec<Post>,
    pub summary: PostSummary,
}

#[derive(Debug, Serialize)]
pub struct BreathingBody {
    pub techniques: Vec<BreathingTechnique>,
}

#[derive(Debug, Serialize)]
pub struct WalkingBody {
    pub routines: Vec<WalkingRoutine>,
    pub goals: Vec<WalkingGoal>,
}

/// GET /api/v1/users/:id/recoveries?category=gaming&day=2
pub async fn handle_recoveries(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(filter): Query<RecoveryFilter>,
) -> Result<Json<RecoveryReport>, AppError> {
    let user = require_user(&state, id)?;
    Ok(Json(recovery_report(&user, &sample_recovery_log(), &filter)))
}

/// GET /api/v1/users/:id/activities
pub async fn handle_activities(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<UserPage<ActivitiesBody>>, AppError> {
    let user = require_user(&state, id)?;
    let activities = sample_activities();
    let summary = activity_summary(&activities);
    Ok(UserPage::new(&user, ActivitiesBody { activities, summary }))
}

/// GET /api/v1/users/:id/achievements
pub async fn handle_achievements(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<AchievementsPage>, AppError> {
    let user = require_user(&state, id)?;
    let achievements = sample_achievements();
    Ok(Json(AchievementsPage {
        user_id: user.id,
        summary: achievement_summary(&achievements),
        name: user.name,
        milestones: user.achievements,
        achievements,
    }))
}

/// GET /api/v1/users/:id/financial
pub async fn handle_financial(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<UserPage<FinancialSummary>>, AppError> {
    let user = require_user(&state, id)?;
    Ok(UserPage::new(&user, financial_summary(&sample_financials())))
}

/// GET /api/v1/users/:id/posts
pub async fn handle_posts(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<UserPage<PostsBody>>, AppError> {
    let user = require_user(&state, id)?;
    let posts = sample_posts();
    let summary = post_summary(&posts);
    Ok(UserPage::new(&user, PostsBody { posts, summary }))
}

/// GET /api/v1/users/:id/breathing
pub async fn handle_breathing(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<UserPage<BreathingBody>>, AppError> {
    let user = require_user(&state, id)?;
    Ok(UserPage::new(
        &user,
        BreathingBody {
            techniques: breathing_catalog(),
        },
    ))
}

/// GET /api/v1/users/:id/walking
pub async fn handle_walking(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<UserPage<WalkingBody>>, AppError> {
    let user = require_user(&state, id)?;
    Ok(UserPage::new(
        &user,
        WalkingBody {
            routines: walking_catalog(),
            goals: walking_goals(),
        },
    ))
}

/// GET /api/v1/leaderboard
pub async fn handle_leaderboard() -> Json<Leaderboard> {
    Json(sample_leaderboard())
}
