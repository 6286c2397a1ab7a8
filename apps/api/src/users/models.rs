use serde::{Deserialize, Serialize};

use crate::editing::{FieldError, Validate};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryStatus {
    Recovered,
    NotRecovered,
}

impl RecoveryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RecoveryStatus::Recovered => "Recovered",
            RecoveryStatus::NotRecovered => "Not Recovered",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Milestone {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: u32,
    pub name: String,
    pub status: RecoveryStatus,
    pub days: u32,
    pub target_days: u32,
    pub activities: Vec<String>,
    pub achievements: Vec<Milestone>,
    #[serde(default)]
    pub is_blocked: bool,
}

impl UserRecord {
    pub fn is_recovered(&self) -> bool {
        self.status == RecoveryStatus::Recovered
    }

    pub fn draft(&self) -> UserDraft {
        UserDraft {
            status: self.status,
            target_days: self.target_days,
        }
    }
}

/// Editable fields of a user record. Committed together or not at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UserDraft {
    pub status: RecoveryStatus,
    pub target_days: u32,
}

impl Validate for UserDraft {
    fn validate(&self) -> Vec<FieldError> {
        if self.target_days == 0 {
            vec![FieldError::new(
                "target_days",
                "target_days must be at least 1",
            )]
        } else {
            vec![]
        }
    }
}

/// Partial update applied to a draft while editing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDraftPatch {
    pub status: Option<RecoveryStatus>,
    pub target_days: Option<u32>,
}

impl UserDraftPatch {
    pub fn apply_to(&self, draft: &mut UserDraft) {
        if let Some(status) = self.status {
            draft.status = status;
        }
        if let Some(target_days) = self.target_days {
            draft.target_days = target_days;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Whole-sequence mutators
//
// Each returns a new sequence; an unknown id yields an unchanged copy.
// ────────────────────────────────────────────────────────────────────────────

pub fn apply_draft(users: &[UserRecord], id: u32, draft: &UserDraft) -> Vec<UserRecord> {
    users
        .iter()
        .map(|u| {
            if u.id == id {
                UserRecord {
                    status: draft.status,
                    target_days: draft.target_days,
                    ..u.clone()
                }
            } else {
                u.clone()
            }
        })
        .collect()
}

pub fn toggle_blocked(users: &[UserRecord], id: u32) -> Vec<UserRecord> {
    users
        .iter()
        .map(|u| {
            if u.id == id {
                UserRecord {
                    is_blocked: !u.is_blocked,
                    ..u.clone()
                }
            } else {
                u.clone()
            }
        })
        .collect()
}

pub fn remove_user(users: &[UserRecord], id: u32) -> Vec<UserRecord> {
    users.iter().filter(|u| u.id != id).cloned().collect()
}
