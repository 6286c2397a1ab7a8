//! User detail screen: per-record edit sessions plus the destructive
//! block/delete actions, all committed through the record store.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use crate::editing::{confirm_then, Confirmation, EditSession, Outcome};
use crate::errors::AppError;
use crate::users::models::{
    apply_draft, remove_user, toggle_blocked, UserDraft, UserDraftPatch, UserRecord,
};
use crate::users::projections::{user_progress, UserProgress};
use crate::users::store::RecordStore;

pub const USERS_PATH: &str = "/users";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserDetailView {
    pub user: UserRecord,
    pub progress: UserProgress,
    pub editing: bool,
    /// Pending values while editing; absent in Viewing.
    pub draft: Option<UserDraft>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeletedUser {
    pub id: u32,
    pub name: String,
    /// Where a view showing the deleted record should navigate.
    pub redirect_to: String,
}

pub struct UserDetail {
    store: RecordStore,
    sessions: HashMap<u32, EditSession<UserDraft>>,
}

impl UserDetail {
    pub fn new(store: RecordStore) -> Self {
        UserDetail {
            store,
            sessions: HashMap::new(),
        }
    }

    fn require(&self, id: u32) -> Result<UserRecord, AppError> {
        self.store.find(id).ok_or_else(|| AppError::user_not_found(id))
    }

    fn require_viewing(&self, id: u32, action: &str) -> Result<(), AppError> {
        if self.sessions.get(&id).is_some_and(|s| s.is_editing()) {
            return Err(AppError::Conflict(format!(
                "Cannot {action} user {id} while it is being edited"
            )));
        }
        Ok(())
    }

    /// While editing, `progress` previews the draft's status and target.
    pub fn view(&self, id: u32) -> Result<UserDetailView, AppError> {
        let user = self.require(id)?;
        let draft = self.sessions.get(&id).and_then(|s| s.draft()).copied();
        let progress = match draft {
            Some(d) => user_progress(&UserRecord {
                status: d.status,
                target_days: d.target_days,
                ..user.clone()
            }),
            None => user_progress(&user),
        };
        Ok(UserDetailView {
            progress,
            editing: draft.is_some(),
            draft,
            user,
        })
    }

    pub fn begin_edit(&mut self, id: u32) -> Result<UserDetailView, AppError> {
        let user = self.require(id)?;
        self.sessions.entry(id).or_default().begin(user.draft());
        self.view(id)
    }

    pub fn update_draft(
        &mut self,
        id: u32,
        patch: &UserDraftPatch,
    ) -> Result<UserDetailView, AppError> {
        self.require(id)?;
        let draft = self
            .sessions
            .get_mut(&id)
            .and_then(|s| s.draft_mut())
            .ok_or_else(|| AppError::Conflict(format!("User {id} is not being edited")))?;
        patch.apply_to(draft);
        self.view(id)
    }

    pub fn cancel_edit(&mut self, id: u32) -> Result<UserDetailView, AppError> {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.cancel();
        }
        self.view(id)
    }

    /// Validates the draft and commits `status` and `target_days` together.
    /// A record that vanished mid-edit drops its session.
    pub fn save_edit(&mut self, id: u32) -> Result<Outcome<UserDetailView>, AppError> {
        if let Err(e) = self.require(id) {
            self.sessions.remove(&id);
            return Err(e);
        }
        let store = self.store.clone();
        let outcome = self
            .sessions
            .get_mut(&id)
            .and_then(|s| s.save(|draft| store.update(|users| apply_draft(users, id, &draft))))
            .ok_or_else(|| AppError::Conflict(format!("User {id} is not being edited")))?;

        match outcome {
            Outcome::Done(_) => {
                info!("Saved edits for user {id}");
                Ok(Outcome::Done(self.view(id)?))
            }
            Outcome::Invalid(errors) => Ok(Outcome::Invalid(errors)),
            Outcome::ConfirmationRequired(c) => Ok(Outcome::ConfirmationRequired(c)),
        }
    }

    pub fn toggle_block(
        &mut self,
        id: u32,
        confirmed: bool,
    ) -> Result<Outcome<UserDetailView>, AppError> {
        let user = self.require(id)?;
        self.require_viewing(id, "block")?;

        let verb = if user.is_blocked { "unblock" } else { "block" };
        let outcome = confirm_then(
            confirmed,
            || Confirmation::new(verb, format!("Are you sure you want to {verb} {}?", user.name)),
            || self.store.update(|users| toggle_blocked(users, id)),
        );
        if outcome.is_done() {
            info!("User {id} {verb}ed");
        }
        match outcome {
            Outcome::Done(_) => Ok(Outcome::Done(self.view(id)?)),
            Outcome::Invalid(errors) => Ok(Outcome::Invalid(errors)),
            Outcome::ConfirmationRequired(c) => Ok(Outcome::ConfirmationRequired(c)),
        }
    }

    pub fn delete(&mut self, id: u32, confirmed: bool) -> Result<Outcome<DeletedUser>, AppError> {
        let user = self.require(id)?;
        self.require_viewing(id, "delete")?;

        let store = &self.store;
        let outcome = confirm_then(
            confirmed,
            || {
                Confirmation::new(
                    "delete",
                    format!(
                        "Are you sure you want to delete {}? This action cannot be undone.",
                        user.name
                    ),
                )
            },
            || {
                store.update(|users| remove_user(users, id));
                DeletedUser {
                    id,
                    name: user.name.clone(),
                    redirect_to: USERS_PATH.to_string(),
                }
            },
        );
        if outcome.is_done() {
            self.sessions.remove(&id);
            info!("Deleted user {id}");
        }
        Ok(outcome)
    }
}
