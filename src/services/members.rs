//! Member (adhérent) administration

use std::sync::Arc;

use validator::Validate;

use crate::{
    api::LibraryApi,
    error::{AppError, AppResult},
    models::{AccountDraft, Member},
    store::{EntityList, ListAction},
};

#[derive(Clone)]
pub struct MembersService {
    api: Arc<dyn LibraryApi>,
    members: EntityList<Member>,
}

impl MembersService {
    pub fn new(api: Arc<dyn LibraryApi>, members: EntityList<Member>) -> Self {
        Self { api, members }
    }

    pub fn members(&self) -> &EntityList<Member> {
        &self.members
    }

    pub async fn load(&self) -> AppResult<usize> {
        super::load_into(&self.members, "members", self.api.list_members()).await
    }

    /// Create a member; returns the new id
    pub async fn add(&self, draft: &AccountDraft) -> AppResult<i32> {
        super::mutate(&self.members, "add-member", async {
            draft.validate()?;
            let created = self.api.create_member(draft).await?;
            Ok::<_, AppError>(created.id)
        })
        .await
    }

    pub async fn update(&self, id: i32, draft: &AccountDraft) -> AppResult<()> {
        super::mutate(&self.members, "update-member", async {
            draft.validate()?;
            self.api.update_member(id, draft).await
        })
        .await
    }

    pub async fn remove(&self, id: i32) -> AppResult<()> {
        super::mutate(&self.members, "remove-member", self.api.delete_member(id)).await
    }

    /// Dismiss the banner and the "added" tag
    pub fn acknowledge(&self) {
        self.members.dispatch(ListAction::ResetToIdle);
    }

    /// Find a cached member by id
    pub fn cached(&self, id: i32) -> AppResult<Member> {
        self.members
            .select(|s| s.entities.iter().find(|m| m.id == id).cloned())
            .ok_or_else(|| AppError::Validation(format!("Unknown member #{}", id)))
    }
}
