//! Librarian account management

use std::sync::Arc;

use validator::Validate;

use crate::{
    api::LibraryApi,
    error::{AppError, AppResult},
    models::{AccountDraft, Librarian},
    store::EntityList,
};

#[derive(Clone)]
pub struct LibrariansService {
    api: Arc<dyn LibraryApi>,
    librarians: EntityList<Librarian>,
}

impl LibrariansService {
    pub fn new(api: Arc<dyn LibraryApi>, librarians: EntityList<Librarian>) -> Self {
        Self { api, librarians }
    }

    pub fn librarians(&self) -> &EntityList<Librarian> {
        &self.librarians
    }

    pub async fn load(&self) -> AppResult<usize> {
        super::load_into(&self.librarians, "librarians", self.api.list_librarians()).await
    }

    /// Create a librarian account; a password is mandatory here
    pub async fn add(&self, draft: &AccountDraft) -> AppResult<i32> {
        super::mutate(&self.librarians, "add-librarian", async {
            draft.validate()?;
            if draft.password.is_none() {
                return Err(AppError::Validation(
                    "A librarian account needs a password".to_string(),
                ));
            }
            let created = self.api.create_librarian(draft).await?;
            Ok::<_, AppError>(created.id)
        })
        .await
    }
}
