use std::collections::HashSet;

use crate::entities::graduate::Graduate;
use crate::errors::ClientError;
use crate::repositories::admin_api::AdminApi;

/// The graduates table: rows, the last load error and which rows are
/// expanded to show their work history.
#[derive(Debug, Default)]
pub struct GraduateListState {
    graduates: Vec<Graduate>,
    error: Option<String>,
    expanded: HashSet<i64>,
}

impl GraduateListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graduates(&self) -> &[Graduate] {
        &self.graduates
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.graduates.is_empty()
    }

    /// Loads (or retries loading) the whole list. On failure the previous
    /// rows stay and the message is kept for display.
    pub async fn refresh<A>(&mut self, api: &A) -> Result<(), ClientError>
    where
        A: AdminApi + ?Sized,
    {
        match api.list_graduates().await {
            Ok(graduates) => {
                self.expanded.retain(|id| graduates.iter().any(|g| g.id == *id));
                self.graduates = graduates;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Could not load graduates: {}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Replaces the row with the same id, or appends it.
    pub fn upsert(&mut self, graduate: Graduate) {
        match self.graduates.iter_mut().find(|g| g.id == graduate.id) {
            Some(row) => *row = graduate,
            None => self.graduates.push(graduate),
        }
    }

    pub fn toggle_row(&mut self, id: i64) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded.contains(&id)
    }
}
