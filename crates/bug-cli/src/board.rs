//! Bug list state and the actions available on it.
//!
//! Failed calls never abort: their message lands in a dismissible banner
//! and the board stays usable.

use tracing::{debug, warn};

use bug_core::entities::Bug;
use bug_core::enums::BugStatus;
use bug_core::input::BugInput;
use bug_core::responses::MessageResponse;

use crate::api::BugApi;
use crate::error::ClientError;
use crate::form::{BugForm, SubmitOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
    Loading,
    Loaded(Vec<Bug>),
}

pub struct BugBoard<A> {
    api: A,
    state: ListState,
    banner: Option<String>,
    form: Option<BugForm>,
}

impl<A: BugApi> BugBoard<A> {
    /// A board that has not fetched anything yet.
    pub const fn new(api: A) -> Self {
        Self {
            api,
            state: ListState::Loading,
            banner: None,
            form: None,
        }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// Loaded bugs; empty while loading.
    pub fn bugs(&self) -> &[Bug] {
        match &self.state {
            ListState::Loading => &[],
            ListState::Loaded(bugs) => bugs,
        }
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub const fn form(&self) -> Option<&BugForm> {
        self.form.as_ref()
    }

    pub const fn form_mut(&mut self) -> Option<&mut BugForm> {
        self.form.as_mut()
    }

    /// Open an empty form for a new bug.
    pub fn open_new_form(&mut self) -> &mut BugForm {
        self.form.insert(BugForm::new())
    }

    /// Open a pre-filled form for a loaded bug. `None` if it is not loaded.
    pub fn open_edit_form(&mut self, id: &str) -> Option<&mut BugForm> {
        let bug = self.bugs().iter().find(|b| b.id.eq_ignore_ascii_case(id))?;
        let form = BugForm::editing(bug);
        Some(self.form.insert(form))
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    fn fail(&mut self, err: &ClientError) {
        warn!(status = ?err.status(), error = %err, "bug tracker call failed");
        self.banner = Some(err.to_string());
    }

    /// Fetch every bug. On failure the banner is set and the list is empty.
    pub async fn reload(&mut self) {
        self.state = ListState::Loading;
        match self.api.list().await {
            Ok(bugs) => {
                debug!(count = bugs.len(), "loaded bugs");
                self.state = ListState::Loaded(bugs);
            }
            Err(err) => {
                self.fail(&err);
                self.state = ListState::Loaded(Vec::new());
            }
        }
    }

    /// Submit the open form.
    ///
    /// On success the form closes, the banner clears and the list reloads.
    /// On an API failure the banner carries the server's message and the
    /// form stays open. Returns `None` when no form is open or the call
    /// failed.
    pub async fn submit_form(&mut self) -> Option<SubmitOutcome> {
        let form = self.form.as_mut()?;
        match form.submit(&self.api).await {
            Ok(SubmitOutcome::Invalid) => Some(SubmitOutcome::Invalid),
            Ok(outcome) => {
                self.form = None;
                self.banner = None;
                self.reload().await;
                Some(outcome)
            }
            Err(err) => {
                self.fail(&err);
                None
            }
        }
    }

    /// Set a bug's status and reload. Returns whether the change was saved.
    pub async fn set_status(&mut self, id: &str, status: BugStatus) -> bool {
        let input = BugInput {
            status: Some(status.as_str().to_string()),
            ..BugInput::default()
        };
        match self.api.update(id, &input).await {
            Ok(bug) => {
                debug!(id = %bug.id, status = %bug.status, "status changed");
                self.banner = None;
                self.reload().await;
                true
            }
            Err(err) => {
                self.fail(&err);
                false
            }
        }
    }

    /// Status of `id` from the loaded list, or fetched when not loaded.
    async fn current_status(&mut self, id: &str) -> Option<BugStatus> {
        let loaded = self
            .bugs()
            .iter()
            .find(|b| b.id.eq_ignore_ascii_case(id))
            .map(|b| b.status);
        if loaded.is_some() {
            return loaded;
        }
        match self.api.get(id).await {
            Ok(bug) => Some(bug.status),
            Err(err) => {
                self.fail(&err);
                None
            }
        }
    }

    /// Move a bug to the next workflow state (open, in-progress, resolved).
    pub async fn advance(&mut self, id: &str) -> bool {
        let Some(current) = self.current_status(id).await else {
            return false;
        };
        match current.next() {
            Some(next) => self.set_status(id, next).await,
            None => {
                self.banner = Some(format!("Bug is already {current}"));
                false
            }
        }
    }

    /// Mark a bug resolved directly. A bug that is already resolved is left
    /// alone.
    pub async fn resolve(&mut self, id: &str) -> bool {
        let Some(current) = self.current_status(id).await else {
            return false;
        };
        if !current.can_transition_to(BugStatus::Resolved) {
            self.banner = Some(format!("Bug is already {current}"));
            return false;
        }
        self.set_status(id, BugStatus::Resolved).await
    }

    /// Delete after `confirm` agrees. `None` when cancelled or failed.
    pub async fn delete(
        &mut self,
        id: &str,
        confirm: impl FnOnce() -> bool,
    ) -> Option<MessageResponse> {
        if !confirm() {
            debug!(id, "delete cancelled");
            return None;
        }
        match self.api.delete(id).await {
            Ok(response) => {
                self.banner = None;
                self.reload().await;
                Some(response)
            }
            Err(err) => {
                self.fail(&err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bug_core::errors::Field;
    use pretty_assertions::assert_eq;

    use crate::test_support::fake::FakeApi;

    async fn loaded(titles: &[&str]) -> BugBoard<FakeApi> {
        let mut board = BugBoard::new(FakeApi::with_bugs(titles));
        board.reload().await;
        board
    }

    #[tokio::test]
    async fn starts_loading_then_loads() {
        let mut board = BugBoard::new(FakeApi::with_bugs(&["First bug", "Second bug"]));
        assert_eq!(board.state(), &ListState::Loading);
        board.reload().await;
        let titles: Vec<&str> = board.bugs().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Second bug", "First bug"]);
    }

    #[tokio::test]
    async fn failed_reload_sets_banner_and_empty_list() {
        let api = FakeApi::with_bugs(&["First bug"]);
        api.fail_with(500, "Failed to fetch bugs");
        let mut board = BugBoard::new(api);
        board.reload().await;

        assert_eq!(board.state(), &ListState::Loaded(Vec::new()));
        assert_eq!(board.banner(), Some("Failed to fetch bugs"));
        board.dismiss_banner();
        assert_eq!(board.banner(), None);
    }

    #[tokio::test]
    async fn submit_success_closes_form_and_reloads() {
        let mut board = loaded(&[]).await;
        let form = board.open_new_form();
        form.set_field(Field::Title, "Login bug");
        form.set_field(Field::Description, "Cannot login with correct credentials");

        let outcome = board.submit_form().await;
        assert!(matches!(outcome, Some(SubmitOutcome::Created(_))));
        assert!(board.form().is_none());
        assert_eq!(board.bugs().len(), 1);
    }

    #[tokio::test]
    async fn submit_failure_keeps_form_and_shows_server_message() {
        let mut board = loaded(&[]).await;
        let form = board.open_new_form();
        form.set_field(Field::Title, "Login bug");
        form.set_field(Field::Description, "Cannot login with correct credentials");
        board.api().fail_with(400, "Title cannot exceed 100 characters");

        assert_eq!(board.submit_form().await, None);
        assert!(board.form().is_some());
        assert_eq!(board.banner(), Some("Title cannot exceed 100 characters"));
    }

    #[tokio::test]
    async fn invalid_form_stays_open_without_call() {
        let mut board = loaded(&[]).await;
        let calls = board.api().call_count();
        board.open_new_form();

        assert_eq!(board.submit_form().await, Some(SubmitOutcome::Invalid));
        assert!(board.form().is_some());
        assert_eq!(board.api().call_count(), calls);
    }

    #[tokio::test]
    async fn edit_form_requires_loaded_bug() {
        let mut board = loaded(&["Existing bug"]).await;
        let id = board.bugs()[0].id.clone();
        assert!(board.open_edit_form("ffffffffffffffffffffffff").is_none());
        let form = board.open_edit_form(&id).unwrap();
        assert_eq!(form.editing_id(), Some(id.as_str()));
    }

    #[tokio::test]
    async fn advance_walks_the_workflow() {
        let mut board = loaded(&["Flaky test"]).await;
        let id = board.bugs()[0].id.clone();

        assert!(board.advance(&id).await);
        assert_eq!(board.bugs()[0].status, BugStatus::InProgress);
        assert!(board.advance(&id).await);
        assert_eq!(board.bugs()[0].status, BugStatus::Resolved);
        assert!(!board.advance(&id).await);
        assert_eq!(board.banner(), Some("Bug is already resolved"));
    }

    #[tokio::test]
    async fn resolve_skips_in_progress() {
        let mut board = loaded(&["Flaky test"]).await;
        let id = board.bugs()[0].id.clone();
        assert!(board.resolve(&id).await);
        assert_eq!(board.bugs()[0].status, BugStatus::Resolved);
    }

    #[tokio::test]
    async fn resolve_twice_makes_no_second_update() {
        let mut board = loaded(&["Flaky test"]).await;
        let id = board.bugs()[0].id.clone();
        assert!(board.resolve(&id).await);
        let calls = board.api().call_count();

        assert!(!board.resolve(&id).await);
        assert_eq!(board.api().call_count(), calls);
        assert_eq!(board.banner(), Some("Bug is already resolved"));
    }

    #[tokio::test]
    async fn resolve_unknown_bug_sets_banner() {
        let mut board = loaded(&[]).await;
        assert!(!board.resolve("ffffffffffffffffffffffff").await);
        assert_eq!(board.banner(), Some("Bug not found"));
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let mut board = loaded(&["Doomed bug"]).await;
        let id = board.bugs()[0].id.clone();
        let calls = board.api().call_count();

        assert_eq!(board.delete(&id, || false).await, None);
        assert_eq!(board.api().call_count(), calls);
        assert_eq!(board.bugs().len(), 1);

        let response = board.delete(&id, || true).await.unwrap();
        assert_eq!(response.message, "Bug deleted successfully");
        assert!(board.bugs().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_sets_banner() {
        let mut board = loaded(&[]).await;
        assert_eq!(board.delete("ffffffffffffffffffffffff", || true).await, None);
        assert_eq!(board.banner(), Some("Bug not found"));
    }
}
