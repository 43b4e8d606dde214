//! In-process `BugApi` used by the client unit tests.

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;

    use bug_core::entities::{Bug, DEFAULT_REPORTER};
    use bug_core::input::BugInput;
    use bug_core::responses::{HealthResponse, MessageResponse};

    use crate::api::BugApi;
    use crate::error::ClientError;

    /// Stores bugs in memory. `fail_with` makes every call answer with that
    /// API error instead.
    #[derive(Default)]
    pub struct FakeApi {
        bugs: Mutex<Vec<Bug>>,
        next_id: AtomicUsize,
        pub calls: AtomicUsize,
        fail_with: Mutex<Option<(u16, String)>>,
    }

    impl FakeApi {
        pub fn with_bugs(titles: &[&str]) -> Self {
            let api = Self::default();
            for title in titles {
                api.insert(title);
            }
            api
        }

        pub fn insert(&self, title: &str) -> Bug {
            let now = Utc::now();
            let bug = Bug {
                id: format!("{:024x}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
                title: title.to_string(),
                description: "Seeded description".to_string(),
                status: bug_core::enums::BugStatus::Open,
                priority: bug_core::enums::BugPriority::Medium,
                reported_by: DEFAULT_REPORTER.to_string(),
                steps_to_reproduce: None,
                expected_behavior: None,
                actual_behavior: None,
                created_at: now,
                updated_at: now,
            };
            self.bugs.lock().unwrap().insert(0, bug.clone());
            bug
        }

        pub fn fail_with(&self, status: u16, message: &str) {
            *self.fail_with.lock().unwrap() = Some((status, message.to_string()));
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn stored(&self) -> Vec<Bug> {
            self.bugs.lock().unwrap().clone()
        }

        fn enter(&self) -> Result<(), ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_with.lock().unwrap().clone() {
                Some((status, message)) => Err(ClientError::Api { status, message }),
                None => Ok(()),
            }
        }

        fn not_found() -> ClientError {
            ClientError::Api {
                status: 404,
                message: "Bug not found".to_string(),
            }
        }

        fn apply(bug: &mut Bug, input: &BugInput) {
            if let Some(title) = input.title_text() {
                bug.title = title.to_string();
            }
            if let Some(description) = input.description_text() {
                bug.description = description.to_string();
            }
            if let Some(status) = input.status.as_deref().and_then(|s| s.parse().ok()) {
                bug.status = status;
            }
            if let Some(priority) = input.priority.as_deref().and_then(|p| p.parse().ok()) {
                bug.priority = priority;
            }
            bug.updated_at = Utc::now();
        }
    }

    impl BugApi for FakeApi {
        async fn list(&self) -> Result<Vec<Bug>, ClientError> {
            self.enter()?;
            Ok(self.stored())
        }

        async fn get(&self, id: &str) -> Result<Bug, ClientError> {
            self.enter()?;
            self.stored()
                .into_iter()
                .find(|b| b.id == id)
                .ok_or_else(Self::not_found)
        }

        async fn create(&self, input: &BugInput) -> Result<Bug, ClientError> {
            self.enter()?;
            let mut bug = self.insert(input.title_text().unwrap_or_default());
            Self::apply(&mut bug, input);
            let mut bugs = self.bugs.lock().unwrap();
            bugs[0] = bug.clone();
            Ok(bug)
        }

        async fn update(&self, id: &str, input: &BugInput) -> Result<Bug, ClientError> {
            self.enter()?;
            let mut bugs = self.bugs.lock().unwrap();
            let bug = bugs
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or_else(Self::not_found)?;
            Self::apply(bug, input);
            Ok(bug.clone())
        }

        async fn delete(&self, id: &str) -> Result<MessageResponse, ClientError> {
            self.enter()?;
            let mut bugs = self.bugs.lock().unwrap();
            let before = bugs.len();
            bugs.retain(|b| b.id != id);
            if bugs.len() == before {
                return Err(Self::not_found());
            }
            Ok(MessageResponse {
                message: "Bug deleted successfully".to_string(),
            })
        }

        async fn health(&self) -> Result<HealthResponse, ClientError> {
            self.enter()?;
            Ok(HealthResponse {
                status: "OK".to_string(),
                message: "Bug Tracker API is running".to_string(),
                timestamp: Utc::now().to_rfc3339(),
            })
        }
    }
}
