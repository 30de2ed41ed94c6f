use crate::api::{ApiClient, Task};

/// In-memory mirror of the server's task collection plus the creation-form
/// state. The task order is whatever the server returned; newly created
/// tasks are prepended, matching the listing's newest-first order.
pub struct App {
    api: ApiClient,
    pub tasks: Vec<Task>,
    pub title: String,
    pub description: String,
    pub loading: bool,
    pub error: Option<String>,
}

impl App {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            title: String::new(),
            description: String::new(),
            loading: false,
            error: None,
        }
    }

    /// Replaces the local collection from the server.
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.api.list_tasks().await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.error = None;
            }
            Err(err) => {
                tracing::error!("Failed to load tasks: {err}");
                self.error =
                    Some("Failed to load tasks. Make sure the server is running".to_string());
            }
        }
        self.loading = false;
    }

    /// Submits the creation form. A blank title is rejected locally without
    /// a network call.
    pub async fn submit(&mut self) {
        if self.title.trim().is_empty() {
            self.error = Some("Title is required".to_string());
            return;
        }

        match self.api.create_task(&self.title, &self.description).await {
            Ok(task) => {
                self.tasks.insert(0, task);
                self.title.clear();
                self.description.clear();
                self.error = None;
            }
            Err(err) => {
                tracing::error!("Failed to add task: {err}");
                self.error = Some("Failed to add task".to_string());
            }
        }
    }

    /// Sends a full-record update with `completed` inverted and replaces the
    /// matching task from the response.
    pub async fn toggle(&mut self, id: i64) {
        let Some(task) = self.tasks.iter().find(|task| task.id == id) else {
            return;
        };

        let mut payload = task.clone();
        payload.completed = !payload.completed;

        match self.api.update_task(&payload).await {
            Ok(updated) => {
                if let Some(slot) = self.tasks.iter_mut().find(|task| task.id == id) {
                    *slot = updated;
                }
            }
            Err(err) => {
                tracing::error!("Failed to update task {id}: {err}");
                self.error = Some("Failed to update task".to_string());
            }
        }
    }

    /// Deletes on the server first; local state only changes once the
    /// server has confirmed.
    pub async fn remove(&mut self, id: i64) {
        match self.api.delete_task(id).await {
            Ok(()) => {
                self.tasks.retain(|task| task.id != id);
            }
            Err(err) => {
                tracing::error!("Failed to delete task {id}: {err}");
                self.error = Some("Failed to delete task".to_string());
            }
        }
    }
}
