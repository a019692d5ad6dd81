//! Plain-text review report for administrators.

use super::lifecycle::{TaskService, TaskServiceResult};
use crate::task::{
    domain::{TaskHistoryEntry, TaskId},
    ports::{ImageStorage, TaskRepository},
};
use minijinja::Environment;
use mockable::Clock;
use serde_json::{Value, json};

const REVIEW_TEMPLATE: &str = "\
Task: {{ task.name }}
Owner: {{ task.owner_name }}
Date: {{ task.task_date }}
Status: {{ task.status }} ({{ task.submission_status }})
Amount received: {{ task.amount_received }}
Remaining amount: {{ task.remaining_amount }}
Total amount: {{ task.total_amount }}
{% if task.comments %}Comments: {{ task.comments }}
{% endif %}{% if task.location %}Location: {{ task.location.lat }}, {{ task.location.lng }}
{% endif %}Images: {{ images | length }}
{% for url in images %}  {{ url }}
{% endfor %}History:
{% for entry in history %}  {{ entry.created_at }} {{ entry.field }}: \"{{ entry.old_value }}\" -> \"{{ entry.new_value }}\" ({{ entry.change_reason }})
{% else %}  no changes recorded
{% endfor %}";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

impl<R, S, C> TaskService<R, S, C>
where
    R: TaskRepository,
    S: ImageStorage,
    C: Clock + Send + Sync,
{
    /// Renders a task, its images, and its history (newest first) as text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`](super::TaskServiceError::NotFound)
    /// when the task does not exist, or a repository or template error.
    pub async fn render_review(&self, task_id: TaskId) -> TaskServiceResult<String> {
        let task = self.load(task_id).await?;
        let images = self.repository.images_for(task_id).await?;
        let history = self.repository.history_for(task_id).await?;

        let context = json!({
            "task": {
                "name": task.name(),
                "owner_name": task.owner_name(),
                "task_date": task.task_date().to_string(),
                "status": task.status().as_str(),
                "submission_status": task.submission_status().as_str(),
                "comments": task.comments(),
                "amount_received": task.amount_received().to_string(),
                "remaining_amount": task.remaining_amount().to_string(),
                "total_amount": task.total_amount().to_string(),
                "location": task.location(),
            },
            "images": images.iter().map(|image| image.image_url()).collect::<Vec<_>>(),
            "history": history.iter().map(history_context).collect::<Vec<_>>(),
        });

        let environment = Environment::new();
        Ok(environment.render_str(REVIEW_TEMPLATE, context)?)
    }
}

fn history_context(entry: &TaskHistoryEntry) -> Value {
    json!({
        "created_at": entry.created_at().format(TIMESTAMP_FORMAT).to_string(),
        "field": entry.field().as_str(),
        "old_value": entry.old_value(),
        "new_value": entry.new_value(),
        "change_reason": entry.change_reason(),
    })
}
