//! `PostgreSQL` repository implementation for tasks, images, and history.

use super::{
    models::{
        NewTaskHistoryRow, NewTaskImageRow, NewTaskRow, TaskHistoryRow, TaskImageRow, TaskRow,
    },
    schema::{task_history, task_images, tasks},
};
use crate::auth::domain::UserId;
use crate::task::{
    domain::{
        Amount, GeoLocation, HistoryEntryId, PersistedHistoryData, PersistedTaskData,
        SubmissionStatus, Task, TaskDetails, TaskHistoryEntry, TaskId, TaskImage, TaskImageId,
        TaskStatus, TrackedField,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let new_row = to_task_row(task)?;
        let task_id = task.id();
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let changeset = to_task_row(task)?;
        let task_id = task.id();
        self.run_blocking(move |connection| update_task_row(connection, task_id, &changeset))
            .await
    }

    async fn apply_edit(
        &self,
        task: &Task,
        history: &[TaskHistoryEntry],
    ) -> TaskRepositoryResult<()> {
        let changeset = to_task_row(task)?;
        let history_rows: Vec<NewTaskHistoryRow> = history.iter().map(to_history_row).collect();
        let task_id = task.id();
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let present = diesel::select(diesel::dsl::exists(
                    tasks::table.find(task_id.into_inner()),
                ))
                .get_result::<bool>(tx)?;
                if !present {
                    return Err(TaskRepositoryError::NotFound(task_id));
                }
                if !history_rows.is_empty() {
                    diesel::insert_into(task_history::table)
                        .values(&history_rows)
                        .execute(tx)?;
                }
                update_task_row(tx, task_id, &changeset)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_recent(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn history_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_history::table
                .filter(task_history::task_id.eq(task_id.into_inner()))
                .order((task_history::created_at.desc(), task_history::seq.asc()))
                .select(TaskHistoryRow::as_select())
                .load::<TaskHistoryRow>(connection)?;
            rows.into_iter().map(row_to_history).collect()
        })
        .await
    }

    async fn add_image(&self, image: &TaskImage) -> TaskRepositoryResult<()> {
        let new_row = NewTaskImageRow {
            id: image.id().into_inner(),
            task_id: image.task_id().into_inner(),
            image_url: image.image_url().to_owned(),
            created_at: image.created_at(),
        };
        let task_id = image.task_id();
        self.run_blocking(move |connection| {
            diesel::insert_into(task_images::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::NotFound(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn images_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskImage>> {
        self.run_blocking(move |connection| {
            let rows = task_images::table
                .filter(task_images::task_id.eq(task_id.into_inner()))
                .order(task_images::seq.asc())
                .select(TaskImageRow::as_select())
                .load::<TaskImageRow>(connection)?;
            Ok(rows
                .into_iter()
                .map(|row| {
                    TaskImage::from_persisted(
                        TaskImageId::from_uuid(row.id),
                        TaskId::from_uuid(row.task_id),
                        row.image_url,
                        row.created_at,
                    )
                })
                .collect())
        })
        .await
    }
}

fn update_task_row(
    connection: &mut PgConnection,
    task_id: TaskId,
    changeset: &NewTaskRow,
) -> TaskRepositoryResult<()> {
    let updated = diesel::update(tasks::table.find(task_id.into_inner()))
        .set(changeset)
        .execute(connection)?;
    if updated == 0 {
        return Err(TaskRepositoryError::NotFound(task_id));
    }
    Ok(())
}

fn to_task_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let location = task
        .location()
        .map(serde_json::to_value)
        .transpose()
        .map_err(TaskRepositoryError::persistence)?;
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        name: task.name().to_owned(),
        owner_name: task.owner_name().to_owned(),
        task_date: task.task_date(),
        status: task.status().as_str().to_owned(),
        comments: task.comments().map(str::to_owned),
        location,
        amount_received: to_column(task.amount_received())?,
        remaining_amount: to_column(task.remaining_amount())?,
        total_amount: to_column(task.total_amount())?,
        submission_status: task.submission_status().as_str().to_owned(),
        created_by: task.created_by().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_column(amount: Amount) -> TaskRepositoryResult<i64> {
    i64::try_from(amount.minor_units()).map_err(TaskRepositoryError::persistence)
}

fn from_column(value: i64) -> TaskRepositoryResult<Amount> {
    u64::try_from(value)
        .map(Amount::from_minor_units)
        .map_err(TaskRepositoryError::persistence)
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status = TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let submission_status = SubmissionStatus::try_from(row.submission_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let location = row
        .location
        .map(|value| {
            let parsed: GeoLocation =
                serde_json::from_value(value).map_err(TaskRepositoryError::persistence)?;
            GeoLocation::new(parsed.latitude(), parsed.longitude())
                .map_err(TaskRepositoryError::persistence)
        })
        .transpose()?;
    let details = TaskDetails {
        name: row.name,
        owner_name: row.owner_name,
        task_date: row.task_date,
        status,
        comments: row.comments.filter(|text| !text.trim().is_empty()),
        amount_received: from_column(row.amount_received)?,
        remaining_amount: from_column(row.remaining_amount)?,
        location,
    };
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        details,
        total_amount: from_column(row.total_amount)?,
        submission_status,
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn to_history_row(entry: &TaskHistoryEntry) -> NewTaskHistoryRow {
    NewTaskHistoryRow {
        id: entry.id().into_inner(),
        task_id: entry.task_id().into_inner(),
        field_name: entry.field().as_str().to_owned(),
        old_value: Some(entry.old_value().to_owned()),
        new_value: Some(entry.new_value().to_owned()),
        changed_by: entry.changed_by().into_inner(),
        change_reason: Some(entry.change_reason().to_owned()),
        created_at: entry.created_at(),
    }
}

fn row_to_history(row: TaskHistoryRow) -> TaskRepositoryResult<TaskHistoryEntry> {
    let field =
        TrackedField::try_from(row.field_name.as_str()).map_err(TaskRepositoryError::persistence)?;
    Ok(TaskHistoryEntry::from_persisted(PersistedHistoryData {
        id: HistoryEntryId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        field,
        old_value: row.old_value.unwrap_or_default(),
        new_value: row.new_value.unwrap_or_default(),
        changed_by: UserId::from_uuid(row.changed_by),
        change_reason: row.change_reason.unwrap_or_default(),
        created_at: row.created_at,
    }))
}
