//! `PostgreSQL` repository implementation for task record storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        Page, PageRequest, PersistedTaskData, SortDirection, TaskId, TaskRecord, TaskSort,
        TaskSortKey, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent schema bundled with the crate.
const CREATE_TASKS_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_tasks/up.sql");

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

    /// Creates the `tasks` table and its indexes when they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when a connection cannot
    /// be obtained or the DDL fails.
    pub async fn ensure_schema(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_TASKS_SQL)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
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

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn save(&self, task: &TaskRecord) -> TaskRepositoryResult<()> {
        let row = to_new_row(task)?;
        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .on_conflict(tasks::id)
                .do_update()
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &TaskRecord) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = to_new_row(task)?;
        let expected = task.revision().saturating_sub(1);
        let expected_db = to_db_revision(expected)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(task_id.into_inner()))
                    .filter(tasks::revision.eq(expected_db)),
            )
            .set(&row)
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if affected > 0 {
                return Ok(());
            }

            // The guarded write matched nothing: tell a vanished row apart
            // from one another writer has already advanced.
            let exists = diesel::select(diesel::dsl::exists(
                tasks::table.filter(tasks::id.eq(task_id.into_inner())),
            ))
            .get_result::<bool>(connection)
            .map_err(TaskRepositoryError::persistence)?;

            if exists {
                Err(TaskRepositoryError::Conflict {
                    id: task_id,
                    expected,
                })
            } else {
                Err(TaskRepositoryError::NotFound(task_id))
            }
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<TaskRecord> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task)
                .transpose()?
                .ok_or(TaskRepositoryError::NotFound(id))
        })
        .await
    }

    async fn find_all(&self, request: PageRequest) -> TaskRepositoryResult<Page<TaskRecord>> {
        // Offsets beyond i64 are necessarily past the last row.
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
        let limit = i64::from(request.size());

        self.run_blocking(move |connection| {
            connection.transaction(|tx| {
                let total = tasks::table
                    .count()
                    .get_result::<i64>(tx)
                    .map_err(TaskRepositoryError::persistence)?;
                let rows = ordered_query(request.sort())
                    .offset(offset)
                    .limit(limit)
                    .load::<TaskRow>(tx)
                    .map_err(TaskRepositoryError::persistence)?;

                let items = rows
                    .into_iter()
                    .map(row_to_task)
                    .collect::<TaskRepositoryResult<Vec<_>>>()?;
                let total_count =
                    u64::try_from(total).map_err(TaskRepositoryError::invalid_persisted_data)?;
                Ok(Page::new(items, total_count, request))
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

impl From<diesel::result::Error> for TaskRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}

/// Builds the listing query for a sort, with the identifier as tie-breaker.
fn ordered_query(sort: TaskSort) -> tasks::BoxedQuery<'static, Pg> {
    let query = tasks::table.into_boxed();
    let ordered = match (sort.key(), sort.direction()) {
        (TaskSortKey::DueDate, SortDirection::Ascending) => {
            query.order_by(tasks::due_date.asc().nulls_last())
        }
        (TaskSortKey::DueDate, SortDirection::Descending) => {
            query.order_by(tasks::due_date.desc().nulls_last())
        }
        (TaskSortKey::Title, SortDirection::Ascending) => query.order_by(tasks::title.asc()),
        (TaskSortKey::Title, SortDirection::Descending) => query.order_by(tasks::title.desc()),
        // Lexical order of the stored tokens matches OPEN before DONE only
        // when reversed.
        (TaskSortKey::Status, SortDirection::Ascending) => query.order_by(tasks::status.desc()),
        (TaskSortKey::Status, SortDirection::Descending) => query.order_by(tasks::status.asc()),
        (TaskSortKey::CreatedAt, SortDirection::Ascending) => {
            query.order_by(tasks::created_at.asc())
        }
        (TaskSortKey::CreatedAt, SortDirection::Descending) => {
            query.order_by(tasks::created_at.desc())
        }
    };
    ordered.then_order_by(tasks::id.asc())
}

fn to_db_revision(revision: u64) -> TaskRepositoryResult<i64> {
    i64::try_from(revision).map_err(TaskRepositoryError::persistence)
}

fn to_new_row(task: &TaskRecord) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        due_date: task.due_date(),
        status: task.status().as_str().to_owned(),
        revision: to_db_revision(task.revision())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<TaskRecord> {
    let TaskRow {
        id,
        title: persisted_title,
        due_date,
        status: persisted_status,
        revision: persisted_revision,
        created_at,
        updated_at,
    } = row;

    let title =
        TaskTitle::new(persisted_title).map_err(TaskRepositoryError::invalid_persisted_data)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::invalid_persisted_data)?;
    let revision =
        u64::try_from(persisted_revision).map_err(TaskRepositoryError::invalid_persisted_data)?;

    Ok(TaskRecord::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        due_date,
        status,
        revision,
        created_at,
        updated_at,
    }))
}
