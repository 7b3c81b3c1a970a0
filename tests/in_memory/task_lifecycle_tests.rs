//! In-memory integration tests for the task lifecycle.

use super::helpers::{TestManager, days_from_now, manager};
use rstest::rstest;
use taskhub::task::{
    domain::{TaskId, TaskStatus},
    services::{TaskInput, TaskManagerError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_create_update_complete_delete(manager: TestManager) -> eyre::Result<()> {
    let created = manager
        .create_task(TaskInput::new("Buy milk").with_due_date(days_from_now(1)))
        .await?;
    eyre::ensure!(created.status == TaskStatus::Open, "new task must be open");

    let due = days_from_now(2);
    let updated = manager
        .update_task(created.id, TaskInput::new("Buy oat milk").with_due_date(due))
        .await?;
    eyre::ensure!(updated.id == created.id, "update must keep the id");
    eyre::ensure!(updated.title == "Buy oat milk", "title was not replaced");
    eyre::ensure!(updated.due_date == Some(due), "due date was not replaced");

    let completed = manager.complete_task(created.id).await?;
    eyre::ensure!(completed.status == TaskStatus::Done, "task must be done");
    eyre::ensure!(completed.title == "Buy oat milk", "completion changed the title");

    manager.delete_task(created.id).await?;
    let lookup = manager.get_task(created.id).await;
    eyre::ensure!(
        matches!(lookup, Err(TaskManagerError::NotFound(_))),
        "deleted task must not be found, got {lookup:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_after_delete_is_not_found(manager: TestManager) -> eyre::Result<()> {
    let created = manager.create_task(TaskInput::new("Short-lived")).await?;
    manager.delete_task(created.id).await?;

    let result = manager
        .update_task(created.id, TaskInput::new("Revived"))
        .await;

    eyre::ensure!(
        matches!(result, Err(TaskManagerError::NotFound(_))),
        "update must not resurrect a deleted task, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn complete_after_delete_is_not_found(manager: TestManager) -> eyre::Result<()> {
    let created = manager.create_task(TaskInput::new("Short-lived")).await?;
    manager.delete_task(created.id).await?;

    let result = manager.complete_task(created.id).await;

    eyre::ensure!(
        matches!(result, Err(TaskManagerError::NotFound(_))),
        "completion must not resurrect a deleted task, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_id_is_not_found_for_every_operation(manager: TestManager) {
    let id = TaskId::new();

    assert!(matches!(
        manager.get_task(id).await,
        Err(TaskManagerError::NotFound(_))
    ));
    assert!(matches!(
        manager.update_task(id, TaskInput::new("x")).await,
        Err(TaskManagerError::NotFound(_))
    ));
    assert!(matches!(
        manager.complete_task(id).await,
        Err(TaskManagerError::NotFound(_))
    ));
    assert!(matches!(
        manager.delete_task(id).await,
        Err(TaskManagerError::NotFound(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_completions_leave_one_done_task(manager: TestManager) -> eyre::Result<()> {
    let id = manager.create_task(TaskInput::new("Race")).await?.id;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let worker = manager.clone();
            tokio::spawn(async move { worker.complete_task(id).await })
        })
        .collect();

    for handle in handles {
        match handle.await? {
            Ok(task) => eyre::ensure!(task.status == TaskStatus::Done, "task must be done"),
            Err(TaskManagerError::Conflict(_)) => {}
            Err(other) => eyre::bail!("unexpected completion error: {other}"),
        }
    }

    let stored = manager.get_task(id).await?;
    eyre::ensure!(stored.status == TaskStatus::Done, "stored task must be done");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creates_are_all_retained(manager: TestManager) -> eyre::Result<()> {
    let handles: Vec<_> = (0..16)
        .map(|n| {
            let worker = manager.clone();
            tokio::spawn(async move {
                worker
                    .create_task(TaskInput::new(format!("task {n}")))
                    .await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await??.id);
    }
    for id in &ids {
        manager.get_task(*id).await?;
    }

    ids.sort();
    ids.dedup();
    eyre::ensure!(ids.len() == 16, "ids must be distinct");
    Ok(())
}
