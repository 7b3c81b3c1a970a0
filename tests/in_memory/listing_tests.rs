//! In-memory integration tests for paged, ordered listing.

use super::helpers::{TestManager, create_titled, days_from_now, manager, page_request};
use rstest::rstest;
use taskhub::task::services::TaskInput;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_store_lists_nothing(manager: TestManager) -> eyre::Result<()> {
    let page = manager.get_tasks(page_request(0, 20, "")?).await?;

    eyre::ensure!(page.items().is_empty(), "no tasks expected");
    eyre::ensure!(page.total() == 0, "total must be zero");
    eyre::ensure!(page.total_pages() == 0, "no pages expected");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn default_order_is_due_date_ascending(manager: TestManager) -> eyre::Result<()> {
    let fixtures = [
        ("third", Some(9)),
        ("none", None),
        ("first", Some(1)),
        ("second", Some(4)),
    ];
    for (title, days) in fixtures {
        let input = TaskInput::new(title).with_optional_due_date(days.map(days_from_now));
        manager.create_task(input).await?;
    }

    let page = manager.get_tasks(page_request(0, 20, "")?).await?;
    let titles: Vec<_> = page.items().iter().map(|t| t.title.as_str()).collect();

    eyre::ensure!(
        titles == ["first", "second", "third", "none"],
        "unexpected order: {titles:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn descending_due_date_still_lists_undated_last(manager: TestManager) -> eyre::Result<()> {
    for (title, days) in [("none", None), ("early", Some(1)), ("late", Some(6))] {
        let input = TaskInput::new(title).with_optional_due_date(days.map(days_from_now));
        manager.create_task(input).await?;
    }

    let page = manager.get_tasks(page_request(0, 20, "dueDate,desc")?).await?;
    let titles: Vec<_> = page.items().iter().map(|t| t.title.as_str()).collect();

    eyre::ensure!(
        titles == ["late", "early", "none"],
        "unexpected order: {titles:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_tasks_remain_listed(manager: TestManager) -> eyre::Result<()> {
    let created = create_titled(&manager, &["open", "closed"]).await?;
    if let Some(closed) = created.get(1) {
        manager.complete_task(closed.id).await?;
    }

    let page = manager.get_tasks(page_request(0, 20, "status")?).await?;
    let statuses: Vec<_> = page.items().iter().map(|t| t.status.as_str()).collect();

    eyre::ensure!(statuses == ["OPEN", "DONE"], "unexpected statuses: {statuses:?}");
    Ok(())
}

#[rstest]
#[case(0, 3)]
#[case(1, 3)]
#[case(2, 1)]
#[case(3, 0)]
#[tokio::test(flavor = "multi_thread")]
async fn pages_have_expected_lengths(
    manager: TestManager,
    #[case] page_index: u32,
    #[case] expected_len: usize,
) -> eyre::Result<()> {
    create_titled(&manager, &["a", "b", "c", "d", "e", "f", "g"]).await?;

    let page = manager
        .get_tasks(page_request(page_index, 3, "title")?)
        .await?;

    eyre::ensure!(page.items().len() == expected_len, "unexpected page length");
    eyre::ensure!(page.total() == 7, "total must count every task");
    eyre::ensure!(page.total_pages() == 3, "seven tasks make three pages of three");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_tasks_leave_the_listing(manager: TestManager) -> eyre::Result<()> {
    let created = create_titled(&manager, &["keep", "drop"]).await?;
    if let Some(dropped) = created.get(1) {
        manager.delete_task(dropped.id).await?;
    }

    let page = manager.get_tasks(page_request(0, 20, "title")?).await?;
    let titles: Vec<_> = page.items().iter().map(|t| t.title.as_str()).collect();

    eyre::ensure!(titles == ["keep"], "unexpected titles: {titles:?}");
    eyre::ensure!(page.total() == 1, "total must shrink after delete");
    Ok(())
}
