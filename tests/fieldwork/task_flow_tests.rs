//! Task flows from sign-in to administrator review.

use std::sync::Arc;

use crate::test_helpers::{FrozenClock, ScratchDir, seed_account};
use chrono::Duration;
use fieldwatch::auth::{
    adapters::{
        hashing::Argon2PasswordVerifier,
        memory::{InMemorySessionStore, InMemoryUserRepository},
    },
    domain::Session,
    services::AuthService,
};
use fieldwatch::task::{
    adapters::{filesystem::FileImageStorage, memory::InMemoryTaskRepository},
    domain::{ImageUpload, SubmissionStatus, TaskStatus, TaskSubmission},
    services::TaskService,
};
use rstest::{fixture, rstest};

type FlowService = TaskService<InMemoryTaskRepository, FileImageStorage, FrozenClock>;

struct Flow {
    tasks: FlowService,
    clock: Arc<FrozenClock>,
    employee: Session,
    storage_root: ScratchDir,
}

#[fixture]
async fn flow() -> Flow {
    let users = Arc::new(InMemoryUserRepository::new());
    seed_account(&users, "+91 99999 99999", "dome-camera").await;
    let clock = Arc::new(FrozenClock::new());
    let auth = AuthService::new(
        users,
        Arc::new(Argon2PasswordVerifier::new()),
        Arc::new(InMemorySessionStore::new()),
        Arc::clone(&clock),
        Duration::hours(12),
    );
    let employee = auth
        .sign_in("+919999999999", "dome-camera")
        .await
        .expect("employee sign-in");

    let storage_root = ScratchDir::new("objects");
    let storage = FileImageStorage::open(
        storage_root.path(),
        "task-images",
        "https://fieldwatch.example.com",
    )
    .expect("open image storage");
    let tasks = TaskService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(storage),
        Arc::clone(&clock),
    );
    Flow {
        tasks,
        clock,
        employee,
        storage_root,
    }
}

fn photo(name: &str, bytes: &[u8]) -> ImageUpload {
    ImageUpload::new(name, bytes.to_vec()).expect("non-empty photo")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn employee_creates_edits_and_submits_a_task(
    #[future] flow: Flow,
) -> Result<(), eyre::Report> {
    let flow = flow.await;
    let form = TaskSubmission::new("Bank ATM cameras", "Canara Branch", "2025-03-14")
        .with_amounts("4500", "1500.75")
        .with_location(12.9716, 77.5946);

    let created = flow
        .tasks
        .create_task(&flow.employee, &form, vec![photo("atm.JPG", b"atm")])
        .await?;
    eyre::ensure!(created.total_amount().to_string() == "6000.75");

    flow.clock.advance(Duration::hours(3));
    let edited = flow
        .tasks
        .edit_task(
            &flow.employee,
            created.id(),
            &TaskSubmission::from_details(created.details())
                .with_status("completed")
                .with_amounts("6000.75", "0"),
            "Customer paid the balance",
            vec![photo("dvr.png", b"dvr")],
        )
        .await?;
    let changed: Vec<&str> = edited
        .history
        .iter()
        .map(|entry| entry.field().as_str())
        .collect();
    eyre::ensure!(
        changed == ["status", "amount_received", "remaining_amount"],
        "unexpected history fields: {changed:?}"
    );
    eyre::ensure!(edited.task.status() == TaskStatus::Completed);
    eyre::ensure!(edited.task.total_amount().to_string() == "6000.75");

    let submitted = flow.tasks.submit_task(&flow.employee, created.id()).await?;
    eyre::ensure!(submitted.submission_status() == SubmissionStatus::Submitted);

    let detail = flow.tasks.task_detail(created.id()).await?;
    eyre::ensure!(detail.images.len() == 2, "both photos should be linked");
    for image in &detail.images {
        let prefix = "https://fieldwatch.example.com/storage/v1/object/public/task-images/";
        let relative = image
            .image_url()
            .strip_prefix(prefix)
            .ok_or_else(|| eyre::eyre!("unexpected url {}", image.image_url()))?;
        let on_disk = flow.storage_root.path().join("task-images").join(relative);
        eyre::ensure!(on_disk.is_file(), "missing object {on_disk}");
    }

    let review = flow.tasks.render_review(created.id()).await?;
    eyre::ensure!(review.contains("Status: completed (submitted)"), "{review}");
    eyre::ensure!(
        review.contains("(Customer paid the balance)"),
        "review should carry the change reason:\n{review}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resubmitting_the_same_values_records_no_history(
    #[future] flow: Flow,
) -> Result<(), eyre::Report> {
    let flow = flow.await;
    let form = TaskSubmission::new("Gate", "Owner", "2025-03-14").with_comments("   ");
    let created = flow
        .tasks
        .create_task(&flow.employee, &form, Vec::new())
        .await?;

    let outcome = flow
        .tasks
        .edit_task(
            &flow.employee,
            created.id(),
            &form.clone().with_comments(""),
            "no-op save",
            Vec::new(),
        )
        .await?;

    eyre::ensure!(outcome.history.is_empty(), "blank comments are absent");
    eyre::ensure!(flow.tasks.task_history(created.id()).await?.is_empty());
    Ok(())
}
