//! Client against a live server on an ephemeral port with an in-memory store.

use pretty_assertions::assert_eq;
use tokio::net::TcpListener;

use bug_cli::{BugApi, BugBoard, BugClient, SubmitOutcome};
use bug_core::enums::BugStatus;
use bug_core::errors::Field;
use bug_core::input::BugInput;
use bug_db::service::BugService;
use bug_server::AppState;

async fn spawn_server() -> BugClient {
    let service = BugService::new_local(":memory:").await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(bug_server::serve(
        listener,
        AppState::new(service),
        std::future::pending(),
    ));
    BugClient::new(&format!("http://{address}")).unwrap()
}

fn login_input() -> BugInput {
    BugInput {
        title: Some(Some("Login bug".to_string())),
        description: Some(Some("Cannot login with correct credentials".to_string())),
        ..BugInput::default()
    }
}

#[tokio::test]
async fn health_is_ok() {
    let client = spawn_server().await;
    let health = client.health().await.unwrap();
    assert_eq!(health.status, "OK");
    assert_eq!(health.message, "Bug Tracker API is running");
}

#[tokio::test]
async fn crud_through_the_client() {
    let client = spawn_server().await;
    assert!(client.list().await.unwrap().is_empty());

    let created = client.create(&login_input()).await.unwrap();
    assert_eq!(created.status, BugStatus::Open);
    assert_eq!(created.reported_by, "Anonymous");

    let fetched = client.get(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let update = BugInput {
        status: Some("resolved".to_string()),
        ..BugInput::default()
    };
    let updated = client.update(&created.id, &update).await.unwrap();
    assert_eq!(updated.status, BugStatus::Resolved);
    assert_eq!(updated.title, created.title);
    assert!(updated.updated_at > created.updated_at);

    let deleted = client.delete(&created.id).await.unwrap();
    assert_eq!(deleted.message, "Bug deleted successfully");

    let err = client.get(&created.id).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Bug not found");
}

#[tokio::test]
async fn server_validation_message_reaches_the_client() {
    let client = spawn_server().await;
    let input = BugInput {
        title: Some(Some("ab".to_string())),
        ..login_input()
    };
    let err = client.create(&input).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Title must be at least 3 characters long");
}

#[tokio::test]
async fn board_workflow() {
    let client = spawn_server().await;
    let mut board = BugBoard::new(client);
    board.reload().await;
    assert!(board.bugs().is_empty());

    let form = board.open_new_form();
    form.set_field(Field::Title, "Login bug");
    form.set_field(Field::Description, "Cannot login with correct credentials");
    form.set_field(Field::StepsToReproduce, "Enter valid credentials and submit");
    let Some(SubmitOutcome::Created(bug)) = board.submit_form().await else {
        panic!("expected a created bug");
    };
    assert_eq!(
        bug.steps_to_reproduce.as_deref(),
        Some("Enter valid credentials and submit")
    );
    assert_eq!(board.bugs().len(), 1);

    assert!(board.advance(&bug.id).await);
    assert_eq!(board.bugs()[0].status, BugStatus::InProgress);

    let form = board.open_edit_form(&bug.id).unwrap();
    form.set_field(Field::StepsToReproduce, "");
    let Some(SubmitOutcome::Updated(edited)) = board.submit_form().await else {
        panic!("expected an updated bug");
    };
    assert_eq!(edited.steps_to_reproduce, None);
    assert_eq!(edited.status, BugStatus::InProgress);

    assert!(board.resolve(&bug.id).await);
    assert!(!board.advance(&bug.id).await);
    assert_eq!(board.banner(), Some("Bug is already resolved"));

    assert!(board.delete(&bug.id, || true).await.is_some());
    assert!(board.bugs().is_empty());
}

#[tokio::test]
async fn unreachable_server_sets_banner() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let mut board = BugBoard::new(BugClient::new(&format!("http://{address}")).unwrap());
    board.reload().await;
    assert!(board.bugs().is_empty());
    assert!(board.banner().unwrap().starts_with("Request failed"));
}
