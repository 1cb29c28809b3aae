mod common;

use common::wait_until;
use patient_resource::framework::mock::MockBackend;
use patient_resource::framework::{
    BusyPolicy, DataResource, FrameworkError, Outcome, ResourceError, ResourceOptions,
    UpdateStrategy, GENERIC_ERROR_MESSAGE, UNEXPECTED_ERROR_MESSAGE,
};
use patient_resource::model::{Patient, PatientChanges};
use tokio::sync::oneshot;

fn patients(mock: &MockBackend<Patient>) -> DataResource<Patient> {
    DataResource::create(mock.clone(), ResourceOptions::new("patients"))
}

fn roster() -> Vec<Patient> {
    vec![
        Patient::new("2", "Bea", 52, "stable"),
        Patient::new("1", "Ada", 40, "ok"),
        Patient::new("3", "Cal", 67, "recovering"),
    ]
}

/// A successful refresh mirrors the backend array exactly, in server order.
#[tokio::test]
async fn refresh_replaces_items_verbatim() {
    let mock = MockBackend::new();
    mock.expect_fetch().return_ok(roster());
    let resource = patients(&mock);

    assert_eq!(resource.refresh().await.unwrap(), Outcome::Applied);

    let state = resource.state();
    assert_eq!(state.items(), roster().as_slice());
    assert_eq!(state.error(), None);
    assert!(!state.is_busy());
    mock.verify();
}

/// A failed refresh keeps the previous items and records an error.
#[tokio::test]
async fn failed_refresh_keeps_previous_items() {
    let mock = MockBackend::new();
    mock.expect_fetch().return_ok(roster());
    mock.expect_fetch()
        .return_err(ResourceError::Transport("connection reset".into()));
    let resource = patients(&mock);

    resource.refresh().await.unwrap();
    assert_eq!(resource.refresh().await.unwrap(), Outcome::Failed);

    let state = resource.state();
    assert_eq!(state.items(), roster().as_slice());
    assert_eq!(state.error(), Some(GENERIC_ERROR_MESSAGE));
    assert!(!state.is_busy());
}

/// Server 500 on the very first refresh leaves the initial empty list in place.
#[tokio::test]
async fn server_error_on_first_refresh() {
    let mock = MockBackend::new();
    mock.expect_fetch().return_err(ResourceError::Api {
        status: 500,
        message: None,
    });
    let resource = patients(&mock);

    assert_eq!(resource.refresh().await.unwrap(), Outcome::Failed);

    let state = resource.state();
    assert!(state.items().is_empty());
    assert!(!state.error().unwrap().is_empty());
    assert!(!state.is_busy());
}

/// `busy` is observable for the whole span of the call and false once it settles.
#[tokio::test]
async fn busy_spans_the_in_flight_call() {
    let mock = MockBackend::new();
    let (release, gate) = oneshot::channel();
    mock.expect_fetch().after(gate).return_ok(roster());
    let resource = patients(&mock);
    assert!(!resource.state().is_busy());

    let client = resource.client();
    let call = tokio::spawn(async move { client.refresh().await });

    let mut observer = resource.subscribe();
    observer.wait_for(|s| s.is_busy()).await.unwrap();
    assert!(resource.state().items().is_empty(), "no data while in flight");

    release.send(()).unwrap();
    assert_eq!(call.await.unwrap().unwrap(), Outcome::Applied);

    let state = resource.state();
    assert!(!state.is_busy());
    assert_eq!(state.items().len(), 3);
}

/// Under drop-if-busy, calls made while busy are no-ops and reach no backend.
#[tokio::test]
async fn drop_if_busy_skips_calls_while_in_flight() {
    let mock = MockBackend::new();
    let (release, gate) = oneshot::channel();
    mock.expect_fetch().after(gate).return_ok(roster());
    let resource = patients(&mock);

    let client = resource.client();
    let first = tokio::spawn(async move { client.refresh().await });
    let mut observer = resource.subscribe();
    observer.wait_for(|s| s.is_busy()).await.unwrap();

    let before = resource.state();
    assert_eq!(resource.refresh().await.unwrap(), Outcome::Skipped);
    assert_eq!(
        resource
            .update("1".into(), PatientChanges::condition("critical"))
            .await
            .unwrap(),
        Outcome::Skipped
    );
    assert_eq!(resource.state(), before);

    release.send(()).unwrap();
    first.await.unwrap().unwrap();

    assert_eq!(mock.fetch_calls(), 1);
    assert_eq!(mock.update_calls(), 0);
    mock.verify();
}

/// Under always-issue, calls race and the last one to complete wins.
#[tokio::test]
async fn always_issue_applies_in_completion_order() {
    let mock = MockBackend::new();
    let (release_a, gate_a) = oneshot::channel();
    let (release_b, gate_b) = oneshot::channel();
    let first = vec![Patient::new("1", "Ada", 40, "first answer")];
    let second = vec![Patient::new("1", "Ada", 40, "second answer")];
    mock.expect_fetch().after(gate_a).return_ok(first.clone());
    mock.expect_fetch().after(gate_b).return_ok(second.clone());

    let resource = DataResource::create(
        mock.clone(),
        ResourceOptions::new("patients").with_busy_policy(BusyPolicy::AlwaysIssue),
    );
    let (c1, c2) = (resource.client(), resource.client());
    let one = tokio::spawn(async move { c1.refresh().await });
    let two = tokio::spawn(async move { c2.refresh().await });
    wait_until(|| mock.fetch_calls() == 2).await;

    release_b.send(()).unwrap();
    let mut observer = resource.subscribe();
    observer
        .wait_for(|s| s.items() == second.as_slice())
        .await
        .unwrap();
    assert!(resource.state().is_busy(), "one call still in flight");

    release_a.send(()).unwrap();
    assert_eq!(one.await.unwrap().unwrap(), Outcome::Applied);
    assert_eq!(two.await.unwrap().unwrap(), Outcome::Applied);

    let state = resource.state();
    assert!(!state.is_busy());
    assert_eq!(state.items(), first.as_slice());
}

/// Refresh, then update with the refetch strategy: the mirror shows the server's answer.
#[tokio::test]
async fn update_with_refetch_reflects_server_state() {
    let mock = MockBackend::new();
    mock.expect_fetch()
        .return_ok(vec![Patient::new("1", "A", 40, "ok")]);
    mock.expect_update("1".into()).return_ok();
    mock.expect_fetch()
        .return_ok(vec![Patient::new("1", "A", 40, "critical")]);
    let resource = patients(&mock);

    resource.refresh().await.unwrap();
    assert_eq!(resource.state().items()[0].condition, "ok");

    let outcome = resource
        .update("1".into(), PatientChanges::condition("critical"))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Applied);
    let state = resource.state();
    assert_eq!(state.items()[0].condition, "critical");
    assert_eq!(state.error(), None);
    assert!(!state.is_busy());
    assert_eq!(
        mock.submitted_updates(),
        vec![("1".to_string(), PatientChanges::condition("critical"))]
    );
    mock.verify();
}

/// Server-side defaulting shows up under refetch even though it was never submitted.
#[tokio::test]
async fn refetch_picks_up_server_derived_fields() {
    let mock = MockBackend::new();
    mock.expect_fetch()
        .return_ok(vec![Patient::new("1", "a lovelace", 40, "ok")]);
    mock.expect_update("1".into()).return_ok();
    mock.expect_fetch()
        .return_ok(vec![Patient::new("1", "A. Lovelace", 40, "ok")]);
    let resource = patients(&mock);
    resource.refresh().await.unwrap();

    let changes = PatientChanges {
        name: Some("a. lovelace".into()),
        ..PatientChanges::default()
    };
    resource.update("1".into(), changes).await.unwrap();

    assert_eq!(resource.state().items()[0].name, "A. Lovelace");
}

/// Optimistic updates merge locally without a second read.
#[tokio::test]
async fn optimistic_update_merges_without_refetch() {
    let mock = MockBackend::new();
    mock.expect_fetch().return_ok(roster());
    mock.expect_update("1".into()).return_ok();
    let resource = DataResource::create(
        mock.clone(),
        ResourceOptions::new("patients").with_update_strategy(UpdateStrategy::Optimistic),
    );
    resource.refresh().await.unwrap();

    let changes = PatientChanges {
        age: Some(41),
        ..PatientChanges::default()
    };
    assert_eq!(
        resource.update("1".into(), changes).await.unwrap(),
        Outcome::Applied
    );

    let state = resource.state();
    assert_eq!(state.find(&"1".to_string()).unwrap().age, 41);
    assert_eq!(state.items()[0], roster()[0], "other items untouched");
    assert_eq!(mock.fetch_calls(), 1);
    mock.verify();
}

/// An unknown id still submits the PUT; items end up equal to the backend's state.
#[tokio::test]
async fn update_of_unknown_id_is_submitted_and_harmless() {
    let mock = MockBackend::new();
    mock.expect_fetch().return_ok(roster());
    mock.expect_update("99".into()).return_ok();
    mock.expect_fetch().return_ok(roster());
    let resource = patients(&mock);
    resource.refresh().await.unwrap();

    let outcome = resource
        .update("99".into(), PatientChanges::condition("critical"))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(mock.update_calls(), 1);
    assert_eq!(resource.state().items(), roster().as_slice());
    mock.verify();
}

/// A rejected update leaves items as they were and surfaces the server's message.
#[tokio::test]
async fn rejected_update_is_not_applied() {
    let mock = MockBackend::new();
    mock.expect_fetch().return_ok(roster());
    mock.expect_update("1".into()).return_err(ResourceError::Api {
        status: 422,
        message: Some("Condition is not recognised".into()),
    });
    let resource = DataResource::create(
        mock.clone(),
        ResourceOptions::new("patients").with_update_strategy(UpdateStrategy::Optimistic),
    );
    resource.refresh().await.unwrap();

    let outcome = resource
        .update("1".into(), PatientChanges::condition("???"))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Failed);
    let state = resource.state();
    assert_eq!(state.items(), roster().as_slice());
    assert_eq!(state.error(), Some("Condition is not recognised"));
    assert!(!state.is_busy());
    assert_eq!(mock.fetch_calls(), 1, "no refetch after a failed update");
}

/// If the PUT succeeds but the refetch fails, the mirror is left as it was.
#[tokio::test]
async fn failed_refetch_after_update_keeps_items() {
    let mock = MockBackend::new();
    mock.expect_fetch().return_ok(roster());
    mock.expect_update("1".into()).return_ok();
    mock.expect_fetch()
        .return_err(ResourceError::Transport("timed out".into()));
    let resource = patients(&mock);
    resource.refresh().await.unwrap();

    let outcome = resource
        .update("1".into(), PatientChanges::condition("critical"))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(resource.state().items(), roster().as_slice());
    assert!(resource.state().error().is_some());
}

/// A backend that blows up still settles the call instead of leaving `busy` stuck.
#[tokio::test]
async fn panicking_backend_settles_with_unexpected_error() {
    // No expectation queued: the mock panics on the first call.
    let mock = MockBackend::<Patient>::new();
    let resource = patients(&mock);

    assert_eq!(resource.refresh().await.unwrap(), Outcome::Failed);

    let state = resource.state();
    assert_eq!(state.error(), Some(UNEXPECTED_ERROR_MESSAGE));
    assert!(!state.is_busy());
}

/// Instances share nothing.
#[tokio::test]
async fn resources_are_independent() {
    let mock_a = MockBackend::new();
    let mock_b = MockBackend::new();
    mock_a.expect_fetch().return_ok(roster());
    mock_b.expect_fetch().return_err(ResourceError::Api {
        status: 500,
        message: None,
    });
    let a = patients(&mock_a);
    let b = patients(&mock_b);

    a.refresh().await.unwrap();
    b.refresh().await.unwrap();

    assert_eq!(a.state().items().len(), 3);
    assert_eq!(a.state().error(), None);
    assert!(b.state().items().is_empty());
    assert!(b.state().error().is_some());
}

/// After dispose, every remaining handle reports the resource as closed.
#[tokio::test]
async fn disposed_resource_rejects_calls() {
    let mock = MockBackend::<Patient>::new();
    let resource = patients(&mock);
    let client = resource.client();

    resource.dispose().await.unwrap();

    assert_eq!(client.refresh().await, Err(FrameworkError::ActorClosed));
    assert_eq!(mock.fetch_calls(), 0);
}
