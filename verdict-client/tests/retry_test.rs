use std::sync::{Arc, Mutex};

use stub_service_impl::StubVerdictService;
use tonic::{Code, Status};
use verdict_client::{CallObserver, CallStats, Client, ClientOptions, Principal, Resource};
use verdict_proto::effect::v1::Effect;
use verdict_proto::response::v1::CheckResourcesResponse;
use verdict_proto::response::v1::check_resources_response::{ResultEntry, result_entry};
use verdict_proto::svc::v1::verdict_service_server::VerdictServiceServer;


fn entry(kind: &str, id: &str, actions: &[(&str, Effect)]) -> ResultEntry {
    ResultEntry {
        resource: Some(result_entry::Resource {
            kind: kind.to_string(),
            id: id.to_string(),
            ..Default::default()
        }),
        actions: actions
            .iter()
            .map(|(action, effect)| (action.to_string(), *effect as i32))
            .collect(),
        validation_errors: vec![],
        meta: None,
    }
}

fn check_response(results: Vec<ResultEntry>) -> CheckResourcesResponse {
    CheckResourcesResponse {
        request_id: String::new(),
        results,
    }
}

fn principal() -> Principal {
    Principal::new("alice", ["employee"])
}

fn client_for(stub: StubVerdictService) -> Client<VerdictServiceServer<StubVerdictService>> {
    Client::from_service(VerdictServiceServer::new(stub), ClientOptions::default())
}

#[tokio::test(start_paused = true)]
async fn unavailable_responses_are_retried() {
    let stub = StubVerdictService::answering_check(check_response(vec![entry(
        "expense",
        "XX125",
        &[("view", Effect::Allow)],
    )]))
    .failing_first([
        Status::unavailable("scaling up"),
        Status::unavailable("scaling up"),
    ]);
    let requests = stub.check_requests();
    let client = client_for(stub);

    let allowed = client
        .is_allowed(principal(), Resource::new("expense", "XX125"), "view")
        .await
        .unwrap();

    assert!(allowed);
    assert_eq!(requests.lock().unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn attempts_stop_at_the_retry_limit() {
    let stub = StubVerdictService::default().failing_first([
        Status::unavailable("down"),
        Status::unavailable("down"),
        Status::unavailable("down"),
    ]);
    let requests = stub.check_requests();
    let client = client_for(stub);

    let err = client
        .is_allowed(principal(), Resource::new("expense", "XX125"), "view")
        .await
        .unwrap_err();

    assert_eq!(err.status().map(Status::code), Some(Code::Unavailable));
    assert_eq!(requests.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn non_retriable_failures_are_not_retried() {
    let stub =
        StubVerdictService::default().failing_first([Status::permission_denied("not for you")]);
    let requests = stub.check_requests();
    let client = client_for(stub);

    let err = client
        .is_allowed(principal(), Resource::new("expense", "XX125"), "view")
        .await
        .unwrap_err();

    assert_eq!(err.status().map(Status::code), Some(Code::PermissionDenied));
    assert_eq!(requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn disabling_retries_makes_a_single_attempt() {
    let stub = StubVerdictService::default().failing_first([Status::unavailable("down")]);
    let requests = stub.check_requests();
    let client = Client::from_service(
        VerdictServiceServer::new(stub),
        ClientOptions::default().with_max_retries(0),
    );

    let err = client
        .is_allowed(principal(), Resource::new("expense", "XX125"), "view")
        .await
        .unwrap_err();

    assert_eq!(err.status().map(Status::code), Some(Code::Unavailable));
    assert_eq!(requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn the_call_observer_sees_every_call() {
    struct Recorder(Arc<Mutex<Vec<(&'static str, Code)>>>);

    impl CallObserver for Recorder {
        fn on_call(&self, stats: CallStats) {
            self.0.lock().unwrap().push((stats.method, stats.code));
        }
    }

    let calls = Arc::new(Mutex::new(Vec::new()));
    let stub = StubVerdictService::answering_check(check_response(vec![entry(
        "expense",
        "XX125",
        &[("view", Effect::Allow)],
    )]));
    let client = Client::from_service(
        VerdictServiceServer::new(stub),
        ClientOptions::default().with_call_observer(Recorder(Arc::clone(&calls))),
    );

    client
        .is_allowed(principal(), Resource::new("expense", "XX125"), "view")
        .await
        .unwrap();
    client.server_info().await.unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(
        calls.as_slice(),
        [("CheckResources", Code::Ok), ("ServerInfo", Code::Ok)]
    );
}
