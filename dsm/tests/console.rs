mod common;

use std::sync::Arc;

use common::{managers, run_session, runtime_container, StubController, StubRuntime};
use dsm::{
    console::{MenuId, GOODBYE, INVALID_CHOICE, INVALID_CONTAINER_NUMBER, INVALID_INPUT},
    ManagerMode,
};

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[test]
fn test_invalid_choice_keeps_the_current_menu() {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController::default());
    let m = managers(ManagerMode::Simulated, &runtime, &controller);

    let (state, output) = run_session(m, "3\nz\n\n9\nq\n");

    assert_eq!(state.current, MenuId::Containers);
    assert_eq!(output.matches(INVALID_CHOICE).count(), 3);
    // Entered once, then re-rendered after each invalid choice.
    let rule = format!("\n{}\n", "=".repeat("Container Management".len()));
    assert_eq!(output.matches(rule.as_str()).count(), 4);
    assert!(output.contains(GOODBYE));
}

#[test]
fn test_garbled_input_is_recoverable() {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController::default());
    let m = managers(ManagerMode::Simulated, &runtime, &controller);

    let (state, output) = run_session(m, b"\xff\xfe\nq\n");

    assert!(!state.running);
    assert_eq!(state.current, MenuId::Main);
    assert_eq!(output.matches(INVALID_CHOICE).count(), 1);
    assert!(output.contains(GOODBYE));
}

#[test]
fn test_garbled_log_selection_is_invalid_input() {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController::default());
    let m = managers(ManagerMode::Simulated, &runtime, &controller);

    let (state, output) = run_session(m, b"3\n3\n\x80\nq\n");

    assert!(!state.running);
    assert_eq!(output.matches(INVALID_INPUT).count(), 1);
}

#[test]
fn test_out_of_range_log_selection_is_reported() {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController::default());
    let m = managers(ManagerMode::Simulated, &runtime, &controller);

    let (state, output) = run_session(m, "3\n3\n3\n3\n0\n3\nlast\n3\nb\nq\n");

    assert_eq!(state.current, MenuId::Containers);
    assert_eq!(output.matches(INVALID_CONTAINER_NUMBER).count(), 2);
    assert_eq!(output.matches(INVALID_INPUT).count(), 1);
    assert!(!output.contains("logs of"));
}

#[test]
fn test_live_log_selection_uses_the_listed_id_and_default_tail() {
    let runtime = Arc::new(StubRuntime {
        containers: vec![
            runtime_container("0123456789abcdef0123", "web", "running"),
            runtime_container("fedcba98765432100000", "worker", "exited"),
        ],
        ..Default::default()
    });
    let controller = Arc::new(StubController::active());
    let m = managers(ManagerMode::Live, &runtime, &controller);

    let (_, output) = run_session(m, "3\n3\n2\n\n3\n1\n7\nq\n");

    assert!(output.contains("1. web (running)"));
    assert!(output.contains("2. worker (exited)"));
    assert!(output.contains("log line from fedcba987654"));
    assert_eq!(
        *runtime.calls.borrow(),
        [
            "list_containers true",
            "container_logs fedcba987654 100",
            "list_containers true",
            "container_logs 0123456789ab 7",
        ]
    );
}

#[test]
fn test_live_failure_is_reported_and_the_session_continues() {
    let runtime = Arc::new(StubRuntime::failing(
        "Cannot connect to the Docker daemon at unix:///var/run/docker.sock",
    ));
    let controller = Arc::new(StubController::failing("Access denied"));
    let m = managers(ManagerMode::Live, &runtime, &controller);

    let (state, output) = run_session(m, "3\n1\nb\n1\n2\nb\n6\n2\nq\n");

    assert!(!state.running);
    assert!(output.contains("[FAILED] docker exited with"));
    assert!(output.contains("Cannot connect to the Docker daemon"));
    assert!(output.contains("Access denied"));
    assert!(output.contains("Overall status: UNHEALTHY"));
    assert!(output.contains(GOODBYE));
    assert_eq!(runtime.call_count(), 1);
    assert_eq!(
        *controller.calls.borrow(),
        [
            "start docker.service",
            "status docker.service",
            "status docker.socket",
        ]
    );
}

#[test]
fn test_declined_prune_makes_no_call() {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController::active());
    let m = managers(ManagerMode::Live, &runtime, &controller);

    let (_, output) = run_session(m, "4\n3\n\n3\nYES\nq\n");

    assert_eq!(output.matches("Prune cancelled").count(), 1);
    assert_eq!(*runtime.calls.borrow(), ["prune_images"]);
}
