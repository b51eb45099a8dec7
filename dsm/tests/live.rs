mod common;

use std::sync::Arc;

use common::{managers, runtime_container, StubController, StubRuntime};
use dsm::{health::ReportKind, runtime::RuntimeImage, Detail, ManagerMode, OperationResult};

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[test_log::test]
fn test_every_live_failure_becomes_a_failed_result() {
    let runtime = Arc::new(StubRuntime::failing("permission denied while trying to connect"));
    let controller = Arc::new(StubController::failing("Unit docker.service not found."));
    let m = managers(ManagerMode::Live, &runtime, &controller);

    let results: Vec<OperationResult> = vec![
        m.service.status(),
        m.service.start(),
        m.socket.disable(),
        m.containers.list(false),
        m.containers.remove("abc123", true),
        m.containers.prune(),
        m.containers.logs("abc123", 10),
        m.containers.usage(),
        m.images.list(),
        m.images.remove("nginx:latest", false),
        m.images.prune(),
        m.system.engine_info(),
    ];

    for result in &results {
        assert!(!result.succeeded(), "{result:?}");
        assert!(!result.message().trim().is_empty());
    }
    assert!(results[0].message().contains("Unit docker.service not found."));
    assert!(results[3].message().contains("permission denied"));
    assert_eq!(runtime.call_count(), 9);
    assert_eq!(controller.call_count(), 3);
}

#[test]
fn test_live_listings_are_formatted() {
    let runtime = Arc::new(StubRuntime {
        containers: vec![
            runtime_container("0123456789abcdef0123", "web", "running"),
            runtime_container("fedcba98765432100000", "worker", "exited"),
        ],
        images: vec![
            RuntimeImage {
                id: "sha256:a1b2c3d4e5f6a7b8c9d0".to_string(),
                repo_tags: vec!["localhost:5000/app:1.2".to_string()],
                size: 139_460_608,
                created: "2024-01-15T10:30:00Z".to_string(),
            },
            RuntimeImage {
                id: "sha256:ffffffffffffffffffff".to_string(),
                repo_tags: Vec::new(),
                size: 1_363_149,
                created: "not a timestamp".to_string(),
            },
        ],
        ..Default::default()
    });
    let controller = Arc::new(StubController::active());
    let m = managers(ManagerMode::Live, &runtime, &controller);

    let running = m.containers.list(false);
    let running = running.containers().expect("container listing");
    assert_eq!(running.len(), 1);
    assert_eq!(running[0].get_id(), "0123456789ab");
    assert_eq!(running[0].get_name(), "web");
    assert_eq!(running[0].get_created(), "2024-01-15 10:30:00");

    let images = m.images.list();
    let images = images.images().expect("image listing");
    assert_eq!(images[0].get_id(), "a1b2c3d4e5f6");
    assert_eq!(images[0].get_repository(), "localhost:5000/app");
    assert_eq!(images[0].get_tag(), "1.2");
    assert_eq!(images[0].get_size(), "133.0MB");
    assert_eq!(images[1].get_repository(), "<none>");
    assert_eq!(images[1].get_tag(), "<none>");
    assert_eq!(images[1].get_size(), "1.3MB");
    assert_eq!(images[1].get_created(), "not a timestamp");
}

#[test]
fn test_empty_live_listing_is_a_success() {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController::active());
    let m = managers(ManagerMode::Live, &runtime, &controller);

    let result = m.containers.list(true);
    assert!(result.succeeded());
    assert_eq!(result.containers(), Some(&[][..]));
}

#[test]
fn test_live_unit_status_carries_the_unit() {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController::active());
    let m = managers(ManagerMode::Live, &runtime, &controller);

    let result = m.socket.status();
    match result.detail() {
        Some(Detail::Unit(status)) => {
            assert_eq!(status.get_unit(), "docker.socket");
            assert!(status.is_active());
        }
        other => panic!("unexpected detail: {other:?}"),
    }
}

#[test]
fn test_inactive_service_makes_the_quick_report_unhealthy() {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController {
        active_state: "inactive".to_string(),
        ..Default::default()
    });
    let m = managers(ManagerMode::Live, &runtime, &controller);

    let report = m.reporter().report(ReportKind::Quick);
    assert!(!report.get_healthy());
    assert_eq!(report.get_checks().len(), 2);
    assert_eq!(
        report.get_checks()[0].get_message(),
        "docker.service is inactive (dead)"
    );
    assert_eq!(runtime.call_count(), 0);
}

#[test]
fn test_full_report_runs_every_check_despite_failures() {
    let runtime = Arc::new(StubRuntime::failing("daemon is not running"));
    let controller = Arc::new(StubController::active());
    let m = managers(ManagerMode::Live, &runtime, &controller);

    let report = m.reporter().report(ReportKind::Full);
    let names: Vec<_> = report
        .get_checks()
        .iter()
        .map(|c| c.get_name().as_str())
        .collect();

    assert_eq!(
        names,
        [
            "Docker service",
            "Docker socket",
            "Containers",
            "Images",
            "Docker engine",
            "Privileges",
        ]
    );
    assert!(!report.get_healthy());
    assert!(*report.get_checks()[0].get_passed());
    assert!(*report.get_checks()[1].get_passed());
    for check in &report.get_checks()[2..5] {
        assert!(!check.get_passed());
        assert!(check.get_message().contains("daemon is not running"));
    }
    assert_eq!(runtime.call_count(), 3);
}
