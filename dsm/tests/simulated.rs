mod common;

use std::sync::Arc;

use common::{managers, run_session, StubController, StubRuntime};
use dsm::{
    console::render,
    health::ReportKind,
    management::fixtures,
    runtime::UnitVerb,
    ManagerMode,
};

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[test_log::test]
fn test_simulated_managers_never_reach_collaborators() {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController::default());
    let m = managers(ManagerMode::Simulated, &runtime, &controller);

    let mut results = Vec::new();
    for unit in [&m.service, &m.socket] {
        results.push(unit.status());
        for verb in [
            UnitVerb::Start,
            UnitVerb::Stop,
            UnitVerb::Restart,
            UnitVerb::Enable,
            UnitVerb::Disable,
        ] {
            results.push(unit.apply(verb));
        }
    }

    for include_stopped in [false, true] {
        results.push(m.containers.list(include_stopped));
    }
    for id in ["abc123", "does-not-exist", ""] {
        results.push(m.containers.remove(id, true));
        results.push(m.containers.logs(id, 10));
        results.push(m.images.remove(id, false));
    }
    results.push(m.containers.prune());
    results.push(m.containers.usage());
    results.push(m.images.list());
    results.push(m.images.prune());
    results.push(m.system.engine_info());
    results.push(m.system.privileges());

    let reporter = m.reporter();
    assert!(*reporter.report(ReportKind::Full).get_healthy());
    assert!(*reporter.report(ReportKind::Quick).get_healthy());

    for result in &results {
        assert!(result.succeeded(), "{result:?}");
        assert!(result.message().ends_with(fixtures::DEMO_SUFFIX), "{result:?}");
    }
    assert_eq!(runtime.call_count(), 0);
    assert_eq!(controller.call_count(), 0);
}

#[test]
fn test_demo_container_listing_returns_the_fixture() {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController::default());
    let m = managers(ManagerMode::Simulated, &runtime, &controller);

    for include_stopped in [false, true] {
        let result = m.containers.list(include_stopped);
        let records = result.containers().expect("container listing");

        let summary: Vec<_> = records
            .iter()
            .map(|r| (r.get_id().as_str(), r.get_name().as_str(), r.get_status().as_str()))
            .collect();
        assert_eq!(
            summary,
            [
                ("abc123", "web-server", "running"),
                ("def456", "db-server", "stopped"),
            ]
        );
    }
}

#[test]
fn test_demo_image_listing_returns_the_fixture() {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController::default());
    let m = managers(ManagerMode::Simulated, &runtime, &controller);

    let result = m.images.list();
    let images = result.images().expect("image listing");
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].get_repository(), "nginx");
    assert_eq!(images[0].get_tag(), "latest");
    assert_eq!(images[0].get_size(), "133.0MB");
    assert_eq!(images[1].get_repository(), "postgres");
    assert_eq!(images[1].get_size(), "376.0MB");
}

#[test]
fn test_listing_twice_renders_identically() -> anyhow::Result<()> {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController::default());
    let m = managers(ManagerMode::Simulated, &runtime, &controller);

    let first = m.containers.list(true);
    let second = m.containers.list(true);
    assert_eq!(first, second);
    assert_eq!(serde_json::to_vec(&first)?, serde_json::to_vec(&second)?);

    let first = m.images.list();
    let second = m.images.list();
    assert_eq!(
        render::records(first.images().unwrap_or_default(), "none"),
        render::records(second.images().unwrap_or_default(), "none"),
    );
    Ok(())
}

#[test]
fn test_removing_an_empty_id_succeeds_in_demo_mode() {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController::default());
    let m = managers(ManagerMode::Simulated, &runtime, &controller);

    assert!(m.containers.remove("", false).succeeded());
    assert!(m.images.remove("", true).succeeded());
    assert_eq!(runtime.call_count(), 0);
}

#[test]
fn test_demo_session_touches_every_menu_without_side_effects() {
    let runtime = Arc::new(StubRuntime::default());
    let controller = Arc::new(StubController::default());
    let m = managers(ManagerMode::Simulated, &runtime, &controller);

    let input = [
        // service: status, start, stop, restart, enable, disable
        "1", "1", "2", "3", "4", "5", "6", "b",
        // socket: status, start, stop, enable, disable
        "2", "1", "2", "3", "4", "5", "b",
        // containers: list running, list all, logs of #2 with 5 lines, remove, prune, usage
        "3", "1", "2", "3", "2", "5", "4", "", "y", "5", "y", "6", "b",
        // images: list, remove, prune
        "4", "1", "2", "def456", "n", "3", "y", "b",
        // system info
        "5", "1", "2", "b",
        // health reports
        "6", "1", "2", "q",
    ]
    .join("\n");

    let (state, output) = run_session(m, &format!("{input}\n"));

    assert!(!state.running);
    assert_eq!(state.current, dsm::console::MenuId::Health);
    assert!(output.contains(render::DEMO_BANNER));
    assert!(output.contains("web-server"));
    assert!(output.contains("logs of def456 (demo)"));
    assert!(output.contains("removed image def456 (demo)"));
    assert!(output.contains("Overall status: HEALTHY"));
    assert!(!output.contains("[FAILED]"));
    assert!(!output.contains("Invalid choice"));
    assert_eq!(runtime.call_count(), 0);
    assert_eq!(controller.call_count(), 0);
}
