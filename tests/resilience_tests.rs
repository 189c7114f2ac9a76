use anyhow::Result;
use distrodeck::domain::{CommandOutcome, Error, PackageManager};
use distrodeck::infra::CommandBuilder;
use distrodeck::services::{AppService, ContainerService, ImageService};
use distrodeck::test_support::{MockPicker, MockRunner};
use std::path::PathBuf;
use std::sync::Arc;

fn container_service(mock: &Arc<MockRunner>) -> ContainerService {
    ContainerService::new(mock.clone(), CommandBuilder::default(), PathBuf::from("/home/me"))
}

#[test]
fn test_many_containers_one_broken_inspect() -> Result<()> {
    let mock = Arc::new(MockRunner::new());

    let mut list = String::from("ID | NAME | STATUS | IMAGE\n");
    for i in 0..24 {
        list.push_str(&format!("id{i:02} | box{i:02} | Up {i} minutes | fedora:40\n"));
        mock.respond_ok(&format!("inspect --type container box{i:02}"), "[{}]");
    }
    mock.respond_ok("distrobox list", &list);
    mock.respond_ok("inspect --type container box13", "this is not json");

    let records = container_service(&mock).list_containers()?;

    assert_eq!(records.len(), 23);
    assert!(records.iter().all(|r| r.name != "box13"));
    // Listing order survives the concurrent inspects
    let names: Vec<_> = records.iter().map(|r| r.name.clone()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    Ok(())
}

#[test]
fn test_vanished_binary_is_a_failed_outcome() {
    let mock = Arc::new(MockRunner::new());
    mock.set_fail_on("distrobox");
    let service = container_service(&mock);

    for outcome in [
        service.start_container("dev"),
        service.stop_container("dev"),
        service.delete_container("dev"),
    ] {
        match outcome {
            CommandOutcome::Failed { message } => assert!(message.contains("distrobox")),
            other => panic!("expected failure, got {other:?}"),
        }
    }
}

#[test]
fn test_vanished_binary_is_an_error_for_queries() {
    let mock = Arc::new(MockRunner::new());
    mock.set_fail_on("distrobox list");

    let err = container_service(&mock).list_containers().unwrap_err();
    assert!(matches!(err, Error::Spawn { .. }));
}

#[test]
fn test_garbage_outputs_do_not_abort() -> Result<()> {
    let mock = Arc::new(MockRunner::new());
    mock.respond_ok("distrobox list", "\u{1b}[1m???\u{1b}[0m\n|||\n\n");
    mock.respond_ok("--list-apps", "|\n| /orphan\n");
    mock.respond_ok("--list-binaries", "");
    mock.respond_ok("sh -c", "ii\nii \n\u{0}\u{0}\n");

    assert!(container_service(&mock).list_containers()?.is_empty());

    let apps = AppService::new(mock.clone(), CommandBuilder::default());
    assert!(apps.list_shared_apps("dev")?.is_empty());
    assert!(apps.search_container_apps("dev", &PackageManager::Apt, "")?.is_empty());

    Ok(())
}

#[test]
fn test_cancelled_import_spawns_nothing() {
    let mock = Arc::new(MockRunner::new());
    let picker = Arc::new(MockPicker::cancelled());
    let images = ImageService::new(
        mock.clone(),
        picker.clone(),
        CommandBuilder::default(),
        Default::default(),
    );

    assert_eq!(images.import_image(), CommandOutcome::Cancelled);
    assert_eq!(images.import_image(), CommandOutcome::Cancelled);

    assert_eq!(picker.calls(), 2);
    assert!(mock.get_commands().is_empty());
    assert!(mock.get_spawned().is_empty());
}

#[test]
fn test_hostile_names_are_rejected_before_running() {
    let mock = Arc::new(MockRunner::new());
    let service = container_service(&mock);
    let apps = AppService::new(mock.clone(), CommandBuilder::default());

    assert!(service.start_container("--root").error_message().is_some());
    assert!(service.stop_container("   ").error_message().is_some());
    assert!(apps.export_app("dev", "--help").error_message().is_some());
    assert!(matches!(
        apps.list_shared_apps("-x"),
        Err(Error::InvalidRequest(_))
    ));

    assert!(mock.get_commands().is_empty());
}
