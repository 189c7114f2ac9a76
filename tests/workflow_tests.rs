use anyhow::Result;
use distrodeck::domain::{CreateContainerRequest, PackageManager, SharedAppKind};
use distrodeck::infra::CommandBuilder;
use distrodeck::services::{AppService, ContainerService, ImageService};
use distrodeck::test_support::{MockPicker, MockRunner};
use std::path::PathBuf;
use std::sync::Arc;

const IMAGES: &str = "\
REPOSITORY                         TAG      IMAGE ID      CREATED       SIZE
registry.fedoraproject.org/fedora  40       5f1ffd5bdbb1  2 days ago    190 MB
";

const LIST_AFTER_CREATE: &str = "\
ID           | NAME    | STATUS   | IMAGE
5a8f0c1d2e3f | work    | Up 1 second | registry.fedoraproject.org/fedora:40
";

#[test]
fn test_workflow_pull_create_share_search_delete() -> Result<()> {
    let mock = Arc::new(MockRunner::new());
    let commands = CommandBuilder::default();
    let images = ImageService::new(
        mock.clone(),
        Arc::new(MockPicker::cancelled()),
        commands.clone(),
        Default::default(),
    );
    let containers = ContainerService::new(mock.clone(), commands.clone(), PathBuf::from("/home/me"));
    let apps = AppService::new(mock.clone(), commands);

    // 1. Pull and find the image locally
    assert!(images.pull_image("registry.fedoraproject.org/fedora:40").is_success());
    mock.respond_ok("podman images", IMAGES);
    let local = images.list_local_images()?;
    assert_eq!(local.len(), 1);
    let image = &local[0];

    // 2. Create a container from it and start it
    let req = CreateContainerRequest::new("work", image.reference());
    assert!(containers.create_container(&req).is_success());
    mock.respond_ok("distrobox enter work -- true", "Container Setup Complete!");
    assert!(containers.start_container("work").is_success());

    // 3. It shows up with its inspect details
    mock.respond_ok("distrobox list", LIST_AFTER_CREATE);
    mock.respond_ok(
        "inspect --type container work",
        r#"[{"Created": "2024-05-01T10:00:00Z", "Config": {"Env": ["HOME=/home/me"]}}]"#,
    );
    let listed = containers.list_containers()?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "work");
    assert_eq!(listed[0].created.as_deref(), Some("2024-05-01T10:00:00Z"));

    // 4. Search a package and share it
    mock.respond_ok(
        "rpm -qa",
        "htop.x86_64 3.3.0-3.fc40 Interactive process viewer\n\
         bash.x86_64 5.2.26-3.fc40 The GNU Bourne Again shell\n",
    );
    let found = apps.search_container_apps("work", &PackageManager::Rpm, "process")?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "htop");

    assert!(apps.export_app("work", &found[0].name).is_success());
    mock.respond_ok("--list-apps", "htop | /usr/share/applications/htop.desktop\n");
    let shared = apps.list_shared_apps("work")?;
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].kind, SharedAppKind::App);
    assert_eq!(shared[0].id, "work-htop-0");

    // 5. Tear down
    assert!(apps.unshare_app("work", "htop").is_success());
    assert!(containers.stop_container("work").is_success());
    assert!(containers.delete_container("work").is_success());
    assert!(images.delete_image(&image.image_id).is_success());

    let commands = mock.get_commands();
    let position = |needle: &str| commands.iter().position(|c| c == needle);

    let create = position(
        "distrobox create --yes --name work --image registry.fedoraproject.org/fedora:40",
    );
    let remove = position("distrobox rm --force work");
    let rmi = position("podman rmi 5f1ffd5bdbb1");
    assert!(create.is_some() && remove.is_some() && rmi.is_some());
    assert!(create < remove && remove < rmi);

    Ok(())
}

#[test]
fn test_workflow_import_then_export() -> Result<()> {
    let mock = Arc::new(MockRunner::new());
    let picker = Arc::new(MockPicker::choosing("/tmp/fedora.tar"));
    let images = ImageService::new(
        mock.clone(),
        picker.clone(),
        CommandBuilder::default(),
        Default::default(),
    );

    assert!(images.import_image().is_success());

    mock.respond_ok("podman images", IMAGES);
    let local = images.list_local_images()?;
    assert!(images.export_image(&local[0]).is_success());

    assert_eq!(picker.calls(), 2);
    assert_eq!(
        mock.get_commands(),
        vec![
            "podman load -i /tmp/fedora.tar",
            "podman images",
            "podman save -o /tmp/fedora.tar registry.fedoraproject.org/fedora:40",
        ]
    );

    Ok(())
}
