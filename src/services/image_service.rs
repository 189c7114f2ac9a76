use super::classifier::classify;
use super::execution::{run_operation, run_query};
use crate::domain::{
    CommandOutcome, CommandRunner, FilePicker, ImageRecord, ImageTableHeaders, Invocation,
    Operation, Result,
};
use crate::infra::CommandBuilder;
use crate::parsers::parse_image_table;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug)]
pub struct ImageService {
    runner: Arc<dyn CommandRunner>,
    picker: Arc<dyn FilePicker>,
    commands: CommandBuilder,
    headers: ImageTableHeaders,
}

impl ImageService {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        picker: Arc<dyn FilePicker>,
        commands: CommandBuilder,
        headers: ImageTableHeaders,
    ) -> Self {
        Self {
            runner,
            picker,
            commands,
            headers,
        }
    }

    pub fn list_local_images(&self) -> Result<Vec<ImageRecord>> {
        let output = run_query(self.runner.as_ref(), &self.commands.list_images())?;
        parse_image_table(&output, &self.headers)
    }

    pub fn pull_image(&self, reference: &str) -> CommandOutcome {
        info!(" Baixando {reference}...");
        run_operation(
            self.runner.as_ref(),
            Operation::PullImage,
            self.commands.pull_image(reference),
        )
    }

    pub fn delete_image(&self, image_id: &str) -> CommandOutcome {
        info!(" Removendo imagem {image_id}...");
        run_operation(
            self.runner.as_ref(),
            Operation::DeleteImage,
            self.commands.delete_image(image_id),
        )
    }

    /// Load an image archive chosen through the file picker.
    /// Dismissing the picker is `Cancelled` and runs nothing.
    pub fn import_image(&self) -> CommandOutcome {
        let Some(archive) = self.picker.pick_open("Import image") else {
            return classify(Operation::ImportImage, &Invocation::Cancelled);
        };

        info!(" Importando {:?}...", archive);
        run_operation(
            self.runner.as_ref(),
            Operation::ImportImage,
            Ok(self.commands.load_image(&archive)),
        )
    }

    /// Save `image` to an archive chosen through the file picker
    pub fn export_image(&self, image: &ImageRecord) -> CommandOutcome {
        let suggested = suggested_archive_name(image);
        let Some(archive) = self.picker.pick_save("Export image", &suggested) else {
            return classify(Operation::ExportImage, &Invocation::Cancelled);
        };

        let target = save_target(image);
        info!(" Exportando {} para {:?}...", target, archive);
        run_operation(
            self.runner.as_ref(),
            Operation::ExportImage,
            self.commands.save_image(&target, &archive),
        )
    }
}

/// Dangling images have no usable `repository:tag`, only their id
fn save_target(image: &ImageRecord) -> String {
    let untagged = |value: &str| value.is_empty() || value == "<none>";
    if untagged(&image.repository) || untagged(&image.tag) {
        image.image_id.clone()
    } else {
        image.reference()
    }
}

/// `docker.io/library/ubuntu:22.04` → `ubuntu-22.04.tar`
fn suggested_archive_name(image: &ImageRecord) -> PathBuf {
    let name = image
        .repository
        .rsplit('/')
        .next()
        .unwrap_or(&image.repository);
    let stem = if image.tag.is_empty() || image.tag == "<none>" {
        name.to_string()
    } else {
        format!("{}-{}", name, image.tag)
    };
    PathBuf::from(format!("{stem}.tar"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::infra::PresetPicker;
    use crate::test_support::{MockPicker, MockRunner};
    use std::path::Path;

    fn service(mock: &Arc<MockRunner>, picker: Arc<dyn FilePicker>) -> ImageService {
        ImageService::new(
            mock.clone(),
            picker,
            CommandBuilder::default(),
            ImageTableHeaders::default(),
        )
    }

    fn ubuntu() -> ImageRecord {
        ImageRecord {
            id: "abc123def456-0".into(),
            repository: "docker.io/library/ubuntu".into(),
            tag: "22.04".into(),
            image_id: "abc123def456".into(),
            size: "78MB".into(),
            created: "3 weeks ago".into(),
        }
    }

    #[test]
    fn lists_images_from_runtime_table() {
        let mock = Arc::new(MockRunner::new());
        mock.respond_ok(
            "podman images",
            "REPOSITORY   TAG   IMAGE ID   CREATED   SIZE\n\
             ubuntu        22.04   abc123def456   3 weeks ago   78MB\n",
        );

        let images = service(&mock, Arc::new(MockPicker::cancelled()))
            .list_local_images()
            .unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].reference(), "ubuntu:22.04");
    }

    #[test]
    fn headerless_table_is_parse_error() {
        let mock = Arc::new(MockRunner::new());
        mock.respond_ok("podman images", "something unexpected\n");

        let err = service(&mock, Arc::new(MockPicker::cancelled()))
            .list_local_images()
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn cancelled_import_runs_nothing() {
        let mock = Arc::new(MockRunner::new());
        let picker = Arc::new(MockPicker::cancelled());

        let outcome = service(&mock, picker.clone()).import_image();
        assert_eq!(outcome, CommandOutcome::Cancelled);
        assert_eq!(picker.calls(), 1);
        assert!(mock.get_commands().is_empty());
        assert!(mock.get_spawned().is_empty());
    }

    #[test]
    fn import_of_existing_image_fails() {
        let mock = Arc::new(MockRunner::new());
        mock.respond_ok("podman load", "Error: image already exists");

        let outcome = service(&mock, Arc::new(MockPicker::choosing("/tmp/alpine.tar"))).import_image();
        assert_eq!(outcome, CommandOutcome::failed("Image already exists."));
        assert_eq!(mock.get_commands(), vec!["podman load -i /tmp/alpine.tar"]);
    }

    #[test]
    fn export_saves_reference_to_chosen_path() {
        let mock = Arc::new(MockRunner::new());
        let picker = Arc::new(PresetPicker::new(Some("/tmp/out dir/ubuntu.tar".into())));

        let outcome = service(&mock, picker).export_image(&ubuntu());
        assert!(outcome.is_success());
        assert_eq!(
            mock.get_commands(),
            vec!["podman save -o '/tmp/out dir/ubuntu.tar' docker.io/library/ubuntu:22.04"]
        );
    }

    #[test]
    fn export_of_dangling_image_uses_its_id() {
        let mock = Arc::new(MockRunner::new());
        let picker = Arc::new(PresetPicker::new(Some("/tmp/dangling.tar".into())));
        let dangling = ImageRecord {
            repository: "<none>".into(),
            tag: "<none>".into(),
            ..ubuntu()
        };

        let outcome = service(&mock, picker).export_image(&dangling);
        assert!(outcome.is_success());
        assert_eq!(
            mock.get_commands(),
            vec!["podman save -o /tmp/dangling.tar abc123def456"]
        );
    }

    #[test]
    fn cancelled_export_runs_nothing() {
        let mock = Arc::new(MockRunner::new());
        let outcome = service(&mock, Arc::new(MockPicker::cancelled())).export_image(&ubuntu());
        assert!(outcome.is_cancelled());
        assert!(mock.get_commands().is_empty());
    }

    #[test]
    fn pull_failure_carries_stderr() {
        let mock = Arc::new(MockRunner::new());
        mock.respond_err("podman pull", 125, "Error: initializing source: manifest unknown\n");

        let outcome = service(&mock, Arc::new(MockPicker::cancelled())).pull_image("nope:latest");
        assert_eq!(
            outcome.error_message(),
            Some("Error: initializing source: manifest unknown")
        );
    }

    #[test]
    fn suggested_name_uses_last_path_segment() {
        assert_eq!(suggested_archive_name(&ubuntu()), Path::new("ubuntu-22.04.tar"));

        let untagged = ImageRecord {
            tag: "<none>".into(),
            ..ubuntu()
        };
        assert_eq!(suggested_archive_name(&untagged), Path::new("ubuntu.tar"));
    }
}
