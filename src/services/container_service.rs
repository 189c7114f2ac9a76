use super::execution::{run_operation, run_query};
use crate::domain::{
    CommandOutcome, CommandRunner, ContainerRecord, CreateContainerRequest, Error,
    InspectDetails, Operation, Result,
};
use crate::infra::detection::select_terminal;
use crate::infra::{CommandBuilder, Terminal};
use crate::parsers::{container_record, parse_container_list, parse_inspect};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing::{info, warn};

/// Container lifecycle on top of the manager CLI
#[derive(Debug)]
pub struct ContainerService {
    runner: Arc<dyn CommandRunner>,
    commands: CommandBuilder,
    host_home: PathBuf,
    preferred_terminal: Option<Terminal>,
}

impl ContainerService {
    pub fn new(runner: Arc<dyn CommandRunner>, commands: CommandBuilder, host_home: PathBuf) -> Self {
        Self {
            runner,
            commands,
            host_home,
            preferred_terminal: None,
        }
    }

    pub fn with_preferred_terminal(mut self, terminal: Option<Terminal>) -> Self {
        self.preferred_terminal = terminal;
        self
    }

    /// Every container the manager knows, enriched with inspect details.
    ///
    /// Inspect calls run concurrently. A container whose inspect fails is left out of the
    /// result instead of failing the whole listing.
    pub fn list_containers(&self) -> Result<Vec<ContainerRecord>> {
        let output = run_query(self.runner.as_ref(), &self.commands.list_containers())?;
        let summaries = parse_container_list(&output);

        let records: Vec<ContainerRecord> = thread::scope(|scope| {
            let handles: Vec<_> = summaries
                .into_iter()
                .map(|summary| {
                    scope.spawn(move || {
                        let details = self.inspect(&summary.name);
                        (summary, details)
                    })
                })
                .collect();

            handles
                .into_iter()
                .filter_map(|handle| handle.join().ok())
                .filter_map(|(summary, details)| match details {
                    Ok(details) => Some(container_record(summary, &details, &self.host_home)),
                    Err(e) => {
                        warn!("  Omitindo {}: falha ao inspecionar ({})", summary.name, e);
                        None
                    }
                })
                .collect()
        });

        Ok(records)
    }

    fn inspect(&self, name: &str) -> Result<InspectDetails> {
        let command = self.commands.inspect_container(name)?;
        let output = run_query(self.runner.as_ref(), &command)?;
        parse_inspect(&output)
    }

    pub fn create_container(&self, req: &CreateContainerRequest) -> CommandOutcome {
        info!(" Criando {} a partir de {}...", req.name, req.image);
        run_operation(
            self.runner.as_ref(),
            Operation::CreateContainer,
            self.commands.create_container(req),
        )
    }

    pub fn start_container(&self, name: &str) -> CommandOutcome {
        info!(" Iniciando {name}...");
        run_operation(
            self.runner.as_ref(),
            Operation::StartContainer,
            self.commands.start_container(name),
        )
    }

    pub fn stop_container(&self, name: &str) -> CommandOutcome {
        info!(" Parando {name}...");
        run_operation(
            self.runner.as_ref(),
            Operation::StopContainer,
            self.commands.stop_container(name),
        )
    }

    pub fn delete_container(&self, name: &str) -> CommandOutcome {
        info!(" Removendo {name}...");
        run_operation(
            self.runner.as_ref(),
            Operation::DeleteContainer,
            self.commands.delete_container(name),
        )
    }

    /// Open an interactive shell in `name` in a new terminal window
    pub fn enter_container(&self, name: &str) -> Result<Terminal> {
        let terminal = select_terminal(self.preferred_terminal, |bin| {
            self.runner.is_command_available(bin)
        })
        .ok_or_else(|| Error::ExternalToolMissing("terminal emulator".into()))?;

        let command = self.commands.enter_in_terminal(&terminal, name)?;
        self.runner.spawn_detached(&command)?;

        info!(" Abrindo {name} em {terminal}");
        Ok(terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContainerStatus, HomeMode};
    use crate::test_support::MockRunner;

    const LIST: &str = "\
ID           | NAME    | STATUS      | IMAGE
aaa111       | fedora  | Up 2 hours  | fedora-toolbox:39
bbb222       | ubuntu  | Exited (0)  | ubuntu:22.04
";

    fn service(mock: &Arc<MockRunner>) -> ContainerService {
        ContainerService::new(
            mock.clone(),
            CommandBuilder::default(),
            PathBuf::from("/home/me"),
        )
    }

    #[test]
    fn list_merges_inspect_details() {
        let mock = Arc::new(MockRunner::new());
        mock.respond_ok("distrobox list", LIST);
        mock.respond_ok(
            "inspect --type container fedora",
            r#"[{"Config": {"Env": ["HOME=/home/me"]}, "HostConfig": {"RestartPolicy": {"Name": "always"}}}]"#,
        );
        mock.respond_ok(
            "inspect --type container ubuntu",
            r#"[{"Config": {"Env": ["HOME=/boxes/ubuntu", "DISTROBOX_HOST_HOME=/home/me"]}}]"#,
        );

        let records = service(&mock).list_containers().unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].name, "fedora");
        assert_eq!(records[0].status, ContainerStatus::Running);
        assert!(records[0].autostart);
        assert_eq!(records[0].home, HomeMode::Shared(PathBuf::from("/home/me")));

        assert_eq!(records[1].name, "ubuntu");
        assert_eq!(
            records[1].home,
            HomeMode::Isolated(PathBuf::from("/boxes/ubuntu"))
        );
    }

    #[test]
    fn failed_inspect_omits_only_that_container() {
        let mock = Arc::new(MockRunner::new());
        mock.respond_ok("distrobox list", LIST);
        mock.respond_ok("inspect --type container fedora", "[{}]");
        mock.respond_err("inspect --type container ubuntu", 125, "no such container");

        let records = service(&mock).list_containers().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "fedora");
    }

    #[test]
    fn failed_list_is_an_error() {
        let mock = Arc::new(MockRunner::new());
        mock.respond_err("distrobox list", 1, "podman: command not found");

        let err = service(&mock).list_containers().unwrap_err();
        assert!(matches!(err, Error::Invocation { .. }));
    }

    #[test]
    fn lifecycle_operations_issue_expected_commands() {
        let mock = Arc::new(MockRunner::new());
        let svc = service(&mock);

        assert!(svc.start_container("dev").is_success());
        assert!(svc.stop_container("dev").is_success());
        assert!(svc.delete_container("dev").is_success());
        assert!(
            svc.create_container(&CreateContainerRequest::new("dev", "fedora:39"))
                .is_success()
        );

        assert_eq!(
            mock.get_commands(),
            vec![
                "distrobox enter dev -- true",
                "distrobox stop --yes dev",
                "distrobox rm --force dev",
                "distrobox create --yes --name dev --image fedora:39",
            ]
        );
    }

    #[test]
    fn stop_of_stopped_container_succeeds() {
        let mock = Arc::new(MockRunner::new());
        mock.respond_err("distrobox stop", 1, "container dev is not running");

        assert!(service(&mock).stop_container("dev").is_success());
    }

    #[test]
    fn invalid_name_never_reaches_the_runner() {
        let mock = Arc::new(MockRunner::new());
        let outcome = service(&mock).delete_container("--all");

        assert!(outcome.error_message().is_some());
        assert!(mock.get_commands().is_empty());
    }

    #[test]
    fn enter_uses_first_installed_terminal() {
        let mock = Arc::new(MockRunner::new());
        mock.set_unavailable(&["ptyxis", "gnome-terminal"]);

        let terminal = service(&mock).enter_container("dev").unwrap();
        assert_eq!(terminal, Terminal::Konsole);
        assert_eq!(mock.get_spawned(), vec!["konsole -e distrobox enter dev"]);
    }

    #[test]
    fn enter_without_terminal_is_missing_tool() {
        let mock = Arc::new(MockRunner::new());
        let all: Vec<&str> = Terminal::ALL.iter().map(|t| t.binary()).collect();
        mock.set_unavailable(&all);

        let err = service(&mock).enter_container("dev").unwrap_err();
        assert!(matches!(err, Error::ExternalToolMissing(_)));
        assert!(mock.get_spawned().is_empty());
    }
}
