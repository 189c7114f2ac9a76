use super::execution::{run_operation, run_query};
use crate::domain::{
    CommandOutcome, CommandRunner, Operation, PackageManager, Result, SearchResultRecord,
    SharedAppKind, SharedAppRecord,
};
use crate::infra::CommandBuilder;
use crate::parsers::{parse_search_results, parse_shared_apps};
use std::sync::Arc;
use tracing::{debug, info};

/// Applications and binaries exported from containers to the host
#[derive(Debug)]
pub struct AppService {
    runner: Arc<dyn CommandRunner>,
    commands: CommandBuilder,
}

impl AppService {
    pub fn new(runner: Arc<dyn CommandRunner>, commands: CommandBuilder) -> Self {
        Self { runner, commands }
    }

    /// Exported desktop apps followed by exported binaries, with ids unique across both
    pub fn list_shared_apps(&self, container: &str) -> Result<Vec<SharedAppRecord>> {
        let apps_output = run_query(
            self.runner.as_ref(),
            &self.commands.list_exported_apps(container)?,
        )?;
        let mut shared = parse_shared_apps(&apps_output, container, SharedAppKind::App, 0);

        let bins_output = run_query(
            self.runner.as_ref(),
            &self.commands.list_exported_binaries(container)?,
        )?;
        shared.extend(parse_shared_apps(
            &bins_output,
            container,
            SharedAppKind::Binary,
            shared.len(),
        ));

        Ok(shared)
    }

    /// Installed packages in `container` whose name or description contains `query`
    pub fn search_container_apps(
        &self,
        container: &str,
        manager: &PackageManager,
        query: &str,
    ) -> Result<Vec<SearchResultRecord>> {
        let command = self.commands.search_packages(container, manager)?;
        let output = run_query(self.runner.as_ref(), &command)?;

        let mut results = parse_search_results(manager, &output);
        let total = results.len();
        results.retain(|r| r.matches(query));

        debug!(
            "{} de {} pacotes em {} batem com {:?}",
            results.len(),
            total,
            container,
            query
        );
        Ok(results)
    }

    pub fn export_app(&self, container: &str, app: &str) -> CommandOutcome {
        info!(" Exportando {app} de {container}...");
        run_operation(
            self.runner.as_ref(),
            Operation::ExportApp,
            self.commands.export_app(container, app),
        )
    }

    pub fn unshare_app(&self, container: &str, app: &str) -> CommandOutcome {
        info!(" Removendo exportação de {app} ({container})...");
        run_operation(
            self.runner.as_ref(),
            Operation::UnshareApp,
            self.commands.unshare_app(container, app),
        )
    }

    pub fn export_binary(&self, container: &str, path: &str) -> CommandOutcome {
        info!(" Exportando binário {path} de {container}...");
        run_operation(
            self.runner.as_ref(),
            Operation::ExportApp,
            self.commands.export_binary(container, path),
        )
    }

    pub fn unshare_binary(&self, container: &str, path: &str) -> CommandOutcome {
        info!(" Removendo exportação do binário {path} ({container})...");
        run_operation(
            self.runner.as_ref(),
            Operation::UnshareApp,
            self.commands.unshare_binary(container, path),
        )
    }
}
