use anyhow::{Context as _, Result};
use distrodeck::domain::{CommandRunner, FilePicker};
use distrodeck::infra::config::{AppConfig, host_home_dir, load_app_config};
use distrodeck::infra::{CommandBuilder, DryRunRunner, RuntimeKind, SystemRunner};
use distrodeck::services::{
    AppService, ContainerService, DependencyReport, ImageService, SystemService,
};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Everything a subcommand needs: loaded config, the process runner and detected tools
pub struct Context {
    config: AppConfig,
    runner: Arc<dyn CommandRunner>,
    commands: CommandBuilder,
    report: DependencyReport,
    dry_run: bool,
}

impl Context {
    pub fn load(config_dir: &Path, dry_run: bool) -> Result<Self> {
        let config = load_app_config(config_dir)
            .with_context(|| format!("carregando configuração de {:?}", config_dir))?;

        let runner: Arc<dyn CommandRunner> = if dry_run {
            Arc::new(DryRunRunner)
        } else {
            Arc::new(SystemRunner::new())
        };

        let report = SystemService::new(runner.clone(), config.manager())
            .with_preferences(config.preferred_runtime(), config.preferred_terminal())
            .check_dependencies();

        let runtime = report.runtime.unwrap_or(RuntimeKind::Podman);
        let commands = CommandBuilder::new(config.manager(), runtime.binary());
        debug!("usando {} sobre {}", commands.manager(), commands.runtime());

        Ok(Self {
            config,
            runner,
            commands,
            report,
            dry_run,
        })
    }

    pub fn report(&self) -> &DependencyReport {
        &self.report
    }

    /// Dry runs skip the check so commands can be previewed on any machine
    pub fn ensure_ready(&self) -> Result<()> {
        if !self.dry_run {
            self.report
                .ensure_ready()
                .context("dependências ausentes (rode 'distrodeck doctor')")?;
        }
        Ok(())
    }

    pub fn runner(&self) -> Arc<dyn CommandRunner> {
        self.runner.clone()
    }

    pub fn containers(&self) -> ContainerService {
        ContainerService::new(self.runner.clone(), self.commands.clone(), host_home_dir())
            .with_preferred_terminal(self.config.preferred_terminal())
    }

    pub fn images(&self, picker: Arc<dyn FilePicker>) -> ImageService {
        ImageService::new(
            self.runner.clone(),
            picker,
            self.commands.clone(),
            self.config.image_headers(),
        )
    }

    pub fn apps(&self) -> AppService {
        AppService::new(self.runner.clone(), self.commands.clone())
    }
}
