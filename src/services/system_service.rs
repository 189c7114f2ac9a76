use crate::domain::{CommandRunner, Error, Result};
use crate::infra::detection::{OS_RELEASE_PATH, read_os_release, select_runtime, select_terminal};
use crate::infra::{DistroInfo, RuntimeKind, Terminal};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// What the host provides for the front-end to work with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    /// Binary name of the container manager
    pub manager: String,
    pub manager_available: bool,
    /// Runtime that will be used, after applying the configured preference
    pub runtime: Option<RuntimeKind>,
    pub podman: bool,
    pub docker: bool,
    pub terminal: Option<Terminal>,
    pub distro: DistroInfo,
}

impl DependencyReport {
    /// Fails when the manager or every runtime is missing; a missing terminal is tolerated
    pub fn ensure_ready(&self) -> Result<RuntimeKind> {
        if !self.manager_available {
            return Err(Error::ExternalToolMissing(self.manager.clone()));
        }
        self.runtime
            .ok_or_else(|| Error::ExternalToolMissing("podman or docker".into()))
    }
}

/// Host detection: tools on PATH, terminal emulator, distribution
#[derive(Debug)]
pub struct SystemService {
    runner: Arc<dyn CommandRunner>,
    manager: String,
    preferred_runtime: Option<RuntimeKind>,
    preferred_terminal: Option<Terminal>,
    os_release: PathBuf,
}

impl SystemService {
    pub fn new(runner: Arc<dyn CommandRunner>, manager: impl Into<String>) -> Self {
        Self {
            runner,
            manager: manager.into(),
            preferred_runtime: None,
            preferred_terminal: None,
            os_release: PathBuf::from(OS_RELEASE_PATH),
        }
    }

    pub fn with_preferences(
        mut self,
        runtime: Option<RuntimeKind>,
        terminal: Option<Terminal>,
    ) -> Self {
        self.preferred_runtime = runtime;
        self.preferred_terminal = terminal;
        self
    }

    pub fn with_os_release(mut self, path: impl Into<PathBuf>) -> Self {
        self.os_release = path.into();
        self
    }

    pub fn check_dependencies(&self) -> DependencyReport {
        let available = |bin: &str| self.runner.is_command_available(bin);

        let manager_available = available(self.manager.as_str());
        if !manager_available {
            warn!("  {} não encontrado no PATH", self.manager);
        }

        let report = DependencyReport {
            manager: self.manager.clone(),
            manager_available,
            runtime: select_runtime(self.preferred_runtime, available),
            podman: available(RuntimeKind::Podman.binary()),
            docker: available(RuntimeKind::Docker.binary()),
            terminal: select_terminal(self.preferred_terminal, available),
            distro: read_os_release(&self.os_release),
        };

        debug!("dependency report: {:?}", report);
        report
    }
}
