//! Argument lists for every external invocation.
//!
//! Commands are handed to the process as argv, never through a shell, so metacharacters in a
//! name cannot change what runs. The remaining hazard is a value sitting in a positional slot
//! that starts with `-` and gets read as a flag; [`ensure_positional`] rejects those.

use crate::domain::{CreateContainerRequest, Error, PackageManager, Result};
use crate::infra::detection::Terminal;
use std::fmt;
use std::path::Path;

/// A program plus its argv, ready to hand to a [`crate::domain::CommandRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// POSIX-quoted rendering, safe to paste into a shell
    pub fn to_shell_string(&self) -> String {
        let mut words = Vec::with_capacity(self.args.len() + 1);
        words.push(self.program.as_str());
        words.extend(self.args.iter().map(String::as_str));
        shell_words::join(words)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_string())
    }
}

/// Reject values that would be empty or parsed as an option when placed in argv
pub fn ensure_positional<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidRequest(format!("{what} must not be empty")));
    }
    if value.starts_with('-') {
        return Err(Error::InvalidRequest(format!(
            "{what} '{value}' must not start with '-'"
        )));
    }
    Ok(value)
}

/// Arguments for the manager's `create` subcommand.
///
/// Flag order is fixed: name, image, home, init, nvidia, then one `--volume` per non-blank line.
pub fn build_create_command(req: &CreateContainerRequest) -> Result<Vec<String>> {
    let name = ensure_positional(&req.name, "container name")?;
    let image = ensure_positional(&req.image, "image")?;

    let mut args: Vec<String> = vec![
        "create".into(),
        "--yes".into(),
        "--name".into(),
        name.into(),
        "--image".into(),
        image.into(),
    ];

    if let Some(home) = req.home_path() {
        args.push("--home".into());
        args.push(home.into());
    }
    if req.init {
        args.push("--init".into());
    }
    if req.nvidia {
        args.push("--nvidia".into());
    }

    for volume in req.volume_specs() {
        args.push("--volume".into());
        args.push(volume.into());
    }

    Ok(args)
}

/// Listing script run inside the container for a package search.
///
/// These are full listings; filtering by query happens after parsing because several of the
/// tools exit non-zero when a filter matches nothing.
pub fn package_listing_script(manager: &PackageManager) -> String {
    match manager {
        PackageManager::Apt => "dpkg -l".into(),
        PackageManager::Dnf => "dnf list installed".into(),
        PackageManager::Yum => "yum list installed".into(),
        PackageManager::Rpm => {
            r"rpm -qa --qf '%{NAME}.%{ARCH} %{VERSION}-%{RELEASE} %{SUMMARY}\n'".into()
        }
        PackageManager::Pacman => "pacman -Qs".into(),
        PackageManager::Zypper => {
            "zypper --non-interactive --no-refresh search --installed-only --details".into()
        }
        PackageManager::Apk => "apk info -vv".into(),
        PackageManager::Snap => "snap list".into(),
        PackageManager::Flatpak => "flatpak list --columns=application,version,name".into(),
        PackageManager::Equery => "equery --quiet list '*'".into(),
        PackageManager::Xbps => "xbps-query -l".into(),
        PackageManager::Other(name) => format!("{} list", shell_words::quote(name)),
    }
}

/// Builds invocations of the container manager (distrobox) and the runtime (podman/docker)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuilder {
    manager: String,
    runtime: String,
}

impl CommandBuilder {
    pub fn new(manager: impl Into<String>, runtime: impl Into<String>) -> Self {
        Self {
            manager: manager.into(),
            runtime: runtime.into(),
        }
    }

    pub fn manager(&self) -> &str {
        &self.manager
    }

    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    pub fn list_containers(&self) -> CommandLine {
        CommandLine::new(&self.manager).args(["list", "--no-color"])
    }

    pub fn inspect_container(&self, name: &str) -> Result<CommandLine> {
        let name = ensure_positional(name, "container name")?;
        Ok(CommandLine::new(&self.runtime).args(["inspect", "--type", "container", name]))
    }

    pub fn create_container(&self, req: &CreateContainerRequest) -> Result<CommandLine> {
        Ok(CommandLine::new(&self.manager).args(build_create_command(req)?))
    }

    /// Entering with a no-op command boots the container and runs first-time setup
    pub fn start_container(&self, name: &str) -> Result<CommandLine> {
        let name = ensure_positional(name, "container name")?;
        Ok(CommandLine::new(&self.manager).args(["enter", name, "--", "true"]))
    }

    pub fn stop_container(&self, name: &str) -> Result<CommandLine> {
        let name = ensure_positional(name, "container name")?;
        Ok(CommandLine::new(&self.manager).args(["stop", "--yes", name]))
    }

    pub fn delete_container(&self, name: &str) -> Result<CommandLine> {
        let name = ensure_positional(name, "container name")?;
        Ok(CommandLine::new(&self.manager).args(["rm", "--force", name]))
    }

    /// Opens an interactive shell in the container inside a new terminal window
    pub fn enter_in_terminal(&self, terminal: &Terminal, name: &str) -> Result<CommandLine> {
        let name = ensure_positional(name, "container name")?;
        Ok(CommandLine::new(terminal.binary())
            .args(terminal.exec_args().iter().copied())
            .args([self.manager.as_str(), "enter", name]))
    }

    pub fn list_images(&self) -> CommandLine {
        CommandLine::new(&self.runtime).arg("images")
    }

    pub fn pull_image(&self, reference: &str) -> Result<CommandLine> {
        let reference = ensure_positional(reference, "image reference")?;
        Ok(CommandLine::new(&self.runtime).args(["pull", reference]))
    }

    pub fn delete_image(&self, image_id: &str) -> Result<CommandLine> {
        let image_id = ensure_positional(image_id, "image id")?;
        Ok(CommandLine::new(&self.runtime).args(["rmi", image_id]))
    }

    pub fn load_image(&self, archive: &Path) -> CommandLine {
        CommandLine::new(&self.runtime)
            .args(["load", "-i"])
            .arg(archive.to_string_lossy())
    }

    pub fn save_image(&self, reference: &str, archive: &Path) -> Result<CommandLine> {
        let reference = ensure_positional(reference, "image reference")?;
        Ok(CommandLine::new(&self.runtime)
            .args(["save", "-o"])
            .arg(archive.to_string_lossy())
            .arg(reference))
    }

    fn in_container(&self, name: &str) -> Result<CommandLine> {
        let name = ensure_positional(name, "container name")?;
        Ok(CommandLine::new(&self.manager).args(["enter", name, "--"]))
    }

    pub fn list_exported_apps(&self, container: &str) -> Result<CommandLine> {
        Ok(self
            .in_container(container)?
            .args(["distrobox-export", "--list-apps"]))
    }

    pub fn list_exported_binaries(&self, container: &str) -> Result<CommandLine> {
        Ok(self
            .in_container(container)?
            .args(["distrobox-export", "--list-binaries"]))
    }

    pub fn export_app(&self, container: &str, app: &str) -> Result<CommandLine> {
        let app = ensure_positional(app, "application name")?;
        Ok(self
            .in_container(container)?
            .args(["distrobox-export", "--app", app]))
    }

    pub fn unshare_app(&self, container: &str, app: &str) -> Result<CommandLine> {
        Ok(self.export_app(container, app)?.arg("--delete"))
    }

    pub fn export_binary(&self, container: &str, path: &str) -> Result<CommandLine> {
        let path = ensure_positional(path, "binary path")?;
        Ok(self
            .in_container(container)?
            .args(["distrobox-export", "--bin", path]))
    }

    pub fn unshare_binary(&self, container: &str, path: &str) -> Result<CommandLine> {
        Ok(self.export_binary(container, path)?.arg("--delete"))
    }

    pub fn search_packages(&self, container: &str, manager: &PackageManager) -> Result<CommandLine> {
        Ok(self
            .in_container(container)?
            .args(["sh", "-c"])
            .arg(package_listing_script(manager)))
    }
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self::new("distrobox", "podman")
    }
}
