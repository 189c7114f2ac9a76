use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerStatus {
    Running,
    Stopped,
}

impl ContainerStatus {
    /// Normalizes the free-form status column ("Up 2 hours", "Exited (0) 3 days ago", ...)
    pub fn from_status_text(text: &str) -> Self {
        if text.trim().to_lowercase().starts_with("up") {
            Self::Running
        } else {
            Self::Stopped
        }
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Where the container's home directory lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "path", rename_all = "lowercase")]
pub enum HomeMode {
    /// The container sees the host user's home
    Shared(PathBuf),
    /// A separate home mounted from a custom path
    Isolated(PathBuf),
}

impl HomeMode {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Shared(path) | Self::Isolated(path) => path,
        }
    }

    pub fn is_isolated(&self) -> bool {
        matches!(self, Self::Isolated(_))
    }
}

/// One row of the container listing, before inspect detail is merged in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    pub id: String,
    pub name: String,
    pub status: ContainerStatus,
    pub image: String,
}

/// The subset of the runtime's inspect document this crate reads.
///
/// Every field tolerates absence; the runtime's JSON layout is not stable across versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InspectDetails {
    pub id: Option<String>,
    pub name: Option<String>,
    pub env: Vec<(String, String)>,
    pub restart_policy: Option<String>,
    pub binds: Vec<String>,
    pub state: Option<String>,
    pub started_at: Option<String>,
    pub created: Option<String>,
}

impl InspectDetails {
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerRecord {
    pub id: String,
    pub name: String,
    pub status: ContainerStatus,
    pub image: String,
    pub home: HomeMode,
    pub autostart: bool,
    pub volumes: Vec<String>,
    pub created: Option<String>,
    pub started_at: Option<String>,
}

/// User-supplied configuration for a new container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateContainerRequest {
    pub name: String,
    pub image: String,
    /// Custom home directory; `None` or blank shares the host home
    pub home: Option<String>,
    /// Raw `host:container[:opts]` lines, blank entries allowed
    pub volumes: Vec<String>,
    pub init: bool,
    pub nvidia: bool,
}

impl CreateContainerRequest {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            ..Default::default()
        }
    }

    /// The isolation path, if one was given and is not blank
    pub fn home_path(&self) -> Option<&str> {
        self.home
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }

    /// Volume specs with blank lines removed, trimmed, order preserved
    pub fn volume_specs(&self) -> impl Iterator<Item = &str> {
        self.volumes
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_up_prefix_is_running() {
        assert_eq!(
            ContainerStatus::from_status_text("Up 2 hours"),
            ContainerStatus::Running
        );
        assert_eq!(
            ContainerStatus::from_status_text("  UP"),
            ContainerStatus::Running
        );
        assert_eq!(
            ContainerStatus::from_status_text("Exited (0) 3 days ago"),
            ContainerStatus::Stopped
        );
        assert_eq!(
            ContainerStatus::from_status_text("Created"),
            ContainerStatus::Stopped
        );
    }

    #[test]
    fn blank_home_counts_as_shared() {
        let mut req = CreateContainerRequest::new("box", "fedora:39");
        assert_eq!(req.home_path(), None);

        req.home = Some("   ".into());
        assert_eq!(req.home_path(), None);

        req.home = Some(" /srv/boxes/home ".into());
        assert_eq!(req.home_path(), Some("/srv/boxes/home"));
    }

    #[test]
    fn volume_specs_skip_blank_lines() {
        let req = CreateContainerRequest {
            volumes: vec![
                " /data:/data ".into(),
                "".into(),
                "   ".into(),
                "/tmp:/tmp:ro".into(),
            ],
            ..CreateContainerRequest::new("box", "fedora:39")
        };

        let specs: Vec<&str> = req.volume_specs().collect();
        assert_eq!(specs, vec!["/data:/data", "/tmp:/tmp:ro"]);
    }

    #[test]
    fn env_var_lookup() {
        let details = InspectDetails {
            env: vec![("HOME".into(), "/home/me".into())],
            ..Default::default()
        };
        assert_eq!(details.env_var("HOME"), Some("/home/me"));
        assert_eq!(details.env_var("SHELL"), None);
    }
}
