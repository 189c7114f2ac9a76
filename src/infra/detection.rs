use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Container runtimes the manager can sit on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    Podman,
    Docker,
}

impl RuntimeKind {
    pub fn binary(&self) -> &'static str {
        match self {
            Self::Podman => "podman",
            Self::Docker => "docker",
        }
    }

    pub fn from_binary(name: &str) -> Option<Self> {
        match name.trim() {
            "podman" => Some(Self::Podman),
            "docker" => Some(Self::Docker),
            _ => None,
        }
    }
}

impl fmt::Display for RuntimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Terminal emulators we know how to hand a command to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Terminal {
    Ptyxis,
    GnomeTerminal,
    Konsole,
    Xfce4Terminal,
    Kitty,
    Alacritty,
    Wezterm,
    Foot,
    Tilix,
    Xterm,
}

impl Terminal {
    /// Probe order when no preference is configured
    pub const ALL: [Terminal; 10] = [
        Self::Ptyxis,
        Self::GnomeTerminal,
        Self::Konsole,
        Self::Xfce4Terminal,
        Self::Kitty,
        Self::Alacritty,
        Self::Wezterm,
        Self::Foot,
        Self::Tilix,
        Self::Xterm,
    ];

    pub fn binary(&self) -> &'static str {
        match self {
            Self::Ptyxis => "ptyxis",
            Self::GnomeTerminal => "gnome-terminal",
            Self::Konsole => "konsole",
            Self::Xfce4Terminal => "xfce4-terminal",
            Self::Kitty => "kitty",
            Self::Alacritty => "alacritty",
            Self::Wezterm => "wezterm",
            Self::Foot => "foot",
            Self::Tilix => "tilix",
            Self::Xterm => "xterm",
        }
    }

    /// Arguments placed between the terminal binary and the command it should run
    pub fn exec_args(&self) -> &'static [&'static str] {
        match self {
            Self::Ptyxis | Self::GnomeTerminal => &["--"],
            Self::Konsole | Self::Alacritty | Self::Tilix | Self::Xterm => &["-e"],
            Self::Xfce4Terminal => &["-x"],
            Self::Wezterm => &["start", "--"],
            Self::Kitty | Self::Foot => &[],
        }
    }

    pub fn from_binary(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|t| t.binary() == name)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Identity of the host distribution, from os-release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistroInfo {
    pub id: String,
    pub name: String,
    pub pretty_name: String,
    pub version_id: Option<String>,
}

impl Default for DistroInfo {
    fn default() -> Self {
        Self {
            id: "linux".into(),
            name: "Linux".into(),
            pretty_name: "Linux".into(),
            version_id: None,
        }
    }
}

/// Parse `KEY=VALUE` lines of an os-release file; unknown keys and junk lines are ignored
pub fn parse_os_release(content: &str) -> DistroInfo {
    let mut info = DistroInfo::default();
    let mut pretty_name = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = unquote(value.trim());
        if value.is_empty() {
            continue;
        }

        match key.trim() {
            "ID" => info.id = value,
            "NAME" => info.name = value,
            "PRETTY_NAME" => pretty_name = Some(value),
            "VERSION_ID" => info.version_id = Some(value),
            _ => {}
        }
    }

    info.pretty_name = pretty_name.unwrap_or_else(|| info.name.clone());
    info
}

fn unquote(value: &str) -> String {
    let stripped = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);
    stripped.to_string()
}

pub fn read_os_release(path: &Path) -> DistroInfo {
    match fs::read_to_string(path) {
        Ok(content) => parse_os_release(&content),
        Err(e) => {
            tracing::debug!("os-release unreadable at {:?}: {}", path, e);
            DistroInfo::default()
        }
    }
}

/// Pick the configured runtime if present, otherwise podman, then docker
pub fn select_runtime(
    preferred: Option<RuntimeKind>,
    is_available: impl Fn(&str) -> bool,
) -> Option<RuntimeKind> {
    if let Some(runtime) = preferred {
        if is_available(runtime.binary()) {
            return Some(runtime);
        }
        tracing::warn!("Configured runtime {} not found on PATH", runtime);
    }

    [RuntimeKind::Podman, RuntimeKind::Docker]
        .into_iter()
        .find(|r| is_available(r.binary()))
}

/// Pick the preferred terminal if installed, otherwise the first installed one
pub fn select_terminal(
    preferred: Option<Terminal>,
    is_available: impl Fn(&str) -> bool,
) -> Option<Terminal> {
    if let Some(terminal) = preferred.filter(|t| is_available(t.binary())) {
        return Some(terminal);
    }

    Terminal::ALL
        .into_iter()
        .find(|t| is_available(t.binary()))
}
