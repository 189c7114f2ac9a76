use serde::Serialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SharedAppKind {
    /// A desktop launcher exported to the host
    App,
    /// A binary exported to the host's PATH
    Binary,
}

impl fmt::Display for SharedAppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::App => write!(f, "app"),
            Self::Binary => write!(f, "binary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedAppRecord {
    pub id: String,
    pub name: String,
    pub container: String,
    pub path: String,
    pub kind: SharedAppKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultRecord {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
}

impl SearchResultRecord {
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

/// Package managers whose listing output has a dedicated parser.
///
/// Anything else lands in `Other` and goes through the generic two-column parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Dnf,
    Yum,
    Rpm,
    Pacman,
    Zypper,
    Apk,
    Snap,
    Flatpak,
    Equery,
    Xbps,
    Other(String),
}

impl PackageManager {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Apt => "apt",
            Self::Dnf => "dnf",
            Self::Yum => "yum",
            Self::Rpm => "rpm",
            Self::Pacman => "pacman",
            Self::Zypper => "zypper",
            Self::Apk => "apk",
            Self::Snap => "snap",
            Self::Flatpak => "flatpak",
            Self::Equery => "equery",
            Self::Xbps => "xbps",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for PackageManager {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "apt" | "apt-get" | "dpkg" => Self::Apt,
            "dnf" => Self::Dnf,
            "yum" => Self::Yum,
            "rpm" | "rpm-ostree" => Self::Rpm,
            "pacman" | "yay" | "paru" => Self::Pacman,
            "zypper" => Self::Zypper,
            "apk" => Self::Apk,
            "snap" => Self::Snap,
            "flatpak" => Self::Flatpak,
            "equery" | "emerge" | "portage" => Self::Equery,
            "xbps" | "xbps-query" | "xbps-install" => Self::Xbps,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_managers_and_aliases() {
        assert_eq!("apt".parse::<PackageManager>().unwrap(), PackageManager::Apt);
        assert_eq!("DPKG".parse::<PackageManager>().unwrap(), PackageManager::Apt);
        assert_eq!("paru".parse::<PackageManager>().unwrap(), PackageManager::Pacman);
        assert_eq!("emerge".parse::<PackageManager>().unwrap(), PackageManager::Equery);
    }

    #[test]
    fn unknown_manager_falls_back_to_other() {
        let manager: PackageManager = "nix-env".parse().unwrap();
        assert_eq!(manager, PackageManager::Other("nix-env".into()));
        assert_eq!(manager.to_string(), "nix-env");
    }

    #[test]
    fn search_match_is_case_insensitive() {
        let record = SearchResultRecord {
            id: "apt-curl-0".into(),
            name: "curl".into(),
            version: "7.81.0-1".into(),
            description: "command line tool for transferring data".into(),
        };
        assert!(record.matches("CURL"));
        assert!(record.matches("Transferring"));
        assert!(record.matches(""));
        assert!(!record.matches("wget"));
    }
}
