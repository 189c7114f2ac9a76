//! Parsers for the installed-package listings of each supported package manager.
//!
//! Every parser is line-oriented and lenient: a line it cannot read is skipped, never fatal.

use crate::domain::{PackageManager, SearchResultRecord};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Debian architecture tokens that `dpkg -l` prints between version and description
const DPKG_ARCHES: &[&str] = &[
    "all", "amd64", "arm64", "armel", "armhf", "i386", "mips64el", "ppc64el", "riscv64", "s390x",
];

/// Parse the listing produced by [`crate::infra::command_line::package_listing_script`]
pub fn parse_search_results(manager: &PackageManager, output: &str) -> Vec<SearchResultRecord> {
    let mut results = Results::new(manager);

    match manager {
        PackageManager::Apt => parse_dpkg(output, &mut results),
        PackageManager::Dnf | PackageManager::Yum | PackageManager::Rpm => {
            parse_rpm(output, &mut results)
        }
        PackageManager::Pacman => parse_pacman(output, &mut results),
        PackageManager::Zypper => parse_zypper(output, &mut results),
        PackageManager::Apk => parse_apk(output, &mut results),
        PackageManager::Snap | PackageManager::Flatpak => parse_positional(output, &mut results),
        PackageManager::Equery => parse_equery(output, &mut results),
        PackageManager::Xbps => parse_xbps(output, &mut results),
        PackageManager::Other(_) => parse_generic(output, &mut results),
    }

    results.records
}

struct Results<'a> {
    manager: &'a PackageManager,
    records: Vec<SearchResultRecord>,
}

impl<'a> Results<'a> {
    fn new(manager: &'a PackageManager) -> Self {
        Self {
            manager,
            records: Vec::new(),
        }
    }

    fn push(&mut self, name: &str, version: &str, description: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let id = format!("{}-{}-{}", self.manager, name, self.records.len());
        self.records.push(SearchResultRecord {
            id,
            name: name.to_string(),
            version: version.trim().to_string(),
            description: description.trim().to_string(),
        });
    }
}

/// `name-version` where the version starts with a digit, optionally ending in `-r<N>`
fn versioned_name() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+?)-(\d[^-\s]*(?:-r\d+)?)$").ok())
        .as_ref()
}

fn split_versioned(token: &str) -> (&str, &str) {
    versioned_name()
        .and_then(|re| re.captures(token))
        .and_then(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .unwrap_or((token, ""))
}

fn parse_dpkg(output: &str, results: &mut Results) {
    for line in output.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 3 || tokens[0] != "ii" {
            continue;
        }

        let name = tokens[1].split(':').next().unwrap_or_default();
        let mut rest = &tokens[3..];
        if let Some(first) = rest.first() {
            if DPKG_ARCHES.contains(first) {
                rest = &rest[1..];
            }
        }

        results.push(name, tokens[2], &rest.join(" "));
    }
}

/// `dnf list` wraps a long `name.arch` onto its own line and indents the version and repo below it
fn parse_rpm(output: &str, results: &mut Results) {
    let mut wrapped: Option<&str> = None;

    for line in output.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        let (qualified, fields) = if line.starts_with(char::is_whitespace) {
            let Some(qualified) = wrapped.take() else {
                debug!("skipping rpm continuation line: {:?}", line);
                continue;
            };
            (qualified, &tokens[..])
        } else if tokens.len() == 1 {
            wrapped = Some(tokens[0]);
            continue;
        } else {
            wrapped = None;
            (tokens[0], &tokens[1..])
        };

        let Some((name, _arch)) = qualified.rsplit_once('.') else {
            debug!("skipping rpm line without arch: {:?}", line);
            continue;
        };
        let version = fields.first().copied().unwrap_or_default();
        let rest = fields.get(1..).map(|r| r.join(" ")).unwrap_or_default();

        results.push(name, version, &rest);
    }
}

/// `pacman -Qs` prints the description indented on the line after each package
fn parse_pacman(output: &str, results: &mut Results) {
    let mut awaiting_description = false;

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            if awaiting_description {
                if let Some(last) = results.records.last_mut() {
                    last.description = line.trim().to_string();
                }
                awaiting_description = false;
            }
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(qualified) = tokens.next() else {
            continue;
        };
        let name = qualified.rsplit('/').next().unwrap_or(qualified);
        let version = tokens.next().unwrap_or_default();

        let before = results.records.len();
        results.push(name, version, "");
        awaiting_description = results.records.len() > before;
    }
}

fn parse_zypper(output: &str, results: &mut Results) {
    for line in output.lines() {
        let cols: Vec<&str> = line.split('|').map(str::trim).collect();
        if cols.len() < 6 || !cols[0].contains('i') {
            continue;
        }

        results.push(cols[1], cols[3], cols[5]);
    }
}

fn parse_apk(output: &str, results: &mut Results) {
    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (package, description) = line.split_once(" - ").unwrap_or((line, ""));
        let Some(token) = package.split_whitespace().next() else {
            continue;
        };

        let (name, version) = split_versioned(token);
        results.push(name, version, description);
    }
}

/// Column layout of `snap list` and `flatpak list --columns=application,version,name`
fn parse_positional(output: &str, results: &mut Results) {
    for line in output.lines() {
        if is_positional_header(line) {
            continue;
        }

        let tokens: Vec<&str> = if line.contains('\t') {
            line.split('\t').map(str::trim).collect()
        } else {
            line.split_whitespace().collect()
        };

        let Some(name) = tokens.first() else {
            continue;
        };
        let version = tokens.get(1).copied().unwrap_or_default();
        let rest = tokens.get(2..).map(|r| r.join(" ")).unwrap_or_default();

        results.push(name, version, &rest);
    }
}

fn is_positional_header(line: &str) -> bool {
    let lowered = line.trim_start().to_lowercase();
    let first_word = lowered.split_whitespace().next().unwrap_or_default();
    let first_field = lowered.split('\t').next().unwrap_or_default().trim();

    first_word == "name" || first_field == "application" || lowered.starts_with("application id")
}

fn parse_equery(output: &str, results: &mut Results) {
    for line in output.lines() {
        let Some(atom) = line.split_whitespace().find(|t| t.contains('/')) else {
            continue;
        };

        let package = atom.rsplit('/').next().unwrap_or(atom);
        let package = package.split(':').next().unwrap_or(package);
        let (name, version) = split_versioned(package);

        results.push(name, version, "");
    }
}

fn parse_xbps(output: &str, results: &mut Results) {
    for line in output.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 || !tokens[0].starts_with('i') {
            continue;
        }

        let (name, version) = split_versioned(tokens[1]);
        results.push(name, version, &tokens[2..].join(" "));
    }
}

fn parse_generic(output: &str, results: &mut Results) {
    for line in output.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(name) = tokens.first() else {
            continue;
        };
        let version = tokens.get(1).copied().unwrap_or_default();
        let rest = tokens.get(2..).map(|r| r.join(" ")).unwrap_or_default();

        results.push(name, version, &rest);
    }
}
