use crate::domain::{SharedAppKind, SharedAppRecord};
use tracing::debug;

/// Parse `distrobox-export --list-apps` / `--list-binaries` output.
///
/// Each line is `name | path`; lines without a `|` are skipped and anything after a second `|`
/// is ignored. Ids are
/// `<container>-<sanitized name>-<n>` where `n` counts kept entries starting at `first_index`,
/// so apps and binaries of one container can share a single id space.
pub fn parse_shared_apps(
    output: &str,
    container: &str,
    kind: SharedAppKind,
    first_index: usize,
) -> Vec<SharedAppRecord> {
    let mut apps = Vec::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        let [name, path, ..] = fields[..] else {
            debug!("skipping exported {} line without path: {:?}", kind, line);
            continue;
        };

        if name.is_empty() {
            debug!("dropping exported {} line without name: {:?}", kind, line);
            continue;
        }

        let index = first_index + apps.len();
        apps.push(SharedAppRecord {
            id: format!("{}-{}-{}", container, sanitize(name), index),
            name: name.to_string(),
            container: container.to_string(),
            path: path.to_string(),
            kind,
        });
    }

    apps
}

/// Lower-case ASCII alphanumerics; every other run of characters collapses to one `-`
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const APPS: &str = "\
Firefox          | /usr/share/applications/firefox.desktop
GNU Image Manipulation Program | /usr/share/applications/gimp.desktop
";

    #[test]
    fn parses_name_and_path() {
        let apps = parse_shared_apps(APPS, "fedora", SharedAppKind::App, 0);
        assert_eq!(apps.len(), 2);

        assert_eq!(apps[0].name, "Firefox");
        assert_eq!(apps[0].path, "/usr/share/applications/firefox.desktop");
        assert_eq!(apps[0].container, "fedora");
        assert_eq!(apps[0].id, "fedora-firefox-0");

        assert_eq!(apps[1].id, "fedora-gnu-image-manipulation-program-1");
        assert_eq!(apps[1].kind, SharedAppKind::App);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let apps = parse_shared_apps("code | /usr/bin/code | extra\n", "dev", SharedAppKind::Binary, 0);
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].name, "code");
        assert_eq!(apps[0].path, "/usr/bin/code");
    }

    #[test]
    fn blank_nameless_and_pathless_lines_are_dropped() {
        let output = "\n   \n | /usr/bin/orphan\nvim\nfirefox | /usr/bin/firefox\n";
        let apps = parse_shared_apps(output, "dev", SharedAppKind::Binary, 0);
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].name, "firefox");
        assert_eq!(apps[0].path, "/usr/bin/firefox");
        assert_eq!(apps[0].id, "dev-firefox-0");
    }

    #[test]
    fn ids_are_unique_even_for_colliding_names() {
        let output = "Foo Bar | /a\nfoo-bar | /b\nFOO_BAR | /c\n";
        let mut apps = parse_shared_apps(output, "box", SharedAppKind::App, 0);
        apps.extend(parse_shared_apps(output, "box", SharedAppKind::Binary, apps.len()));

        let ids: HashSet<_> = apps.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), apps.len());
        assert_eq!(apps[3].id, "box-foo-bar-3");
    }

    #[test]
    fn sanitize_collapses_runs() {
        assert_eq!(sanitize("GNU Image  Manipulation"), "gnu-image-manipulation");
        assert_eq!(sanitize("--Weird__Name!!"), "weird-name");
        assert_eq!(sanitize("Évolution 3"), "volution-3");
        assert_eq!(sanitize("***"), "");
    }
}
