use crate::domain::{
    ContainerRecord, ContainerStatus, ContainerSummary, Error, HomeMode, InspectDetails, Result,
};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Set inside containers created with a custom home
pub const HOST_HOME_ENV: &str = "DISTROBOX_HOST_HOME";
pub const AUTOSTART_POLICY: &str = "always";

const LIST_COLUMNS: usize = 4;

/// Parse the pipe-delimited output of the manager's `list` into summaries.
///
/// Columns are id, name, status, image. The header row, separator rows and rows with fewer
/// than four fields are skipped. Ids are unique in the result; later duplicates are dropped.
pub fn parse_container_list(output: &str) -> Vec<ContainerSummary> {
    let mut containers = Vec::new();
    let mut seen = HashSet::new();

    for line in output.lines() {
        if line.trim().is_empty() || is_separator(line) {
            continue;
        }

        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        if parts.len() < LIST_COLUMNS {
            debug!("dropping short container row: {:?}", line);
            continue;
        }

        if parts[0].eq_ignore_ascii_case("id") && parts[1].eq_ignore_ascii_case("name") {
            continue;
        }

        if parts[0].is_empty() || parts[1].is_empty() {
            debug!("dropping container row without id/name: {:?}", line);
            continue;
        }

        if !seen.insert(parts[0].to_string()) {
            debug!("dropping duplicate container id {}", parts[0]);
            continue;
        }

        containers.push(ContainerSummary {
            id: parts[0].to_string(),
            name: parts[1].to_string(),
            status: ContainerStatus::from_status_text(parts[2]),
            image: parts[3].to_string(),
        });
    }

    containers
}

fn is_separator(line: &str) -> bool {
    line.chars()
        .all(|c| matches!(c, '-' | '+' | '=' | '|') || c.is_whitespace())
}

/// Parse the runtime's `inspect` JSON.
/// Accepts either the common array form (`[ {...} ]`) or a single object.
pub fn parse_inspect(output: &str) -> Result<InspectDetails> {
    let trimmed = output.trim();
    let parsed: Value = serde_json::from_str(trimmed)
        .map_err(|e| Error::Parse(format!("inspect output was not valid JSON: {e}")))?;

    let info = match &parsed {
        Value::Array(items) => items
            .first()
            .ok_or_else(|| Error::Parse("inspect returned an empty array".into()))?,
        Value::Object(_) => &parsed,
        _ => {
            return Err(Error::Parse(
                "inspect JSON must be an object or array".into(),
            ));
        }
    };

    let config = info.get("Config");
    let host_config = info.get("HostConfig");
    let state = info.get("State");

    let env = config
        .and_then(|c| c.get("Env"))
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(|entry| match entry.split_once('=') {
                    Some((k, v)) => (k.to_string(), v.to_string()),
                    None => (entry.to_string(), String::new()),
                })
                .collect()
        })
        .unwrap_or_default();

    let restart_policy = host_config
        .and_then(|h| h.get("RestartPolicy"))
        .and_then(|r| r.get("Name"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let binds = host_config
        .and_then(|h| h.get("Binds"))
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(InspectDetails {
        id: string_field(info.get("Id")),
        name: string_field(info.get("Name")).map(|n| n.trim_start_matches('/').to_string()),
        env,
        restart_policy,
        binds,
        state: string_field(state.and_then(|s| s.get("Status"))),
        started_at: string_field(state.and_then(|s| s.get("StartedAt"))),
        created: string_field(info.get("Created")),
    })
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Combine a list row with its inspect detail
pub fn container_record(
    summary: ContainerSummary,
    details: &InspectDetails,
    host_home: &Path,
) -> ContainerRecord {
    let home = match details.env_var(HOST_HOME_ENV) {
        Some(host_home_value) => {
            let path = details.env_var("HOME").unwrap_or(host_home_value);
            HomeMode::Isolated(path.into())
        }
        None => HomeMode::Shared(host_home.to_path_buf()),
    };

    let autostart = details.restart_policy.as_deref() == Some(AUTOSTART_POLICY);

    ContainerRecord {
        id: summary.id,
        name: summary.name,
        status: summary.status,
        image: summary.image,
        home,
        autostart,
        volumes: details.binds.clone(),
        created: details.created.clone(),
        started_at: details.started_at.clone(),
    }
}
