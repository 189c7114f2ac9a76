use super::{Context, print_json, report};
use anyhow::Result;
use clap::{Args, Subcommand};
use distrodeck::domain::PackageManager;

#[derive(Args)]
pub struct AppsCommand {
    #[command(subcommand)]
    pub action: AppsAction,
}

#[derive(Subcommand)]
pub enum AppsAction {
    /// Lista apps e binários exportados de um container
    List {
        container: String,
        #[arg(long)]
        json: bool,
    },
    /// Procura pacotes instalados no container
    Search {
        container: String,
        /// Texto procurado no nome ou descrição (vazio lista tudo)
        #[arg(default_value = "")]
        query: String,
        /// Gerenciador de pacotes do container (apt, dnf, pacman, apk, ...)
        #[arg(long, short)]
        manager: PackageManager,
        #[arg(long)]
        json: bool,
    },
    /// Exporta um app (ou binário com --bin) para o host
    Export {
        container: String,
        app: String,
        #[arg(long)]
        bin: bool,
    },
    /// Remove a exportação de um app (ou binário com --bin)
    Unshare {
        container: String,
        app: String,
        #[arg(long)]
        bin: bool,
    },
}

pub fn run(cmd: AppsCommand, ctx: &Context) -> Result<()> {
    ctx.ensure_ready()?;
    let service = ctx.apps();

    match cmd.action {
        AppsAction::List { container, json } => {
            let shared = service.list_shared_apps(&container)?;
            if json {
                return print_json(&shared);
            }
            if shared.is_empty() {
                println!("Nada exportado de {container}");
                return Ok(());
            }

            for app in &shared {
                println!("- {:<7} | {:<30} | {}", app.kind, app.name, app.path);
            }
            Ok(())
        }
        AppsAction::Search {
            container,
            query,
            manager,
            json,
        } => {
            let results = service.search_container_apps(&container, &manager, &query)?;
            if json {
                return print_json(&results);
            }

            println!("🔍 {} pacote(s) em {container}:", results.len());
            for pkg in &results {
                println!("- {:<30} {:<24} {}", pkg.name, pkg.version, pkg.description);
            }
            Ok(())
        }
        AppsAction::Export {
            container,
            app,
            bin,
        } => {
            let outcome = if bin {
                service.export_binary(&container, &app)
            } else {
                service.export_app(&container, &app)
            };
            report(&format!("{app} exportado de {container}"), outcome)
        }
        AppsAction::Unshare {
            container,
            app,
            bin,
        } => {
            let outcome = if bin {
                service.unshare_binary(&container, &app)
            } else {
                service.unshare_app(&container, &app)
            };
            report(&format!("Exportação de {app} removida"), outcome)
        }
    }
}
