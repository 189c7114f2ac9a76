mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::{AppsCommand, Context, ContainersCommand, ImagesCommand};
use distrodeck::infra::config::default_config_dir;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "distrodeck",
    version,
    about = "Gerencia containers distrobox, imagens e apps exportados"
)]
struct Cli {
    /// Diretório de configuração (default: ~/.config/distrodeck)
    #[arg(long, global = true, env = "DISTRODECK_CONFIG_DIR", default_value_os_t = default_config_dir())]
    config_dir: PathBuf,

    /// Logs detalhados (inclui cada comando executado)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Mostra os comandos em vez de executá-los
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Containers: listar, criar, iniciar, parar, remover, entrar
    Containers(ContainersCommand),
    /// Imagens locais: listar, baixar, remover, importar, exportar
    Images(ImagesCommand),
    /// Apps exportados e busca de pacotes dentro de containers
    Apps(AppsCommand),
    /// Verifica distrobox, runtime, terminal e distro do host
    Doctor {
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::load(&cli.config_dir, cli.dry_run)?;

    match cli.command {
        Commands::Containers(cmd) => cli::containers::run(cmd, &ctx),
        Commands::Images(cmd) => cli::images::run(cmd, &ctx),
        Commands::Apps(cmd) => cli::apps::run(cmd, &ctx),
        Commands::Doctor { json } => cli::doctor::run(&ctx, &cli.config_dir, json),
    }
}
