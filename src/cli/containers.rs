use super::{Context, print_json, report};
use anyhow::Result;
use clap::{Args, Subcommand};
use distrodeck::domain::CreateContainerRequest;
use distrodeck::infra::config::expand_path;

#[derive(Args)]
pub struct ContainersCommand {
    #[command(subcommand)]
    pub action: ContainersAction,
}

#[derive(Subcommand)]
pub enum ContainersAction {
    /// Lista containers com status, imagem e home
    List {
        /// Saída em JSON
        #[arg(long)]
        json: bool,
    },
    /// Cria um container novo
    Create {
        name: String,
        /// Imagem base (ex: registry.fedoraproject.org/fedora-toolbox:40)
        #[arg(long, short)]
        image: String,
        /// Home isolada no caminho dado (default: compartilha a home do host)
        #[arg(long)]
        home: Option<String>,
        /// Volume extra host:container[:opts]; pode repetir
        #[arg(long = "volume", short = 'v')]
        volumes: Vec<String>,
        /// Usa systemd/init dentro do container
        #[arg(long)]
        init: bool,
        /// Integra drivers NVIDIA do host
        #[arg(long)]
        nvidia: bool,
    },
    /// Inicia (e finaliza o setup de) um container
    Start { name: String },
    /// Para um container
    Stop { name: String },
    /// Remove um container
    Rm { name: String },
    /// Abre um shell do container em um terminal novo
    Enter { name: String },
}

pub fn run(cmd: ContainersCommand, ctx: &Context) -> Result<()> {
    ctx.ensure_ready()?;
    let service = ctx.containers();

    match cmd.action {
        ContainersAction::List { json } => {
            let containers = service.list_containers()?;
            if json {
                return print_json(&containers);
            }
            if containers.is_empty() {
                println!("Nenhum container encontrado");
                return Ok(());
            }

            println!("📦 Containers:");
            for c in &containers {
                let home = if c.home.is_isolated() {
                    format!("isolada ({})", c.home.path().display())
                } else {
                    "compartilhada".to_string()
                };
                let autostart = if c.autostart { " [autostart]" } else { "" };
                println!(
                    "- {:<20} | {:<8} | {:<45} | home {}{}",
                    c.name, c.status, c.image, home, autostart
                );
            }
            Ok(())
        }
        ContainersAction::Create {
            name,
            image,
            home,
            volumes,
            init,
            nvidia,
        } => {
            let home = home
                .map(|raw| expand_path(&raw))
                .transpose()?
                .map(|path| path.to_string_lossy().into_owned());

            let req = CreateContainerRequest {
                name,
                image,
                home,
                volumes,
                init,
                nvidia,
            };
            let label = format!("Container {} criado", req.name);
            report(&label, service.create_container(&req))
        }
        ContainersAction::Start { name } => {
            report(&format!("{name} iniciado"), service.start_container(&name))
        }
        ContainersAction::Stop { name } => {
            report(&format!("{name} parado"), service.stop_container(&name))
        }
        ContainersAction::Rm { name } => {
            report(&format!("{name} removido"), service.delete_container(&name))
        }
        ContainersAction::Enter { name } => {
            let terminal = service.enter_container(&name)?;
            println!("🚀 {name} aberto em {terminal}");
            Ok(())
        }
    }
}
