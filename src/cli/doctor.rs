use super::{Context, print_json};
use anyhow::Result;
use std::path::Path;

fn mark(ok: bool) -> &'static str {
    if ok { "✅" } else { "⚠️ " }
}

pub fn run(ctx: &Context, config_dir: &Path, json: bool) -> Result<()> {
    let report = ctx.report();
    if json {
        return print_json(report);
    }

    println!("🔍 Checando dependências...");
    println!(
        "{} {} {}",
        mark(report.manager_available),
        report.manager,
        if report.manager_available { "disponível" } else { "não encontrado no PATH" }
    );
    println!("{} podman", mark(report.podman));
    println!("{} docker", mark(report.docker));

    match report.runtime {
        Some(runtime) => println!("➡️  Runtime em uso: {runtime}"),
        None => println!("⚠️  Nenhum runtime (podman/docker) encontrado"),
    }
    match report.terminal {
        Some(terminal) => println!("✅ Terminal: {terminal}"),
        None => println!("⚠️  Nenhum emulador de terminal conhecido encontrado"),
    }
    println!("🐧 Host: {}", report.distro.pretty_name);

    if config_dir.exists() {
        println!("✅ Diretório de config: {:?}", config_dir);
    } else {
        println!("ℹ️  Sem diretório de config em {:?} (usando padrões)", config_dir);
    }

    if let Err(e) = report.ensure_ready() {
        println!("❌ {e}");
    }

    Ok(())
}
