use super::{Context, print_json, report};
use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use distrodeck::domain::FilePicker;
use distrodeck::infra::config::expand_path;
use distrodeck::infra::{PresetPicker, ZenityPicker};
use std::sync::Arc;

#[derive(Args)]
pub struct ImagesCommand {
    #[command(subcommand)]
    pub action: ImagesAction,
}

#[derive(Subcommand)]
pub enum ImagesAction {
    /// Lista imagens locais do runtime
    List {
        /// Saída em JSON
        #[arg(long)]
        json: bool,
    },
    /// Baixa uma imagem
    Pull { reference: String },
    /// Remove uma imagem pelo ID
    Rm { image_id: String },
    /// Importa um arquivo .tar (sem caminho abre o seletor de arquivos)
    Import { path: Option<String> },
    /// Exporta uma imagem para .tar (sem caminho abre o seletor de arquivos)
    Export {
        /// repository:tag ou ID da imagem
        image: String,
        path: Option<String>,
    },
}

fn picker(ctx: &Context, path: Option<String>) -> Result<Arc<dyn FilePicker>> {
    let picker: Arc<dyn FilePicker> = match path {
        Some(raw) => Arc::new(PresetPicker::new(Some(expand_path(&raw)?))),
        None => Arc::new(ZenityPicker::new(ctx.runner())),
    };
    Ok(picker)
}

pub fn run(cmd: ImagesCommand, ctx: &Context) -> Result<()> {
    ctx.ensure_ready()?;

    match cmd.action {
        ImagesAction::List { json } => {
            let images = ctx.images(picker(ctx, None)?).list_local_images()?;
            if json {
                return print_json(&images);
            }

            println!("🖼  Imagens locais:");
            for image in &images {
                println!(
                    "- {:<50} | {:<14} | {:<16} | {}",
                    image.reference(),
                    image.image_id,
                    image.created,
                    image.size
                );
            }
            Ok(())
        }
        ImagesAction::Pull { reference } => {
            let outcome = ctx.images(picker(ctx, None)?).pull_image(&reference);
            report(&format!("{reference} baixada"), outcome)
        }
        ImagesAction::Rm { image_id } => {
            let outcome = ctx.images(picker(ctx, None)?).delete_image(&image_id);
            report(&format!("Imagem {image_id} removida"), outcome)
        }
        ImagesAction::Import { path } => {
            let outcome = ctx.images(picker(ctx, path)?).import_image();
            report("Imagem importada", outcome)
        }
        ImagesAction::Export { image, path } => {
            let service = ctx.images(picker(ctx, path)?);
            let Some(record) = service
                .list_local_images()?
                .into_iter()
                .find(|i| i.reference() == image || i.image_id.starts_with(&image))
            else {
                bail!("Imagem '{image}' não encontrada localmente");
            };

            let outcome = service.export_image(&record);
            report(&format!("{} exportada", record.reference()), outcome)
        }
    }
}
