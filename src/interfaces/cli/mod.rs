pub mod commands;
pub mod state;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;

use crate::application::use_cases::drive_export::files_from_page_images;
use crate::application::OutlineImportUseCase;
use crate::domain::error::AppError;
use crate::domain::image::{ImageRequest, OutlineRequest, StyleConfig};
use crate::domain::outline::{edit_page, OutlinePage};
use crate::infrastructure::csv::OutlineExporter;
use crate::infrastructure::storage::{ensure_run_dir, save_images};
use commands::{
    ApiKeyCommand, Commands, EditArgs, ExportArgs, GenerateArgs, ImagesArgs, ImportArgs,
    InputArgs, OutlineArgs,
};
use state::AppState;

#[derive(Parser, Debug)]
#[command(
    name = "slidecanvas",
    version,
    about = "Plan slide outlines from CSV or a topic, and generate slide images for them."
)]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(self, state: AppState) -> Result<()> {
        match self.command {
            Commands::Import(args) => run_import(&state, args),
            Commands::Export(args) => run_export(&state, args),
            Commands::Edit(args) => run_edit(&state, args),
            Commands::Outline(args) => run_outline(&state, args).await,
            Commands::Generate(args) => run_generate(&state, args).await,
            Commands::Images(args) => run_images(&state, args).await,
            Commands::ApiKey(command) => run_api_key(&state, command),
        }
    }
}

fn load_pages(state: &AppState, file: &Path, input: InputArgs) -> Result<Vec<OutlinePage>> {
    let use_case = match input.delimiter {
        Some(delimiter) => OutlineImportUseCase::new(delimiter),
        None => state.outline_import_use_case,
    };
    let import = use_case
        .import_file(file)
        .with_context(|| format!("Could not import {}", file.display()))?;
    Ok(import.into_pages())
}

fn exporter(output_delimiter: char) -> Result<OutlineExporter> {
    if !output_delimiter.is_ascii() || matches!(output_delimiter, '"' | '\r' | '\n') {
        anyhow::bail!(
            "--output-delimiter must be an ASCII character other than a quote or line break"
        );
    }
    Ok(OutlineExporter::new().with_delimiter(output_delimiter as u8))
}

fn write_or_print(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Could not write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote outline");
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn run_import(state: &AppState, args: ImportArgs) -> Result<()> {
    let pages = load_pages(state, &args.file, args.input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&pages)?);
        return Ok(());
    }

    for page in &pages {
        println!("[{}] {}", page.page_number, page.title);
        for line in page.content.lines() {
            println!("    {}", line);
        }
    }
    Ok(())
}

fn run_export(state: &AppState, args: ExportArgs) -> Result<()> {
    let pages = load_pages(state, &args.file, args.input)?;
    let text = exporter(args.output_delimiter)?.to_csv(&pages)?;
    write_or_print(args.output.as_deref(), &text)
}

fn run_edit(state: &AppState, args: EditArgs) -> Result<()> {
    let mut pages = load_pages(state, &args.file, args.input)?;
    let index = args
        .page
        .checked_sub(1)
        .context("--page is 1-based")?;

    edit_page(&mut pages, index, &args.field, &args.value)?;

    let text = exporter(args.output_delimiter)?.to_csv(&pages)?;
    write_or_print(args.output.as_deref(), &text)
}

async fn run_outline(state: &AppState, args: OutlineArgs) -> Result<()> {
    let request = OutlineRequest {
        prompt: args.prompt,
        page_count: args.pages,
        complexity: args.complexity.into(),
    };
    let pages = state
        .outline_generation_use_case
        .execute(&state.generation_config, &request)
        .await?;

    match args.output {
        Some(path) => {
            let text = OutlineExporter::new().to_csv(&pages)?;
            write_or_print(Some(&path), &text)
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&pages)?);
            Ok(())
        }
    }
}

async fn run_generate(state: &AppState, args: GenerateArgs) -> Result<()> {
    let pages = load_pages(state, &args.file, args.input)?;
    let style: StyleConfig = args.style.into();

    let batch = state
        .image_generation_use_case
        .generate_for_outline(&state.generation_config, &pages, &style)
        .await?;

    if !batch.failed_pages.is_empty() {
        eprintln!("No image for pages: {:?}", batch.failed_pages);
    }
    if batch.images.is_empty() {
        anyhow::bail!("No images were generated");
    }

    let run_dir = ensure_run_dir(&state.config.output.dir, Utc::now())?;
    let images: Vec<_> = batch.images.iter().map(|p| p.image.clone()).collect();
    for path in save_images(&run_dir, &images)? {
        println!("{}", path.display());
    }

    if args.upload {
        let report = state
            .drive_export_use_case
            .export(
                args.folder.as_deref(),
                None,
                files_from_page_images(&batch.images),
            )
            .await?;
        println!("Uploaded to folder {} ({})", report.folder_name, report.folder_id);
        for file in &report.files {
            println!("{} -> {}", file.name, file.url);
        }
    }
    Ok(())
}

async fn run_images(state: &AppState, args: ImagesArgs) -> Result<()> {
    let mut request = ImageRequest::new(args.prompt, args.style.into(), args.count);
    if let Some(path) = &args.reference {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Could not read reference image {}", path.display()))?;
        request = request.with_reference_image(bytes);
    }

    let images = state
        .image_generation_use_case
        .generate_variations(&state.generation_config, &request)
        .await?;
    if images.is_empty() {
        anyhow::bail!("No images were generated");
    }
    if images.len() < request.count as usize {
        eprintln!("Generated {} of {} images", images.len(), request.count);
    }

    let run_dir = ensure_run_dir(&state.config.output.dir, Utc::now())?;
    for path in save_images(&run_dir, &images)? {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_api_key(state: &AppState, command: ApiKeyCommand) -> Result<()> {
    match command {
        ApiKeyCommand::Set { key, provider } => {
            state.config_service.save_api_key(&provider, key.trim())?;
            println!("Stored API key for {}", provider);
        }
        ApiKeyCommand::Delete { provider } => {
            state.config_service.delete_api_key(&provider)?;
            println!("Removed API key for {}", provider);
        }
        ApiKeyCommand::Status { provider } => match state.config_service.get_api_key(&provider) {
            Ok(_) => println!("An API key is stored for {}", provider),
            Err(AppError::NotFound(_)) => println!("No API key stored for {}", provider),
            Err(err) => return Err(err.into()),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::csv::Delimiter;

    #[test]
    fn test_parse_generate_command() {
        let cli = Cli::try_parse_from([
            "slidecanvas",
            "generate",
            "deck.csv",
            "--aspect",
            "square",
            "--no-text",
            "--upload",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate(args) => {
                assert!(args.upload);
                let style: StyleConfig = args.style.into();
                assert!(!style.include_text);
                assert_eq!(style.aspect_ratio.as_str(), "1:1");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_edit_command() {
        let cli = Cli::try_parse_from([
            "slidecanvas",
            "--config",
            "custom.toml",
            "edit",
            "deck.csv",
            "--page",
            "2",
            "--field",
            "mood",
            "--value",
            "calm",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Edit(ref a) if a.page == 2 && a.field == "mood"));
    }

    #[test]
    fn test_parse_import_delimiter() {
        let cli = Cli::try_parse_from(["slidecanvas", "import", "deck.tsv", "--delimiter", "auto"])
            .unwrap();
        match cli.command {
            Commands::Import(args) => assert_eq!(args.input.delimiter, Some(Delimiter::Detect)),
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["slidecanvas", "export", "deck.csv"]).unwrap();
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.input.delimiter, None);
                assert_eq!(args.output_delimiter, ',');
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["slidecanvas", "import", "x.csv", "--delimiter", ";;"]).is_err());
    }

    #[test]
    fn test_parse_api_key_commands() {
        let cli = Cli::try_parse_from(["slidecanvas", "api-key", "set", "abc123"]).unwrap();
        match cli.command {
            Commands::ApiKey(ApiKeyCommand::Set { key, provider }) => {
                assert_eq!(key, "abc123");
                assert_eq!(provider, "google");
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["slidecanvas", "api-key", "delete", "--provider", "other"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::ApiKey(ApiKeyCommand::Delete { ref provider }) if provider == "other"
        ));
    }

    #[test]
    fn test_output_delimiter_must_be_ascii() {
        assert!(exporter('\t').is_ok());
        assert!(exporter('、').is_err());
        assert!(exporter('"').is_err());
    }
}
