use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use contact_sheet::ContactSheetOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "csheet", about = "Image contact sheet generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out every image in a directory as a labeled grid PDF
    Sheet {
        /// Directory containing the images
        input_dir: PathBuf,

        /// Output PDF file
        output: PathBuf,

        /// Rows per page
        #[arg(long)]
        rows: Option<usize>,

        /// Columns per page
        #[arg(long = "cols")]
        columns: Option<usize>,

        /// Page margin in points
        #[arg(long)]
        margin: Option<f32>,

        /// Raster density of each page
        #[arg(long)]
        dpi: Option<f32>,

        /// Label font size in points
        #[arg(long)]
        font_size: Option<f32>,

        /// Label offset from the image corner in points
        #[arg(long)]
        padding: Option<f32>,

        /// Font file to try for labels (repeatable, tried in order)
        #[arg(long = "font")]
        fonts: Vec<String>,

        /// Extra directory to search for fonts (repeatable)
        #[arg(long = "font-dir")]
        font_dirs: Vec<PathBuf>,

        /// Load options from a JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the effective options to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();

    match cli.command {
        Commands::Sheet {
            input_dir,
            output,
            rows,
            columns,
            margin,
            dpi,
            font_size,
            padding,
            fonts,
            font_dirs,
            config,
            save_config,
            stats_only,
        } => {
            let mut options = match &config {
                Some(path) => ContactSheetOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load config: {}", path.display()))?,
                None => ContactSheetOptions::default(),
            };

            // Explicit flags win over the loaded config
            if let Some(rows) = rows {
                options.rows = rows;
            }
            if let Some(columns) = columns {
                options.columns = columns;
            }
            if let Some(margin) = margin {
                options.page.margin_pt = margin;
            }
            if let Some(dpi) = dpi {
                options.page.dpi = dpi;
            }
            if let Some(font_size) = font_size {
                options.label.font_size_pt = font_size;
            }
            if let Some(padding) = padding {
                options.label.padding_pt = padding;
            }
            if !fonts.is_empty() {
                options.font_candidates = fonts;
            }
            options.font_dirs.extend(font_dirs);

            options.validate().context("Invalid options")?;

            if let Some(path) = &save_config {
                options
                    .save(path)
                    .await
                    .with_context(|| format!("Failed to save config: {}", path.display()))?;
                println!("Saved options → {}", path.display());
            }

            let images = contact_sheet::scan_directory(&input_dir, &options.extensions)
                .await
                .with_context(|| format!("Failed to scan {}", input_dir.display()))?;

            let stats = contact_sheet::calculate_statistics(images.len(), options.grid()?)?;
            println!("Contact Sheet Statistics:");
            println!("  Source images: {}", stats.source_images);
            println!("  Images per page: {}", stats.capacity);
            println!("  Output pages: {}", stats.pages);
            println!("  Empty cells: {}", stats.empty_cells);

            if stats_only {
                return Ok(());
            }

            contact_sheet::generate_pdf(images, &options, &output)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Contact sheet → {}", output.display());
        }
    }

    Ok(())
}
