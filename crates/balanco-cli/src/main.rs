mod commands;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "balanco",
    version,
    about = "Fill the balance analysis spreadsheet from PDF financial statements"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract balance sheet and income statement figures into the template
    Fill {
        /// PDF statements; the fiscal year is the last four characters of each file name
        #[arg(required = true)]
        pdf_files: Vec<PathBuf>,

        /// Template workbook (modified in place unless --out is given)
        #[arg(short, long, value_name = "XLSX")]
        template: PathBuf,

        /// Copy the template here and fill the copy
        #[arg(short = 'O', long = "out", value_name = "XLSX")]
        out: Option<PathBuf>,

        /// Custom JSON layout file
        #[arg(short, long, value_name = "FILE", conflicts_with = "preset")]
        layout: Option<PathBuf>,

        /// Predefined layout (default: analise-balanco)
        #[arg(short, long, value_name = "NAME")]
        preset: Option<String>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Give up on a PDF whose text extraction takes longer than this
        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,
    },
    /// Show which statement sections a PDF contains
    Sections {
        pdf_file: PathBuf,

        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,
    },
    /// Locate the final balance of one label without touching a workbook
    Extract {
        pdf_file: PathBuf,

        /// Statement line label, e.g. "ATIVO CIRCULANTE"
        #[arg(short = 'L', long)]
        label: String,

        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,
    },
    /// Manage and inspect template layouts
    Layouts {
        #[command(subcommand)]
        action: LayoutsAction,
    },
}

#[derive(Subcommand)]
enum LayoutsAction {
    /// List predefined layouts
    List,
    /// Print the label rows and year columns of a layout
    Show {
        /// Preset name (e.g., "analise-balanco")
        preset: String,
    },
    /// Validate a custom layout file
    Validate {
        /// Path to JSON layout file
        file: PathBuf,
    },
}

fn main() {
    logging::setup_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fill {
            pdf_files,
            template,
            out,
            layout,
            preset,
            output,
            timeout_secs,
        } => commands::fill::run(commands::fill::FillArgs {
            pdf_files,
            template,
            out,
            layout,
            preset,
            output_format: output,
            timeout: Duration::from_secs(timeout_secs),
        }),
        Commands::Sections {
            pdf_file,
            timeout_secs,
        } => commands::sections::run(pdf_file, Duration::from_secs(timeout_secs)),
        Commands::Extract {
            pdf_file,
            label,
            timeout_secs,
        } => commands::extract::run(pdf_file, &label, Duration::from_secs(timeout_secs)),
        Commands::Layouts { action } => match action {
            LayoutsAction::List => commands::layouts::list(),
            LayoutsAction::Show { preset } => commands::layouts::show(&preset),
            LayoutsAction::Validate { file } => commands::layouts::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
