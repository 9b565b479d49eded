use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use mio_core::core_api::{CoreErrorCode, Engine};
use mio_core::extract::{DEFAULT_OUTDIR, ExtractOptions, Extractor};
use mio_core::layout::DESCRIPTORS;
use mio_core::naming::DEFAULT_TEMPLATE;
use mio_render::{
    TextRenderOptions, render_extract_json, render_extract_text, render_scan_json,
    render_scan_text,
};
use serde_json::Value as JsonValue;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "SAVE")]
    path: PathBuf,
    /// Directory that receives one subdirectory per category.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTDIR)]
    outdir: PathBuf,
    /// Filename format; available variables are {name}, {brand}, {author}, {code}.
    #[arg(long, value_name = "TEMPLATE", default_value = DEFAULT_TEMPLATE)]
    format: String,
    /// Overwrite existing files.
    #[arg(
        long,
        value_name = "BOOL",
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    overwrite: bool,
    /// Enable debug output.
    #[arg(long)]
    debug: bool,
    /// List stored items without writing anything.
    #[arg(long)]
    list: bool,
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            outdir: self.outdir.clone(),
            template: self.format.clone(),
            overwrite: self.overwrite,
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(value: &JsonValue) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);
    let text_options = TextRenderOptions { verbose: cli.debug };

    let mut session = Engine::new().open_path(&cli.path).unwrap_or_else(|e| {
        match e.code {
            CoreErrorCode::FormatMismatch => eprintln!(
                "Error: {} does not appear to be a WarioWare D.I.Y. save",
                cli.path.display()
            ),
            _ => eprintln!("Error: {}", e.message),
        }
        process::exit(1);
    });

    if cli.list {
        let report = session.scan(&DESCRIPTORS).unwrap_or_else(|e| {
            eprintln!("Error reading save file: {e}");
            process::exit(1);
        });
        if cli.json {
            print_json(&render_scan_json(&report));
        } else {
            print!("{}", render_scan_text(&report, text_options));
        }
        return;
    }

    let options = cli.extract_options();
    debug!(?options, "extracting");
    let extractor = Extractor::new(options);
    let report = extractor
        .run(&mut session, &DESCRIPTORS)
        .unwrap_or_else(|e| {
            eprintln!("Error reading save file: {e}");
            process::exit(1);
        });

    if cli.json {
        print_json(&render_extract_json(&report));
    } else {
        print!("{}", render_extract_text(&report, text_options));
    }
}
