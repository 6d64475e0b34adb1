// SPDX-License-Identifier: MPL-2.0
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sticker_sheet::application::port::ImageSource;
use sticker_sheet::application::StickerSheet;
use sticker_sheet::config::{self, Config};
use sticker_sheet::diagnostics::DiagnosticsCollector;
use sticker_sheet::domain::grid::{CellIndex, LayoutMode, PaperSize, PortableImage, GRID_SIDE};
use sticker_sheet::error::{Error, Result};
use sticker_sheet::infrastructure::{DecodedImageSource, HeadlessCropFactory};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "STICKER_SHEET_LOG";
const DEFAULT_PROJECT: &str = "project.json";

const HELP: &str = "\
sticker-sheet

USAGE:
  sticker-sheet [--config-dir DIR] <COMMAND>

COMMANDS:
  layout <single|quad|unique>        Print which group owns each cell
  import <IMAGE>... [--out <FILE>]   Build a project from 1 to 16 images
         [--paper <letter|4x6|hagaki>] [--inline] [--report <FILE>]
                                     (default output: project.json)
  inspect <FILE>                     Load a project and print its grid

OPTIONS:
  --config-dir DIR   Read settings.toml from DIR
  -h, --help         Print this help

ENVIRONMENT:
  STICKER_SHEET_LOG         tracing filter, e.g. sticker_sheet=debug
  STICKER_SHEET_CONFIG_DIR  configuration directory
";

fn main() -> ExitCode {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut args: pico_args::Arguments) -> Result<()> {
    let config_dir: Option<PathBuf> = args.opt_value_from_str("--config-dir")?;
    let config = config::load(config_dir.as_deref())?;
    init_logging(&config);

    match args.subcommand()?.as_deref() {
        Some("layout") => {
            let mode: LayoutMode = args.free_from_str()?;
            finish_empty(args)?;
            print_layout(mode);
            Ok(())
        }
        Some("import") => {
            let out: PathBuf = args
                .opt_value_from_str("--out")?
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT));
            let paper: Option<PaperSize> = args.opt_value_from_str("--paper")?;
            let report: Option<PathBuf> = args.opt_value_from_str("--report")?;
            let inline = args.contains("--inline");
            let images = args.finish();
            import(&config, images, &out, paper, inline, report)
        }
        Some("inspect") => {
            let path: PathBuf = args.free_from_str()?;
            finish_empty(args)?;
            inspect(&config, path)
        }
        Some(other) => Err(Error::Usage(format!("unknown command '{other}'"))),
        None => {
            print!("{HELP}");
            Ok(())
        }
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn finish_empty(args: pico_args::Arguments) -> Result<()> {
    let rest = args.finish();
    if rest.is_empty() {
        Ok(())
    } else {
        Err(Error::Usage(format!("unexpected arguments: {rest:?}")))
    }
}

fn print_layout(mode: LayoutMode) {
    println!("{mode} ({} groups)", mode.group_count());
    for row in 0..GRID_SIDE {
        let line: Vec<String> = (0..GRID_SIDE)
            .filter_map(|col| CellIndex::from_row_col(row, col))
            .map(|cell| format!("{:>2}", mode.resolve_group(cell).value()))
            .collect();
        println!("  {}", line.join(" "));
    }
}

fn new_sheet(config: &Config) -> StickerSheet<DecodedImageSource, HeadlessCropFactory> {
    let settings = config.grid_settings();
    StickerSheet::new(
        DecodedImageSource::new(),
        HeadlessCropFactory::new(settings.max_crop_scale),
        settings,
    )
}

fn import(
    config: &Config,
    images: Vec<OsString>,
    out: &Path,
    paper: Option<PaperSize>,
    inline: bool,
    report_path: Option<PathBuf>,
) -> Result<()> {
    if images.is_empty() {
        return Err(Error::Usage("import needs at least one image".into()));
    }

    let mut sources = Vec::with_capacity(images.len());
    for image in images {
        let path = PathBuf::from(image);
        if inline {
            sources.push(DecodedImageSource::inline(&path)?);
        } else {
            sources.push(PortableImage::Path(path));
        }
    }

    let mut collector = DiagnosticsCollector::new(config.event_capacity());
    let mut sheet = new_sheet(config).with_diagnostics(collector.handle());
    if let Some(paper) = paper {
        sheet.set_paper_size(paper);
    }

    let count = sources.len();
    let Some(mode) = sheet.grid_mut().import_images(sources) else {
        return Err(Error::Usage("import needs at least one image".into()));
    };
    let report = sheet.grid_mut().settle().unwrap_or_default();
    for (group, err) in &report.failed {
        warn!(%group, error = %err, "image skipped");
    }
    if report.skipped > 0 {
        warn!(skipped = report.skipped, "more images than cells");
    }

    sheet.save_to_file(out)?;
    if let Some(report_path) = report_path {
        collector.process_pending();
        collector.export_to_file(&report_path)?;
    }
    println!(
        "{}: {} of {count} images in {mode} mode",
        out.display(),
        report.assigned.len()
    );
    Ok(())
}

fn inspect(config: &Config, path: PathBuf) -> Result<()> {
    let mut sheet = new_sheet(config);
    sheet.load_from_file(&path)?;
    sheet.grid_mut().settle();

    let grid = sheet.grid();
    println!("{}", path.display());
    println!("  mode:  {}", grid.mode());
    println!("  paper: {}", grid.paper_size());
    for (group, image) in grid.store().iter() {
        let label = image
            .and_then(|image| grid.source().export(image.source))
            .map_or_else(|| "(empty)".to_string(), |p| p.label());
        let zoom = image
            .and_then(|image| image.transform)
            .map_or(100, |t| t.zoom_percent());
        println!("  {group}: {label} @ {zoom}%");
    }
    println!("  stamps: {}", sheet.stamps().len());
    for stamp in sheet.stamps().iter() {
        println!(
            "    {} at ({:.0}, {:.0})",
            stamp.content.as_str(),
            stamp.position.x,
            stamp.position.y
        );
    }
    Ok(())
}
