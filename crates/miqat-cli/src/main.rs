//! miqat-cli: headless renderer for ID-card print documents.
//!
//! Renders the same card markup the web app renders, paginates it, and
//! writes a standalone HTML print document.  Useful for:
//!
//! - Printing from a machine without the web app
//! - Checking card layouts for every size, orientation and design
//! - Producing a pilgrims-by-nationality chart for reports
//!
//! # Usage
//!
//! ```text
//! cargo run --bin miqat-cli -- [OPTIONS] <PILGRIMS_JSON>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use miqat_core::chart::DonutGeometry;
use miqat_core::{
    CardDesign, CardPrintJob, CardSize, Company, Orientation, Package, Pilgrim, PrintMode,
    nationality_breakdown,
};
use miqat_export::{
    ChartSvgMetadata, PrintDocumentOptions, donut_to_svg, paginate, render_job_cards,
    to_print_document,
};

/// Render pilgrim ID cards into a printable HTML document.
///
/// Reads a JSON array of pilgrim records and writes one page per card
/// side, sized exactly to the chosen card.
#[derive(Parser)]
#[command(name = "miqat-cli", version)]
struct Cli {
    /// JSON file holding an array of pilgrim records.
    pilgrims_json: PathBuf,

    /// JSON file holding the package record.
    #[arg(long)]
    package: Option<PathBuf>,

    /// JSON file holding the company record.
    #[arg(long)]
    company: Option<PathBuf>,

    /// Card size.
    #[arg(long, value_enum, default_value_t = Size::Standard)]
    size: Size,

    /// Card orientation.
    #[arg(long, value_enum, default_value_t = Orient::Landscape)]
    orientation: Orient,

    /// Card design.
    #[arg(long, value_enum, default_value_t = Design::Modern)]
    design: Design,

    /// Print front only, or front and back.
    #[arg(long, value_enum, default_value_t = Sides::Single)]
    mode: Sides,

    /// Open the print dialog automatically when the document loads.
    #[arg(long)]
    auto_print: bool,

    /// Delay before the automatic print dialog, in milliseconds.
    #[arg(long, default_value_t = PrintDocumentOptions::DEFAULT_PRINT_DELAY_MS)]
    print_delay_ms: u32,

    /// Where to write the print document.
    #[arg(long, short, default_value = "cards.html")]
    output: PathBuf,

    /// Also write a pilgrims-by-nationality donut chart to this file.
    #[arg(long)]
    chart_svg: Option<PathBuf>,

    /// Full print document options as a JSON string.
    ///
    /// When provided, `--auto-print` and `--print-delay-ms` are ignored.
    /// The JSON must be a valid `PrintDocumentOptions` serialization;
    /// missing fields take their defaults.
    #[arg(long)]
    config_json: Option<String>,
}

/// Card size selection.
#[derive(Clone, Copy, ValueEnum)]
enum Size {
    /// 85.6 × 54 mm (CR80).
    Standard,
    /// 100 × 70 mm.
    Large,
    /// 101.6 × 76.2 mm (4 × 3 in).
    Badge,
    /// 148 × 105 mm.
    A6,
}

/// Orientation selection.
#[derive(Clone, Copy, ValueEnum)]
enum Orient {
    Landscape,
    Portrait,
}

/// Design selection.
#[derive(Clone, Copy, ValueEnum)]
enum Design {
    Modern,
    Classic,
    Corporate,
    Elegant,
    Minimal,
}

/// Sides selection.
#[derive(Clone, Copy, ValueEnum)]
enum Sides {
    /// Front only.
    Single,
    /// Front followed by back.
    Double,
}

/// Build the print job from CLI arguments.
fn job_from_cli(cli: &Cli, pilgrims: Vec<Pilgrim>) -> CardPrintJob {
    let mut job = CardPrintJob::new(pilgrims);
    job.size = match cli.size {
        Size::Standard => CardSize::STANDARD,
        Size::Large => CardSize::LARGE,
        Size::Badge => CardSize::BADGE,
        Size::A6 => CardSize::A6,
    };
    job.orientation = match cli.orientation {
        Orient::Landscape => Orientation::Landscape,
        Orient::Portrait => Orientation::Portrait,
    };
    let design = match cli.design {
        Design::Modern => CardDesign::Modern,
        Design::Classic => CardDesign::Classic,
        Design::Corporate => CardDesign::Corporate,
        Design::Elegant => CardDesign::Elegant,
        Design::Minimal => CardDesign::Minimal,
    };
    job.design = design.key().to_owned();
    job.print_mode = match cli.mode {
        Sides::Single => PrintMode::Single,
        Sides::Double => PrintMode::Double,
    };
    job
}

/// Build the document options from CLI arguments.
///
/// If `--config-json` is provided it is parsed directly and the
/// individual flags are ignored.
fn options_from_cli(cli: &Cli) -> Result<PrintDocumentOptions, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }
    Ok(PrintDocumentOptions {
        auto_print: cli.auto_print,
        print_delay_ms: cli.print_delay_ms,
        ..PrintDocumentOptions::default()
    })
}

/// Read and parse a JSON file.
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| format!("Error parsing {}: {e}", path.display()))
}

/// Read an optional JSON file, falling back to the default record.
fn read_optional_json<T: serde::de::DeserializeOwned + Default>(
    path: Option<&Path>,
) -> Result<T, String> {
    path.map_or_else(|| Ok(T::default()), read_json)
}

fn run(cli: &Cli) -> Result<(), String> {
    let options = options_from_cli(cli)?;
    let pilgrims: Vec<Pilgrim> = read_json(&cli.pilgrims_json)?;
    let package: Package = read_optional_json(cli.package.as_deref())?;
    let company: Company = read_optional_json(cli.company.as_deref())?;

    let job = job_from_cli(cli, pilgrims);
    if job.is_empty() {
        eprintln!("Warning: {} holds no pilgrims", cli.pilgrims_json.display());
    }

    let cards = render_job_cards(&job, &package, &company);
    let pages = paginate(&cards, job.print_mode);
    let page = job.page_size();
    let html = to_print_document(&pages, page, &options);

    std::fs::write(&cli.output, &html)
        .map_err(|e| format!("Error writing {}: {e}", cli.output.display()))?;

    println!("Pilgrims: {}", job.pilgrims.len());
    println!("Design:   {}", job.design());
    println!("Mode:     {}", job.print_mode.label());
    println!("Pages:    {}", pages.len());
    println!(
        "Page:     {} x {} mm ({}, {})",
        page.width_mm,
        page.height_mm,
        job.size.label,
        job.orientation.label()
    );
    eprintln!(
        "Print document written to {} ({} bytes)",
        cli.output.display(),
        html.len()
    );

    if let Some(ref chart_path) = cli.chart_svg {
        let description = format!("{} pilgrims", job.pilgrims.len());
        let metadata = ChartSvgMetadata {
            title: Some("Pilgrims by nationality"),
            description: Some(&description),
        };
        let svg = donut_to_svg(
            &nationality_breakdown(&job.pilgrims),
            &DonutGeometry::default(),
            &metadata,
        );
        std::fs::write(chart_path, &svg)
            .map_err(|e| format!("Error writing SVG to {}: {e}", chart_path.display()))?;
        eprintln!(
            "SVG written to {} ({} bytes)",
            chart_path.display(),
            svg.len()
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("{msg}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("miqat-cli").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_catalog_defaults() {
        let cli = parse(&["pilgrims.json"]);
        let job = job_from_cli(&cli, vec![Pilgrim::new(1, "A")]);
        let default_job = CardPrintJob::new(vec![Pilgrim::new(1, "A")]);
        assert_eq!(job, default_job);
        assert_eq!(cli.output, PathBuf::from("cards.html"));
    }

    #[test]
    fn flags_select_job_settings() {
        let cli = parse(&[
            "p.json",
            "--size",
            "a6",
            "--orientation",
            "portrait",
            "--design",
            "corporate",
            "--mode",
            "double",
        ]);
        let job = job_from_cli(&cli, Vec::new());
        assert_eq!(job.size, CardSize::A6);
        assert_eq!(job.orientation, Orientation::Portrait);
        assert_eq!(job.design(), CardDesign::Corporate);
        assert_eq!(job.print_mode, PrintMode::Double);
    }

    #[test]
    fn unknown_design_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["miqat-cli", "p.json", "--design", "neon"]);
        assert!(result.is_err());
    }

    #[test]
    fn flags_build_options() {
        let cli = parse(&["p.json", "--auto-print", "--print-delay-ms", "900"]);
        let options = options_from_cli(&cli).unwrap();
        assert!(options.auto_print);
        assert_eq!(options.print_delay_ms, 900);
        assert_eq!(
            options.tailwind_cdn.as_deref(),
            Some(PrintDocumentOptions::DEFAULT_TAILWIND_CDN)
        );
    }

    #[test]
    fn config_json_overrides_flags() {
        let cli = parse(&[
            "p.json",
            "--auto-print",
            "--config-json",
            r#"{"title": "Group B", "tailwind_cdn": null}"#,
        ]);
        let options = options_from_cli(&cli).unwrap();
        assert!(!options.auto_print);
        assert_eq!(options.title, "Group B");
        assert!(options.tailwind_cdn.is_none());
    }

    #[test]
    fn bad_config_json_is_an_error() {
        let cli = parse(&["p.json", "--config-json", "{"]);
        assert!(options_from_cli(&cli).unwrap_err().contains("--config-json"));
    }

    #[test]
    fn missing_optional_file_uses_default() {
        let company: Company = read_optional_json(None).unwrap();
        assert_eq!(company, Company::default());
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = read_json::<Vec<Pilgrim>>(Path::new("/nonexistent/pilgrims.json")).unwrap_err();
        assert!(err.contains("/nonexistent/pilgrims.json"));
    }
}
