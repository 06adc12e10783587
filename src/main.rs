use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use deadline_extract::case_number::extract_case_id;
use deadline_extract::normalize::normalize;
use deadline_extract::scanner::scan_inputs;
use deadline_extract::segment::segment;
use deadline_extract::{
    CalendarEntry, Config, DateRule, DeadlineParser, ParsedDocument, PlainTextExtractor,
    SourceDocument, TextExtractor,
};

#[derive(Parser)]
#[command(
    name = "deadline_extract",
    about = "Scheduling-order deadline extractor"
)]
struct Cli {
    /// TOML file with a replacement anchor catalog / recognizer settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Parse documents → JSON list of parsed documents
    Extract {
        /// Text files, or directories searched for *.txt
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit flattened all-day calendar entries instead
        #[arg(long)]
        entries: bool,
    },
    /// Show the case number, sections and recognized dates of one document
    Sections {
        file: PathBuf,
    },
    /// Print the active anchor catalog
    Catalog,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // A second logger can only fail to install; nothing to do about it.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Command::Extract {
            paths,
            output,
            entries,
        }) => run_extract(&config, &paths, output.as_deref(), entries),
        Some(Command::Sections { file }) => run_sections(&config, &file),
        Some(Command::Catalog) => run_catalog(&config),
        // Default: extract from current directory
        None => run_extract(&config, &[PathBuf::from(".")], None, false),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => Config::load(p).with_context(|| format!("loading {}", p.display())),
        None => Ok(Config::default()),
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  OUTPUT HELPERS
// ═══════════════════════════════════════════════════════════════════════

fn write_json<T: serde::Serialize>(output: Option<&Path>, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("JSON serialization failed")?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("cannot write {}", path.display()))?;
            eprintln!("  {} ({} bytes)", path.display(), json.len());
        }
        None => println!("{json}"),
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  EXTRACT MODE
// ═══════════════════════════════════════════════════════════════════════

fn run_extract(
    config: &Config,
    paths: &[PathBuf],
    output: Option<&Path>,
    entries: bool,
) -> Result<()> {
    let parser: DeadlineParser = config.build_parser()?;

    let docs = scan_inputs(paths);
    eprintln!("Found {} document(s)", docs.len());

    let parsed = parser.parse_batch(&PlainTextExtractor, &docs);
    let invalid: Vec<&ParsedDocument> = parsed.iter().filter(|p| p.is_invalid()).collect();
    let total_dates: usize = parsed.iter().map(|p| p.dates_count).sum();
    eprintln!(
        "Parsed {} document(s): {} date(s), {} invalid",
        parsed.len(),
        total_dates,
        invalid.len()
    );
    for doc in invalid.iter().take(30) {
        eprintln!("  invalid: {}", doc.filename);
    }
    if invalid.len() > 30 {
        eprintln!("  ... and {} more", invalid.len() - 30);
    }

    if entries {
        let entries: Vec<CalendarEntry> =
            parsed.iter().flat_map(|p| p.calendar_entries()).collect();
        write_json(output, &entries)
    } else {
        write_json(output, &parsed)
    }
}

// ═══════════════════════════════════════════════════════════════════════
//  SECTIONS MODE: debug view of one document
// ═══════════════════════════════════════════════════════════════════════

fn run_sections(config: &Config, file: &Path) -> Result<()> {
    let parser = config.build_parser()?;
    let doc = SourceDocument::file(file.to_path_buf());
    let text = PlainTextExtractor
        .extract_text(&doc)
        .with_context(|| format!("extracting {}", file.display()))?;

    let case = extract_case_id(&text);
    println!(
        "Case: {}",
        if case.is_empty() { "(none)" } else { case.as_str() }
    );

    let normalized = normalize(&text);
    let sections = segment(&normalized, parser.catalog());
    if sections.is_empty() {
        eprintln!("No anchors found in {}", file.display());
        return Ok(());
    }

    for section in &sections {
        let anchor = section.anchor;
        let dates: Vec<String> = parser
            .recognizer()
            .find_dates(&section.text)
            .map(|d| d.to_string())
            .collect();
        println!(
            "── {} (keeps {}{}) ──",
            anchor.title,
            anchor.max_dates,
            if anchor.date_rule == DateRule::FirstOfMonth {
                ", first of month"
            } else {
                ""
            }
        );
        println!("{}", section.text.trim());
        println!("  dates found: [{}]", dates.join(", "));
        println!();
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
//  CATALOG MODE
// ═══════════════════════════════════════════════════════════════════════

fn run_catalog(config: &Config) -> Result<()> {
    let catalog = config.catalog()?;
    let last = catalog.len().saturating_sub(1);
    for (idx, anchor) in catalog.anchors().iter().enumerate() {
        let note = if idx == last {
            "  (ends scan)".to_string()
        } else {
            match anchor.date_rule {
                DateRule::Exact => String::new(),
                DateRule::FirstOfMonth => "  (first of month)".to_string(),
            }
        };
        println!("{:>2}. {} ×{}{}", idx + 1, anchor.title, anchor.max_dates, note);
    }
    Ok(())
}
