mod render;
mod tui;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracking_synthesis_core::{
    active_items, export_report, parse_date, parse_kind, AppConfig, ClassRegistry, ExportFormat,
    FileClassRegistry, FileTrackingStore, SynthesisKind, SynthesisReport, SynthesisService,
};

#[derive(Parser)]
#[command(name = "synthesis")]
#[command(about = "Per-student tracking syntheses: day, week, custom period and year to date", long_about = None)]
struct Cli {
    /// Path to a config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Class id, overrides the config
    #[arg(long, global = true)]
    class: Option<String>,
    /// Student id
    #[arg(long, short, global = true)]
    student: Option<String>,
    /// Reference date instead of today (2025-09-01, 01/09/2025, -7d, mon, ...)
    #[arg(long, global = true)]
    date: Option<String>,
    /// Verbose logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List the students of the class
    Students,
    /// Totals of the reference day
    Today,
    /// Totals of the Monday-Friday week holding the reference date
    Week,
    /// Totals of an inclusive date range
    Custom {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Totals since the start of the school year
    Total,
    /// Every synthesis at once
    All,
    /// Export one synthesis to CSV or PDF
    Export {
        /// today, week, custom or total (prefixes accepted)
        kind: String,
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        #[arg(long, default_value = ".")]
        out: PathBuf,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Open the synthesis view with charts
    Tui {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Pdf,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Pdf => ExportFormat::Pdf,
        }
    }
}

fn init_tracing(debug: bool, to_file: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if debug {
        EnvFilter::new("tracking_synthesis_core=debug,synthesis=debug,warn")
    } else {
        EnvFilter::new("tracking_synthesis_core=warn,synthesis=info,warn")
    };

    if to_file {
        // The terminal view owns the screen, so logs go to a file.
        let path = std::env::temp_dir().join("synthesis-tui.log");
        let file = File::create(&path)?;
        fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
    Ok(())
}

fn parse_optional_date(input: &Option<String>, today: NaiveDate) -> Result<Option<NaiveDate>> {
    input.as_deref().map(|d| parse_date(d, today)).transpose()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::All);
    init_tracing(cli.debug, matches!(command, Commands::Tui { .. }))?;

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(class) = cli.class {
        config.class_id = class;
    }

    let now = Local::now().date_naive();
    let today = match &cli.date {
        Some(d) => parse_date(d, now)?,
        None => now,
    };

    let data_dir = config.resolved_data_dir()?;
    info!("Reading class {} from {}", config.class_id, data_dir.display());
    let roster = FileClassRegistry::new(data_dir.clone()).load_class(&config.class_id)?;

    if let Commands::Students = command {
        render::print_students(&roster);
        return Ok(());
    }

    let Some(student_id) = cli.student else {
        println!("Error: a student is required (--student <id>).");
        return Ok(());
    };
    let student = match roster.find_student(&student_id) {
        Ok(student) => student.clone(),
        Err(e) => {
            println!("Error: {}", e);
            return Ok(());
        }
    };
    let items = active_items(&roster.items, &student.specific_items);
    let mut service = SynthesisService::new(FileTrackingStore::new(data_dir), &config);

    match command {
        Commands::Students => {}
        Commands::Today => {
            let result = service.compute_today(&student, &items, today)?;
            render::print_synthesis(&SynthesisReport::from_result(result, &items, &student.name, now));
        }
        Commands::Week => {
            let result = service.compute_week(&student, &items, today)?;
            render::print_synthesis(&SynthesisReport::from_result(result, &items, &student.name, now));
        }
        Commands::Custom { from, to } => {
            let start = parse_optional_date(&from, today)?;
            let end = parse_optional_date(&to, today)?;
            match service.compute_custom(&student, &items, start, end) {
                Ok(result) => render::print_synthesis(&SynthesisReport::from_result(
                    result,
                    &items,
                    &student.name,
                    now,
                )),
                Err(e) => println!("Error: {}", e),
            }
        }
        Commands::Total => {
            let result = service.compute_total(&student, &items, today)?;
            render::print_synthesis(&SynthesisReport::from_result(result, &items, &student.name, now));
        }
        Commands::All => {
            service.load_all(&student, &items, today)?;
            println!("\x1b[1m{}\x1b[0m", student.name);
            for kind in SynthesisKind::ALL {
                if let Some(result) = service.summaries().get(kind) {
                    render::print_synthesis(&SynthesisReport::from_result(
                        result,
                        &items,
                        &student.name,
                        now,
                    ));
                }
            }
        }
        Commands::Export {
            kind,
            format,
            out,
            from,
            to,
        } => {
            let kind = parse_kind(&kind)?;
            let computed = match kind {
                SynthesisKind::Today => service.compute_today(&student, &items, today).map(|_| ()),
                SynthesisKind::Week => service.compute_week(&student, &items, today).map(|_| ()),
                SynthesisKind::Total => service.compute_total(&student, &items, today).map(|_| ()),
                SynthesisKind::Custom => {
                    let (default_start, default_end) =
                        SynthesisService::<FileTrackingStore>::default_custom_range(today);
                    let start = parse_optional_date(&from, today)?.unwrap_or(default_start);
                    let end = parse_optional_date(&to, today)?.unwrap_or(default_end);
                    service.compute_custom(&student, &items, Some(start), Some(end)).map(|_| ())
                }
            };
            if let Err(e) = computed {
                println!("Error: {}", e);
                return Ok(());
            }

            let result = service.summaries().export_view(kind, &items);
            let report = SynthesisReport::from_result(&result, &items, &student.name, now);
            let path = export_report(&report, format.into(), &out)?;
            println!("Exported to {}", path.display());
        }
        Commands::Tui { from, to } => {
            let custom = match (parse_optional_date(&from, today)?, parse_optional_date(&to, today)?) {
                (Some(start), Some(end)) => Some((start, end)),
                _ => None,
            };
            tui::run(service, student, items, today, custom)?;
        }
    }

    Ok(())
}
