use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use handpump_dashboard::config::Config;
use handpump_dashboard::domain::entities::region::{RegionLevel, RegionPerformance};
use handpump_dashboard::domain::entities::selection::{FilterField, ALL_OPTION};
use handpump_dashboard::infra::notify::notifier_for;
use handpump_dashboard::logging;
use handpump_dashboard::ui::state::filter_state::{FilterDefaults, FilterState};
use handpump_dashboard::usecase::services::aggregate_service::{
    compute_rankings, compute_regional_performance, compute_summary, region_report,
    RankedRegions,
};
use handpump_dashboard::usecase::services::export_service::{
    format_number_with_commas, ExportOutcome, ExportService,
};
use handpump_dashboard::usecase::services::filter_service::requisitions_for;
use handpump_dashboard::usecase::services::import_service::{load_handpumps, load_requisitions};

#[derive(Parser, Debug)]
#[command(version, about = "Handpump installation reports", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Handpump records (csv or xlsx).
    #[arg(long)]
    handpumps: PathBuf,
    /// Requisition records (csv or xlsx).
    #[arg(long)]
    requisitions: Option<PathBuf>,
    #[command(flatten)]
    filters: FilterArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    #[arg(long)]
    district: Option<String>,
    #[arg(long)]
    block: Option<String>,
    #[arg(long)]
    gram_panchayat: Option<String>,
    #[arg(long)]
    village: Option<String>,
    /// `YYYY-YY`; defaults to the current financial year.
    #[arg(long, conflicts_with = "all_years")]
    financial_year: Option<String>,
    #[arg(long)]
    month: Option<String>,
    /// Do not restrict records by financial year.
    #[arg(long)]
    all_years: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Counts for the filtered records.
    Summary,
    /// Top regions by share of active pumps.
    Performance {
        #[arg(long, value_enum, default_value_t = LevelArg::District)]
        level: LevelArg,
    },
    /// Top and bottom regions across the whole collection.
    Rankings,
    /// Write a spreadsheet for the filtered records.
    Export {
        #[arg(long, value_enum)]
        kind: KindArg,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LevelArg {
    District,
    Block,
    GramPanchayat,
}

impl From<LevelArg> for RegionLevel {
    fn from(value: LevelArg) -> Self {
        match value {
            LevelArg::District => RegionLevel::District,
            LevelArg::Block => RegionLevel::Block,
            LevelArg::GramPanchayat => RegionLevel::GramPanchayat,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Handpumps,
    Requisitions,
    DistrictReport,
    BlockReport,
    GramPanchayatReport,
}

fn apply_filters(state: &mut FilterState, args: &FilterArgs) {
    // parents first, each one clears the levels below it
    let location = [
        (FilterField::District, &args.district),
        (FilterField::Block, &args.block),
        (FilterField::GramPanchayat, &args.gram_panchayat),
        (FilterField::Village, &args.village),
    ];
    for (field, value) in location {
        if let Some(value) = value {
            state.set_filter(field, value);
        }
    }
    if args.all_years {
        state.set_filter(FilterField::FinancialYear, ALL_OPTION);
    } else if let Some(financial_year) = &args.financial_year {
        state.set_filter(FilterField::FinancialYear, financial_year);
    }
    if let Some(month) = &args.month {
        state.set_filter(FilterField::Month, month);
    }
}

fn region_name(region: &RegionPerformance) -> String {
    match &region.parent {
        Some(parent) => format!("{} ({parent})", region.name),
        None => region.name.clone(),
    }
}

fn print_regions(title: &str, regions: &[RegionPerformance]) {
    println!("{title}");
    if regions.is_empty() {
        println!("  (none)");
    }
    for (idx, region) in regions.iter().enumerate() {
        println!(
            "  {:>2}. {:<40} {:>3}%  ({}/{} active)",
            idx + 1,
            region_name(region),
            region.performance,
            region.active,
            region.total
        );
    }
}

fn print_ranked(level: RegionLevel, ranked: &RankedRegions) {
    print_regions(&format!("Top {}s", level.label()), &ranked.top);
    print_regions(&format!("Bottom {}s", level.label()), &ranked.bottom);
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    logging::init(&config.logging.level);

    let today = Local::now().date_naive();
    let mut defaults = FilterDefaults::for_date(today, config.filters.first_financial_year);
    if let Some(month) = &config.filters.default_month {
        defaults = defaults.with_month(month);
    }
    let mut state = FilterState::new(defaults);
    apply_filters(&mut state, &cli.filters);

    let all_handpumps = load_handpumps(&cli.handpumps)?;
    let all_requisitions = match &cli.requisitions {
        Some(path) => load_requisitions(path)?,
        None => Vec::new(),
    };
    info!(
        handpumps = all_handpumps.len(),
        requisitions = all_requisitions.len(),
        "records loaded"
    );

    let handpumps = state.filter_records(&all_handpumps);
    let requisitions = requisitions_for(&handpumps, &all_requisitions);

    match cli.command {
        Command::Summary => {
            let summary = compute_summary(&handpumps, &requisitions);
            println!("Handpumps:            {}", summary.total_handpumps);
            println!("  Active:             {}", summary.active_handpumps);
            println!("  Inactive:           {}", summary.inactive_handpumps);
            println!("Requisitions:         {}", summary.total_requisitions);
            println!("  Repair:             {}", summary.repair_requisitions);
            println!("  Rebore:             {}", summary.rebore_requisitions);
            println!("  Pending:            {}", summary.pending_requisitions);
            println!("  Approved:           {}", summary.approved_requisitions);
            println!("  Completed:          {}", summary.completed_requisitions);
            println!(
                "Sanctioned amount:    {}",
                format_number_with_commas(summary.total_sanction_amount, 2)
            );
            println!("Districts:            {}", summary.districts);
            println!("Blocks:               {}", summary.blocks);
            println!("Gram panchayats:      {}", summary.gram_panchayats);
        }
        Command::Performance { level } => {
            let level = RegionLevel::from(level);
            let regions = compute_regional_performance(&handpumps, level);
            print_regions(&format!("{} performance", level.label()), &regions);
        }
        Command::Rankings => {
            let rankings = compute_rankings(&all_handpumps);
            for level in RegionLevel::ALL {
                print_ranked(level, rankings.for_level(level));
            }
        }
        Command::Export { kind } => {
            let service = ExportService::new(
                config.export.writer(),
                notifier_for(config.notices.mode),
            );
            let outcome = match kind {
                KindArg::Handpumps => service.export_handpumps(&handpumps, today),
                KindArg::Requisitions => service.export_requisitions(&requisitions, today),
                KindArg::DistrictReport => service.export_region_report(
                    RegionLevel::District,
                    &region_report(&handpumps, RegionLevel::District),
                    today,
                ),
                KindArg::BlockReport => service.export_region_report(
                    RegionLevel::Block,
                    &region_report(&handpumps, RegionLevel::Block),
                    today,
                ),
                KindArg::GramPanchayatReport => service.export_region_report(
                    RegionLevel::GramPanchayat,
                    &region_report(&handpumps, RegionLevel::GramPanchayat),
                    today,
                ),
            };
            if let ExportOutcome::Written(path) = outcome {
                println!("Exported {}", path.display());
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
