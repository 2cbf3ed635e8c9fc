use anyhow::Result;
use bpstat_rs::pipeline::{self, ChartKind};
use bpstat_rs::viz::{self, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use bpstat_rs::{Client, Config, Language, storage};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bpstat",
    version,
    about = "Fetch and chart series from Banco de Portugal's BPstat API"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot a lone series (default: Portuguese GDP at market prices).
    Gdp(ChartArgs),
    /// Plot counterfeit banknotes withdrawn from circulation, one line per face value.
    Notes(ChartArgs),
    /// Plot the total value (M€) of counterfeit banknotes withdrawn from circulation.
    NotesTotal(ChartArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Response language (EN or PT).
    #[arg(short, long, default_value = "EN")]
    lang: Language,
    /// Series ids separated by comma or semicolon (defaults to the chart's own series).
    #[arg(short, long)]
    series: Option<String>,
    /// Chart output path (.svg or .png). Defaults to `<subcommand>.svg`.
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the plot.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,
    /// Height of the plot.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,
    /// Also save the observation table (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// API base URL.
    #[arg(long, default_value = bpstat_rs::config::BPSTAT_API_URL)]
    base_url: String,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Gdp(args) => cmd_chart(ChartKind::SingleSeries, "gdp", args),
        Command::Notes(args) => cmd_chart(ChartKind::FaceValues, "notes", args),
        Command::NotesTotal(args) => cmd_chart(ChartKind::FaceValueTotal, "notes-total", args),
    }
}

fn cmd_chart(kind: ChartKind, name: &str, args: ChartArgs) -> Result<()> {
    let config = Config {
        base_url: args.base_url.clone(),
        ..Config::default()
    }
    .with_language(args.lang);
    let client = Client::new(&config)?;

    let series_ids = match &args.series {
        Some(s) => parse_list(s),
        None => kind.default_series_ids(),
    };
    if series_ids.is_empty() {
        anyhow::bail!("--series lists no ids");
    }

    let today = chrono::Local::now().date_naive();
    let (table, chart) = pipeline::run(kind, &client, &config, &series_ids, today)?;

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&table, path)?,
            "json" => storage::save_json(&table, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        info!("Saved {} rows to {}", table.len(), path.display());
    }

    let plot_path = args
        .plot
        .unwrap_or_else(|| PathBuf::from(format!("{name}.svg")));
    viz::render_chart(
        &chart,
        &plot_path,
        args.width,
        args.height,
        config.language.locale_tag(),
    )?;
    info!("Wrote chart to {}", plot_path.display());

    Ok(())
}
