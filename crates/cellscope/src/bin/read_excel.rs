use anyhow::{Context, Result};
use cellscope::config::{DEFAULT_FMT, DEFAULT_OUT};
use cellscope::tool::{ReadExcelArgs, read_excel};
use clap::{ArgAction, Parser};
use clap::builder::BoolishValueParser;
use std::path::Path;
use std::process::ExitCode;

const USAGE: &str = "\
usage: read_excel <file> [out] [fmt] [--sheets A,B] [--row-start N] [--row-end N] [--col-start N] [--col-end N] [--sparse true|false]
  out: v=value b=bold f=formula n=font_name z=font_size c=font_color g=fill_color (default vbf)
  fmt: j=JSON t=text (default j)";

#[derive(Parser, Debug)]
#[command(
    name = "read_excel",
    about = "Print workbook cells as JSON or tab-separated text"
)]
struct Cli {
    /// Workbook to read.
    path: Option<String>,

    /// Field letters to emit.
    #[arg(default_value = DEFAULT_OUT)]
    out: String,

    /// Output format: j (JSON) or t (text).
    #[arg(default_value = DEFAULT_FMT)]
    fmt: String,

    /// Comma-separated sheet names; all sheets when omitted.
    #[arg(long, default_value = "")]
    sheets: String,

    /// First row (1-based); 0 uses the sheet's used range.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    row_start: i64,

    /// Last row (inclusive); 0 uses the sheet's used range.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    row_end: i64,

    /// First column (1-based); 0 uses the sheet's used range.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    col_start: i64,

    /// Last column (inclusive); 0 uses the sheet's used range.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    col_end: i64,

    /// Skip blank cells.
    #[arg(long, default_value = "true", action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    sparse: bool,
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    #[cfg(feature = "tracing")]
    init_tracing();

    let Some(path) = cli
        .path
        .map(|p| p.trim().to_string())
        .filter(|p| Path::new(p).exists())
    else {
        eprintln!("{USAGE}");
        return Ok(ExitCode::FAILURE);
    };

    let args = ReadExcelArgs {
        filepath: path,
        out: cli.out.trim().to_string(),
        fmt: cli.fmt.trim().to_string(),
        sheets: cli.sheets,
        row_start: cli.row_start,
        row_end: cli.row_end,
        col_start: cli.col_start,
        col_end: cli.col_end,
        sparse: cli.sparse,
    };
    let output = read_excel(&args).with_context(|| format!("reading {}", args.filepath))?;
    println!("{output}");
    Ok(ExitCode::SUCCESS)
}
