//! costlens command-line views
//!
//! Usage:
//!   costlens --dataset queries --sort display --desc --limit 5
//!   costlens --dataset queries --group pattern --sum display --mode credits
//!   costlens --input tables.json --dataset tables --filter database=sales --json

use clap::Parser;
use std::path::PathBuf;

use costlens::display::DisplayMode;
use costlens::query::{FilterSpec, GroupOrder, GroupSpec, SortDirection, SortKey, SortSpec};
use costlens::render::render_table;
use costlens::source::{self, Dataset};
use costlens::{MissingFieldPolicy, RecordListProcessor, ViewConfig, ViewRequest};

#[derive(Parser, Debug)]
#[command(name = "costlens")]
#[command(about = "Sorted, filtered and grouped views over warehouse cost records")]
#[command(version)]
struct Args {
    /// Dataset whose schema (and, without --input, sample rows) to use
    #[arg(short, long, default_value = "queries")]
    dataset: Dataset,

    /// JSON file holding an array of rows for the dataset
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Numeric field driving display-keyed sorts and sums
    #[arg(short, long, default_value = "cost")]
    mode: DisplayMode,

    /// Sort field, or "display" for the display-mode field
    #[arg(short, long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Substring filter as field=text, case-insensitive
    #[arg(short, long)]
    filter: Option<String>,

    /// Group rows by this field
    #[arg(short, long)]
    group: Option<String>,

    /// Field to sum per group ("display" for the display-mode field); repeatable
    #[arg(long = "sum", requires = "group")]
    sums: Vec<String>,

    /// Order groups by member count instead of the first summed field
    #[arg(long, requires = "group")]
    by_count: bool,

    /// Keep at most this many rows or groups
    #[arg(short, long)]
    limit: Option<usize>,

    /// Sort records lacking the sort field last instead of failing
    #[arg(long)]
    lenient: bool,

    /// Print chart points for the display mode instead of a table
    #[arg(long, conflicts_with = "group")]
    chart: bool,

    /// Emit JSON instead of a text table
    #[arg(long)]
    json: bool,
}

fn key_arg(raw: &str) -> SortKey {
    if raw.eq_ignore_ascii_case("display") {
        SortKey::Display
    } else {
        SortKey::field(raw)
    }
}

fn run(args: Args) -> costlens::Result<()> {
    let schema = args.dataset.schema();
    let records = match &args.input {
        Some(path) => source::load_json_records(path, &schema)?,
        None => args.dataset.records(),
    };

    let config = ViewConfig {
        mode: args.mode,
        missing_field: if args.lenient {
            MissingFieldPolicy::SortLast
        } else {
            MissingFieldPolicy::Fail
        },
        limit: args.limit,
    };
    log::info!("{} {} records, mode {}", records.len(), args.dataset, config.mode);
    let processor = RecordListProcessor::new(config);

    let mut request = ViewRequest::new();
    if let Some(raw) = &args.filter {
        request = request.filter(FilterSpec::parse(raw)?);
    }
    if let Some(raw) = &args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        request = request.sort(SortSpec::new(key_arg(raw), direction));
    }
    if let Some(key) = &args.group {
        let mut spec = GroupSpec::new(key.as_str());
        spec.sums = args.sums.iter().map(|s| key_arg(s)).collect();
        if args.by_count {
            spec = spec.order(GroupOrder::Count);
        }
        request = request.group(spec);
    }

    if args.chart {
        let points = processor.chart(&records, &request, &schema.id_field, args.dataset.label_field())?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&points)?);
        } else {
            for p in points {
                println!("{:<32} {:>12.2}  ({})", p.label, p.value, p.id);
            }
        }
        return Ok(());
    }

    let view = processor.process(&records, &request)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let columns: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        print!("{}", render_table(&view, &columns));
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("costlens: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_options_require_group() {
        assert!(Args::try_parse_from(["costlens", "--sum", "cost"]).is_err());
        assert!(Args::try_parse_from(["costlens", "--by-count"]).is_err());
        assert!(Args::try_parse_from(["costlens", "--chart", "--group", "pattern"]).is_err());

        let args = Args::try_parse_from(["costlens", "--group", "pattern", "--sum", "display", "--by-count"]).unwrap();
        assert_eq!(args.sums, vec!["display"]);
        assert!(args.by_count);
    }

    #[test]
    fn test_chart_uses_view_flags() {
        let args = Args::try_parse_from([
            "costlens", "--dataset", "accounts", "--chart", "--sort", "display", "--limit", "1", "--filter", "name=eu",
        ])
        .unwrap();
        assert!(run(args).is_ok());

        let args = Args::try_parse_from(["costlens", "--dataset", "accounts", "--chart", "--sort", "region"]).unwrap();
        assert!(run(args).is_ok());
    }
}
