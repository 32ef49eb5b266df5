use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use multiformat::{
    config::FormatConfig,
    enums::Format,
    error::{Error, ErrorKind, Result},
    json, parse_file_as,
    utils::write_file,
    xml, Parsed,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file path
    #[arg(short, long)]
    file: String,

    /// Input format; detected from the file extension when omitted
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Indentation width for XML and JSON output (0 = compact)
    #[arg(short, long, default_value_t = 2)]
    indent: i32,

    /// Output file path
    #[arg(short, long)]
    output: Option<String>,

    /// Print the text of the XML element at this slash-separated path,
    /// relative to the root element
    #[arg(short, long)]
    query: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    info!("Reading file: {}", args.file);
    let format = match args.format {
        Some(format) => format,
        None => Format::from_path(&args.file)
            .ok_or_else(|| Error::new(ErrorKind::UnknownFormat))?,
    };
    let parsed = parse_file_as(&args.file, format)?;

    let output = match &parsed {
        Parsed::Xml(doc) => {
            if let Some(err) = doc.error() {
                return Err(err.clone());
            }
            if let Some(path) = &args.query {
                println!("{}", query_text(doc, path));
                return Ok(());
            }
            xml::serialize_with_config(doc, &FormatConfig::from_indent(args.indent))?
        }
        Parsed::Json(value) => {
            json::serialize_with_config(value, &FormatConfig::from_indent(args.indent))
        }
        Parsed::Csv(table) => table.to_csv_string(','),
    };

    if let Some(output_path) = args.output {
        write_file(&output_path, &output)?;
        info!("Wrote {} output to {}", parsed.format(), output_path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Full text of the element found by `path` below the root, or an empty
/// string when the path does not resolve
fn query_text(doc: &xml::Document, path: &str) -> String {
    doc.root()
        .and_then(|root| doc.find_by_path(root, path))
        .and_then(|node| doc.full_text(node))
        .unwrap_or_default()
}
