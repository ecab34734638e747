//! Dump the layout of decoded pages
//!
//! Reads a JSON array of page inputs (graphics and glyph runs, as produced by
//! a content-stream decoder) and prints the reconstructed layout.
//!
//! Usage:
//!   cargo run --release --bin dump_layout -- pages.json
//!   cargo run --release --bin dump_layout -- --text pages.json
//!   cargo run --release --bin dump_layout -- --summary --strategy simple - < pages.json

use page_oxide::elements::PageInput;
use page_oxide::pipeline::{
    JsonConverter, LayoutAnalyzer, LayoutConfig, OutputConverter, PlainTextConverter,
    ReadingOrderStrategyType,
};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Json,
    Text,
    Summary,
}

struct DumpConfig {
    input: Option<PathBuf>,
    mode: OutputMode,
    pretty: bool,
    indent: bool,
    strategy: ReadingOrderStrategyType,
    max_primitives: Option<usize>,
    verbose: bool,
}

impl DumpConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self {
            input: None,
            mode: OutputMode::Json,
            pretty: false,
            indent: false,
            strategy: ReadingOrderStrategyType::Smart,
            max_primitives: LayoutConfig::default().max_primitives,
            verbose: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--text" => config.mode = OutputMode::Text,
                "--json" => config.mode = OutputMode::Json,
                "--summary" => config.mode = OutputMode::Summary,
                "--pretty" => config.pretty = true,
                "--indent" => config.indent = true,
                "--strategy" => {
                    i += 1;
                    config.strategy = match args.get(i).map(String::as_str) {
                        Some("smart") => ReadingOrderStrategyType::Smart,
                        Some("simple") => ReadingOrderStrategyType::Simple,
                        other => return Err(format!("unknown strategy: {:?}", other)),
                    };
                },
                "--max-primitives" => {
                    i += 1;
                    config.max_primitives = match args.get(i).map(String::as_str) {
                        Some("none") => None,
                        Some(n) => Some(n.parse().map_err(|e| format!("--max-primitives: {}", e))?),
                        None => return Err("--max-primitives needs a value".to_string()),
                    };
                },
                "--verbose" | "-v" => config.verbose = true,
                "-" => config.input = None,
                path if !path.starts_with('-') => config.input = Some(PathBuf::from(path)),
                flag => return Err(format!("unknown option: {}", flag)),
            }
            i += 1;
        }
        Ok(config)
    }

    fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::default()
            .with_reading_order(self.strategy)
            .with_max_primitives(self.max_primitives)
    }
}

fn read_pages(input: Option<&PathBuf>) -> page_oxide::Result<Vec<PageInput>> {
    let pages = match input {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            serde_json::from_str(&buffer)?
        },
    };
    Ok(pages)
}

fn run(config: &DumpConfig) -> page_oxide::Result<()> {
    let start = Instant::now();
    let pages = read_pages(config.input.as_ref())?;
    let analyzer = LayoutAnalyzer::with_config(config.layout_config());
    let layouts = analyzer.analyze_pages(&pages)?;

    if config.verbose {
        eprintln!(
            "Analyzed {} pages in {:.2}ms",
            layouts.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    let output = match config.mode {
        OutputMode::Json => {
            let converter = if config.pretty { JsonConverter::new().pretty() } else { JsonConverter::new() };
            let mut json = converter.convert_all(&layouts)?;
            json.push('\n');
            json
        },
        OutputMode::Text => PlainTextConverter::new()
            .with_indent(config.indent)
            .convert_all(&layouts)?,
        OutputMode::Summary => layouts
            .iter()
            .enumerate()
            .map(|(i, layout)| format!("page {}: {}\n", i + 1, layout.summary()))
            .collect(),
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(output.as_bytes())?;
    handle.flush()?;
    Ok(())
}

fn main() {
    env_logger::init();

    let config = match DumpConfig::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!(
                "Usage: dump_layout [--json|--text|--summary] [--pretty] [--indent] \
                 [--strategy smart|simple] [--max-primitives N|none] [-v] [FILE|-]"
            );
            std::process::exit(2);
        },
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
