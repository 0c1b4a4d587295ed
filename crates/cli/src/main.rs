//! CLI tool for turning PDF documents into slide outlines.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use deck_core::text::deck_title_from_filename;
use deck_core::{
    format_summary, DocumentFormat, ExtractionOptions, ImageDetector, OutlineFormatter,
    SlideDeck, SlideExtractor,
};
use deck_pdf::PdfParser;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Output formats for extracted decks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Slide records as JSON
    Json,
    /// Plain-text outline, one block per slide
    Text,
    /// Page, text and image totals only
    Summary,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "slides.json",
            OutputFormat::Text => "slides.txt",
            OutputFormat::Summary => "summary.txt",
        }
    }
}

/// Extract slide content (titles, paragraphs, images) from PDF files.
#[derive(Parser, Debug)]
#[command(name = "pdf-slides")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input PDF file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Split paragraphs on the page's own blank lines
    #[arg(long)]
    preserve_line_breaks: bool,

    /// Only process the first N pages
    #[arg(long)]
    max_pages: Option<usize>,

    /// Viewport scale used for image detection
    #[arg(long, default_value = "1.5")]
    image_scale: f64,

    /// Minimum viewport area (px²) for a page to get an image placeholder
    #[arg(long, default_value = "100000")]
    image_min_area: f64,

    /// Use the document's metadata title as the deck title when present
    #[arg(long)]
    title_from_metadata: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let options = ExtractionOptions::new()
        .with_preserve_line_breaks(args.preserve_line_breaks)
        .with_max_pages(args.max_pages)
        .with_image_detector(
            ImageDetector::new()
                .with_scale(args.image_scale)
                .with_min_area(args.image_min_area),
        );
    let extractor = SlideExtractor::new(options);

    let mut failures = 0;

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        let result = process_file(input_path, &args, &extractor).and_then(|output| {
            if args.print {
                print!("{}", output);
            } else {
                let output_path = get_output_path(input_path, args.output.as_ref(), args.format)?;
                write_output(&output_path, &output)?;
                if args.verbose {
                    eprintln!("Written to: {}", output_path.display());
                }
            }
            Ok(())
        });

        if let Err(e) = result {
            eprintln!("Error processing {}: {:#}", input_path.display(), e);
            failures += 1;
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Process a single PDF file into formatted output.
fn process_file(input_path: &Path, args: &Args, extractor: &SlideExtractor) -> Result<String> {
    let data = std::fs::read(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;

    let format = DocumentFormat::from_magic(&data)
        .or_else(|| {
            input_path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(DocumentFormat::from_extension)
        })
        .ok_or_else(|| anyhow::anyhow!("Could not detect file format"))?;
    log::debug!("Parsing {} as {:?}", input_path.display(), format);

    let filename = input_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let document = PdfParser::new()
        .open(&data, filename)
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let raw_pages = document.pages();

    if args.verbose {
        eprintln!("  Found {} pages", raw_pages.len());
    }

    let metadata_title = if args.title_from_metadata {
        document.title()
    } else {
        None
    };
    let title = metadata_title.unwrap_or_else(|| deck_title_from_filename(filename));

    let pages = extractor.extract_pages(&raw_pages, |progress| {
        log::debug!(
            "Processing page {} of {} ({}%)",
            progress.current_page,
            progress.total_pages,
            progress.percent
        );
    });
    let deck = deck_core::build_deck(title, &pages);

    if args.verbose {
        eprintln!(
            "  Built {} slides with {} images",
            deck.slides.len(),
            deck.total_images
        );
    }

    render(&deck, args.format)
}

/// Render a deck in the requested output format.
fn render(deck: &SlideDeck, format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(deck).context("Failed to serialize slides")?;
            json.push('\n');
            json
        }
        OutputFormat::Text => OutlineFormatter::new().format_with_newline(deck),
        OutputFormat::Summary => format_summary(deck),
    };

    Ok(output)
}

/// Determine the output path for a processed file.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.{}", stem, format.extension());

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::RawPage;

    #[test]
    fn test_output_path_next_to_input() {
        let path = get_output_path(Path::new("talks/intro.pdf"), None, OutputFormat::Json).unwrap();
        assert_eq!(path, PathBuf::from("talks/intro.slides.json"));
    }

    #[test]
    fn test_output_path_in_directory() {
        let dir = std::env::temp_dir().join("pdf-slides-cli-test");
        let path =
            get_output_path(Path::new("intro.pdf"), Some(&dir), OutputFormat::Summary).unwrap();
        assert_eq!(path, dir.join("intro.summary.txt"));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_render_formats() {
        let extractor = SlideExtractor::default();
        let deck = extractor.extract_deck(
            "Intro",
            &[RawPage::new(1, "Welcome aboard. Agenda follows").with_size(612.0, 792.0)],
        );

        let json = render(&deck, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["slides"][0]["title"], "Welcome aboard");
        assert_eq!(value["totalImages"], 1);

        let text = render(&deck, OutputFormat::Text).unwrap();
        assert!(text.starts_with("# 1. Welcome aboard\n"));

        let summary = render(&deck, OutputFormat::Summary).unwrap();
        assert!(summary.starts_with("Pages processed: 1\n"));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "pdf-slides",
            "--format",
            "text",
            "--max-pages",
            "3",
            "a.pdf",
            "b.pdf",
        ])
        .unwrap();

        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.max_pages, Some(3));
        assert_eq!(args.input.len(), 2);
        assert_eq!(args.image_scale, 1.5);
        assert_eq!(args.image_min_area, 100000.0);
    }
}
