//! reflow CLI - PDF to Word (DOCX) conversion tool

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use reflow::{
    convert_file_with_options, parse_file_with_options, tabular, translate, ConvertOptions,
    DocumentConverter, ParseOptions, PdfToDocxConverter, ReflowOptions,
};

#[derive(Parser)]
#[command(name = "reflow")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert PDF documents to flow-layout Word (DOCX)", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output DOCX file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF to DOCX
    Convert {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (input name with .docx extension if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Skip unreadable pages instead of failing
        #[arg(long)]
        lenient: bool,

        /// Skip embedded images
        #[arg(long)]
        no_images: bool,

        /// Display width for transferred images, in inches
        #[arg(long, default_value = "6.0", value_name = "INCHES")]
        image_width: f32,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Filter rows of an exported JSON sheet by keyword
    Filter {
        /// Input JSON sheet file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Target column name
        #[arg(short, long, value_name = "NAME")]
        column: String,

        /// Keyword matched as a case-sensitive substring
        #[arg(short, long, value_name = "TEXT")]
        keyword: String,

        /// Drop matching rows instead of keeping them
        #[arg(long)]
        negate: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Translate text through the configured translation service
    Translate {
        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: String,

        /// Source language code
        #[arg(long, default_value = "auto")]
        from: String,

        /// Target language code
        #[arg(long, default_value = "en")]
        to: String,

        /// Application id for the translation service
        #[arg(long, env = "REFLOW_APP_ID")]
        app_id: String,

        /// Signing secret for the translation service
        #[arg(long, env = "REFLOW_APP_SECRET", hide_env_values = true)]
        app_secret: String,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            lenient,
            no_images,
            image_width,
        }) => cmd_convert(&input, output.as_deref(), lenient, no_images, image_width),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Filter {
            input,
            column,
            keyword,
            negate,
            output,
        }) => cmd_filter(&input, &column, &keyword, negate, output.as_deref()),
        Some(Commands::Translate {
            text,
            from,
            to,
            app_id,
            app_secret,
        }) => cmd_translate(&text, &from, &to, &app_id, &app_secret),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), false, false, 6.0)
            } else {
                println!("{}", "Usage: reflow <FILE> [OUTPUT]".yellow());
                println!("       reflow --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    lenient: bool,
    no_images: bool,
    image_width: f32,
) -> Result<(), Box<dyn std::error::Error>> {
    let converter = PdfToDocxConverter::new();
    let output_path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| converter.output_file_name(input));

    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let mut parse_options = ParseOptions::new().with_images(!no_images);
    if lenient {
        parse_options = parse_options.lenient();
    }
    let reflow_options = ReflowOptions::new()
        .with_images(!no_images)
        .with_image_width(image_width);
    let options = ConvertOptions::new()
        .with_parse_options(parse_options)
        .with_reflow_options(reflow_options);

    pb.set_message("Converting PDF...");
    let result = convert_file_with_options(input, &options)?;
    pb.inc(1);

    // Stage the output next to its destination, then move it into place so
    // a failed write never leaves a truncated file behind.
    pb.set_message("Writing DOCX...");
    let dir = output_path.parent().unwrap_or_else(|| Path::new("."));
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(&result.data)?;
    staged.persist(&output_path)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} ({} pages, {} bytes)",
        "Saved to".green().bold(),
        output_path.display(),
        result.metadata.page_count,
        result.data.len()
    );

    if !result.warnings.is_empty() {
        println!(
            "\n{} {} asset(s) skipped:",
            "Warning:".yellow().bold(),
            result.warnings.len()
        );
        for warning in &result.warnings {
            println!("  {} {}", "─".dimmed(), warning);
        }
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient so metadata shows even when text extraction fails
    let options = ParseOptions::new().lenient();
    let doc = parse_file_with_options(input, options)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), doc.metadata.pdf_version);
    println!("{}: {}", "Pages".bold(), doc.metadata.page_count);
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if doc.metadata.encrypted { "Yes" } else { "No" }
    );

    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = doc.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref creator) = doc.metadata.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref producer) = doc.metadata.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = doc.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = doc.plain_text();
    let words: usize = text.split_whitespace().count();
    let images: usize = doc
        .pages
        .iter()
        .map(|p| p.blocks.iter().filter(|b| b.is_image()).count())
        .sum();

    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Characters".bold(), text.len());
    println!("{}: {}", "Images".bold(), images);

    Ok(())
}

fn cmd_filter(
    input: &Path,
    column: &str,
    keyword: &str,
    negate: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read_to_string(input)?;
    let mut sheets: Vec<tabular::Sheet> = if data.trim_start().starts_with('[') {
        serde_json::from_str(&data)?
    } else {
        vec![serde_json::from_str(&data)?]
    };

    let filter = if negate {
        tabular::KeywordFilter::drop(column, keyword)
    } else {
        tabular::KeywordFilter::keep(column, keyword)
    };

    let removed = tabular::filter_sheets(&mut sheets, &filter)?;
    let json = serde_json::to_string_pretty(&sheets)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} ({} rows removed)",
            "Saved to".green(),
            path.display(),
            removed
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_translate(
    text: &str,
    from: &str,
    to: &str,
    app_id: &str,
    app_secret: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = translate::TranslateConfig::new(app_id, app_secret);
    let client = translate::TranslateClient::new(config);

    let translated = client.translate(text, from, to)?;
    println!("{}", translated);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "reflow".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF to Word (DOCX) conversion tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/reflow".dimmed());
    println!("License: MIT");
}
