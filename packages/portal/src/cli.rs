//! Command-line interface for the portal builder.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{prepare_output_dir, DEFAULT_INPUT, DEFAULT_OUTPUT_DIR, HTML_FILE_NAME};
use crate::error::{PortalError, Result};
use crate::output::{save_data, DataFormat};
use crate::parser::parse_file;
use crate::portal::{build_portal, render_from_data, BuildOptions, BuildReport};

/// Operations Bible portal - Turn an operations markdown document into data and a static site.
#[derive(Parser)]
#[command(name = "opsbible-portal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse the document, save the data file and render the portal.
    Build {
        /// Source markdown document
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Data file format
        #[arg(long, value_enum, default_value_t = DataFormat::Json)]
        format: DataFormat,

        /// Only write the data file
        #[arg(long)]
        no_html: bool,
    },

    /// Parse the document and save the data file.
    Parse {
        /// Source markdown document
        #[arg(default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output: PathBuf,

        /// Data file format
        #[arg(long, value_enum, default_value_t = DataFormat::Json)]
        format: DataFormat,
    },

    /// Render the portal from a JSON data file.
    Render {
        /// JSON data file written by `build` or `parse`
        data: PathBuf,

        /// Output HTML file (default: index.html next to the data file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            format,
            no_html,
        } => build_command(BuildOptions {
            input,
            output_dir: output,
            format,
            render_html: !no_html,
        }),
        Commands::Parse {
            input,
            output,
            format,
        } => parse_command(&input, &output, format),
        Commands::Render { data, output } => render_command(&data, output.as_deref()),
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Format a byte count as KB or MB.
fn human_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    #[allow(clippy::cast_precision_loss)]
    let bytes = bytes as f64;
    if bytes >= KB * KB {
        format!("{:.2} MB", bytes / (KB * KB))
    } else {
        format!("{:.1} KB", bytes / KB)
    }
}

/// Execute the build command.
fn build_command(options: BuildOptions) -> Result<()> {
    println!(
        "{} {}",
        style("Building portal from").bold(),
        style(options.input.display()).cyan()
    );
    println!();

    let pb = spinner();
    pb.set_message("Parsing document...");
    let result = build_portal(&options);
    pb.finish_and_clear();
    let report = result?;

    print_report(&report);

    let failed = report.failed_checks();
    if !failed.is_empty() {
        return Err(PortalError::ValidationFailed(failed));
    }

    println!();
    println!("{}", style("Build complete!").green().bold());
    if let Some(html_path) = &report.html_path {
        println!("Open {} in a browser to view the portal.", html_path.display());
    }
    Ok(())
}

fn print_report(report: &BuildReport) {
    let meta = &report.metadata;
    println!("  Departments: {}", meta.total_departments);
    println!("  Areas: {}", meta.total_areas);
    println!("  Workstreams: {}", meta.total_workstreams);
    println!(
        "  Data file: {} ({})",
        report.data_path.display(),
        human_size(report.data_bytes)
    );

    if let (Some(path), Some(bytes)) = (&report.html_path, report.html_bytes) {
        println!("  Portal: {} ({})", path.display(), human_size(bytes));
        if report.size_warning {
            println!(
                "  {} the portal page is larger than 10 MB",
                style("Warning:").yellow().bold()
            );
        }
    }

    if !report.checks.is_empty() {
        println!();
        println!("{}", style("Validation").bold());
        for check in &report.checks {
            let mark = if check.passed {
                style("✓").green()
            } else {
                style("✗").red()
            };
            println!("  {mark} {}", check.name);
        }
    }
}

/// Execute the parse command.
fn parse_command(input: &Path, output: &Path, format: DataFormat) -> Result<()> {
    let pb = spinner();
    pb.set_message("Parsing document...");

    let doc = match parse_file(input) {
        Ok(doc) => doc,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Saving data file...");
    let saved = prepare_output_dir(output).and_then(|()| save_data(&doc, output, format));
    pb.finish_and_clear();
    let path = saved?;

    println!(
        "Parsed {} departments, {} areas, {} workstreams",
        doc.metadata.total_departments, doc.metadata.total_areas, doc.metadata.total_workstreams
    );
    println!("{} {}", style("Saved to:").green().bold(), path.display());
    Ok(())
}

/// Execute the render command.
fn render_command(data: &Path, output: Option<&Path>) -> Result<()> {
    let html_path = output.map_or_else(
        || data.with_file_name(HTML_FILE_NAME),
        Path::to_path_buf,
    );

    let pb = spinner();
    pb.set_message("Rendering portal...");
    let result = render_from_data(data, &html_path);
    pb.finish_and_clear();
    let bytes = result?;

    println!(
        "{} {} ({})",
        style("Saved to:").green().bold(),
        html_path.display(),
        human_size(bytes)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_build_defaults() {
        let cli = Cli::parse_from(["opsbible-portal", "build"]);

        let Commands::Build {
            input,
            output,
            format,
            no_html,
        } = cli.command
        else {
            panic!("expected build command");
        };
        assert_eq!(input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(output, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(format, DataFormat::Json);
        assert!(!no_html);
    }

    #[test]
    fn test_cli_parse_build_options() {
        let cli = Cli::parse_from([
            "opsbible-portal",
            "build",
            "docs/bible.md",
            "-o",
            "site",
            "--format",
            "yaml",
            "--no-html",
        ]);

        let Commands::Build {
            input,
            output,
            format,
            no_html,
        } = cli.command
        else {
            panic!("expected build command");
        };
        assert_eq!(input, PathBuf::from("docs/bible.md"));
        assert_eq!(output, PathBuf::from("site"));
        assert_eq!(format, DataFormat::Yaml);
        assert!(no_html);
    }

    #[test]
    fn test_cli_parse_render() {
        let cli = Cli::parse_from(["opsbible-portal", "render", "out/data.json"]);

        let Commands::Render { data, output } = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(data, PathBuf::from("out/data.json"));
        assert!(output.is_none());
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["opsbible-portal", "parse", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(512), "0.5 KB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.00 MB");
    }
}
