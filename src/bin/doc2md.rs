//! CLI binary for doc2md.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ConversionConfig` / `CleanupConfig` and prints results.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use doc2md::{
    clean_markdown, convert_all, create_readme, expand_paths, find_templates, format_all,
    BatchProgressCallback, BatchReport, CleanupConfig, CommandConverter, ConversionConfig,
    DocumentKind, FileOutcome, NoopProgressCallback,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: one bar for the batch, one log line per file.
struct CliProgressCallback {
    bar: ProgressBar,
    verb: &'static str,
}

impl CliProgressCallback {
    fn new(verb: &'static str) -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} files  \
             ⏱ {elapsed_precise}  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix(verb);
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar, verb }
    }
}

impl BatchProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("{} {total_files} files…", self.verb))
        ));
    }

    fn on_file_start(&self, _index: usize, _total: usize, path: &Path) {
        self.bar.set_message(short_name(path));
    }

    fn on_file_complete(&self, index: usize, total: usize, path: &Path) {
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}",
            green("✓"),
            index,
            total,
            path.display()
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, index: usize, total: usize, path: &Path, error: &str) {
        // Keep long converter messages on one line.
        let msg = error.lines().next().unwrap_or(error);
        let msg = if msg.chars().count() > 80 {
            format!("{}\u{2026}", msg.chars().take(79).collect::<String>())
        } else {
            msg.to_string()
        };
        self.bar.println(format!(
            "  {} {:>3}/{:<3}  {}  {}",
            red("✗"),
            index,
            total,
            path.display(),
            red(&msg)
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        self.bar.finish_and_clear();
        let failed = total_files.saturating_sub(success_count);
        if failed == 0 {
            eprintln!(
                "{} {} files processed",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} files processed  ({} failed)",
                if failed == total_files { red("✘") } else { cyan("⚠") },
                bold(&success_count.to_string()),
                total_files,
                red(&failed.to_string()),
            );
        }
    }
}

fn short_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert every PDF/DOC/DOCX below ./docs into ./converted/<name>/ReadMe.md
  doc2md convert docs --target converted

  # Use pandoc instead of markitdown
  doc2md convert report.docx --converter pandoc --converter-arg=-t --converter-arg=gfm

  # Re-clean existing Markdown in place
  doc2md format converted

  # Preview the cleanup without writing
  doc2md clean raw.md

  # Assemble ReadMe.md from every rm_creator.md template
  doc2md readme projects --force

ENVIRONMENT VARIABLES:
  DOC2MD_TARGET           Target directory for conversions
  DOC2MD_CONVERTER        Converter program (default: markitdown)
  DOC2MD_MARKER           Attribution marker(s) to strip (default: Aspose.Words)
  RUST_LOG                Override the log filter
"#;

/// Convert office documents to Markdown and tidy the result.
#[derive(Parser, Debug)]
#[command(
    name = "doc2md",
    version,
    about = "Convert PDF/DOC/DOCX to Markdown and clean up the generated Markdown",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "DOC2MD_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "DOC2MD_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert documents (files or directories) and clean the result.
    Convert {
        /// PDF/DOC/DOCX/MD files or directories to scan.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Directory receiving one sub-directory per document.
        #[arg(short, long, env = "DOC2MD_TARGET", default_value = ".")]
        target: PathBuf,

        /// Name of the Markdown file inside each conversion directory.
        #[arg(long, env = "DOC2MD_OUTPUT_NAME", default_value = "ReadMe.md")]
        output_name: String,

        /// Reconvert even when a conversion already exists.
        #[arg(short, long, env = "DOC2MD_FORCE")]
        force: bool,

        /// Skip the file-signature check before converting.
        #[arg(long)]
        no_verify: bool,

        /// External converter program; must print Markdown on stdout.
        #[arg(long, env = "DOC2MD_CONVERTER", default_value = "markitdown")]
        converter: String,

        /// Converter argument (repeatable); `{input}` is the source path.
        #[arg(long = "converter-arg", allow_hyphen_values = true)]
        converter_args: Vec<String>,

        #[command(flatten)]
        cleanup: CleanupArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Clean Markdown files (or directories of them) in place.
    Format {
        /// Markdown files or directories to scan.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        cleanup: CleanupArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the cleaned form of a Markdown file (or stdin) without writing.
    Clean {
        /// Input file; reads stdin when omitted.
        file: Option<PathBuf>,

        #[command(flatten)]
        cleanup: CleanupArgs,
    },

    /// Build ReadMe.md files from rm_creator.md templates.
    Readme {
        /// Template files or directories to scan.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Overwrite existing ReadMe.md files.
        #[arg(short, long, env = "DOC2MD_FORCE")]
        force: bool,
    },
}

#[derive(Args, Debug)]
struct CleanupArgs {
    /// Attribution marker to strip (repeatable).
    #[arg(long = "marker", env = "DOC2MD_MARKER", value_delimiter = ',')]
    markers: Vec<String>,

    /// Caption that replaces every image alt text.
    #[arg(long, env = "DOC2MD_CAPTION", default_value = "Illustration")]
    caption: String,

    /// Leave pipe tables as they are.
    #[arg(long)]
    no_tables: bool,

    /// Leave image alt text as it is.
    #[arg(long)]
    no_images: bool,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Print the batch report as JSON on stdout.
    #[arg(long, env = "DOC2MD_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "DOC2MD_NO_PROGRESS")]
    no_progress: bool,
}

impl CleanupArgs {
    fn to_config(&self) -> Result<CleanupConfig> {
        let mut config = CleanupConfig {
            image_caption: self.caption.clone(),
            format_tables: !self.no_tables,
            rewrite_images: !self.no_images,
            ..CleanupConfig::default()
        };
        if !self.markers.is_empty() {
            config.boilerplate_markers = self.markers.clone();
        }
        config.validate().context("Invalid cleanup options")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar provides the per-file feedback; library INFO logs
    // would only interleave with it.
    let show_progress = match &cli.command {
        Command::Convert { output, .. } | Command::Format { output, .. } => {
            !cli.quiet && !output.no_progress && !output.json
        }
        _ => false,
    };
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Convert {
            paths,
            target,
            output_name,
            force,
            no_verify,
            converter,
            converter_args,
            cleanup,
            output,
        } => {
            let config = ConversionConfig::builder()
                .target_dir(target)
                .output_file_name(output_name)
                .force(force)
                .verify_signature(!no_verify)
                .cleanup(cleanup.to_config()?)
                .build()
                .context("Invalid configuration")?;
            let converter = if converter_args.is_empty() {
                CommandConverter {
                    program: converter,
                    ..CommandConverter::default()
                }
            } else {
                CommandConverter::new(converter, converter_args)
            };

            let mut kinds = DocumentKind::CONVERTIBLE.to_vec();
            kinds.push(DocumentKind::Markdown);
            let files = expand_paths(&paths, &kinds).context("Failed to collect documents")?;

            let report = with_progress("Converting", show_progress, |progress| {
                convert_all(&files, &config, &converter, progress)
            });
            finish(&report, &output, cli.quiet)
        }

        Command::Format {
            paths,
            cleanup,
            output,
        } => {
            let config = cleanup.to_config()?;
            let files = expand_paths(&paths, &[DocumentKind::Markdown])
                .context("Failed to collect Markdown files")?;

            let report = with_progress("Formatting", show_progress, |progress| {
                format_all(&files, &config, progress)
            });
            finish(&report, &output, cli.quiet)
        }

        Command::Clean { file, cleanup } => {
            let config = cleanup.to_config()?;
            let raw = match file {
                Some(ref path) => std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };
            let cleaned = clean_markdown(&raw, &config);
            io::stdout()
                .lock()
                .write_all(cleaned.text.as_bytes())
                .context("Failed to write to stdout")?;
            Ok(())
        }

        Command::Readme { paths, force } => {
            let mut templates = Vec::new();
            for path in &paths {
                if path.is_dir() {
                    templates.extend(
                        find_templates(path)
                            .with_context(|| format!("Failed to scan {}", path.display()))?,
                    );
                } else {
                    templates.push(path.clone());
                }
            }

            let mut failed = 0usize;
            for template in &templates {
                match create_readme(template, force) {
                    Ok(outcome) if !cli.quiet => {
                        let mark = if outcome.written { green("✓") } else { dim("·") };
                        eprintln!(
                            "  {} {}  {}",
                            mark,
                            outcome.readme_path.display(),
                            dim(&format!("{} lines", outcome.lines))
                        );
                    }
                    Ok(_) => {}
                    Err(e) => {
                        failed += 1;
                        eprintln!("  {} {}  {}", red("✗"), template.display(), red(&e.to_string()));
                    }
                }
            }
            if failed > 0 {
                anyhow::bail!("{failed}/{} templates failed", templates.len());
            }
            Ok(())
        }
    }
}

/// Run `f` with either the terminal progress bar or a silent callback.
fn with_progress<F>(verb: &'static str, show: bool, f: F) -> BatchReport
where
    F: FnOnce(&dyn BatchProgressCallback) -> BatchReport,
{
    if show {
        f(&CliProgressCallback::new(verb))
    } else {
        f(&NoopProgressCallback)
    }
}

/// Print the report and turn per-file failures into a non-zero exit.
fn finish(report: &BatchReport, output: &OutputArgs, quiet: bool) -> Result<()> {
    if output.json {
        let json = serde_json::to_string_pretty(report).context("Failed to serialise report")?;
        println!("{json}");
    } else if !quiet && output.no_progress {
        for file in &report.files {
            match file {
                FileOutcome::Done {
                    path,
                    markdown_path,
                    warning,
                    ..
                } => {
                    let target = markdown_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(nothing to do)".to_string());
                    match warning {
                        Some(w) => eprintln!("{} {} → {}  {}", cyan("⚠"), path.display(), target, w),
                        None => eprintln!("{} {} → {}", green("✓"), path.display(), target),
                    }
                }
                FileOutcome::Failed { path, error } => {
                    eprintln!("{} {}  {}", red("✗"), path.display(), error)
                }
            }
        }
        eprintln!(
            "Processed {}/{} files in {}ms",
            report.succeeded(),
            report.files.len(),
            report.total_duration_ms
        );
    }

    if report.failed() > 0 {
        anyhow::bail!("{} of {} files failed", report.failed(), report.files.len());
    }
    Ok(())
}
