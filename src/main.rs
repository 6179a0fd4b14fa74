use anyhow::{Context, Result};
use block_splice::batch::{BatchReport, Outcome};
use block_splice::config::{load_from_path, run_config, JobReport, RunError, RunMode};
use block_splice::{logging, transplant, BlockLocator, Document, LiteralMode, ScanOptions};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "block-splice")]
#[command(about = "Transplant named code blocks from a donor file into a target file", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one block from a file
    Extract {
        /// File to search
        file: PathBuf,

        /// Block name
        name: String,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Replace blocks in a target file with the same-named blocks from a donor file
    Splice {
        /// File the new blocks are taken from
        #[arg(short, long)]
        donor: PathBuf,

        /// File whose blocks are replaced
        #[arg(short, long)]
        target: PathBuf,

        /// Block names, processed in order
        #[arg(required = true)]
        blocks: Vec<String>,

        /// Dry run - report what would change without writing the target
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(long)]
        diff: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Run splice jobs from a config file
    Apply {
        /// Config file (otherwise every *.toml in <root>/splices)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Root that workspace-relative job paths resolve against
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Dry run - report what would change without writing targets
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(long)]
        diff: bool,
    },

    /// Check that every job in a config would apply cleanly
    Check {
        /// Config file (otherwise every *.toml in <root>/splices)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Root that workspace-relative job paths resolve against
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ScanArgs {
    /// Keyword introducing a block (repeatable, default: function)
    #[arg(short, long = "keyword")]
    keywords: Vec<String>,

    /// Word allowed before the keyword (repeatable, default: export, async)
    #[arg(short, long = "modifier")]
    modifiers: Vec<String>,

    /// Ignore braces inside string literals and comments
    #[arg(long)]
    literal_aware: bool,
}

impl ScanArgs {
    fn options(&self) -> ScanOptions {
        let mut options = ScanOptions::default();
        if !self.keywords.is_empty() {
            options.keywords = self.keywords.clone();
        }
        if !self.modifiers.is_empty() {
            options.modifiers = self.modifiers.clone();
        }
        if self.literal_aware {
            options.literals = LiteralMode::Aware;
        }
        options
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}", format!("Warning: logging disabled: {e}").yellow());
    }

    match cli.command {
        Commands::Extract { file, name, scan } => cmd_extract(&file, &name, &scan),

        Commands::Splice {
            donor,
            target,
            blocks,
            dry_run,
            diff,
            json,
            scan,
        } => cmd_splice(&donor, &target, &blocks, dry_run, diff, json, &scan),

        Commands::Apply {
            config,
            root,
            dry_run,
            diff,
        } => cmd_apply(config, root, dry_run, diff),

        Commands::Check { config, root } => cmd_check(config, root),
    }
}

/// Helper: Discover all .toml config files in `<root>/splices`.
fn discover_config_files(root: &Path) -> Result<Vec<PathBuf>> {
    let splices_dir = root.join("splices");
    if !splices_dir.exists() {
        anyhow::bail!("No splice config given and {} does not exist", splices_dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&splices_dir).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|s| s.to_str()) == Some("toml")
        {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No .toml splice configs found in {}", splices_dir.display());
    }
    Ok(files)
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    match root {
        Some(path) => path
            .canonicalize()
            .with_context(|| format!("root {} does not exist", path.display())),
        None => std::env::current_dir().context("cannot determine current directory"),
    }
}

fn config_files(config: Option<PathBuf>, root: &Path) -> Result<Vec<PathBuf>> {
    match config {
        Some(path) => Ok(vec![path]),
        None => discover_config_files(root),
    }
}

/// Helper: Show unified diff between original and modified content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (spliced)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => continue,
        };
        print!("{}", sign);
    }
}

/// Print one line per block, in the order the batch processed them.
fn print_outcomes(report: &BatchReport, target: &Path) {
    for outcome in &report.outcomes {
        match outcome.outcome {
            Outcome::Applied if outcome.unchanged => {
                println!("{} Already up to date: {}", "⊙".yellow(), outcome.name);
            }
            Outcome::Applied => {
                println!("{} Replaced {}", "✓".green(), outcome.name);
            }
            Outcome::ApplyFailed => {
                eprintln!(
                    "{} Could not find {} in {}",
                    "✗".red(),
                    outcome.name,
                    target.display()
                );
                if let Some(reason) = &outcome.reason {
                    eprintln!("  {}", reason.dimmed());
                }
            }
            Outcome::ExtractFailed => {
                eprintln!(
                    "{} Could not extract {} from donor",
                    "✗".red(),
                    outcome.name
                );
                if let Some(reason) = &outcome.reason {
                    eprintln!("  {}", reason.dimmed());
                }
            }
        }
    }
}

fn cmd_extract(file: &Path, name: &str, scan: &ScanArgs) -> Result<()> {
    let document =
        Document::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let locator = BlockLocator::new(scan.options());

    match locator.extract(document.as_str(), name) {
        Ok(block) => {
            println!("{}", block.text);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            std::process::exit(1);
        }
    }
}

fn cmd_splice(
    donor_path: &Path,
    target_path: &Path,
    blocks: &[String],
    dry_run: bool,
    show_diff: bool,
    json: bool,
    scan: &ScanArgs,
) -> Result<()> {
    let donor = Document::read(donor_path)
        .with_context(|| format!("failed to read donor {}", donor_path.display()))?;
    let original = Document::read(target_path)
        .with_context(|| format!("failed to read target {}", target_path.display()))?;

    let locator = BlockLocator::new(scan.options());
    let report = transplant(&locator, donor.as_str(), original.clone(), blocks);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if dry_run {
            println!("{}", "[DRY RUN - target will not be written]".cyan());
        }
        print_outcomes(&report, target_path);
    }

    if show_diff && report.document != original {
        display_diff(target_path, original.as_str(), report.document.as_str());
    }

    if !dry_run && report.document != original {
        report
            .document
            .persist(target_path)
            .with_context(|| format!("failed to write {}", target_path.display()))?;
    }

    if !json {
        println!();
        println!("{}", "Summary:".bold());
        println!("  {} applied", format!("{}", report.applied_count()).green());
        println!("  {} failed", format!("{}", report.failed_count()).red());
        println!("  Output size: {} bytes", report.output_len);
    }

    if !report.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_apply(
    config: Option<PathBuf>,
    root: Option<PathBuf>,
    dry_run: bool,
    show_diff: bool,
) -> Result<()> {
    let root = resolve_root(root)?;
    let files = config_files(config, &root)?;
    let mode = if dry_run { RunMode::Check } else { RunMode::Write };

    println!("Root: {}", root.display());
    if dry_run {
        println!("{}", "[DRY RUN - showing what would be applied]".cyan());
    }
    println!();

    let mut total_applied = 0;
    let mut total_failed = 0;

    for config_file in files {
        println!("Loading splices from {}...", config_file.display());
        let config = load_from_path(&config_file)?;

        for (job_id, result) in run_config(&config, &root, mode) {
            match result {
                Ok(job) => {
                    println!("{} {}", "▶".cyan(), job_id.bold());
                    print_outcomes(&job.report, &job.target);
                    total_applied += job.report.applied_count();
                    total_failed += job.report.failed_count();

                    if show_diff && job.changed() {
                        display_diff(
                            &job.target,
                            job.original.as_str(),
                            job.report.document.as_str(),
                        );
                    }
                    print_job_footer(&job, dry_run);
                }
                Err(e) => {
                    eprintln!("{} {}: Error - {}", "✗".red(), job_id, e);
                    if let RunError::Read { path, .. } = &e {
                        eprintln!("  Check that {} exists", path.display());
                    }
                    total_failed += 1;
                }
            }
        }

        println!();
    }

    println!("{}", "Summary:".bold());
    println!("  {} applied", format!("{}", total_applied).green());
    println!("  {} failed", format!("{}", total_failed).red());

    if total_failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn print_job_footer(job: &JobReport, dry_run: bool) {
    let verb = match (job.written, job.changed(), dry_run) {
        (true, _, _) => "Wrote",
        (false, true, true) => "Would write",
        _ => "Unchanged",
    };
    println!(
        "  {} {} ({} bytes)",
        verb.dimmed(),
        job.target.display(),
        job.report.output_len
    );
}

fn cmd_check(config: Option<PathBuf>, root: Option<PathBuf>) -> Result<()> {
    let root = resolve_root(root)?;
    let files = config_files(config, &root)?;

    println!("{}", "Checking splices...".bold());
    println!("Root: {}", root.display());
    println!();

    let mut ready = 0;
    let mut failed = 0;

    for config_file in files {
        let config = load_from_path(&config_file)?;

        for (job_id, result) in run_config(&config, &root, RunMode::Check) {
            match result {
                Ok(job) if job.report.is_success() => {
                    let state = if job.changed() { "ready" } else { "already applied" };
                    println!("{} {}: {}", "✓".green(), job_id, state);
                    ready += 1;
                }
                Ok(job) => {
                    eprintln!(
                        "{} {}: {} block(s) would fail",
                        "✗".red(),
                        job_id,
                        job.report.failed_count()
                    );
                    for outcome in job.report.outcomes.iter().filter(|o| !o.is_applied()) {
                        eprintln!("  - {} ({})", outcome.name, outcome.outcome);
                    }
                    failed += 1;
                }
                Err(e) => {
                    eprintln!("{} {}: Error - {}", "✗".red(), job_id, e);
                    failed += 1;
                }
            }
        }
    }

    println!();
    println!("{}", "Summary:".bold());
    println!("  {} ready", format!("{}", ready).green());
    println!("  {} failing", format!("{}", failed).red());

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
