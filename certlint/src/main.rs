//! certlint: Command-line tool for linting X.509 certificates.

use anyhow::{Context, Result};
use certlint_lib::{
    global_registry, select, CancelToken, Certificate, Executor, LintSource, Report, RunConfig,
    Status,
};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "certlint",
    version,
    about = "Lint X.509 certificates against CA/Browser Forum, RFC 5280 and community rules",
    long_about = "certlint checks PEM or DER certificates against a registry of lints.\n\
                  Each lint reports pass, notice, warn, error, fatal or NA (not\n\
                  applicable), and the run exits with status 2 when any lint reaches\n\
                  the --fail-on level.\n\n\
                  Input format (PEM vs DER) is auto-detected unless --pem or --der\n\
                  is specified. Reads from stdin when no file is given.\n\
                  Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.",
    after_help = "EXAMPLES:\n\
                  \n  certlint lint cert.pem\
                  \n  certlint lint --json cert.pem\
                  \n  certlint lint --exclude-sources Community cert.pem\
                  \n  certlint lint --recurse --summary certs/\
                  \n  certlint list --sources CABF_BR\
                  \n  cat cert.pem | certlint lint --fail-on warn"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint a certificate, or every certificate file in a directory
    #[command(after_help = "EXIT STATUS:\n\
                      \n  0  no lint reached the --fail-on level\
                      \n  1  usage, configuration or input error\
                      \n  2  at least one lint reached the --fail-on level\
                      \n\nEXAMPLES:\n\
                      \n  certlint lint cert.pem\
                      \n  certlint lint --include e_ext_san_missing --name-filter '^$' cert.pem\
                      \n  certlint lint --config certlint.toml --jobs 4 certs/")]
    Lint {
        /// Certificate file or directory. Reads from stdin if omitted.
        file: Option<PathBuf>,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Force DER input parsing (default: auto-detect)
        #[arg(long, conflicts_with = "pem")]
        der: bool,
        /// Force PEM input parsing (default: auto-detect)
        #[arg(long)]
        pem: bool,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
        /// Only print the per-certificate summary line
        #[arg(long)]
        summary: bool,
        /// Exit with status 2 when any lint reaches this level
        #[arg(long, value_name = "LEVEL", default_value = "error")]
        fail_on: Status,
        /// Recurse into subdirectories (directory mode)
        #[arg(short, long)]
        recurse: bool,
    },
    /// List registered lints
    List {
        /// Only lints from these sources (comma-separated)
        #[arg(long, value_delimiter = ',')]
        sources: Vec<LintSource>,
        /// Only lints whose name matches this regular expression
        #[arg(long, value_name = "REGEX")]
        name_filter: Option<String>,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Flags that shape the lint selection. Each one overrides the matching
/// key of the `--config` file when given.
#[derive(Args, Debug, Default)]
struct SelectionArgs {
    /// TOML file with run configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Always run these lints (comma-separated)
    #[arg(long, value_delimiter = ',')]
    include: Vec<String>,
    /// Never run these lints (comma-separated)
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,
    /// Only run lints from these sources (comma-separated)
    #[arg(long, value_delimiter = ',')]
    sources: Vec<LintSource>,
    /// Skip lints from these sources (comma-separated)
    #[arg(long, value_delimiter = ',')]
    exclude_sources: Vec<LintSource>,
    /// Only run lints whose name matches this regular expression
    #[arg(long, value_name = "REGEX")]
    name_filter: Option<String>,
    /// Also run deprecated lints
    #[arg(long)]
    include_deprecated: bool,
    /// Number of worker threads
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,
}

impl SelectionArgs {
    fn to_run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => RunConfig::default(),
        };
        if !self.include.is_empty() {
            config.include = self.include.clone();
        }
        if !self.exclude.is_empty() {
            config.exclude = self.exclude.clone();
        }
        if !self.sources.is_empty() {
            config.sources = Some(self.sources.iter().copied().collect());
        }
        if !self.exclude_sources.is_empty() {
            config.exclude_sources = self.exclude_sources.iter().copied().collect();
        }
        if self.name_filter.is_some() {
            config.name_filter = self.name_filter.clone();
        }
        if self.include_deprecated {
            config.include_deprecated = true;
        }
        if self.jobs.is_some() {
            config.workers = self.jobs;
        }
        Ok(config)
    }
}

/// Maximum file size for certificate inputs (10 MiB).
const MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

fn read_input(file: Option<&PathBuf>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            let meta = std::fs::metadata(path)
                .with_context(|| format!("Failed to stat file: {}", path.display()))?;
            if meta.len() > MAX_INPUT_BYTES {
                anyhow::bail!(
                    "File too large ({} bytes, max {} bytes): {}",
                    meta.len(),
                    MAX_INPUT_BYTES,
                    path.display()
                );
            }
            std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .take(MAX_INPUT_BYTES)
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn parse_input(input: &[u8], der: bool, pem: bool) -> Result<Certificate> {
    if der {
        Ok(certlint_lib::parse_der(input)?)
    } else if pem {
        Ok(certlint_lib::parse_pem(input)?)
    } else {
        Ok(certlint_lib::parse_cert(input)?)
    }
}

/// Check if a path has a certificate file extension.
fn is_cert_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("pem") || ext.eq_ignore_ascii_case("der")
            || ext.eq_ignore_ascii_case("crt") || ext.eq_ignore_ascii_case("cer")
    )
}

/// Find all certificate files (.pem, .der, .crt, .cer) in a directory.
fn find_cert_files(dir: &Path, recurse: bool) -> Vec<PathBuf> {
    let walker = if recurse {
        walkdir::WalkDir::new(dir)
    } else {
        walkdir::WalkDir::new(dir).max_depth(1)
    };
    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_cert_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Outcome for one file in directory mode.
#[derive(Serialize)]
struct BatchEntry {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha256: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Read and parse every file in parallel, then lint the certificates as one
/// batch. Entries keep the order of `files`.
fn lint_files(executor: &Executor<'_>, files: &[PathBuf], der: bool, pem: bool) -> Vec<BatchEntry> {
    let loaded: Vec<(String, Result<Certificate>)> = files
        .par_iter()
        .map(|f| {
            let cert = read_input(Some(f)).and_then(|data| parse_input(&data, der, pem));
            (f.display().to_string(), cert)
        })
        .collect();

    let mut entries = Vec::with_capacity(loaded.len());
    let mut certs = Vec::with_capacity(loaded.len());
    let mut slots = Vec::with_capacity(loaded.len());
    for (file, cert) in loaded {
        let (sha256, error) = match cert {
            Ok(cert) => {
                slots.push(entries.len());
                let sha256 = cert.fingerprint();
                certs.push(cert);
                (Some(sha256), None)
            }
            Err(e) => (None, Some(format!("{e:#}"))),
        };
        entries.push(BatchEntry {
            file,
            sha256,
            report: None,
            error,
        });
    }

    let outcomes = executor.lint_batch(&certs, &CancelToken::new());
    for (slot, outcome) in slots.into_iter().zip(outcomes) {
        if let Some(entry) = entries.get_mut(slot) {
            match outcome {
                Ok(report) => entry.report = Some(report),
                Err(e) => entry.error = Some(e.to_string()),
            }
        }
    }
    entries
}

/// Process exit status for a set of outcomes: 2 if any report reaches
/// `fail_on`, 1 if any file could not be linted, 0 otherwise.
fn exit_code(entries: &[BatchEntry], fail_on: Status) -> i32 {
    if entries
        .iter()
        .filter_map(|e| e.report.as_ref())
        .any(|r| r.exceeds(fail_on))
    {
        2
    } else if entries.iter().any(|e| e.error.is_some()) {
        1
    } else {
        0
    }
}

fn summary_line(report: &Report) -> String {
    let s = report.summary();
    format!(
        "{} (pass={} notice={} warn={} error={} fatal={} NA={})",
        report.worst_status(),
        s.pass,
        s.notice,
        s.warn,
        s.error,
        s.fatal,
        s.not_applicable
    )
}

/// Text rendering of one report. NA verdicts are left out of the detail lines.
fn format_report(report: &Report, summary_only: bool) -> String {
    let mut out = String::new();
    if !summary_only {
        for (name, result) in report.iter() {
            if result.status == Status::NotApplicable {
                continue;
            }
            out.push_str(&format!("  {:<7} {}", result.status.as_str(), name));
            if let Some(details) = &result.details {
                out.push_str(&format!(": {details}"));
            }
            out.push('\n');
        }
    }
    out
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match &cli.command {
        Commands::Lint {
            file,
            selection,
            der,
            pem,
            json,
            summary,
            fail_on,
            recurse,
        } => {
            let config = selection.to_run_config()?;
            let registry = global_registry()?;
            let executor = Executor::new(
                select(registry, &config).context("Invalid lint selection")?,
                &config,
            )?;
            tracing::debug!(lints = executor.len(), "executor ready");

            // Directory mode: lint all cert files in parallel
            if let Some(path) = file {
                if path.is_dir() {
                    let files = find_cert_files(path, *recurse);
                    if files.is_empty() {
                        anyhow::bail!(
                            "No certificate files (.pem, .der, .crt, .cer) found in {}",
                            path.display()
                        );
                    }
                    let entries = lint_files(&executor, &files, *der, *pem);
                    if *json {
                        println!("{}", serde_json::to_string_pretty(&entries)?);
                    } else {
                        for entry in &entries {
                            match (&entry.report, &entry.error) {
                                (Some(report), _) => {
                                    println!("{}: {}", entry.file, summary_line(report));
                                    print!("{}", format_report(report, *summary));
                                }
                                (None, Some(error)) => eprintln!("{}: FAIL ({})", entry.file, error),
                                (None, None) => {}
                            }
                        }
                    }
                    let code = exit_code(&entries, *fail_on);
                    if code != 0 {
                        std::process::exit(code);
                    }
                    return Ok(());
                }
            }

            // Single file mode
            let input = read_input(file.as_ref())?;
            let cert = parse_input(&input, *der, *pem)?;
            let report = executor.lint(&cert);

            if *json {
                println!("{}", report.to_json()?);
            } else {
                print!("{}", format_report(&report, *summary));
                println!("{}", summary_line(&report));
            }
            if report.exceeds(*fail_on) {
                std::process::exit(2);
            }
        }
        Commands::List {
            sources,
            name_filter,
            json,
        } => {
            let registry = global_registry()?;
            let mut lints: Vec<_> = if sources.is_empty() {
                registry.all().iter().collect()
            } else {
                registry.filter_by_source(&sources.iter().copied().collect())
            };
            if let Some(pattern) = name_filter {
                let re = regex_for(pattern)?;
                lints.retain(|lint| re.is_match(lint.name()));
            }

            if *json {
                let metadata: Vec<_> = lints.iter().map(|lint| lint.metadata()).collect();
                println!("{}", serde_json::to_string_pretty(&metadata)?);
            } else {
                for lint in lints {
                    let meta = lint.metadata();
                    println!(
                        "{:<45} {:<14} {}",
                        meta.name,
                        meta.source,
                        meta.description
                    );
                }
            }
        }
    }

    Ok(())
}

fn regex_for(pattern: &str) -> Result<regex::Regex> {
    regex::Regex::new(pattern).with_context(|| format!("Invalid name filter: '{pattern}'"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn certs_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../testdata/certs")
    }

    fn executor_for(config: &RunConfig) -> Executor<'static> {
        let registry = global_registry().unwrap();
        Executor::new(select(registry, config).unwrap(), config).unwrap()
    }

    // ---- argument parsing ----

    #[test]
    fn lint_flags_parse() {
        let cli = Cli::try_parse_from([
            "certlint",
            "lint",
            "--exclude",
            "e_one,e_two",
            "--sources",
            "cabf_br,RFC5280",
            "--fail-on",
            "warn",
            "--jobs",
            "2",
            "cert.pem",
        ])
        .unwrap();
        let Commands::Lint {
            file,
            selection,
            fail_on,
            ..
        } = cli.command
        else {
            panic!("expected lint command");
        };
        assert_eq!(file, Some(PathBuf::from("cert.pem")));
        assert_eq!(selection.exclude, vec!["e_one", "e_two"]);
        assert_eq!(
            selection.sources,
            vec![LintSource::CabfBaselineRequirements, LintSource::Rfc5280]
        );
        assert_eq!(selection.jobs, Some(2));
        assert_eq!(fail_on, Status::Warn);
    }

    #[test]
    fn fail_on_defaults_to_error() {
        let cli = Cli::try_parse_from(["certlint", "lint"]).unwrap();
        let Commands::Lint { fail_on, .. } = cli.command else {
            panic!("expected lint command");
        };
        assert_eq!(fail_on, Status::Error);
    }

    #[test]
    fn der_and_pem_are_exclusive() {
        let err = Cli::try_parse_from(["certlint", "lint", "--der", "--pem", "cert.pem"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        assert!(Cli::try_parse_from(["certlint", "lint", "--pem", "cert.pem"]).is_ok());
    }

    #[test]
    fn unknown_source_flag_is_rejected() {
        assert!(Cli::try_parse_from(["certlint", "lint", "--sources", "IETF"]).is_err());
        assert!(Cli::try_parse_from(["certlint", "lint", "--fail-on", "loud"]).is_err());
    }

    // ---- configuration layering ----

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("certlint.toml");
        std::fs::write(
            &path,
            "exclude = [\"e_one\"]\nname_filter = \"^e_\"\nworkers = 4\n",
        )
        .unwrap();

        let args = SelectionArgs {
            config: Some(path),
            exclude: vec!["e_two".into()],
            exclude_sources: vec![LintSource::Community],
            ..Default::default()
        };
        let config = args.to_run_config().unwrap();
        assert_eq!(config.exclude, vec!["e_two"]);
        assert_eq!(config.name_filter.as_deref(), Some("^e_"));
        assert_eq!(config.workers, Some(4));
        assert!(config.exclude_sources.contains(&LintSource::Community));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = SelectionArgs {
            config: Some(PathBuf::from("/nonexistent/certlint.toml")),
            ..Default::default()
        };
        assert!(args.to_run_config().is_err());
    }

    // ---- is_cert_file / find_cert_files ----

    #[test]
    fn is_cert_file_extensions() {
        assert!(is_cert_file(Path::new("cert.pem")));
        assert!(is_cert_file(Path::new("cert.DER")));
        assert!(is_cert_file(Path::new("cert.crt")));
        assert!(is_cert_file(Path::new("cert.cer")));
        assert!(!is_cert_file(Path::new("cert.key")));
        assert!(!is_cert_file(Path::new("cert")));
    }

    #[test]
    fn find_cert_files_sorted() {
        let files = find_cert_files(&certs_dir(), false);
        assert!(!files.is_empty(), "should find cert files in testdata/certs");
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted, "files should be sorted");
    }

    #[test]
    fn find_cert_files_recurse() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("top.pem"), "").unwrap();
        std::fs::write(nested.join("deep.der"), "").unwrap();
        std::fs::write(nested.join("notes.txt"), "").unwrap();

        assert_eq!(find_cert_files(dir.path(), false).len(), 1);
        assert_eq!(find_cert_files(dir.path(), true).len(), 2);
    }

    // ---- directory mode ----

    #[test]
    fn lint_files_keeps_order_and_reports_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::copy(certs_dir().join("rsa_1024.pem"), dir.path().join("a.pem")).unwrap();
        std::fs::write(dir.path().join("b.pem"), "not a certificate").unwrap();
        std::fs::copy(certs_dir().join("rsa_2048.pem"), dir.path().join("c.pem")).unwrap();

        let config = RunConfig::default();
        let files = find_cert_files(dir.path(), false);
        let entries = lint_files(&executor_for(&config), &files, false, false);

        assert_eq!(entries.len(), 3);
        assert!(entries[0].file.ends_with("a.pem"));
        assert_eq!(
            entries[0]
                .report
                .as_ref()
                .unwrap()
                .status_of("e_rsa_mod_less_than_2048_bits"),
            Some(Status::Error)
        );
        assert_eq!(entries[0].sha256.as_ref().unwrap().len(), 32 * 3 - 1);
        assert!(entries[1].report.is_none());
        assert!(entries[1].error.is_some());
        assert!(entries[1].sha256.is_none());
        assert!(entries[2].report.as_ref().unwrap().worst_status() < Status::Notice);

        assert_eq!(exit_code(&entries, Status::Error), 2);
        assert_eq!(exit_code(&entries, Status::Fatal), 1);
        assert_eq!(exit_code(&entries[2..], Status::Error), 0);
    }

    // ---- rendering ----

    #[test]
    fn text_report_hides_not_applicable() {
        let data = std::fs::read(certs_dir().join("eku_missing.pem")).unwrap();
        let cert = parse_input(&data, false, true).unwrap();
        let report = executor_for(&RunConfig::default()).lint(&cert);

        let text = format_report(&report, false);
        assert!(text.contains("error   e_sub_cert_eku_missing"));
        assert!(!text.contains("e_ev_san_ip_address_present"));
        assert!(format_report(&report, true).is_empty());
        assert!(summary_line(&report).starts_with("error (pass="));
    }

    #[test]
    fn der_flag_rejects_pem_input() {
        let data = std::fs::read(certs_dir().join("rsa_2048.pem")).unwrap();
        assert!(parse_input(&data, true, false).is_err());
        assert!(parse_input(&data, false, false).is_ok());
    }
}
