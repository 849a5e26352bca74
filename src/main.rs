//! props-audit binary entry point.
//!
//! ```bash
//! # Audit an asciidoc documentation tree against a Java code tree
//! props-audit audit --docs-root docs --code-root src \
//!     --prefix ogham. --prefix mail. --prefix spring. \
//!     --ignore-doc-matches .tools/.ignore-doc-matches \
//!     --ignore-props .tools/.ignore-props \
//!     --ignore-files .tools/.ignore-files
//!
//! # Show every code location where known keys literally appear
//! props-audit usages --code-root src ogham.smtp.host
//! ```

use anyhow::Result;
use clap::Parser;
use props_audit::cli::{Cli, CodeArgs, Commands, OutputFormat, ScanArgs};
use props_audit::config::AuditConfig;
use props_audit::reconcile::{cross_reference, find_usages, scan_corpus};
use props_audit::report::{render, AuditReport, ReportStyle};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Audit(scan) => run_audit(scan),
        Commands::Usages { code, keys } => run_usages(code, keys),
    }
}

fn build_config(args: &ScanArgs) -> Result<AuditConfig> {
    let mut builder = AuditConfig::builder()
        .docs_root(&args.docs_root)
        .code_root(&args.code.code_root)
        .docs_glob(args.docs_glob.clone())
        .code_glob(args.code.code_glob.clone())
        .key_prefixes(args.prefixes.clone())
        .docs_excluded_files(args.exclude_docs.clone());
    if let Some(path) = &args.ignore_doc_matches {
        builder = builder.ignore_doc_matches(path);
    }
    if let Some(path) = &args.ignore_props {
        builder = builder.ignore_props(path);
    }
    if let Some(path) = &args.code.ignore_files {
        builder = builder.ignore_files(path);
    }
    Ok(builder.build()?)
}

fn run_audit(args: ScanArgs) -> Result<()> {
    let config = build_config(&args)?;
    let docs = scan_corpus(&config.docs)?;
    let code = scan_corpus(&config.code)?;
    let cross = cross_reference(&docs, &code);
    let report = AuditReport::new(docs, code, cross);

    match args.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Console => {
            let style =
                if args.no_color { ReportStyle::plain() } else { ReportStyle::colored() };
            print!("{}", render(&report, &style));
        }
    }
    // Findings are the report's content, not a failure of the tool.
    Ok(())
}

fn run_usages(args: CodeArgs, keys: Vec<String>) -> Result<()> {
    // Only the code corpus is scanned; documentation settings stay out of it.
    let mut builder = AuditConfig::builder()
        .code_root(&args.code_root)
        .code_glob(args.code_glob.clone());
    if let Some(path) = &args.ignore_files {
        builder = builder.ignore_files(path);
    }
    let code = builder.build_code()?;
    let usages = find_usages(&keys, &code)?;
    for (key, locations) in &usages {
        println!("{key}");
        if locations.is_empty() {
            println!("  (no usages found)");
        }
        for location in locations {
            println!(
                "  {}:{}: {}",
                location.file.display(),
                location.line_number,
                location.line.trim_end()
            );
        }
    }
    Ok(())
}
