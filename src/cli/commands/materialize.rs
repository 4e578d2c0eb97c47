use crate::adapters::fs::local_store::LocalFileStore;
use crate::cli::{Cli, output};
use crate::config::app_config::AppConfig;
use crate::core::errors::Result;
use crate::core::models::environment::EnvTag;
use crate::core::models::report::{MaterializeReport, Outcome};
use crate::core::services::materializer::Materializer;

/// Execute `createconfig -e <env>`.
///
/// Loads the base-name list, copies each missing environment variant from
/// its template in the target directory, and prints what happened.
pub fn execute(env: &str, args: &Cli) -> Result<()> {
    let env = EnvTag::new(env)?;
    let store = LocalFileStore::new(&args.dir)?;
    let config = AppConfig::load(store.root(), args.config.as_deref())?;

    log::debug!(
        "materializing {} base name(s) for '{env}' in {}",
        config.materialize.names.len(),
        store.root().display()
    );

    let materializer = Materializer::new(
        store,
        config.materialize.names,
        config.materialize.extension,
    );
    let report = materializer.materialize(&env, args.dry_run)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !args.quiet {
        print_report(&report, args.verbose);
    }

    Ok(())
}

fn print_report(report: &MaterializeReport, verbose: bool) {
    let mode = if report.dry_run { " (dry run)" } else { "" };
    output::header(&format!("Materializing environment: {}{mode}", report.env));

    let verb = if report.dry_run { "Would create" } else { "Created" };
    for entry in &report.entries {
        let source = entry.source.display();
        let destination = entry.destination.display();
        match entry.outcome {
            Outcome::Copied => output::success(&format!("{verb} {destination} from {source}")),
            Outcome::SkippedMissingSource if verbose => {
                output::skipped(&format!("{destination}: no template {source}"))
            }
            Outcome::SkippedDestinationExists if verbose => {
                output::skipped(&format!("{destination}: already exists"))
            }
            _ => {}
        }
    }

    let copied = report.copied();
    if copied == 0 {
        println!("  Nothing to copy.");
        return;
    }
    let done = if report.dry_run { "would be created" } else { "created" };
    println!("\n  {copied} file(s) {done}, {} skipped", report.skipped());
}
