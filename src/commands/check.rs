use crate::cli::{CheckArgs, Cli};
use crate::config::Config;
use crate::context::{ScanContext, TestFileClassifier};
use crate::output::{
    ColorMode, JsonFormatter, OutputFormat, ScanProgress, StatusFormatter, TextFormatter,
};
use crate::runner::{ScanTarget, ValidationRunner};
use crate::status::{OverallStatus, RuleOutcome, StatusAggregator, StatusReport};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_THRESHOLD_EXCEEDED};

use super::context::{
    build_registry, color_choice_to_mode, discover_files, load_catalog, load_config,
    load_story_graph, resolve_changed_files, write_output,
};

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

pub(crate) fn run_check_impl(args: &CheckArgs, cli: &Cli) -> crate::Result<i32> {
    // 1. Load configuration and apply CLI overrides
    let mut config = load_config(args.config.as_deref(), cli.no_config)?;
    apply_cli_overrides(&mut config, args);

    // 2. Load rules and the scanners they can bind to
    let catalog = load_catalog(&config)?;
    let registry = build_registry(&config);

    // 3. Discover files and build the shared scope
    let classifier = TestFileClassifier::new(&config.test_files.patterns)?;
    let files = discover_files(&args.paths, &config)?;
    tracing::debug!(files = files.len(), rules = catalog.len(), "starting validation");
    let changed = resolve_changed_files(&args.changed, &files);
    let target = ScanTarget::from_paths(files, &classifier).with_changed_files(changed);

    // 4. Run every rule
    let context =
        ScanContext::new(load_story_graph(args.story_graph.as_deref())?).with_classifier(classifier);
    let runner = ValidationRunner::new(&registry)
        .with_context(context)
        .with_jobs(args.jobs)
        .with_max_comparisons(config.cross_file.max_comparisons);

    let progress = ScanProgress::new(catalog.len() as u64, cli.quiet);
    let on_outcome = |outcome: &RuleOutcome| progress.record(outcome);
    let outcomes = runner.run(catalog.rules(), &target, Some(&on_outcome));
    progress.finish();

    // 5. Aggregate, format and write
    let report = StatusAggregator::new(config.status).build(&outcomes);
    let color_mode = color_choice_to_mode(cli.color);
    let output = format_report(args.format, &report, color_mode, cli.verbose)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(exit_code_for(report.status, args.warn_only))
}

pub(crate) fn apply_cli_overrides(config: &mut Config, args: &CheckArgs) {
    if let Some(rules) = &args.rules {
        config.rules.dir.clone_from(rules);
    }
    if let Some(bot) = &args.bot {
        config.rules.bot = Some(bot.clone());
    }
    if let Some(ext) = &args.ext {
        config.scanner.extensions.clone_from(ext);
    }
    config.scanner.exclude.extend(args.exclude.iter().cloned());
    if let Some(max_comparisons) = args.max_comparisons {
        config.cross_file.max_comparisons = max_comparisons;
    }
}

pub(crate) fn format_report(
    format: OutputFormat,
    report: &StatusReport<'_>,
    color_mode: ColorMode,
    verbose: u8,
) -> crate::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, verbose).format(report),
        OutputFormat::Json => JsonFormatter.format(report),
    }
}

pub(crate) const fn exit_code_for(status: OverallStatus, warn_only: bool) -> i32 {
    if !warn_only && status.is_failure() {
        EXIT_THRESHOLD_EXCEEDED
    } else {
        EXIT_SUCCESS
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
