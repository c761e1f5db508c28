//! Domain Muse - AI-suggested domain names with availability checks
//!
//! Aggregates content, asks an LLM for domain names and checks every name
//! against the registry before showing a ranked table.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use domain_muse::{
    AvailabilityOutcome, AvailabilityResolver, CheckedSuggestion, ContentAggregator, ContentSource,
    DomainGenerator, DomainMuseError, DomainSuggestion, FetchDepth, GenerationRequest,
    ProviderKind, ProviderSettings, ResolverConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::process;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// CLI arguments for domain-muse
#[derive(Parser, Debug)]
#[command(name = "domain-muse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AI-suggested domain names with real-time WHOIS availability checks")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log lookups and provider calls to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate domain names from content and check their availability
    Suggest(SuggestArgs),
    /// Check availability of the given domains
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct SuggestArgs {
    /// Text to brainstorm from (sample headlines are used if nothing is given)
    #[arg(value_name = "WORDS")]
    words: Vec<String>,

    /// Read content from a file, `-` for stdin (repeatable)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    files: Vec<String>,

    /// How much content to feed the model (light or deep)
    #[arg(long, default_value = "light")]
    depth: FetchDepth,

    /// Top-level domain for every suggestion
    #[arg(short, long, default_value = "com")]
    tld: String,

    /// Maximum words in a name
    #[arg(long = "max-words", default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=5))]
    max_words: u8,

    /// Number of names to generate
    #[arg(short = 'n', long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=10))]
    count: u8,

    /// LLM provider (gemini, openai, anthropic, ollama)
    #[arg(short, long)]
    provider: Option<ProviderKind>,

    /// Model name for the selected provider
    #[arg(short, long)]
    model: Option<String>,

    /// API key for the selected provider, overrides the environment
    #[arg(long = "api-key", value_name = "KEY")]
    api_key: Option<String>,

    /// Skip availability checks
    #[arg(long = "no-check")]
    no_check: bool,

    /// Seconds to wait for each registry lookup
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Print results as JSON
    #[arg(short, long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Fully-qualified domains, e.g. example.com
    #[arg(value_name = "DOMAINS", required = true)]
    domains: Vec<String>,

    /// Seconds to wait for each registry lookup
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Print results as JSON
    #[arg(short, long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = domain_muse::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Suggest(args) => run_suggest(args).await,
        Command::Check(args) => run_check(args).await,
    };

    if let Err(e) = result {
        match e.downcast_ref::<DomainMuseError>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("❌ Error: {:#}", e),
        }
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "domain_muse=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Aggregate, generate, check and render
async fn run_suggest(args: SuggestArgs) -> anyhow::Result<()> {
    let mut settings = ProviderSettings::from_env()?;
    settings.apply_overrides(args.provider, args.model.clone(), args.api_key.clone());
    let generator = DomainGenerator::from_settings(&settings)?;
    if let Some(kind) = args.provider.filter(|kind| !generator.has_provider(*kind)) {
        return Err(DomainMuseError::config(format!("Provider not configured: {}", kind)).into());
    }
    tracing::debug!(providers = ?generator.available_providers(), default = %generator.default_provider(), "Providers ready");

    let mut aggregator = ContentAggregator::new(args.depth);
    if !args.words.is_empty() {
        aggregator.add_source(ContentSource::Text(args.words.join(" ")));
    }
    for file in &args.files {
        aggregator.add_source(ContentSource::from_path_arg(file));
    }
    if !aggregator.has_sources() && !args.json {
        eprintln!("📰 No content given, brainstorming from sample headlines");
    }
    let content = aggregator.aggregate()?;

    let request = GenerationRequest::new(content)
        .with_tld(args.tld.as_str())
        .with_max_words(args.max_words)
        .with_count(args.count);

    let spinner = new_spinner(args.json, format!("Generating names with {}...", generator.default_provider()));
    // an explicitly chosen provider is never swapped for another
    let suggestions = if args.provider.is_some() {
        generator.generate(&request).await
    } else {
        generator.generate_with_fallback(&request).await
    };
    spinner.finish_and_clear();
    let suggestions = suggestions.context("AI processing failed")?;

    if args.no_check {
        let results: Vec<CheckedSuggestion> = suggestions.into_iter().map(CheckedSuggestion::unchecked).collect();
        return render(&results, args.json, None);
    }

    let resolver = resolver_with_timeout(args.timeout);
    check_and_render(&resolver, suggestions, args.json).await
}

/// Check domains given on the command line
async fn run_check(args: CheckArgs) -> anyhow::Result<()> {
    let suggestions = args
        .domains
        .iter()
        .map(|domain| DomainSuggestion::new(domain.trim().to_lowercase(), ""))
        .collect();

    let resolver = resolver_with_timeout(args.timeout);
    check_and_render(&resolver, suggestions, args.json).await
}

fn resolver_with_timeout(secs: u64) -> AvailabilityResolver {
    AvailabilityResolver::with_config(ResolverConfig {
        timeout: Duration::from_secs(secs.max(1)),
    })
}

async fn check_and_render(
    resolver: &AvailabilityResolver,
    suggestions: Vec<DomainSuggestion>,
    json: bool,
) -> anyhow::Result<()> {
    let spinner = new_spinner(json, format!("Checking {} domain(s)...", suggestions.len()));
    let check_start = Instant::now();
    let mut results = resolver.check_suggestions(suggestions).await;
    spinner.finish_and_clear();

    if !json {
        render(&results, false, Some(check_start.elapsed()))?;
    }

    // User-level retry for lookups that could not observe the registry
    while !json && offer_retry(&results) {
        let spinner = new_spinner(false, "Checking again...".to_string());
        let check_start = Instant::now();
        resolver.recheck_undetermined(&mut results).await;
        spinner.finish_and_clear();
        render(&results, false, Some(check_start.elapsed()))?;
    }

    if json {
        render(&results, true, None)?;
    }
    Ok(())
}

fn offer_retry(results: &[CheckedSuggestion]) -> bool {
    let pending = results.iter().filter(|r| r.needs_retry()).count();
    if pending == 0 || !std::io::stdin().is_terminal() || !std::io::stdout().is_terminal() {
        return false;
    }

    inquire::Confirm::new(&format!("{} domain(s) could not be checked. Check again?", pending))
        .with_default(true)
        .prompt()
        .unwrap_or(false)
}

fn new_spinner(hidden: bool, message: String) -> ProgressBar {
    if hidden || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn badge(outcome: Option<AvailabilityOutcome>) -> &'static str {
    match outcome {
        Some(AvailabilityOutcome::Available) => "✅ Available",
        Some(AvailabilityOutcome::Taken) => "❌ Taken",
        Some(AvailabilityOutcome::Undetermined) => "⚠️  Unknown (check again)",
        None => "·  Not checked",
    }
}

/// Display results as a table or JSON
fn render(results: &[CheckedSuggestion], json: bool, elapsed: Option<Duration>) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results).context("Failed to encode results")?);
        return Ok(());
    }

    let width = results
        .iter()
        .map(|r| r.name().len())
        .max()
        .unwrap_or(0)
        .max("Suggested Domain".len());

    println!();
    println!("{:<width$}  {:<26}  Reasoning", "Suggested Domain", "Availability", width = width);
    println!("{}", "─".repeat(width + 40));
    for result in results {
        println!(
            "{:<width$}  {:<26}  {}",
            result.name(),
            badge(result.outcome),
            result.suggestion.rationale,
            width = width
        );
    }
    println!();

    let count = |o: AvailabilityOutcome| results.iter().filter(|r| r.outcome == Some(o)).count();
    if let Some(elapsed) = elapsed {
        println!("📈 Summary:");
        println!("   ✅ Available: {}", count(AvailabilityOutcome::Available));
        println!("   ❌ Taken: {}", count(AvailabilityOutcome::Taken));
        let undetermined = count(AvailabilityOutcome::Undetermined);
        if undetermined > 0 {
            println!("   ⚠️  Unknown: {}", undetermined);
        }
        println!("   ⏱️  Total time: {:.2}s", elapsed.as_secs_f32());
        println!();
    }

    Ok(())
}
