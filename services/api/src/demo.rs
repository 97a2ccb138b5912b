use crate::infra::{
    advisor_from_app_config, build_advisor, load_catalog, parse_locale, read_preferences,
};
use chrono::Local;
use clap::Args;
use realty_ai::advisory::{Advisory, AdvisoryReport};
use realty_ai::catalog::Catalog;
use realty_ai::config::{AppConfig, NarrativeConfig, NarrativeProviderKind};
use realty_ai::error::AppError;
use realty_ai::matching::{
    BudgetRange, ClientPreferences, LocationMatchMode, MatchEngine, MatchingConfig,
    PropertyListing, PropertyType, ReasonLocale, ScoredMatch,
};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// JSON file holding the client preferences
    #[arg(long)]
    pub(crate) preferences: PathBuf,
    /// CSV catalog to rank (defaults to the built-in inventory)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Also request advisor commentary from the configured narrative provider
    #[arg(long)]
    pub(crate) advise: bool,
    /// Language of the match reasons (en or vi); overrides MATCH_REASON_LOCALE
    #[arg(long, value_parser = parse_locale)]
    pub(crate) locale: Option<ReasonLocale>,
    /// Print the result as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// CSV catalog to list (defaults to the built-in inventory)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Language of the match reasons and commentary (en or vi)
    #[arg(long, value_parser = parse_locale)]
    pub(crate) locale: Option<ReasonLocale>,
    /// Use the configured narrative provider instead of the offline responder
    #[arg(long)]
    pub(crate) live: bool,
}

pub(crate) async fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        preferences,
        catalog,
        advise,
        locale,
        json,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(locale) = locale {
        config.matching.locale = locale;
    }

    let preferences = read_preferences(&preferences)?;
    let catalog = load_catalog(catalog.as_ref())?;

    if advise {
        let advisor = advisor_from_app_config(&config)?;
        let report = advisor.advise(&preferences, catalog.listings()).await;
        if json {
            print_json(&report);
        } else {
            render_report(&report, catalog.len());
        }
        return Ok(());
    }

    let matches = MatchEngine::new(config.matching).rank(&preferences, catalog.listings());
    if json {
        print_json(&matches);
    } else {
        render_matches(&matches, catalog.len());
    }
    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog.as_ref())?;
    render_catalog(&catalog);
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { locale, live } = args;

    let narrative_config = if live {
        AppConfig::load()?.narrative
    } else {
        NarrativeConfig {
            provider: NarrativeProviderKind::Canned,
            ..NarrativeConfig::default()
        }
    };
    let matching = MatchingConfig {
        location_mode: LocationMatchMode::Folded,
        locale: locale.unwrap_or_default(),
    };
    let advisor = build_advisor(matching, &narrative_config, None)?;

    let catalog = Catalog::seed();
    println!("Property advisor demo");
    render_catalog(&catalog);

    let preferences = demo_preferences();
    println!("\nClient brief");
    render_preferences(&preferences);

    let report = advisor.advise(&preferences, catalog.listings()).await;
    println!();
    render_report(&report, catalog.len());
    Ok(())
}

/// Budget 3-6 billion VND, District 9 apartment of at least 70 m².
fn demo_preferences() -> ClientPreferences {
    ClientPreferences {
        budget: BudgetRange::new(3_000_000_000, 6_000_000_000),
        locations: BTreeSet::from(["Quận 9".to_string()]),
        property_types: BTreeSet::from([PropertyType::Apartment]),
        min_area: Some(70.0),
        bedrooms: None,
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("JSON output unavailable: {err}"),
    }
}

fn render_catalog(catalog: &Catalog) {
    println!("Catalog ({} listings)", catalog.len());
    for listing in catalog.listings() {
        println!("- {}", describe_listing(listing));
    }
}

fn render_preferences(preferences: &ClientPreferences) {
    println!(
        "- Budget: {} - {}",
        format_vnd(preferences.budget.min),
        format_vnd(preferences.budget.max)
    );
    let locations: Vec<&str> = preferences.locations.iter().map(String::as_str).collect();
    println!("- Locations: {}", locations.join(", "));
    let types: Vec<&str> = preferences
        .property_types
        .iter()
        .map(|kind| kind.label())
        .collect();
    println!("- Types: {}", types.join(", "));
    if let Some(min_area) = preferences.min_area {
        println!("- Minimum area: {min_area} m²");
    }
    if let Some(bedrooms) = preferences.bedrooms {
        println!("- Bedrooms: {bedrooms}");
    }
}

fn render_matches(matches: &[ScoredMatch], candidate_count: usize) {
    println!(
        "Ranked matches ({} of {} listings)",
        matches.len(),
        candidate_count
    );
    if matches.is_empty() {
        println!("  No listing satisfied any requirement.");
    }
    for (rank, scored) in matches.iter().enumerate() {
        println!(
            "{:>2}. [{:>3}] {}",
            rank + 1,
            scored.score,
            describe_listing(&scored.listing)
        );
        println!("       {}", scored.reasons.join("; "));
    }
}

fn render_report(report: &AdvisoryReport, candidate_count: usize) {
    render_matches(&report.matches, candidate_count);
    println!(
        "\nAdvisor commentary ({})",
        report.generated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    match &report.advisory {
        Advisory::Generated { provider, text } => {
            println!("[{provider}]");
            println!("{text}");
        }
        Advisory::Unavailable { reason, fallback } => {
            println!("[unavailable: {reason}]");
            println!("{fallback}");
        }
    }
}

fn describe_listing(listing: &PropertyListing) -> String {
    let bedrooms = listing
        .bedrooms
        .map(|count| format!(", {count} BR"))
        .unwrap_or_default();
    format!(
        "{} ({}) | {} | {} | {} m²{} | {}",
        listing.display_name(),
        listing.id,
        listing.location,
        listing.property_type.label(),
        listing.area,
        bedrooms,
        format_vnd(listing.price)
    )
}

fn format_vnd(amount: u64) -> String {
    const BILLION: u64 = 1_000_000_000;
    const MILLION: u64 = 1_000_000;
    if amount >= BILLION {
        format!("{:.2} tỷ VND", amount as f64 / BILLION as f64)
    } else if amount >= MILLION {
        format!("{:.0} triệu VND", amount as f64 / MILLION as f64)
    } else {
        format!("{amount} VND")
    }
}
