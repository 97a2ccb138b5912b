use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use realty_ai::advisory::{
    AdvisorSettings, Advisory, ClientId, JsonFileSessionStore, MatchAdvisor, MemorySessionStore,
};
use realty_ai::catalog::Catalog;
use realty_ai::config::{NarrativeConfig, NarrativeProviderKind};
use realty_ai::matching::{
    BudgetRange, ClientPreferences, MatchEngine, MatchingConfig, PropertyType, ReasonLocale,
};
use realty_ai::narrative;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn preferences() -> ClientPreferences {
    ClientPreferences {
        budget: BudgetRange::new(3_000_000_000, 6_000_000_000),
        locations: BTreeSet::from(["Quận 9".to_string()]),
        property_types: BTreeSet::from([PropertyType::Apartment]),
        min_area: Some(70.0),
        bedrooms: None,
    }
}

fn openai_config(base_url: String, timeout: Duration) -> NarrativeConfig {
    NarrativeConfig {
        provider: NarrativeProviderKind::OpenAi,
        openai_api_key: Some("sk-test".to_string()),
        openai_base_url: base_url,
        timeout,
        ..NarrativeConfig::default()
    }
}

#[tokio::test]
async fn openai_commentary_is_attached_to_the_ranking() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Vinhomes Grand Park S5.21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "Lead with Vinhomes Grand Park S5.21."}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = openai_config(server.uri(), Duration::from_secs(5));
    let advisor = MatchAdvisor::new(
        MatchEngine::default(),
        narrative::from_config(&config),
        Arc::new(MemorySessionStore::new()),
        AdvisorSettings::from_config(&config),
    );

    let report = advisor.advise(&preferences(), Catalog::seed().listings()).await;

    assert_eq!(report.matches[0].listing.id.as_str(), "vgp-s5-2108");
    assert_eq!(
        report.advisory,
        Advisory::Generated {
            provider: "openai".to_string(),
            text: "Lead with Vinhomes Grand Park S5.21.".to_string(),
        }
    );
}

#[tokio::test]
async fn slow_provider_falls_back_and_session_is_still_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .set_body_json(json!({ "choices": [{"message": {"content": "late"}}] })),
        )
        .mount(&server)
        .await;

    let config = openai_config(server.uri(), Duration::from_millis(100));
    let dir = tempfile::tempdir().expect("temp dir");
    let advisor = MatchAdvisor::new(
        MatchEngine::new(MatchingConfig {
            locale: ReasonLocale::Vietnamese,
            ..MatchingConfig::default()
        }),
        narrative::from_config(&config),
        Arc::new(JsonFileSessionStore::open(dir.path()).expect("store")),
        AdvisorSettings::from_config(&config),
    );
    let client = ClientId::parse("khach-01").expect("client id");

    let report = advisor
        .advise_for_client(&client, &preferences(), Catalog::seed().listings())
        .await
        .expect("advisory");

    assert_eq!(report.matches[0].score, 90);
    assert_eq!(report.matches[0].reasons[0], "Phù hợp ngân sách");
    assert!(!report.advisory.is_generated());
    assert!(report.advisory.text().starts_with("Tư vấn AI"));

    let session = advisor.session(&client).expect("session");
    assert_eq!(session.history.len(), 1);
    assert!(!session.history[0].advisory.is_generated());
}

#[tokio::test]
async fn offline_configuration_uses_canned_commentary() {
    let config = NarrativeConfig::default();
    let advisor = MatchAdvisor::new(
        MatchEngine::default(),
        narrative::from_config(&config),
        Arc::new(MemorySessionStore::new()),
        AdvisorSettings::from_config(&config),
    );

    let report = advisor.advise(&preferences(), Catalog::seed().listings()).await;

    match report.advisory {
        Advisory::Generated { provider, text } => {
            assert_eq!(provider, "canned");
            assert!(text.starts_with("Apartment shortlist"));
        }
        other => panic!("expected canned commentary, got {other:?}"),
    }
}
