use std::sync::Arc;
use std::time::Duration;

use super::common::*;
use crate::advisory::{AdvisorError, Advisory, MemorySessionStore, HISTORY_LIMIT};
use crate::matching::ListingId;

#[tokio::test]
async fn advise_ranks_and_attaches_generated_text() {
    let narrator = Arc::new(ScriptedNarrator::default());
    let advisor = advisor(narrator.clone());

    let report = advisor.advise(&preferences(), &candidates()).await;

    let ids: Vec<&str> = report
        .matches
        .iter()
        .map(|scored| scored.listing.id.as_str())
        .collect();
    assert_eq!(ids, vec!["A", "C"]);
    assert_eq!(report.matches[0].score, 90);
    assert_eq!(
        report.advisory,
        Advisory::Generated {
            provider: "scripted".to_string(),
            text: "Show listing A first.".to_string(),
        }
    );

    let prompts = narrator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].user.contains("Listings reviewed: 3"));
    assert!(prompts[0].user.contains("1. Listing A"));
}

#[tokio::test]
async fn narrative_timeout_still_delivers_ranking() {
    let narrator = Arc::new(StalledNarrator::default());
    let advisor = advisor_with(
        narrator.clone(),
        Arc::new(MemorySessionStore::new()),
        Duration::from_millis(20),
    );

    let report = advisor.advise(&preferences(), &candidates()).await;

    assert_eq!(report.matches[0].listing.id, ListingId::from("A"));
    assert_eq!(report.matches[0].score, 90);
    assert_eq!(narrator.calls(), 1);
    match &report.advisory {
        Advisory::Unavailable { reason, fallback } => {
            assert!(reason.contains("timed out"));
            assert_eq!(report.advisory.text(), fallback);
        }
        other => panic!("expected unavailable advisory, got {other:?}"),
    }
}

#[tokio::test]
async fn provider_errors_degrade_to_fallback() {
    let advisor = advisor(Arc::new(FailingNarrator));

    let report = advisor.advise(&preferences(), &candidates()).await;

    assert_eq!(report.matches.len(), 2);
    assert!(!report.advisory.is_generated());
    match report.advisory {
        Advisory::Unavailable { reason, .. } => assert!(reason.contains("503")),
        other => panic!("expected unavailable advisory, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_inventory_still_asks_for_commentary() {
    let narrator = Arc::new(ScriptedNarrator::default());
    let advisor = advisor(narrator.clone());

    let report = advisor.advise(&preferences(), &[]).await;

    assert!(report.matches.is_empty());
    assert!(report.advisory.is_generated());
    assert!(narrator.prompts()[0]
        .user
        .contains("No listing matched any requirement."));
}

#[tokio::test]
async fn advise_for_client_records_history() {
    let store = Arc::new(MemorySessionStore::new());
    let advisor = advisor_with(
        Arc::new(ScriptedNarrator::default()),
        store.clone(),
        Duration::from_secs(5),
    );
    let lead = client("lead-42");

    advisor
        .advise_for_client(&lead, &preferences(), &candidates())
        .await
        .expect("first advisory");
    advisor
        .advise_for_client(&lead, &preferences(), &candidates())
        .await
        .expect("second advisory");

    let session = advisor.session(&lead).expect("session exists");
    assert_eq!(session.history.len(), 2);
    assert_eq!(store.len(), 1);

    let latest = session.latest().expect("latest entry");
    assert_eq!(latest.top_matches.len(), 2);
    assert_eq!(latest.top_matches[0].listing_id, ListingId::from("A"));
    assert_eq!(latest.top_matches[0].score, 90);
    assert!(latest.advisory.is_generated());
}

#[tokio::test]
async fn history_is_capped() {
    let advisor = advisor(Arc::new(ScriptedNarrator::default()));
    let lead = client("lead-cap");

    for _ in 0..HISTORY_LIMIT + 3 {
        advisor
            .advise_for_client(&lead, &preferences(), &candidates())
            .await
            .expect("advisory");
    }

    let session = advisor.session(&lead).expect("session exists");
    assert_eq!(session.history.len(), HISTORY_LIMIT);
}

#[tokio::test]
async fn store_failures_surface_as_errors() {
    let advisor = advisor_with(
        Arc::new(ScriptedNarrator::default()),
        Arc::new(UnavailableStore),
        Duration::from_secs(5),
    );

    let result = advisor
        .advise_for_client(&client("lead-1"), &preferences(), &candidates())
        .await;

    assert!(matches!(result, Err(AdvisorError::Store(_))));
}

#[test]
fn unknown_sessions_are_not_found() {
    let advisor = advisor(Arc::new(ScriptedNarrator::default()));
    assert!(matches!(
        advisor.session(&client("nobody")),
        Err(AdvisorError::SessionNotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_advisories_for_one_client_are_not_lost() {
    let store = Arc::new(MemorySessionStore::new());
    let advisor = Arc::new(advisor_with(
        Arc::new(ScriptedNarrator::default()),
        store.clone(),
        Duration::from_secs(5),
    ));
    let lead = client("lead-parallel");

    let tasks: Vec<_> = (0..12)
        .map(|_| {
            let advisor = Arc::clone(&advisor);
            let lead = lead.clone();
            tokio::spawn(async move {
                advisor
                    .advise_for_client(&lead, &preferences(), &candidates())
                    .await
            })
        })
        .collect();
    for task in tasks {
        task.await.expect("task joined").expect("advisory");
    }

    let session = advisor.session(&lead).expect("session exists");
    assert_eq!(session.history.len(), 12);
    assert_eq!(store.len(), 1);
}
