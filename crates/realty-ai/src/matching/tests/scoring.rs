use super::common::*;
use crate::matching::domain::PropertyType;
use crate::matching::{
    LocationMatchMode, MatchCriterion, MatchEngine, MatchingConfig, ReasonLocale,
};

#[test]
fn full_profile_match_scores_ninety() {
    let scored = engine()
        .score(&preferences(), &quan9_apartment())
        .expect("candidate matches");

    assert_eq!(scored.score, 90);
    assert_eq!(
        scored.criteria,
        vec![
            MatchCriterion::Budget,
            MatchCriterion::Location,
            MatchCriterion::PropertyType,
            MatchCriterion::Area,
        ]
    );
    assert_eq!(
        scored.reasons,
        vec![
            "within stated budget",
            "matches desired location",
            "matches desired property type",
            "meets minimum area requirement",
        ]
    );
}

#[test]
fn candidate_without_any_match_is_rejected() {
    assert!(engine().score(&preferences(), &dong_nai_villa()).is_none());
}

#[test]
fn budget_bounds_are_inclusive() {
    let prefs = preferences();
    for price in [prefs.budget.min, prefs.budget.max] {
        let candidate = listing("edge", price, "Bình Dương", PropertyType::Land, 10.0);
        let scored = engine().score(&prefs, &candidate).expect("budget matches");
        assert_eq!(scored.score, MatchCriterion::Budget.weight());
        assert_eq!(scored.criteria, vec![MatchCriterion::Budget]);
    }

    let above = listing(
        "above",
        prefs.budget.max + 1,
        "Bình Dương",
        PropertyType::Land,
        10.0,
    );
    assert!(engine().score(&prefs, &above).is_none());
}

#[test]
fn inverted_budget_never_matches_budget_criterion() {
    let mut prefs = preferences();
    prefs.budget.min = 6 * BILLION;
    prefs.budget.max = 3 * BILLION;

    let scored = engine()
        .score(&prefs, &quan9_apartment())
        .expect("other criteria still match");

    assert!(!scored.criteria.contains(&MatchCriterion::Budget));
    assert_eq!(scored.score, 60);
}

#[test]
fn area_is_skipped_when_minimum_not_stated() {
    let mut prefs = preferences();
    prefs.min_area = None;

    let scored = engine()
        .score(&prefs, &quan9_apartment())
        .expect("candidate matches");

    assert_eq!(scored.score, 75);
    assert!(!scored.criteria.contains(&MatchCriterion::Area));
}

#[test]
fn bedrooms_require_known_and_equal_counts() {
    let mut prefs = preferences();
    prefs.bedrooms = Some(2);

    let mut unknown = quan9_apartment();
    unknown.bedrooms = None;
    let scored = engine().score(&prefs, &unknown).expect("matches");
    assert!(!scored.criteria.contains(&MatchCriterion::Bedrooms));

    let mut three = quan9_apartment();
    three.bedrooms = Some(3);
    let scored = engine().score(&prefs, &three).expect("matches");
    assert!(!scored.criteria.contains(&MatchCriterion::Bedrooms));

    let mut two = quan9_apartment();
    two.bedrooms = Some(2);
    let scored = engine().score(&prefs, &two).expect("matches");
    assert_eq!(scored.score, 100);
    assert_eq!(scored.reasons.last().map(String::as_str), Some("matches desired bedroom count"));
}

#[test]
fn large_out_of_budget_villa_still_earns_area_points() {
    let villa = listing("B", 20 * BILLION, "Đồng Nai", PropertyType::Villa, 250.0);

    let scored = engine().score(&preferences(), &villa).expect("area matches");

    assert_eq!(scored.score, 15);
    assert_eq!(scored.criteria, vec![MatchCriterion::Area]);
}

#[test]
fn scores_match_hand_computed_totals() {
    use MatchCriterion::{Area, Budget, Location, PropertyType as Type};

    let prefs = preferences();
    let cases = [
        (quan9_apartment(), 90, vec![Budget, Location, Type, Area]),
        (
            listing("C", 5 * BILLION, "Đồng Nai", PropertyType::Apartment, 40.0),
            50,
            vec![Budget, Type],
        ),
        (
            listing("D", BILLION, "Quận 9", PropertyType::Villa, 300.0),
            40,
            vec![Location, Area],
        ),
        (
            listing("E", 7 * BILLION, "Thủ Đức", PropertyType::Apartment, 70.0),
            35,
            vec![Type, Area],
        ),
    ];

    for (candidate, expected_score, expected_criteria) in &cases {
        let scored = engine().score(&prefs, candidate).expect("matches");
        assert_eq!(scored.score, *expected_score, "listing {}", candidate.id.as_str());
        assert_eq!(&scored.criteria, expected_criteria);
        assert_eq!(scored.reasons.len(), expected_criteria.len());
    }
}

#[test]
fn folded_location_matches_unaccented_preference() {
    let mut prefs = preferences();
    prefs.locations = ["quan 9".to_string()].into_iter().collect();

    let folded = engine().score(&prefs, &quan9_apartment()).expect("matches");
    assert!(folded.criteria.contains(&MatchCriterion::Location));

    let exact = MatchEngine::new(MatchingConfig {
        location_mode: LocationMatchMode::Exact,
        ..MatchingConfig::default()
    });
    let scored = exact.score(&prefs, &quan9_apartment()).expect("matches");
    assert!(!scored.criteria.contains(&MatchCriterion::Location));
}

#[test]
fn vietnamese_locale_localises_reasons() {
    let engine = MatchEngine::new(MatchingConfig {
        locale: ReasonLocale::Vietnamese,
        ..MatchingConfig::default()
    });

    let scored = engine
        .score(&preferences(), &quan9_apartment())
        .expect("matches");

    assert_eq!(
        scored.reasons,
        vec![
            "Phù hợp ngân sách",
            "Vị trí mong muốn",
            "Đúng loại hình",
            "Diện tích phù hợp",
        ]
    );
}
