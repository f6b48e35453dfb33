use utility_dashboard::properties::{
    calculate_service_score, generate_complex_code, generate_single_code, get_reliability_rating,
    CodeKind, PropertyCode, PropertyCodeGenerator, ReliabilityRating,
};

fn assert_code_layout(code: &PropertyCode, prefix: &str, initials: &str) {
    let segments: Vec<&str> = code.as_str().split('-').collect();
    assert_eq!(segments.len(), 4, "unexpected layout {code}");
    assert_eq!(segments[0], prefix);
    assert_eq!(segments[1], initials);
    let number = code.number().expect("numeric segment");
    assert!((100..=999).contains(&number), "number out of range in {code}");
    assert_eq!(segments[3].len(), 2);
    assert!(segments[3].bytes().all(|byte| byte.is_ascii_uppercase()));
}

#[test]
fn single_codes_follow_layout() {
    let code = generate_single_code("Sunset Villa", "Single Family Home").expect("code generated");

    assert_eq!(code.kind(), CodeKind::Single);
    assert_code_layout(&code, "SC", "SV");
}

#[test]
fn complex_codes_follow_layout() {
    let code = generate_complex_code("Harbor View Apartments", 24).expect("code generated");

    assert_eq!(code.kind(), CodeKind::Complex);
    assert_code_layout(&code, "RC", "HV");
}

#[test]
fn lowercase_and_single_word_names_keep_short_initials() {
    let mut generator = PropertyCodeGenerator::seeded(7);

    let single = generator
        .generate_single_code("cabin", "Cottage")
        .expect("code generated");
    let lowercase = generator
        .generate_complex_code("maple grove terrace", 12)
        .expect("code generated");

    assert!(single.as_str().starts_with("SC-C-"));
    assert!(lowercase.as_str().starts_with("RC-MG-"));
}

#[test]
fn seeded_generators_repeat_their_codes() {
    let mut first = PropertyCodeGenerator::seeded(42);
    let mut second = PropertyCodeGenerator::seeded(42);

    for _ in 0..10 {
        assert_eq!(
            first
                .generate_single_code("Garden Cottage", "Cottage")
                .expect("code generated"),
            second
                .generate_single_code("Garden Cottage", "Cottage")
                .expect("code generated"),
        );
    }
}

#[test]
fn scores_and_ratings_line_up() {
    let cases = [
        ((102.50, 45.80, 79.99), 90, ReliabilityRating::Excellent),
        ((150.0, 70.0, 110.0), 65, ReliabilityRating::Poor),
        ((0.0, 0.0, 0.0), 100, ReliabilityRating::Excellent),
        ((121.0, 61.0, 0.0), 85, ReliabilityRating::Good),
    ];

    for ((electricity, water, internet), expected, rating) in cases {
        let score =
            calculate_service_score(electricity, water, internet).expect("valid costs score");
        assert_eq!(score.value(), expected);
        assert_eq!(score.rating(), rating);
        assert_eq!(get_reliability_rating(f64::from(score.value())), rating);
    }
}

#[test]
fn rating_labels_match_thresholds() {
    assert_eq!(get_reliability_rating(95.0).label(), "Excellent");
    assert_eq!(get_reliability_rating(85.0).label(), "Good");
    assert_eq!(get_reliability_rating(75.0).label(), "Fair");
    assert_eq!(get_reliability_rating(65.0).label(), "Poor");
}
