//! Tests for the password strength scorer and its relationship with the
//! registration gate: two distinct validators, not interchangeable.

use inv_guard::{FieldValidator, PasswordStrength, StrengthScorer};

#[test]
fn trivial_password_is_weak() {
    let scorer = StrengthScorer::new();
    assert_eq!(scorer.assess("123456").strength, PasswordStrength::Weak);
}

#[test]
fn missing_symbol_never_reaches_strong() {
    let scorer = StrengthScorer::new();

    let assessment = scorer.assess("Password123");
    assert!(matches!(
        assessment.strength,
        PasswordStrength::Weak | PasswordStrength::Medium
    ));
    assert!(assessment
        .missing_requirements
        .iter()
        .any(|r| r.contains("special character")));
}

#[test]
fn full_coverage_is_strong() {
    let scorer = StrengthScorer::new();

    let assessment = scorer.assess("SecureP@ss123!");
    assert_eq!(assessment.strength, PasswordStrength::Strong);
}

#[test]
fn requirements_listed_regardless_of_tier() {
    let scorer = StrengthScorer::new();

    // Long multi-class passphrase without a digit: strong score, but the
    // digit requirement must still appear for the UI.
    let assessment = scorer.assess("Verylongpassphrase@here");
    assert_eq!(assessment.strength, PasswordStrength::Strong);
    assert!(!assessment.is_valid);
    assert!(assessment
        .missing_requirements
        .iter()
        .any(|r| r.contains("digit")));
}

#[test]
fn scorer_and_gate_can_disagree() {
    let scorer = StrengthScorer::new();
    let gate = FieldValidator::new();

    // The gate accepts this; the scorer still reports the recommended
    // 16-character target as unmet. Both signals reach the UI.
    let candidate = "SecurePass123!";
    assert!(gate.validate_password(candidate).is_valid);

    let assessment = scorer.assess(candidate);
    assert!(!assessment.is_valid);
    assert!(assessment
        .missing_requirements
        .iter()
        .any(|r| r.contains("Recommended")));
}

#[test]
fn assessment_is_recomputed_per_call() {
    let scorer = StrengthScorer::new();

    let weak = scorer.assess("123456");
    let strong = scorer.assess("SecureP@ss418!x");
    assert_ne!(weak.strength, strong.strength);
    // A second call over the same text reproduces the first result.
    assert_eq!(scorer.assess("123456"), weak);
}
