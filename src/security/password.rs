//! Password strength scoring for live registration feedback.
//!
//! Independent of the registration gate in [`validator`](super::validator):
//! the gate answers "may this password be accepted", the scorer answers
//! "how good is it and what is still missing". The form layer calls both;
//! they are not interchangeable.
//!
//! The `missing_requirements` list is strictly requirement-driven and is
//! reported in a fixed order regardless of the heuristic score, so UI
//! feedback stays stable even for a Medium or Strong result.

/// Minimum accepted password length.
pub const MIN_LENGTH: usize = 12;
/// Recommended password length for the strength heuristic.
pub const RECOMMENDED_LENGTH: usize = 16;
/// Maximum accepted password length.
pub const MAX_LENGTH: usize = 128;

/// Symbols counted as the special-character class.
pub(crate) const SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Sequential and same-digit trigrams treated as repeating patterns.
pub(crate) const SEQUENCE_TRIGRAMS: [&str; 17] = [
    "123", "234", "345", "456", "567", "678", "789", "012", "111", "222", "333", "444", "555",
    "666", "777", "888", "999",
];

pub(crate) fn has_uppercase(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_uppercase())
}

pub(crate) fn has_lowercase(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_lowercase())
}

pub(crate) fn has_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

pub(crate) fn has_symbol(text: &str) -> bool {
    text.chars().any(|c| SYMBOLS.contains(c))
}

/// True when `text` contains a run of `run_len` or more identical characters.
pub(crate) fn has_char_run(text: &str, run_len: usize) -> bool {
    let mut prev: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        if Some(c) == prev {
            run += 1;
            if run >= run_len {
                return true;
            }
        } else {
            prev = Some(c);
            run = 1;
        }
    }
    false
}

/// Coarse strength tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    /// Fixed human-readable message per tier.
    pub fn message(&self) -> &'static str {
        match self {
            PasswordStrength::Weak => "Weak password - does not meet minimum requirements",
            PasswordStrength::Medium => "Medium password - meets basic requirements",
            PasswordStrength::Strong => "Strong password - excellent security",
        }
    }
}

/// Full assessment of a candidate password.
///
/// `strength` is a derived heuristic recomputed from the password text on
/// every call; `missing_requirements` is the authoritative requirement
/// checklist and is populated independently of the tier.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordAssessment {
    /// True when no minimum requirement is unmet.
    pub is_valid: bool,
    /// Heuristic tier derived from the 0-8 score.
    pub strength: PasswordStrength,
    /// Every unmet minimum, in fixed order: min length, recommended
    /// length, max length, uppercase, lowercase, digit, symbol.
    pub missing_requirements: Vec<String>,
    /// Tier message for display.
    pub strength_message: String,
}

/// Scoring engine over candidate passwords.
///
/// Pure and synchronous; safe to call on every keystroke.
#[derive(Debug, Default, Clone)]
pub struct StrengthScorer;

// Short common-password set for the heuristic. The registration gate keeps
// its own, larger list.
const COMMON_PASSWORDS: [&str; 13] = [
    "password",
    "123456",
    "123456789",
    "qwerty",
    "abc123",
    "password123",
    "admin",
    "letmein",
    "welcome",
    "monkey",
    "dragon",
    "master",
    "user",
];

impl StrengthScorer {
    pub fn new() -> Self {
        Self
    }

    /// Assess a candidate password.
    pub fn assess(&self, password: &str) -> PasswordAssessment {
        let mut missing = Vec::new();
        let len = password.chars().count();

        if len < MIN_LENGTH {
            missing.push(format!("At least {} characters", MIN_LENGTH));
        }
        if len < RECOMMENDED_LENGTH {
            missing.push(format!(
                "Recommended: at least {} characters for better security",
                RECOMMENDED_LENGTH
            ));
        }
        if len > MAX_LENGTH {
            missing.push(format!("At most {} characters", MAX_LENGTH));
        }
        if !has_uppercase(password) {
            missing.push("At least one uppercase letter".to_string());
        }
        if !has_lowercase(password) {
            missing.push("At least one lowercase letter".to_string());
        }
        if !has_digit(password) {
            missing.push("At least one digit".to_string());
        }
        if !has_symbol(password) {
            missing.push(format!("At least one special character ({})", SYMBOLS));
        }

        let strength = self.strength(password);

        PasswordAssessment {
            is_valid: missing.is_empty(),
            strength,
            missing_requirements: missing,
            strength_message: strength.message().to_string(),
        }
    }

    /// Compute the 0-8 score and bucket it into a tier.
    fn strength(&self, password: &str) -> PasswordStrength {
        let len = password.chars().count();
        let mut score = 0u8;

        if len >= MIN_LENGTH {
            score += 1;
        }
        if len >= RECOMMENDED_LENGTH {
            score += 1;
        }
        if len >= 20 {
            score += 1;
        }

        if has_uppercase(password) {
            score += 1;
        }
        if has_lowercase(password) {
            score += 1;
        }
        if has_digit(password) {
            score += 1;
        }
        if has_symbol(password) {
            score += 1;
        }

        if !is_common_password(password) {
            score += 1;
        }
        if !has_repeating_pattern(password) {
            score += 1;
        }

        match score {
            0..=3 => PasswordStrength::Weak,
            4..=5 => PasswordStrength::Medium,
            _ => PasswordStrength::Strong,
        }
    }
}

fn is_common_password(password: &str) -> bool {
    let lower = password.to_lowercase();
    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// Digit trigrams or a 3+ run of one character. The scorer deliberately
/// omits the gate's keyboard-pattern rule.
fn has_repeating_pattern(password: &str) -> bool {
    if SEQUENCE_TRIGRAMS.iter().any(|t| password.contains(t)) {
        return true;
    }
    has_char_run(password, 3)
}
