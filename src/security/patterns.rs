//! Injection-pattern classification for raw form input.
//!
//! Compiles the SQL, script/XSS, and markup detection rules once and
//! evaluates them case-insensitively. The SQL and XSS rules are anchored
//! whole-string matches of a boundary-delimited keyword disjunction; the
//! markup rule is a plain substring search for a `<...>`-shaped span and
//! fires independently of the other two.
//!
//! The anchored construction is part of the external contract: rewriting
//! the SQL rule into a stricter substring scan changes which inputs are
//! accepted. Do not "fix" it without revisiting every caller.

use regex::{Regex, RegexBuilder};

/// SQL keyword disjunction, boundary-delimited.
const SQL_KEYWORDS: &str = "SELECT|INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|EXEC\
|UNION|SCRIPT|JAVASCRIPT|ONLOAD|ONERROR|ONCLICK|WHERE|FROM|AND|OR|NOT|LIKE\
|INTO|VALUES|SET|JOIN|HAVING|GROUP|ORDER|BY|LIMIT|OFFSET|ASC|DESC|DISTINCT\
|COUNT|SUM|AVG|MAX|MIN";

/// Script and event-handler tokens.
const XSS_TOKENS: &str = "<script|javascript:|vbscript:|onload|onerror\
|onclick|onmouseover|onfocus|onblur|<iframe|<object|<embed|<form";

/// Classification of a single input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjectionScan {
    /// Input matched the SQL keyword rule.
    pub sql_suspect: bool,
    /// Input matched the script/handler token rule.
    pub xss_suspect: bool,
    /// Input contains at least one `<...>` span.
    pub contains_markup: bool,
}

impl InjectionScan {
    /// True when any of the three detection rules fired.
    pub fn is_injection(&self) -> bool {
        self.sql_suspect || self.xss_suspect || self.contains_markup
    }
}

/// Compiled injection detection rules.
pub struct InjectionScanner {
    sql_rule: Regex,
    xss_rule: Regex,
    markup_rule: Regex,
}

impl InjectionScanner {
    /// Compile the detection rules.
    pub fn new() -> Self {
        // Anchored: the entire (single-line) input must match. The `.*`
        // wrappers do not cross newlines, so multi-line input never
        // satisfies the whole-string rule.
        let sql_rule = RegexBuilder::new(&format!(r"^.*\b(?:{})\b.*$", SQL_KEYWORDS))
            .case_insensitive(true)
            .build()
            .expect("Failed to compile SQL injection rule");

        let xss_rule = RegexBuilder::new(&format!(r"^.*(?:{}).*$", XSS_TOKENS))
            .case_insensitive(true)
            .build()
            .expect("Failed to compile XSS rule");

        let markup_rule = Regex::new(r"<[^>]*>").expect("Failed to compile markup rule");

        Self {
            sql_rule,
            xss_rule,
            markup_rule,
        }
    }

    /// Classify an input string against all three rules.
    pub fn classify(&self, text: &str) -> InjectionScan {
        InjectionScan {
            sql_suspect: self.sql_rule.is_match(text),
            xss_suspect: self.xss_rule.is_match(text),
            contains_markup: self.markup_rule.is_match(text),
        }
    }

    /// True when the input should be rejected as suspected injection.
    pub fn is_injection(&self, text: &str) -> bool {
        self.classify(text).is_injection()
    }

    /// Markup rule handle, shared with the product-name tag stripper.
    pub(crate) fn markup_rule(&self) -> &Regex {
        &self.markup_rule
    }
}

impl Default for InjectionScanner {
    fn default() -> Self {
        Self::new()
    }
}
