//! Per-field validation of raw form input.
//!
//! One validation function per semantic field type; every function shares
//! the same skeleton: reject empty input, reject on an injection flag from
//! the [`InjectionScanner`], then apply the field's structural rules. Each
//! function returns the first failing [`ValidationResult`]; the form layer
//! runs all validators relevant to a form and aggregates the messages
//! itself - there is no early exit across independent fields.

use std::collections::HashSet;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use regex::Regex;

use super::password::{
    has_char_run, has_digit, has_lowercase, has_symbol, has_uppercase, SYMBOLS,
};
use super::patterns::InjectionScanner;
use super::ValidationResult;

/// Upper bound for quantity and stock values.
const MAX_COUNT: u64 = 999_999;
/// Upper bound for price values.
const MAX_PRICE: f64 = 999_999.99;

const COMMON_PASSWORDS: [&str; 47] = [
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
    "login",
    "princess",
    "qwerty123",
    "solo",
    "passw0rd",
    "starwars",
    "freedom",
    "whatever",
    "trustno1",
    "jordan",
    "harley",
    "ranger",
    "iwantu",
    "jennifer",
    "hunter",
    "buster",
    "soccer",
    "baseball",
    "tiger",
    "charlie",
    "andrew",
    "michelle",
    "love",
    "sunshine",
    "jordan23",
    "iloveyou",
    "fuckyou",
    "2000",
    "football",
    "superman",
    "1234567",
    "fuckme",
    "121212",
    "donald",
];

const RESERVED_USERNAMES: [&str; 72] = [
    "admin",
    "administrator",
    "root",
    "system",
    "user",
    "guest",
    "test",
    "demo",
    "example",
    "sample",
    "info",
    "support",
    "help",
    "contact",
    "mail",
    "email",
    "webmaster",
    "noreply",
    "postmaster",
    "hostmaster",
    "operator",
    "manager",
    "moderator",
    "staff",
    "team",
    "service",
    "api",
    "bot",
    "robot",
    "crawler",
    "spider",
    "anonymous",
    "unknown",
    "nobody",
    "everyone",
    "public",
    "private",
    "internal",
    "external",
    "local",
    "remote",
    "server",
    "client",
    "database",
    "backup",
    "temp",
    "tmp",
    "cache",
    "log",
    "logs",
    "error",
    "debug",
    "dev",
    "development",
    "prod",
    "production",
    "staging",
    "testing",
    "qa",
    "security",
    "auth",
    "authentication",
    "login",
    "logout",
    "register",
    "signup",
    "signin",
    "password",
    "reset",
    "forgot",
    "recover",
    "verify",
];

const KEYBOARD_PATTERNS: [&str; 5] = ["qwerty", "asdfgh", "zxcvbn", "123456", "654321"];

/// Per-field-type validation rules with compiled patterns.
pub struct FieldValidator {
    scanner: InjectionScanner,
    email_rule: Regex,
    username_rule: Regex,
    full_name_rule: Regex,
    product_code_rule: Regex,
    positive_int_rule: Regex,
    non_negative_int_rule: Regex,
    positive_decimal_rule: Regex,
    keyboard_tokens: AhoCorasick,
    common_passwords: HashSet<&'static str>,
    reserved_usernames: HashSet<&'static str>,
}

impl FieldValidator {
    /// Compile all field rules.
    pub fn new() -> Self {
        let keyboard_tokens = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .build(KEYBOARD_PATTERNS)
            .expect("Failed to build keyboard-pattern matcher");

        Self {
            scanner: InjectionScanner::new(),
            email_rule: Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .expect("Failed to compile email rule"),
            username_rule: Regex::new(r"^[a-zA-Z0-9]+$")
                .expect("Failed to compile username rule"),
            full_name_rule: Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s\-']{2,50}$")
                .expect("Failed to compile full-name rule"),
            product_code_rule: Regex::new(r"^[A-Za-z0-9\-]{3,20}$")
                .expect("Failed to compile product-code rule"),
            positive_int_rule: Regex::new(r"^[1-9]\d*$")
                .expect("Failed to compile positive-integer rule"),
            non_negative_int_rule: Regex::new(r"^(0|[1-9]\d*)$")
                .expect("Failed to compile non-negative-integer rule"),
            positive_decimal_rule: Regex::new(r"^[1-9]\d*(\.\d+)?$|^0\.\d+$")
                .expect("Failed to compile positive-decimal rule"),
            keyboard_tokens,
            common_passwords: COMMON_PASSWORDS.iter().copied().collect(),
            reserved_usernames: RESERVED_USERNAMES.iter().copied().collect(),
        }
    }

    /// The injection scanner behind every field check.
    pub fn scanner(&self) -> &InjectionScanner {
        &self.scanner
    }

    /// Validate an email address.
    pub fn validate_email(&self, email: &str) -> ValidationResult {
        if email.trim().is_empty() {
            return ValidationResult::fail("Email is required");
        }
        if self.scanner.is_injection(email) {
            return ValidationResult::fail("Email contains disallowed characters");
        }
        if !self.email_rule.is_match(email) {
            return ValidationResult::fail("Invalid email format");
        }
        if email.chars().count() > 254 {
            return ValidationResult::fail("Email is too long");
        }
        ValidationResult::ok()
    }

    /// Validate a password against the registration gate.
    ///
    /// Strict accept/reject; the strength scorer in
    /// [`password`](super::password) produces the live UX feedback.
    pub fn validate_password(&self, password: &str) -> ValidationResult {
        if password.trim().is_empty() {
            return ValidationResult::fail("Password is required");
        }
        if self.scanner.is_injection(password) {
            return ValidationResult::fail("Password contains disallowed characters");
        }

        let len = password.chars().count();
        if len < 12 {
            return ValidationResult::fail("Password must be at least 12 characters");
        }
        if len > 128 {
            return ValidationResult::fail("Password is too long");
        }

        if !has_uppercase(password) {
            return ValidationResult::fail("Password must contain at least one uppercase letter");
        }
        if !has_lowercase(password) {
            return ValidationResult::fail("Password must contain at least one lowercase letter");
        }
        if !has_digit(password) {
            return ValidationResult::fail("Password must contain at least one digit");
        }
        if !has_symbol(password) {
            return ValidationResult::fail(format!(
                "Password must contain at least one special character ({})",
                SYMBOLS
            ));
        }

        if self.is_common_password(password) {
            return ValidationResult::fail("Password is too common, choose a stronger one");
        }
        if self.has_repeating_patterns(password) {
            return ValidationResult::fail("Password must not contain repeated sequences");
        }

        ValidationResult::ok()
    }

    /// Validate a username: letters and digits only, 4-30 characters, not
    /// on the reserved-word list.
    pub fn validate_username(&self, username: &str) -> ValidationResult {
        if username.trim().is_empty() {
            return ValidationResult::fail("Username is required");
        }
        if self.scanner.is_injection(username) {
            return ValidationResult::fail("Username contains disallowed characters");
        }

        let len = username.chars().count();
        if len < 4 {
            return ValidationResult::fail("Username must be at least 4 characters");
        }
        if len > 30 {
            return ValidationResult::fail("Username must be at most 30 characters");
        }
        if !self.username_rule.is_match(username) {
            return ValidationResult::fail("Username may only contain letters and digits");
        }
        if self
            .reserved_usernames
            .contains(username.to_lowercase().as_str())
        {
            return ValidationResult::fail("This username is not available");
        }
        ValidationResult::ok()
    }

    /// Validate a display name: letters (accented Latin included), spaces,
    /// hyphen, apostrophe; 2-50 characters.
    pub fn validate_full_name(&self, name: &str) -> ValidationResult {
        if name.trim().is_empty() {
            return ValidationResult::fail("Name is required");
        }
        if self.scanner.is_injection(name) {
            return ValidationResult::fail("Name contains disallowed characters");
        }
        if !self.full_name_rule.is_match(name) {
            return ValidationResult::fail(
                "Name may only contain letters, spaces, hyphens and apostrophes",
            );
        }
        ValidationResult::ok()
    }

    /// Validate a product name: 2-100 characters, no HTML tag spans.
    pub fn validate_product_name(&self, name: &str) -> ValidationResult {
        if name.trim().is_empty() {
            return ValidationResult::fail("Product name is required");
        }
        if self.scanner.is_injection(name) {
            return ValidationResult::fail("Product name contains disallowed characters");
        }

        let len = name.chars().count();
        if len < 2 {
            return ValidationResult::fail("Product name must be at least 2 characters");
        }
        if len > 100 {
            return ValidationResult::fail("Product name is too long");
        }

        // Strip tag spans; if anything was removed the input is rejected
        // rather than silently cleaned.
        let stripped = self.scanner.markup_rule().replace_all(name, "");
        if stripped != name {
            return ValidationResult::fail("Product name cannot contain HTML tags");
        }
        ValidationResult::ok()
    }

    /// Validate a product code: letters, digits and hyphens, 3-20 characters.
    pub fn validate_product_code(&self, code: &str) -> ValidationResult {
        if code.trim().is_empty() {
            return ValidationResult::fail("Product code is required");
        }
        if self.scanner.is_injection(code) {
            return ValidationResult::fail("Product code contains disallowed characters");
        }
        if !self.product_code_rule.is_match(code) {
            return ValidationResult::fail(
                "Product code must be 3-20 characters (letters, digits and hyphens)",
            );
        }
        ValidationResult::ok()
    }

    /// Validate a quantity: positive integer, at most 999,999.
    pub fn validate_quantity(&self, quantity: &str) -> ValidationResult {
        if quantity.trim().is_empty() {
            return ValidationResult::fail("Quantity is required");
        }
        if self.scanner.is_injection(quantity) {
            return ValidationResult::fail("Quantity contains disallowed characters");
        }
        if !self.positive_int_rule.is_match(quantity) {
            return ValidationResult::fail("Quantity must be greater than 0");
        }
        match quantity.parse::<u64>() {
            Ok(value) if value <= MAX_COUNT => ValidationResult::ok(),
            _ => ValidationResult::fail("Quantity is too large"),
        }
    }

    /// Validate a stock level: non-negative integer (zero allowed), at most
    /// 999,999.
    pub fn validate_stock(&self, stock: &str) -> ValidationResult {
        if stock.trim().is_empty() {
            return ValidationResult::fail("Stock is required");
        }
        if self.scanner.is_injection(stock) {
            return ValidationResult::fail("Stock contains disallowed characters");
        }
        if !self.non_negative_int_rule.is_match(stock) {
            return ValidationResult::fail("Stock must be a whole number of 0 or more");
        }
        match stock.parse::<u64>() {
            Ok(value) if value <= MAX_COUNT => ValidationResult::ok(),
            _ => ValidationResult::fail("Stock is too large"),
        }
    }

    /// Validate a price: positive decimal, at most 999,999.99.
    pub fn validate_price(&self, price: &str) -> ValidationResult {
        if price.trim().is_empty() {
            return ValidationResult::fail("Price is required");
        }
        if self.scanner.is_injection(price) {
            return ValidationResult::fail("Price contains disallowed characters");
        }
        if !self.positive_decimal_rule.is_match(price) {
            return ValidationResult::fail("Price must be a positive number");
        }
        match price.parse::<f64>() {
            Ok(value) if value > 0.0 && value <= MAX_PRICE => ValidationResult::ok(),
            Ok(_) => ValidationResult::fail("Price is too high"),
            Err(_) => ValidationResult::fail("Price must be a positive number"),
        }
    }

    /// Validate free text with caller-supplied length bounds.
    pub fn validate_generic_text(
        &self,
        text: &str,
        field_name: &str,
        min_length: usize,
        max_length: usize,
    ) -> ValidationResult {
        if text.trim().is_empty() {
            return ValidationResult::fail(format!("{} is required", field_name));
        }
        if self.scanner.is_injection(text) {
            return ValidationResult::fail(format!(
                "{} contains disallowed characters",
                field_name
            ));
        }

        let len = text.chars().count();
        if len < min_length {
            return ValidationResult::fail(format!(
                "{} must be at least {} characters",
                field_name, min_length
            ));
        }
        if len > max_length {
            return ValidationResult::fail(format!("{} is too long", field_name));
        }
        ValidationResult::ok()
    }

    /// Strip the dangerous-character set `< > " ' &` from text.
    ///
    /// Data-cleaning utility for callers that cannot fail closed; the
    /// injection validators remain the security boundary.
    pub fn sanitize(&self, text: &str) -> String {
        text.chars()
            .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '&'))
            .collect()
    }

    fn is_common_password(&self, password: &str) -> bool {
        self.common_passwords
            .contains(password.to_lowercase().as_str())
    }

    /// 3+ runs of one character, or a keyboard/sequence token. Short digit
    /// trigrams only affect the strength score, not the gate.
    fn has_repeating_patterns(&self, password: &str) -> bool {
        if has_char_run(password, 3) {
            return true;
        }
        self.keyboard_tokens.is_match(password)
    }
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self::new()
    }
}
