//! Advisory password policy used for live feedback while registering.
//! Every rule is evaluated on its own and no overall verdict is produced; the
//! backend decides whether a password is accepted.

use regex::Regex;

pub const MIN_LENGTH: usize = 8;
pub const SPECIAL_CHARACTERS: &str = "@$!%*?&";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Length,
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl Rule {
    pub const ALL: [Self; 5] = [
        Self::Length,
        Self::Uppercase,
        Self::Lowercase,
        Self::Digit,
        Self::Special,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Length => "At least 8 characters",
            Self::Uppercase => "One uppercase letter",
            Self::Lowercase => "One lowercase letter",
            Self::Digit => "One number",
            Self::Special => "One special character (@$!%*?&)",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordCheck {
    pub length_ok: bool,
    pub has_upper: bool,
    pub has_lower: bool,
    pub has_digit: bool,
    pub has_special: bool,
}

impl PasswordCheck {
    #[must_use]
    pub const fn satisfied(&self, rule: Rule) -> bool {
        match rule {
            Rule::Length => self.length_ok,
            Rule::Uppercase => self.has_upper,
            Rule::Lowercase => self.has_lower,
            Rule::Digit => self.has_digit,
            Rule::Special => self.has_special,
        }
    }

    /// Rules in display order with their state.
    pub fn rules(&self) -> impl Iterator<Item = (Rule, bool)> + '_ {
        Rule::ALL.into_iter().map(|rule| (rule, self.satisfied(rule)))
    }
}

fn contains(pattern: &str, password: &str) -> bool {
    Regex::new(pattern).map_or(false, |re| re.is_match(password))
}

/// Evaluates all five rules against `password`.
#[must_use]
pub fn check(password: &str) -> PasswordCheck {
    PasswordCheck {
        length_ok: password.encode_utf16().count() >= MIN_LENGTH,
        has_upper: contains("[A-Z]", password),
        has_lower: contains("[a-z]", password),
        has_digit: contains("[0-9]", password),
        has_special: contains("[@$!%*?&]", password),
    }
}
