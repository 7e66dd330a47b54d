use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Loose `local@domain.tld` shape check. Surrounding whitespace is ignored.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupPhase {
    #[default]
    Idle,
    Submitting,
    Subscribed,
}

impl SignupPhase {
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Idle => "Subscribe",
            Self::Submitting => "Subscribing...",
            Self::Subscribed => "Subscribed!",
        }
    }

    pub fn accepts_input(self) -> bool {
        self == Self::Idle
    }
}
