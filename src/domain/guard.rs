//! Screening of user-supplied prompt text before it reaches the model.
//!
//! Two classes of problematic input are kept apart. Attempts to override the
//! mandated parameters (output language, sender identity) are served anyway:
//! the templates instruct the model to ignore them. Attempts to break the
//! assistant's role are refused outright.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::AppError;

/// Parameter an override attempt tried to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideTarget {
    Language,
    Sender,
}

impl fmt::Display for OverrideTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideTarget::Language => write!(f, "language"),
            OverrideTarget::Sender => write!(f, "sender"),
        }
    }
}

/// Outcome of screening one piece of prompt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening {
    Clean,
    /// The request is still served; the mandated parameters win.
    ParameterOverrideAttempt(Vec<OverrideTarget>),
    /// The request must be refused.
    PolicyViolation(String),
}

impl Screening {
    /// Convert to the pipeline decision: refuse violations, serve everything else.
    pub fn into_result(self) -> Result<Vec<OverrideTarget>, AppError> {
        match self {
            Screening::Clean => Ok(Vec::new()),
            Screening::ParameterOverrideAttempt(targets) => Ok(targets),
            Screening::PolicyViolation(reason) => Err(AppError::PolicyViolation(reason)),
        }
    }
}

struct ViolationRule {
    pattern: Regex,
    reason: &'static str,
}

fn rule(pattern: &str, reason: &'static str) -> ViolationRule {
    ViolationRule { pattern: Regex::new(pattern).expect("invalid policy regex"), reason }
}

/// Start of an imperative clause addressed to the assistant: text start, a
/// sentence boundary, or a joining word such as "and" or "please".
const IMPERATIVE: &str = r"(?:^|[.!?;:\n]|\b(?:and|then|please)\b)\s*";

static VIOLATION_RULES: LazyLock<Vec<ViolationRule>> = LazyLock::new(|| {
    vec![
        rule(
            &format!(
                r"(?i){IMPERATIVE}(?:ignore|disregard|forget|override)\s+(?:all\s+(?:of\s+)?)?(?:your|the\s+system|the\s+above|(?:all\s+)?(?:previous|prior|above|earlier))\s+(?:instructions?|prompts?|rules)\b"
            ),
            "attempt to override assistant instructions",
        ),
        rule(
            &format!(
                r"(?i){IMPERATIVE}(?:you\s+are\s+now\s+(?:a|an|the|no\s+longer)\b|from\s+now\s+on,?\s+you\s+(?:are|will)\b|pretend\s+(?:to\s+be|you\s+are)\b|roleplay\s+as\b|act\s+as\s+if\s+you\b)"
            ),
            "attempt to change the assistant's role",
        ),
        rule(
            &format!(
                r"(?i){IMPERATIVE}(?:reveal|show|print|repeat|output)\b[^.\n]{{0,20}}\b(?:system\s+prompt|hidden\s+prompt|your\s+instructions|initial\s+instructions)\b"
            ),
            "attempt to extract assistant instructions",
        ),
        rule(r"(?i)\b(jailbreak|developer mode|dan mode|do anything now)\b", "jailbreak attempt"),
        rule(
            &format!(
                r"(?i){IMPERATIVE}(?:write|generate|produce|give)\s+(?:me\s+|us\s+)?(?:an?\s+|some\s+|the\s+)?(?:(?:python|javascript|typescript|java|rust|bash|shell|powershell|sql)\s+(?:code|script|program|function|query)|source\s+code|code\s+snippet)\b"
            ),
            "request outside administrative email scope",
        ),
    ]
});

static LANGUAGE_OVERRIDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:write|respond|reply|answer|output|compose|draft)\b[^.\n]{0,30}\bin|translate\b[^.\n]{0,20}\b(?:in)?to|language\s*[:=])\s*(english|german|deutsch|french|spanish|italian|portuguese|dutch|chinese|japanese|russian|turkish|arabic)\b",
    )
    .expect("invalid language override regex")
});

static SENDER_OVERRIDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(sign (it|this|the (email|message|letter))? ?(off )?as|signed by|change the sender|sender (name|profession)?\s*[:=]|on behalf of|pretend the sender)\b",
    )
    .expect("invalid sender override regex")
});

/// Screen prompt text against the policy, given the language the request mandates.
pub fn screen(text: &str, mandated_language: &str) -> Screening {
    if let Some(rule) = VIOLATION_RULES.iter().find(|rule| rule.pattern.is_match(text)) {
        return Screening::PolicyViolation(rule.reason.to_string());
    }

    let mut targets = Vec::new();
    let mandated = mandated_language.trim().to_ascii_lowercase();
    let requests_other_language = LANGUAGE_OVERRIDE_RE.captures_iter(text).any(|caps| {
        let requested = caps[1].to_ascii_lowercase();
        !(requested == mandated || (requested == "deutsch" && mandated == "german"))
    });
    if requests_other_language {
        targets.push(OverrideTarget::Language);
    }
    if SENDER_OVERRIDE_RE.is_match(text) {
        targets.push(OverrideTarget::Sender);
    }

    if targets.is_empty() { Screening::Clean } else { Screening::ParameterOverrideAttempt(targets) }
}
