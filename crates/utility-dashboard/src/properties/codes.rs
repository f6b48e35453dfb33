//! Public lookup codes for properties and complexes.
//!
//! A code reads `SC-SV-345-QD`: the record kind, up to two name initials, a
//! number in `100..=999`, and two random letters. Codes are convenience
//! handles for public lookups. They are guessable and carry no uniqueness
//! guarantee; the store rejects duplicates.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::InvalidArgument;

const NAME_INITIALS: usize = 2;

/// Record family encoded in the code prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeKind {
    Single,
    Complex,
}

impl CodeKind {
    pub const fn ordered() -> [Self; 2] {
        [Self::Single, Self::Complex]
    }

    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Single => "SC",
            Self::Complex => "RC",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "Single Property",
            Self::Complex => "Real Estate Complex",
        }
    }
}

/// A generated or user-supplied property code in canonical (uppercase) form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyCode(String);

impl PropertyCode {
    /// Normalise lookup input (trim, uppercase) and check the code layout.
    pub fn parse(raw: &str) -> Result<Self, MalformedCode> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(MalformedCode::Empty);
        }

        let body = CodeKind::ordered()
            .into_iter()
            .find_map(|kind| {
                normalized
                    .strip_prefix(kind.prefix())
                    .and_then(|rest| rest.strip_prefix('-'))
            })
            .ok_or_else(|| MalformedCode::UnknownPrefix(normalized.clone()))?;

        let mut segments = body.rsplitn(3, '-');
        let suffix = segments.next();
        let number = segments.next();
        let initials = segments.next();

        match (initials, number, suffix) {
            (Some(initials), Some(number), Some(suffix))
                if valid_initials(initials) && valid_number(number) && valid_suffix(suffix) =>
            {
                Ok(Self(normalized))
            }
            _ => Err(MalformedCode::Layout(normalized)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> CodeKind {
        if self.0.starts_with(CodeKind::Complex.prefix()) {
            CodeKind::Complex
        } else {
            CodeKind::Single
        }
    }

    /// The `100..=999` segment.
    pub fn number(&self) -> Option<u16> {
        self.0.rsplit('-').nth(1).and_then(|raw| raw.parse().ok())
    }
}

impl fmt::Display for PropertyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PropertyCode {
    type Error = MalformedCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PropertyCode> for String {
    fn from(value: PropertyCode) -> Self {
        value.0
    }
}

fn valid_initials(segment: &str) -> bool {
    segment.chars().count() <= NAME_INITIALS && !segment.chars().any(char::is_whitespace)
}

fn valid_number(segment: &str) -> bool {
    segment.len() == 3
        && segment.bytes().all(|byte| byte.is_ascii_digit())
        && !segment.starts_with('0')
}

fn valid_suffix(segment: &str) -> bool {
    segment.len() == 2 && segment.bytes().all(|byte| byte.is_ascii_uppercase())
}

/// Rejected lookup input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedCode {
    #[error("enter a property code")]
    Empty,
    #[error("'{0}' is not a property code: codes start with SC- or RC-")]
    UnknownPrefix(String),
    #[error("'{0}' is not a property code: expected a layout like SC-SV-345-QD")]
    Layout(String),
}

/// Uppercased first character of every word in a property type label.
///
/// Not part of the issued code today; kept so callers that want type-prefixed
/// codes derive them identically.
pub fn type_initials(property_type: &str) -> String {
    property_type.split_whitespace().filter_map(initial).collect()
}

/// Uppercased first character of the first two words of a name.
///
/// Leading digits or symbols are kept as-is.
pub fn name_initials(name: &str) -> String {
    name.split_whitespace()
        .take(NAME_INITIALS)
        .filter_map(initial)
        .collect()
}

fn initial(word: &str) -> Option<char> {
    let first = word.chars().next()?;
    Some(first.to_uppercase().next().unwrap_or(first))
}

/// Issues property codes from an injected random source.
#[derive(Debug)]
pub struct PropertyCodeGenerator<R = StdRng> {
    rng: R,
}

impl PropertyCodeGenerator<StdRng> {
    /// Reproducible sequence for demos and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> PropertyCodeGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Code for a single property, e.g. `SC-SV-345-QD` for "Sunset Villa".
    pub fn generate_single_code(
        &mut self,
        name: &str,
        property_type: &str,
    ) -> Result<PropertyCode, InvalidArgument> {
        let code = self.issue(CodeKind::Single, name)?;
        debug!(
            %code,
            type_initials = %type_initials(property_type),
            "issued single property code"
        );
        Ok(code)
    }

    /// Code for a real-estate complex. `total_units` does not affect the code.
    pub fn generate_complex_code(
        &mut self,
        name: &str,
        total_units: u32,
    ) -> Result<PropertyCode, InvalidArgument> {
        let code = self.issue(CodeKind::Complex, name)?;
        debug!(%code, total_units, "issued complex code");
        Ok(code)
    }

    fn issue(&mut self, kind: CodeKind, name: &str) -> Result<PropertyCode, InvalidArgument> {
        if name.trim().is_empty() {
            return Err(InvalidArgument::EmptyName);
        }

        let initials = name_initials(name);
        let number: u16 = self.rng.gen_range(100..=999);
        let first = self.random_letter();
        let second = self.random_letter();

        Ok(PropertyCode(format!(
            "{}-{}-{}-{}{}",
            kind.prefix(),
            initials,
            number,
            first,
            second
        )))
    }

    fn random_letter(&mut self) -> char {
        char::from(self.rng.gen_range(b'A'..=b'Z'))
    }
}

/// [`PropertyCodeGenerator::generate_single_code`] over the thread-local RNG.
pub fn generate_single_code(
    name: &str,
    property_type: &str,
) -> Result<PropertyCode, InvalidArgument> {
    PropertyCodeGenerator::new(rand::thread_rng()).generate_single_code(name, property_type)
}

/// [`PropertyCodeGenerator::generate_complex_code`] over the thread-local RNG.
pub fn generate_complex_code(name: &str, total_units: u32) -> Result<PropertyCode, InvalidArgument> {
    PropertyCodeGenerator::new(rand::thread_rng()).generate_complex_code(name, total_units)
}
