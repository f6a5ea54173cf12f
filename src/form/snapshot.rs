use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Currency the support amount is given in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Denomination {
    /// Philippine peso.
    #[default]
    Php,
    /// US dollar.
    Usd,
}

impl Denomination {
    /// ISO code printed before the amount.
    pub fn code(self) -> &'static str {
        match self {
            Self::Php => "PHP",
            Self::Usd => "USD",
        }
    }
}

impl std::fmt::Display for Denomination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Raw signature image bytes (any format the `image` crate decodes), drawn or uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureSource(Arc<[u8]>);

impl SignatureSource {
    /// Wrap encoded image bytes.
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SignatureSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureSource")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Everything needed to render one document, as collected by the questionnaire.
///
/// Snapshots are read-only inputs: rendering never mutates them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSnapshot {
    /// Missioner's name.
    pub missioner_name: String,
    /// Destination nation code (resolved through a [`NationDirectory`]).
    pub nation: String,
    /// Travel date.
    pub travel_date: Option<time::Date>,
    /// Missioner's sending church.
    pub sending_church: String,
    /// Partner's name; also printed under the signature.
    pub partner_name: String,
    /// Support amount as typed (parsed when formatting).
    pub amount: String,
    /// Amount currency.
    pub denomination: Denomination,
    /// Partner's email.
    pub email: String,
    /// Partner's mobile number.
    pub mobile: String,
    /// Partner's local church.
    pub local_church: String,
    /// Member flag; `Some(true)` selects the member SAF template.
    pub member: Option<bool>,
    /// Accountability answers keyed by question index.
    pub answers: BTreeMap<usize, String>,
    /// Signature image, if one was drawn or uploaded.
    #[serde(skip)]
    pub signature: Option<SignatureSource>,
}

impl FormSnapshot {
    /// Non-empty answer for question `index`.
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers
            .get(&index)
            .map(String::as_str)
            .filter(|a| !a.is_empty())
    }
}

/// One entry of the nation lookup supplied by the country-list collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nation {
    /// Display name.
    pub name: String,
    /// Code stored in [`FormSnapshot::nation`].
    pub code: String,
}

/// Nation code to display-name lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NationDirectory {
    nations: Vec<Nation>,
}

impl NationDirectory {
    /// Build from `{name, code}` entries.
    pub fn new(nations: Vec<Nation>) -> Self {
        Self { nations }
    }

    /// Display name for `code`, falling back to the code itself when unknown.
    pub fn display_name(&self, code: &str) -> String {
        self.nations
            .iter()
            .find(|n| n.code == code)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| code.to_string())
    }
}

/// Format a travel date as `MM / DD / YYYY`; `None` formats as an empty string.
pub fn format_travel_date(date: Option<time::Date>) -> String {
    match date {
        Some(d) => format!(
            "{:02} / {:02} / {}",
            u8::from(d.month()),
            d.day(),
            d.year()
        ),
        None => String::new(),
    }
}

/// Format an amount as `<CODE> <thousands-grouped value with 2 decimals>`.
///
/// Empty input formats as an empty string, as does input that is not a finite number.
pub fn format_amount(amount: &str, denomination: Denomination) -> String {
    let amount = amount.trim();
    if amount.is_empty() {
        return String::new();
    }
    let value = match amount.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            tracing::warn!(amount, "amount is not a finite number, leaving field blank");
            return String::new();
        }
    };

    let (int_part, frac_part) = round_cents(&value.abs().to_string());
    let sign = if value < 0.0 && format!("{int_part}{frac_part}").bytes().any(|b| b != b'0') {
        "-"
    } else {
        ""
    };
    format!(
        "{denomination} {sign}{}.{frac_part}",
        group_thousands(&int_part)
    )
}

// Rounds a plain decimal string to two fraction digits, ties away from zero. Working on the
// shortest round-trip digits keeps "1.005" a tie instead of 1.00499999...
fn round_cents(decimal: &str) -> (String, String) {
    let (int_part, frac) = decimal.split_once('.').unwrap_or((decimal, ""));
    let frac = frac.as_bytes();
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain((0..2).map(|i| frac.get(i).copied().unwrap_or(b'0')))
        .map(|b| b - b'0')
        .collect();

    if frac.get(2).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let text: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
    let (int_digits, cents) = text.split_at(text.len() - 2);
    (int_digits.to_string(), cents.to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/form/snapshot.rs"]
mod tests;
