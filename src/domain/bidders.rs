// src/domain/bidders.rs
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::LazyLock;
use super::core::{normalize_tax_id, BidderError, TaxId};

const TAX_ID_DIGITS: usize = 11;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Fields supplied when registering a bidder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidderData {
    pub name: String,
    #[serde(rename = "taxId")]
    pub tax_id: String,
    pub email: String,
    #[serde(rename = "birthDate")]
    pub birth_date: String,
}

/// Fields to change on an existing bidder; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidderUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "taxId")]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "birthDate")]
    pub birth_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Bidder {
    pub name: String,
    #[serde(rename = "taxId")]
    pub tax_id: TaxId,
    pub email: String,
    #[serde(rename = "birthDate")]
    pub birth_date: NaiveDate,
}

impl Bidder {
    pub fn new(data: BidderData) -> Result<Bidder, BidderError> {
        check_fields(&data.name, &data.tax_id, &data.email)?;
        Ok(Bidder {
            name: data.name.trim().to_string(),
            tax_id: normalize_tax_id(&data.tax_id),
            email: data.email.trim().to_string(),
            birth_date: parse_birth_date(&data.birth_date)?,
        })
    }

    /// Applies `update` on top of this bidder and validates the result.
    pub fn merged(&self, update: &BidderUpdate) -> Result<Bidder, BidderError> {
        let name = update.name.as_deref().unwrap_or(&self.name);
        let tax_id = update.tax_id.as_deref().unwrap_or(&self.tax_id);
        let email = update.email.as_deref().unwrap_or(&self.email);
        check_fields(name, tax_id, email)?;

        let birth_date = match &update.birth_date {
            Some(text) => parse_birth_date(text)?,
            None => self.birth_date,
        };
        Ok(Bidder {
            name: name.trim().to_string(),
            tax_id: normalize_tax_id(tax_id),
            email: email.trim().to_string(),
            birth_date,
        })
    }

    pub fn validate(&self) -> Result<(), BidderError> {
        check_fields(&self.name, &self.tax_id, &self.email)
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

fn check_fields(name: &str, tax_id: &str, email: &str) -> Result<(), BidderError> {
    if name.trim().is_empty() {
        return Err(BidderError::EmptyName);
    }
    if normalize_tax_id(tax_id).len() != TAX_ID_DIGITS {
        return Err(BidderError::InvalidTaxId(tax_id.to_string()));
    }
    if !EMAIL.is_match(email.trim()) {
        return Err(BidderError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// Accepts `YYYY-MM-DD` and `DD/MM/YYYY`.
pub fn parse_birth_date(text: &str) -> Result<NaiveDate, BidderError> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%d/%m/%Y"))
        .map_err(|_| BidderError::InvalidBirthDate(text.to_string()))
}

impl PartialEq for Bidder {
    fn eq(&self, other: &Self) -> bool {
        self.tax_id == other.tax_id
    }
}

impl Eq for Bidder {}

impl Hash for Bidder {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tax_id.hash(state);
    }
}

impl fmt::Display for Bidder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> ({})", self.name, self.email, self.tax_id)
    }
}
