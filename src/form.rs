//! # Cheque Form
//!
//! The user-entered content of one cheque, plus the bank-account lookup it
//! is synced from.
//!
//! Bank details (`bank`, `branch`, `account`, `currentCheque`, `currency`)
//! come only from a selected [`BankAccount`]; choosing another account
//! overwrites all of them. `amountInWords` is derived from `amount` and
//! `currency` and cannot be set directly.

use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

use crate::error::{ChequebookError, ValidationError};
use crate::layout::{Field, Orientation};
use crate::words;

/// Digits with an optional one- or two-digit fraction.
static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("valid amount regex"));

/// Letters, digits, spaces, hyphens, apostrophes and periods.
static PAYEE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N} '\-.]+$").expect("valid payee regex"));

/// Date format used by the form and printed on the cheque.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A bank account as returned by the external account service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: String,
    pub bank: String,
    pub branch: String,
    pub account_number: String,
    pub current_cheque_number: String,
    pub currency: String,
}

/// Source of bank accounts for the form.
#[async_trait]
pub trait BankDirectory: Send + Sync {
    /// All selectable accounts.
    async fn list(&self) -> Result<Vec<BankAccount>, ChequebookError>;

    /// The account with the given id, if any.
    async fn lookup(&self, id: &str) -> Result<Option<BankAccount>, ChequebookError>;
}

/// Accounts held in memory, typically loaded from a JSON array on disk.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBankDirectory {
    accounts: Vec<BankAccount>,
}

impl InMemoryBankDirectory {
    pub fn new(accounts: Vec<BankAccount>) -> Self {
        Self { accounts }
    }

    pub fn from_json(json: &str) -> Result<Self, ChequebookError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn load(path: &Path) -> Result<Self, ChequebookError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ChequebookError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}

#[async_trait]
impl BankDirectory for InMemoryBankDirectory {
    async fn list(&self) -> Result<Vec<BankAccount>, ChequebookError> {
        Ok(self.accounts.clone())
    }

    async fn lookup(&self, id: &str) -> Result<Option<BankAccount>, ChequebookError> {
        Ok(self.accounts.iter().find(|a| a.id == id).cloned())
    }
}

/// Content of one cheque.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChequeFormData {
    pub bank: String,
    pub bank_account_id: String,
    pub branch: String,
    pub account: String,
    pub current_cheque: String,
    pub currency: String,
    pub payee_name: String,
    /// Decimal string as typed.
    pub amount: String,
    #[serde(skip_deserializing)]
    amount_in_words: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub orientation: Orientation,
}

impl ChequeFormData {
    /// Sync every bank-derived field from the selected account.
    pub fn select_bank(&mut self, account: &BankAccount) {
        self.bank_account_id = account.id.clone();
        self.bank = account.bank.clone();
        self.branch = account.branch.clone();
        self.account = account.account_number.clone();
        self.current_cheque = account.current_cheque_number.clone();
        self.currency = account.currency.clone();
    }

    pub fn amount_in_words(&self) -> &str {
        &self.amount_in_words
    }

    /// Regenerate `amountInWords` from the current amount and currency.
    pub fn refresh_amount_in_words(&mut self) {
        self.amount_in_words = words::to_words(self.amount.trim(), &self.currency);
    }

    /// Text shown for a field on the cheque.
    pub fn field_text(&self, field: Field) -> &str {
        match field {
            Field::Date => self.date.trim(),
            Field::PayeeName => self.payee_name.trim(),
            Field::Amount => self.amount.trim(),
            Field::AmountInWords => &self.amount_in_words,
        }
    }

    /// Whether payee, amount and date are all filled in. Overlay fields are
    /// only shown once this holds.
    pub fn has_preview_content(&self) -> bool {
        !self.payee_name.trim().is_empty()
            && !self.amount.trim().is_empty()
            && !self.date.trim().is_empty()
    }

    /// Check the form is ready for a preview.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_payee_name(&self.payee_name)?;
        validate_amount(&self.amount)?;
        validate_date(&self.date)?;
        if self.currency.trim().is_empty() {
            return Err(ValidationError::CurrencyMissing);
        }
        Ok(())
    }
}

/// Payee names: at least two characters, at least one letter, and only
/// letters, digits, spaces, hyphens, apostrophes and periods.
pub fn validate_payee_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::PayeeRequired);
    }
    if name.chars().count() < 2 {
        return Err(ValidationError::PayeeTooShort);
    }
    if !name.chars().any(char::is_alphabetic) {
        return Err(ValidationError::PayeeNoLetter);
    }
    if !PAYEE_PATTERN.is_match(name) {
        return Err(ValidationError::PayeeInvalidCharacters);
    }
    Ok(())
}

/// Amounts: positive decimals with at most two decimal places.
pub fn validate_amount(amount: &str) -> Result<(), ValidationError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(ValidationError::AmountRequired);
    }
    if !AMOUNT_PATTERN.is_match(amount) {
        return Err(ValidationError::AmountInvalid);
    }
    if amount.chars().all(|c| c == '0' || c == '.') {
        return Err(ValidationError::AmountZero);
    }
    Ok(())
}

pub fn validate_date(date: &str) -> Result<NaiveDate, ValidationError> {
    let date = date.trim();
    if date.is_empty() {
        return Err(ValidationError::DateRequired);
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| ValidationError::DateInvalid(date.to_string()))
}
