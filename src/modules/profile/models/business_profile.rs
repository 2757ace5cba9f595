use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::BankDetails;

/// The issuing business's own identity: company details, GST registration
/// and bank account, reused on every invoice it raises. One profile per
/// installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BusinessProfile {
    pub company_name: String,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub ifsc_code: Option<String>,
    pub account_holder: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BusinessProfile {
    /// The profile's bank fields as invoice bank details, when a bank name
    /// has been configured. Used as the fallback when an invoice carries no
    /// bank details of its own.
    pub fn bank_details(&self) -> Option<BankDetails> {
        let bank_name = self.bank_name.clone()?;
        if bank_name.trim().is_empty() {
            return None;
        }

        Some(BankDetails {
            bank_name,
            account_number: self.account_number.clone().unwrap_or_default(),
            ifsc_code: self.ifsc_code.clone().unwrap_or_default(),
            account_holder: self.account_holder.clone().unwrap_or_default(),
        })
    }
}

/// Upsert payload for the business profile.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessProfileInput {
    pub company_name: String,
    #[serde(default)]
    pub gst_number: Option<String>,
    #[serde(default)]
    pub pan_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub ifsc_code: Option<String>,
    #[serde(default)]
    pub account_holder: Option<String>,
}

impl BusinessProfileInput {
    pub fn validate(&self) -> Result<()> {
        if self.company_name.trim().is_empty() {
            return Err(AppError::validation("Company name cannot be empty"));
        }

        Ok(())
    }
}
