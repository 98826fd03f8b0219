use serde::{Deserialize, Serialize};

use crate::availability::WorkingHours;

pub const DEFAULT_DEPOSIT_PERCENT: u32 = 30;

/// Destination account for deposits, shown on the payment screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    pub owner: String,
    pub bank: String,
    pub agency: String,
    pub account: String,
    pub pix_key: String,
}

impl Default for BankDetails {
    fn default() -> Self {
        Self {
            owner: "Salon Owner".to_string(),
            bank: "Example Bank".to_string(),
            agency: "0001".to_string(),
            account: "00000000-0".to_string(),
            pix_key: "salon@example.com".to_string(),
        }
    }
}

/// Business rules that vary per salon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalonSettings {
    pub working_hours: WorkingHours,
    pub deposit_percent: u32,
    pub bank: BankDetails,
}

impl Default for SalonSettings {
    fn default() -> Self {
        Self {
            working_hours: WorkingHours::default(),
            deposit_percent: DEFAULT_DEPOSIT_PERCENT,
            bank: BankDetails::default(),
        }
    }
}

impl SalonSettings {
    pub fn deposit_for(&self, total_cents: i64) -> i64 {
        deposit_for(total_cents, self.deposit_percent)
    }
}

/// Share of `total_cents` due up front, rounded down to the cent.
pub fn deposit_for(total_cents: i64, percent: u32) -> i64 {
    total_cents * i64::from(percent) / 100
}

/// Bank-transfer instructions returned once a booking is reserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInstructions {
    pub reference: String,
    pub deposit_cents: i64,
    pub total_cents: i64,
    pub bank: BankDetails,
}
