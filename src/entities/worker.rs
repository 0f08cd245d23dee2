use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::utils::{
    date_format::rfc3339_option,
    serde_helpers::{decimal_as_number, lenient_decimal, non_empty_text},
};

const DEFAULT_CURRENCY: &str = "EUR";
const DEFAULT_LANGUAGE: &str = "pt";
const DEFAULT_COUNTRY: &str = "PT";
const MILLIS_PER_DAY: i128 = 86_400_000;

/// Identifies a worker account in a [`TimeStore`](crate::store::TimeStore).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(Uuid);

impl WorkerId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for WorkerId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for WorkerId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for WorkerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// How a deduction policy's `value` is applied to gross pay.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeductionKind {
    /// `value` is a percentage of gross pay
    Percentage,
    /// `value` is a flat amount charged once per period with non-zero earnings
    Fixed,
}

/// A social-security or income-tax rule attached to a worker profile.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct DeductionPolicy {
    #[serde(rename = "type")]
    pub kind: DeductionKind,
    #[serde(
        default,
        deserialize_with = "lenient_decimal",
        serialize_with = "decimal_as_number"
    )]
    pub value: Decimal,
}

impl DeductionPolicy {
    #[must_use]
    pub const fn percentage(rate: Decimal) -> Self {
        Self {
            kind: DeductionKind::Percentage,
            value: rate,
        }
    }

    #[must_use]
    pub const fn fixed(amount: Decimal) -> Self {
        Self {
            kind: DeductionKind::Fixed,
            value: amount,
        }
    }

    /// The amount this policy deducts from a period's gross pay.
    ///
    /// A fixed charge is waived when the period has no earnings.
    #[must_use]
    pub fn amount(&self, gross_pay: Decimal) -> Decimal {
        match self.kind {
            DeductionKind::Percentage => {
                gross_pay.saturating_mul(self.value) / Decimal::ONE_HUNDRED
            }
            DeductionKind::Fixed if gross_pay > Decimal::ZERO => self.value,
            DeductionKind::Fixed => Decimal::ZERO,
        }
    }
}

/// What an account is allowed to do in the web client.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkerRole {
    /// manages every other account
    Master,
    #[default]
    Employee,
    Support,
}

/// Pay settings and identity of a worker.
///
/// Field names follow the JSON documents produced by the web client, so the
/// income-tax policy is serialized as `irs`. Keys this type does not model
/// (passwords, pictures) are kept in `extra` and written back unchanged.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkerProfile {
    /// Account id assigned by the web client, unrelated to [`WorkerId`]
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub name: String,
    pub username: String,
    pub role: WorkerRole,
    /// ISO 4217 code, only used when amounts are rendered
    pub currency: String,
    pub language: String,
    pub country: String,
    #[serde(
        deserialize_with = "lenient_decimal",
        serialize_with = "decimal_as_number"
    )]
    pub hourly_rate: Decimal,
    /// Tax id (NIF)
    #[serde(deserialize_with = "non_empty_text", skip_serializing_if = "Option::is_none")]
    pub nif: Option<String>,
    #[serde(deserialize_with = "non_empty_text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(deserialize_with = "non_empty_text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_security: Option<DeductionPolicy>,
    #[serde(rename = "irs", skip_serializing_if = "Option::is_none")]
    pub income_tax: Option<DeductionPolicy>,
    /// Suspended accounts keep their records but cannot record new days.
    pub is_active: bool,
    #[serde(with = "rfc3339_option", skip_serializing_if = "Option::is_none")]
    pub subscription_date: Option<OffsetDateTime>,
    /// Start of the yearly subscription, set on the first login.
    #[serde(with = "rfc3339_option", skip_serializing_if = "Option::is_none")]
    pub first_access_date: Option<OffsetDateTime>,
    pub is_provisional_password: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkerProfile {
    #[must_use]
    pub fn new(name: impl Into<String>, hourly_rate: Decimal) -> Self {
        Self {
            name: name.into(),
            hourly_rate,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    #[must_use]
    pub fn with_social_security(mut self, policy: DeductionPolicy) -> Self {
        self.social_security = Some(policy);
        self
    }

    #[must_use]
    pub fn with_income_tax(mut self, policy: DeductionPolicy) -> Self {
        self.income_tax = Some(policy);
        self
    }

    #[must_use]
    pub fn with_first_access(mut self, at: OffsetDateTime) -> Self {
        self.first_access_date = Some(at);
        self
    }

    /// When the yearly subscription runs out, or `None` before the first access.
    #[must_use]
    pub fn subscription_expires_at(&self) -> Option<OffsetDateTime> {
        let start = self.first_access_date?;
        // 29 February rolls over to 1 March
        Some(
            start
                .replace_year(start.year() + 1)
                .unwrap_or_else(|_| start.saturating_add(Duration::days(366))),
        )
    }

    /// Whole days left on the subscription at `now`, rounded up. Zero or negative
    /// once it has expired, `None` before the first access.
    #[must_use]
    pub fn subscription_days_remaining(&self, now: OffsetDateTime) -> Option<i64> {
        let left = self.subscription_expires_at()? - now;
        let days = -(-left.whole_milliseconds()).div_euclid(MILLIS_PER_DAY);
        i64::try_from(days).ok()
    }
}

impl Default for WorkerProfile {
    fn default() -> Self {
        Self {
            account_id: None,
            name: String::new(),
            username: String::new(),
            role: WorkerRole::default(),
            currency: DEFAULT_CURRENCY.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            hourly_rate: Decimal::ZERO,
            nif: None,
            email: None,
            phone: None,
            social_security: None,
            income_tax: None,
            is_active: true,
            subscription_date: None,
            first_access_date: None,
            is_provisional_password: false,
            extra: Map::new(),
        }
    }
}
