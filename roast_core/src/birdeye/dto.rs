use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::helpers::format::normalize_amount;
use crate::helpers::lenient;

/// Envelope shared by every Birdeye endpoint.
///
/// A failed fetch is represented by the same shape with `success == false`
/// and `error`/`details` filled in, so later stages only ever branch on
/// `success`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default, deserialize_with = "lenient::true_only")]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub details: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            details: None,
        }
    }

    pub fn failed(error: impl Into<String>, details: impl fmt::Display) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
            details: Some(details.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The payload, only when the call succeeded.
    pub fn payload(&self) -> Option<&T> {
        if self.success {
            self.data.as_ref()
        } else {
            None
        }
    }

    pub fn payload_mut(&mut self) -> Option<&mut T> {
        if self.success {
            self.data.as_mut()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub wallet: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_usd: f64,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub items: Vec<PortfolioItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub symbol: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::i64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub decimals: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient::f64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub ui_amount: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::f64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_usd: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::f64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_usd: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::number_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub market_cap_usd: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionList {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub solana: Vec<TransactionRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub tx_hash: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub block_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub main_action: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::f64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub fee: Option<f64>,
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub balance_change: Vec<BalanceChange>,
    /// Derived display time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_block_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub symbol: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::i64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub decimals: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    /// Derived from `amount` and `decimals`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_amount_computed: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeList {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    pub items: Vec<TradeRecord>,
    #[serde(
        default,
        deserialize_with = "lenient::bool_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub has_next: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub tx_hash: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::i64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub block_unix_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<TradeLeg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<TradeLeg>,
    /// Derived display time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeLeg {
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub symbol: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::i64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub decimals: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient::f64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub ui_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_amount: Option<Value>,
    #[serde(
        default,
        deserialize_with = "lenient::f64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub ui_change_amount: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::f64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::f64_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub nearest_price: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient::string_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_swap: Option<String>,
    /// Derived from `amount` and `decimals` when both are reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_amount_computed: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TradeLeg {
    /// The raw amount scaled by the reported decimals, zero when either is unusable.
    pub fn normalized_amount(&self) -> f64 {
        normalize_amount(self.amount.as_ref().unwrap_or(&Value::Null), self.decimals)
    }

    /// Best available human amount: the API's own figure, then ours.
    pub fn display_amount(&self) -> f64 {
        match (self.ui_amount, self.ui_amount_computed) {
            (Some(amount), _) if amount != 0.0 => amount,
            (_, Some(computed)) => computed,
            _ => 0.0,
        }
    }

    pub fn symbol_or_unknown(&self) -> &str {
        self.symbol.as_deref().unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalletData {
    pub portfolio: ApiResponse<PortfolioData>,
    pub transactions: ApiResponse<TransactionList>,
    pub trades: ApiResponse<TradeList>,
}
