//! Reshape gateway payloads for human display.
//!
//! The gateway's payloads are forwarded untouched by the client; these
//! helpers only derive presentation views from them and never fail. A shape
//! they do not recognise falls back to compact JSON.

use serde_json::{Map, Value};

use crate::endpoint::Endpoint;

/// Placeholder for a missing value.
pub const EMPTY: &str = "—";

/// Summary keys shown first, in this order, when present.
const PREFERRED_SUMMARY_KEYS: [&str; 9] = [
    "netliquidation",
    "equitywithloanvalue",
    "totalcashvalue",
    "initmarginreq",
    "maintmarginreq",
    "availablefunds",
    "excessliquidity",
    "buyingpower",
    "grosspositionvalue",
];

/// Contract info keys and their labels, in display order.
const CONTRACT_FIELDS: [(&str, &str); 8] = [
    ("symbol", "Symbol"),
    ("con_id", "Contract ID"),
    ("company_name", "Company Name"),
    ("sec_type", "Security Type"),
    ("exchange", "Exchange"),
    ("trading_class", "Trading Class"),
    ("currency", "Currency"),
    ("category", "Category"),
];

const KNOWN_LABELS: [(&str, &str); 11] = [
    ("netliquidation", "Net Liquidation"),
    ("equitywithloanvalue", "Equity With Loan Value"),
    ("totalcashvalue", "Total Cash Value"),
    ("initmarginreq", "Init Margin Req"),
    ("maintmarginreq", "Maint Margin Req"),
    ("fullinitmarginreq", "Full Init Margin Req"),
    ("fullmaintmarginreq", "Full Maint Margin Req"),
    ("availablefunds", "Available Funds"),
    ("excessliquidity", "Excess Liquidity"),
    ("buyingpower", "Buying Power"),
    ("grosspositionvalue", "Gross Position Value"),
];

/// A labeled value ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Verdict derived from an auth status payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Authenticated,
    NotAuthenticated,
    Unknown,
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthState::Authenticated => write!(f, "Authenticated"),
            AuthState::NotAuthenticated => write!(f, "Not Authenticated"),
            AuthState::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Turn a payload key into a display label.
///
/// `netliquidation` -> `Net Liquidation`, `trading_class` -> `Trading Class`,
/// `GrossPositionValue` -> `Gross Position Value`.
pub fn friendly_label(key: &str) -> String {
    let lower = key.to_ascii_lowercase();
    if let Some((_, label)) = KNOWN_LABELS.iter().find(|(k, _)| *k == lower) {
        return (*label).to_string();
    }

    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for c in key.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format one summary entry.
///
/// Gateway summary entries are objects such as
/// `{"amount": 1234.5, "currency": "USD", "value": null}`.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => EMPTY.to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(entry) => {
            if let Some(amount) = entry.get("amount").and_then(Value::as_f64) {
                return match entry.get("currency").and_then(Value::as_str) {
                    Some(currency) if !currency.is_empty() => format!("{:.2} {}", amount, currency),
                    _ => format!("{:.2}", amount),
                };
            }
            match entry.get("value") {
                None => compact(value),
                Some(Value::Null) => EMPTY.to_string(),
                Some(Value::String(s)) if s == "null" => EMPTY.to_string(),
                Some(inner) => format_value(inner),
            }
        }
        Value::Array(_) => compact(value),
    }
}

fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

fn get_ci<'a>(object: &'a Map<String, Value>, key: &str) -> Option<(&'a String, &'a Value)> {
    object.iter().find(|(k, _)| k.eq_ignore_ascii_case(key))
}

/// Labeled fields of an account or portfolio summary; `None` unless an object.
pub fn summary_fields(payload: &Value) -> Option<Vec<Field>> {
    let object = payload.as_object()?;

    let mut fields = Vec::with_capacity(object.len());
    let mut shown: Vec<&String> = Vec::new();
    for key in PREFERRED_SUMMARY_KEYS {
        if let Some((k, v)) = get_ci(object, key) {
            fields.push(Field::new(friendly_label(k), format_value(v)));
            shown.push(k);
        }
    }
    for (k, v) in object {
        if !shown.contains(&k) {
            fields.push(Field::new(friendly_label(k), format_value(v)));
        }
    }
    Some(fields)
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

/// Account identifiers from an accounts payload, order preserved.
pub fn account_list(payload: &Value) -> Vec<String> {
    match payload {
        Value::Object(object) => {
            let listed = object.get("accounts").or_else(|| object.get("Accounts"));
            match listed {
                Some(Value::Array(items)) => items.iter().map(display_item).collect(),
                Some(Value::Object(items)) => items.values().map(display_item).collect(),
                Some(other) => vec![display_item(other)],
                None => object.values().filter_map(scalar_string).collect(),
            }
        }
        Value::Array(items) => items.iter().map(display_item).collect(),
        Value::Null => Vec::new(),
        other => vec![display_item(other)],
    }
}

fn display_item(value: &Value) -> String {
    scalar_string(value).unwrap_or_else(|| compact(value))
}

fn truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => Some(matches!(
            s.to_ascii_lowercase().as_str(),
            "true" | "authenticated" | "ok" | "yes" | "1"
        )),
        _ => None,
    }
}

/// Interpret an auth status payload.
pub fn auth_state(payload: &Value) -> AuthState {
    let value = match payload.as_object() {
        Some(object) if object.len() == 1 && !object.contains_key("authenticated") => {
            object.values().next().unwrap_or(payload)
        }
        _ => payload,
    };

    // Either flag being true wins.
    let verdict = match value {
        Value::Object(object) => {
            let flags = ["authenticated", "is_authenticated"]
                .iter()
                .filter_map(|key| object.get(*key).and_then(truthy));
            flags.fold(None, |acc, flag| Some(acc.unwrap_or(false) || flag))
        }
        scalar => truthy(scalar),
    };

    match verdict {
        Some(true) => AuthState::Authenticated,
        Some(false) => AuthState::NotAuthenticated,
        None => AuthState::Unknown,
    }
}

/// Labeled fields of a contract info payload.
pub fn contract_fields(payload: &Value) -> Vec<Field> {
    let mut fields: Vec<Field> = CONTRACT_FIELDS
        .iter()
        .map(|(key, label)| {
            let value = match payload.get(key) {
                None | Some(Value::Null) => EMPTY.to_string(),
                Some(Value::String(s)) if s.is_empty() => EMPTY.to_string(),
                Some(v) => format_value(v),
            };
            Field::new(*label, value)
        })
        .collect();

    let exchanges = match payload.get("valid_exchanges") {
        Some(Value::Array(items)) => items.iter().map(display_item).collect::<Vec<_>>(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    };
    if !exchanges.is_empty() {
        fields.push(Field::new("Valid Exchanges", exchanges.join(", ")));
    }
    fields
}

fn render_fields(fields: &[Field]) -> String {
    let width = fields.iter().map(|f| f.label.chars().count()).max().unwrap_or(0);
    fields
        .iter()
        .map(|f| format!("{:<width$}  {}", f.label, f.value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Plain-text rendering of a successful payload for `endpoint`.
pub fn render_text(endpoint: &Endpoint, payload: &Value) -> String {
    match endpoint {
        Endpoint::PortfolioSummary { .. } | Endpoint::AccountSummary { .. } => {
            match summary_fields(payload) {
                Some(fields) if !fields.is_empty() => render_fields(&fields),
                Some(_) => "(empty summary)".to_string(),
                None => pretty(payload),
            }
        }
        Endpoint::Accounts => {
            let accounts = account_list(payload);
            if accounts.is_empty() {
                return "(no accounts)".to_string();
            }
            accounts
                .iter()
                .enumerate()
                .map(|(i, account)| format!("{:>3}. {}", i + 1, account))
                .collect::<Vec<_>>()
                .join("\n")
        }
        Endpoint::AuthStatus => match auth_state(payload) {
            AuthState::Unknown => format!("Authentication: {} ({})", AuthState::Unknown, compact(payload)),
            state => format!("Authentication: {}", state),
        },
        Endpoint::ContractInfo { .. } => {
            if payload.is_object() {
                render_fields(&contract_fields(payload))
            } else {
                pretty(payload)
            }
        }
    }
}
