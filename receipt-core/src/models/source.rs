//! Source schema: the receipt document accepted from callers.
//!
//! Every field is optional. Fields the target schema has no place for are
//! ignored on deserialization.

use serde::{de, Deserialize, Deserializer};
use serde_json::{Map, Number, Value};

use super::null_as_default;

/// Caller-supplied receipt document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceReceipt {
    pub external_id: Option<String>,
    pub device_number: Option<String>,
    /// Compared against the literal string `"false"`, so any JSON type is accepted.
    pub electronically: Option<Value>,
    pub receipt: Option<ReceiptPayload>,
}

/// The `receipt` object of a source document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReceiptPayload {
    pub client: Option<Client>,
    pub company: Option<Company>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<LineItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payments: Vec<Payment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vats: Vec<TaxEntry>,
    pub cashier: Option<String>,
    pub cashier_inn: Option<String>,
    pub total: Option<Number>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Client {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub inn: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Company {
    pub email: Option<String>,
    /// Taxation system code (`osn`, `usn_income`, ...).
    pub sno: Option<String>,
    pub inn: Option<String>,
    pub payment_address: Option<String>,
}

/// One purchased position.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LineItem {
    pub name: Option<String>,
    pub price: Option<Number>,
    pub quantity: Option<Number>,
    pub sum: Option<Number>,
    pub measure: Option<i64>,
    pub payment_method: Option<String>,
    pub payment_object: Option<i64>,
    pub vat: Option<TaxEntry>,
    /// Marking scheme name to encoded mark. Key order follows the document.
    pub mark_code: Option<Map<String, Value>>,
    pub agent_info: Option<AgentInfo>,
    pub supplier_info: Option<SupplierInfo>,
}

/// Agent details. Presence is decided by the raw key set, so a key whose
/// value is `null` still counts.
#[derive(Debug, Clone, Default)]
pub struct AgentInfo {
    pub agent_type: Option<String>,
    pub paying_agent: Option<PayingAgent>,
    pub receive_payments_operator: Option<ReceivePaymentsOperator>,
    pub money_transfer_operator: Option<MoneyTransferOperator>,
    key_count: usize,
}

#[derive(Deserialize)]
struct AgentFields {
    #[serde(rename = "type")]
    agent_type: Option<String>,
    paying_agent: Option<PayingAgent>,
    receive_payments_operator: Option<ReceivePaymentsOperator>,
    money_transfer_operator: Option<MoneyTransferOperator>,
}

impl AgentInfo {
    /// True when the source object carried no keys at all.
    pub fn is_empty(&self) -> bool {
        self.key_count == 0
    }
}

impl<'de> Deserialize<'de> for AgentInfo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let key_count = raw.len();
        let fields = AgentFields::deserialize(Value::Object(raw)).map_err(de::Error::custom)?;

        Ok(Self {
            agent_type: fields.agent_type,
            paying_agent: fields.paying_agent,
            receive_payments_operator: fields.receive_payments_operator,
            money_transfer_operator: fields.money_transfer_operator,
            key_count,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayingAgent {
    pub operation: Option<String>,
    pub phones: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReceivePaymentsOperator {
    pub phones: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoneyTransferOperator {
    pub phones: Option<Vec<String>>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub inn: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierInfo {
    pub phones: Option<Vec<String>>,
    pub name: Option<String>,
    pub inn: Option<String>,
}

/// Payment entry. Only `sum` reaches the target document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Payment {
    pub sum: Option<Number>,
    #[serde(rename = "type")]
    pub payment_type: Option<Value>,
}

/// VAT entry, used both per item (`vat`) and per receipt (`vats`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaxEntry {
    #[serde(rename = "type")]
    pub tax_type: Option<String>,
    pub sum: Option<Number>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_collections_default_to_empty() {
        let source: SourceReceipt =
            serde_json::from_value(json!({ "receipt": { "items": null } })).unwrap();
        let receipt = source.receipt.unwrap();
        assert!(receipt.items.is_empty());
        assert!(receipt.payments.is_empty());
        assert!(receipt.vats.is_empty());
    }

    #[test]
    fn test_mark_code_keeps_document_order() {
        let item: LineItem = serde_json::from_value(json!({
            "mark_code": { "egais30": "B", "egais20": "A" }
        }))
        .unwrap();
        let keys: Vec<_> = item.mark_code.unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["egais30", "egais20"]);
    }

    #[test]
    fn test_agent_info_presence() {
        let empty: AgentInfo = serde_json::from_value(json!({})).unwrap();
        assert!(empty.is_empty());

        let typed: AgentInfo = serde_json::from_value(json!({ "type": "another" })).unwrap();
        assert!(!typed.is_empty());

        let unknown_key: AgentInfo =
            serde_json::from_value(json!({ "commission": 10 })).unwrap();
        assert!(!unknown_key.is_empty());

        let null_type: AgentInfo = serde_json::from_value(json!({ "type": null })).unwrap();
        assert!(!null_type.is_empty());
        assert!(null_type.agent_type.is_none());
    }

    #[test]
    fn test_agent_info_rejects_wrong_field_type() {
        let result: Result<AgentInfo, _> = serde_json::from_value(json!({ "type": 5 }));
        assert!(result.is_err());
    }
}
