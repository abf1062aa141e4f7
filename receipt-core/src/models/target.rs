//! Target schema: the document submitted to the upstream receipt endpoint.
//!
//! Absent values serialize as `null` and are stripped by [`crate::prune`]
//! before transmission.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetReceipt {
    pub extern_id: Option<String>,
    pub extern_device_id: Option<String>,
    /// Reserved by the target schema; never populated.
    pub recreate_payment: Option<Value>,
    pub org_id: Option<String>,
    /// Reserved by the target schema; never populated.
    pub cashbox_id: Option<Value>,
    pub receipt_body: ReceiptBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptBody {
    pub extern_id: Option<String>,
    #[serde(rename = "type")]
    pub operation_type: String,
    pub taxation_type: Option<String>,
    pub electronically: bool,
    pub payments_place: Option<String>,
    pub operator: Operator,
    pub client_info: ClientInfo,
    pub items: Vec<Position>,
    pub payments: Vec<TargetPayment>,
    pub taxes: Vec<Tax>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub name: Option<String>,
    pub vatin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub email_or_phone: Option<String>,
    pub vatin: Option<String>,
    pub name: Option<String>,
}

/// One receipt position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(rename = "type")]
    pub position_type: String,
    pub name: Option<String>,
    pub price: Option<Number>,
    pub quantity: Option<Number>,
    pub amount: Option<Number>,
    pub measurement_unit: String,
    pub payment_method: String,
    pub payment_object: String,
    pub supplier_info: SupplierInfo,
    pub tax: Tax,
    pub marking_code: MarkingCode,
    pub agent_info: AgentInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierInfo {
    pub phones: Option<Vec<String>>,
    pub name: Option<String>,
    pub vatin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    #[serde(rename = "type")]
    pub tax_type: Option<String>,
    pub sum: Option<Number>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkingCode {
    #[serde(rename = "type")]
    pub scheme: String,
    pub mark: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInfo {
    pub agents: Option<Vec<String>>,
    pub paying_agent: PayingAgent,
    pub receive_payments_operator: ReceivePaymentsOperator,
    pub money_transfer_operator: MoneyTransferOperator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayingAgent {
    pub operation: Option<String>,
    pub phones: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivePaymentsOperator {
    pub phones: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyTransferOperator {
    pub phones: Option<Vec<String>>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub vatin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPayment {
    pub sum: Option<Number>,
    #[serde(rename = "type")]
    pub payment_type: String,
}
