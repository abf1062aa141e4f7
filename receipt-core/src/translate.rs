//! Source-to-target receipt translation.
//!
//! [`translate`] is total: absent source fields become absent target fields
//! and unmapped codes become [`UNKNOWN`](crate::codes::UNKNOWN). It never
//! fails and never mutates its input.

use serde_json::{Map, Value};

use crate::codes;
use crate::models::source::{self, LineItem, SourceReceipt};
use crate::models::target::{
    AgentInfo, ClientInfo, MarkingCode, MoneyTransferOperator, Operator, PayingAgent, Position,
    ReceiptBody, ReceivePaymentsOperator, SupplierInfo, TargetPayment, TargetReceipt, Tax,
};
use crate::prune::prune;

/// Receipt operation type. Only sales are translated.
pub const OPERATION_SELL: &str = "sell";
pub const POSITION_TYPE: &str = "position";
/// Payment type written for every payment regardless of the source value.
pub const PAYMENT_ELECTRONICALLY: &str = "electronically";
/// Agent list emitted for items carrying any agent information.
pub const AGENT_ANOTHER: &str = "another";

/// Translate a source document into the target schema.
///
/// `org_id` comes from the vendor login response and `extern_device_id`
/// from the caller; neither is read from `source`.
pub fn translate(
    source: &SourceReceipt,
    org_id: Option<&str>,
    extern_device_id: Option<&str>,
) -> TargetReceipt {
    let receipt = source.receipt.as_ref();
    let client = receipt.and_then(|r| r.client.clone()).unwrap_or_default();
    let taxation_type = receipt
        .and_then(|r| r.company.as_ref())
        .and_then(|company| company.sno.clone());
    let items = receipt.map_or(&[][..], |r| r.items.as_slice());
    let payments = receipt.map_or(&[][..], |r| r.payments.as_slice());
    let vats = receipt.map_or(&[][..], |r| r.vats.as_slice());

    TargetReceipt {
        extern_id: source.external_id.clone(),
        extern_device_id: extern_device_id.map(str::to_owned),
        recreate_payment: None,
        org_id: org_id.map(str::to_owned),
        cashbox_id: None,
        receipt_body: ReceiptBody {
            extern_id: source.external_id.clone(),
            operation_type: OPERATION_SELL.to_string(),
            taxation_type,
            electronically: electronically(source.electronically.as_ref()),
            payments_place: client.address,
            operator: Operator {
                name: client.name.clone(),
                vatin: client.inn.clone(),
            },
            client_info: ClientInfo {
                email_or_phone: client.email,
                vatin: client.inn,
                name: client.name,
            },
            items: items.iter().map(position).collect(),
            payments: payments
                .iter()
                .map(|payment| TargetPayment {
                    sum: payment.sum.clone(),
                    payment_type: PAYMENT_ELECTRONICALLY.to_string(),
                })
                .collect(),
            taxes: vats.iter().map(tax).collect(),
        },
    }
}

/// Translate, serialize and prune: the document sent upstream.
pub fn translate_and_prune(
    source: &SourceReceipt,
    org_id: Option<&str>,
    extern_device_id: Option<&str>,
) -> Result<Value, serde_json::Error> {
    let target = translate(source, org_id, extern_device_id);
    Ok(prune(serde_json::to_value(target)?))
}

/// Only the literal string `"false"` disables electronic delivery. Boolean
/// `false` and every other value leave it enabled.
pub fn electronically(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str) != Some("false")
}

fn position(item: &LineItem) -> Position {
    let supplier = item.supplier_info.clone().unwrap_or_default();
    let vat = item.vat.clone().unwrap_or_default();

    Position {
        position_type: POSITION_TYPE.to_string(),
        name: item.name.clone(),
        price: item.price.clone(),
        quantity: item.quantity.clone(),
        amount: item.sum.clone(),
        measurement_unit: codes::measurement_unit(item.measure).to_string(),
        payment_method: codes::payment_method(item.payment_method.as_deref()).to_string(),
        payment_object: codes::payment_object(item.payment_object).to_string(),
        supplier_info: SupplierInfo {
            phones: supplier.phones,
            name: supplier.name,
            vatin: supplier.inn,
        },
        tax: Tax {
            tax_type: vat.tax_type,
            sum: vat.sum,
        },
        marking_code: marking_code(item.mark_code.as_ref()),
        agent_info: agent_info(item.agent_info.as_ref()),
    }
}

fn tax(entry: &source::TaxEntry) -> Tax {
    Tax {
        tax_type: entry.tax_type.clone(),
        sum: entry.sum.clone(),
    }
}

/// Classify the marking scheme by priority (`egais20`, then `egais30`,
/// otherwise `other`) and take the mark from the first key of the mapping.
///
/// The mark is not necessarily the value of the classified scheme: for
/// `{"egais30": a, "egais20": b}` the result is `egais20` with mark `a`.
pub fn marking_code(mark_code: Option<&Map<String, Value>>) -> MarkingCode {
    match mark_code {
        Some(marks) if !marks.is_empty() => {
            let scheme = codes::marking_scheme(|key| marks.contains_key(key));
            let (first_key, mark) = marks
                .iter()
                .next()
                .map(|(key, mark)| (key.as_str(), mark.clone()))
                .unwrap_or(("", Value::Null));

            if scheme != codes::OTHER_MARKING && first_key != scheme {
                tracing::warn!(
                    scheme = %scheme,
                    mark_key = %first_key,
                    "Marking scheme classified from a different key than the mark value"
                );
            }

            MarkingCode {
                scheme: scheme.to_string(),
                mark,
            }
        }
        _ => MarkingCode {
            scheme: codes::OTHER_MARKING.to_string(),
            mark: Value::Object(mark_code.cloned().unwrap_or_default()),
        },
    }
}

fn agent_info(agent: Option<&source::AgentInfo>) -> AgentInfo {
    let agents = agent
        .filter(|agent| !agent.is_empty())
        .map(|_| vec![AGENT_ANOTHER.to_string()]);
    let paying = agent.and_then(|a| a.paying_agent.as_ref());
    let receiving = agent.and_then(|a| a.receive_payments_operator.as_ref());
    let transfer = agent.and_then(|a| a.money_transfer_operator.as_ref());

    AgentInfo {
        agents,
        paying_agent: PayingAgent {
            operation: paying.and_then(|p| p.operation.clone()),
            phones: paying.and_then(|p| p.phones.clone()),
        },
        receive_payments_operator: ReceivePaymentsOperator {
            phones: receiving.and_then(|r| r.phones.clone()),
        },
        money_transfer_operator: MoneyTransferOperator {
            phones: transfer.and_then(|t| t.phones.clone()),
            name: transfer.and_then(|t| t.name.clone()),
            address: transfer.and_then(|t| t.address.clone()),
            vatin: transfer.and_then(|t| t.inn.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> LineItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_electronically_is_string_comparison() {
        assert!(!electronically(Some(&json!("false"))));
        assert!(electronically(Some(&json!(false))));
        assert!(electronically(Some(&json!("False"))));
        assert!(electronically(Some(&json!(0))));
        assert!(electronically(Some(&json!("true"))));
        assert!(electronically(Some(&Value::Null)));
        assert!(electronically(None));
    }

    #[test]
    fn test_marking_code_single_scheme() {
        let code = marking_code(item(json!({ "mark_code": { "egais20": "X" } })).mark_code.as_ref());
        assert_eq!(code.scheme, "egais20");
        assert_eq!(code.mark, json!("X"));
    }

    #[test]
    fn test_marking_code_unknown_scheme_is_other() {
        let code = marking_code(item(json!({ "mark_code": { "gs1m": "G" } })).mark_code.as_ref());
        assert_eq!(code.scheme, "other");
        assert_eq!(code.mark, json!("G"));
    }

    #[test]
    fn test_marking_code_first_key_supplies_mark() {
        // Classification prefers egais20, but the mark comes from the first key.
        let code = marking_code(
            item(json!({ "mark_code": { "egais30": "THIRTY", "egais20": "TWENTY" } }))
                .mark_code
                .as_ref(),
        );
        assert_eq!(code.scheme, "egais20");
        assert_eq!(code.mark, json!("THIRTY"));
    }

    #[test]
    fn test_marking_code_empty_or_absent() {
        let empty = marking_code(item(json!({ "mark_code": {} })).mark_code.as_ref());
        assert_eq!(empty.scheme, "other");
        assert_eq!(empty.mark, json!({}));

        let absent = marking_code(None);
        assert_eq!(absent.scheme, "other");
        assert_eq!(absent.mark, json!({}));
    }

    #[test]
    fn test_agent_info_presence_flag() {
        let with_agent = agent_info(
            item(json!({ "agent_info": { "paying_agent": { "operation": "Операция 1" } } }))
                .agent_info
                .as_ref(),
        );
        assert_eq!(with_agent.agents, Some(vec!["another".to_string()]));
        assert_eq!(with_agent.paying_agent.operation.as_deref(), Some("Операция 1"));

        let empty = agent_info(item(json!({ "agent_info": {} })).agent_info.as_ref());
        assert_eq!(empty.agents, None);

        let null_type = agent_info(item(json!({ "agent_info": { "type": null } })).agent_info.as_ref());
        assert_eq!(null_type.agents, Some(vec!["another".to_string()]));

        let absent = agent_info(None);
        assert_eq!(absent.agents, None);
        assert_eq!(absent.money_transfer_operator.vatin, None);
    }

    #[test]
    fn test_position_lookups_fall_back_to_unknown() {
        let position = position(&item(json!({
            "measure": 999,
            "payment_method": "barter",
        })));
        assert_eq!(position.measurement_unit, "unknown");
        assert_eq!(position.payment_method, "unknown");
        assert_eq!(position.payment_object, "unknown");
    }

    #[test]
    fn test_empty_document_translates() {
        let target = translate(&SourceReceipt::default(), None, None);
        assert_eq!(target.receipt_body.operation_type, "sell");
        assert!(target.receipt_body.electronically);
        assert!(target.receipt_body.items.is_empty());
        assert!(target.receipt_body.payments.is_empty());
        assert!(target.receipt_body.taxes.is_empty());
        assert!(target.recreate_payment.is_none());
        assert!(target.cashbox_id.is_none());
    }

    #[test]
    fn test_org_and_device_come_from_caller() {
        let source: SourceReceipt = serde_json::from_value(json!({
            "external_id": "ext-1",
            "device_number": "dev-in-document"
        }))
        .unwrap();
        let target = translate(&source, Some("org-7"), Some("dev-override"));
        assert_eq!(target.org_id.as_deref(), Some("org-7"));
        assert_eq!(target.extern_device_id.as_deref(), Some("dev-override"));
        assert_eq!(target.extern_id.as_deref(), Some("ext-1"));
        assert_eq!(target.receipt_body.extern_id.as_deref(), Some("ext-1"));
    }
}
