//! Order data model and create-payload validation.
//!
//! Amounts use [`Decimal`] with the same scales the Postgres columns carry:
//! NUMERIC(18,8) for WLD and NUMERIC(18,2) for COP. The file backend
//! normalizes to those scales on insert so the two backends store identical
//! values.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Fractional digits stored for WLD amounts.
pub const WLD_SCALE: u32 = 8;

/// Fractional digits stored for COP amounts.
pub const COP_SCALE: u32 = 2;

/// Status assigned to every newly created order.
pub const STATUS_OPEN: &str = "OPEN";

/// A persisted trade order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    /// Store-assigned id. Strictly increasing, never reused.
    pub id: i64,
    /// Opaque World ID proof for the order's creator.
    pub world_id_hash: String,
    /// Trade direction, e.g. `buy` or `sell`.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub order_type: String,
    /// WLD amount offered or requested.
    pub amount_wld: Decimal,
    /// COP amount on the other side of the trade.
    pub amount_cop: Decimal,
    /// Free-form status; `OPEN` on creation.
    pub status: String,
    /// Contact details once a counterparty engages.
    pub counterparty_contact: Option<String>,
    /// Creation time, assigned by the store.
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Opaque World ID proof for the order's creator.
    pub world_id_hash: String,
    /// Trade direction.
    pub order_type: String,
    /// WLD amount, normalized to [`WLD_SCALE`].
    pub amount_wld: Decimal,
    /// COP amount, normalized to [`COP_SCALE`].
    pub amount_cop: Decimal,
    /// Optional contact supplied up front.
    pub counterparty_contact: Option<String>,
}

/// Partial update applied to an existing order.
///
/// Absent fields are left untouched, never cleared.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderPatch {
    /// New status, if provided.
    pub status: Option<String>,
    /// New counterparty contact, if provided.
    pub counterparty_contact: Option<String>,
}

/// Raw create payload as it arrives on the wire.
///
/// Every field is optional here; [`validate_new_order`] turns this into a
/// [`NewOrder`] or reports the first missing field.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderBody {
    /// World ID proof.
    pub world_id_hash: Option<String>,
    /// Trade direction.
    #[serde(rename = "type")]
    pub order_type: Option<String>,
    /// WLD amount.
    pub amount_wld: Option<Decimal>,
    /// COP amount.
    pub amount_cop: Option<Decimal>,
    /// Optional contact.
    pub counterparty_contact: Option<String>,
}

/// Validate a raw create payload into a [`NewOrder`].
///
/// The four required fields must be present and non-empty (strings) or
/// non-zero (amounts), matching what the NOT NULL schema plus the original
/// truthiness check accepted. Amounts are normalized to their column scales.
///
/// # Errors
///
/// Returns [`ValidationError`] naming the first field that is missing or
/// empty.
pub fn validate_new_order(body: CreateOrderBody) -> Result<NewOrder, ValidationError> {
    let world_id_hash = require_text(body.world_id_hash, "world_id_hash")?;
    let order_type = require_text(body.order_type, "type")?;
    let amount_wld = require_amount(body.amount_wld, "amount_wld")?;
    let amount_cop = require_amount(body.amount_cop, "amount_cop")?;

    Ok(NewOrder {
        world_id_hash,
        order_type,
        amount_wld: amount_wld.round_dp(WLD_SCALE),
        amount_cop: amount_cop.round_dp(COP_SCALE),
        counterparty_contact: body.counterparty_contact.filter(|c| !c.is_empty()),
    })
}

fn require_text(
    value: Option<String>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError { field }),
    }
}

fn require_amount(
    value: Option<Decimal>,
    field: &'static str,
) -> Result<Decimal, ValidationError> {
    match value {
        Some(v) if !v.is_zero() => Ok(v),
        _ => Err(ValidationError { field }),
    }
}

impl OrderPatch {
    /// Apply the patch to an order in place.
    pub fn apply(&self, order: &mut Order) {
        if let Some(status) = &self.status {
            order.status.clone_from(status);
        }
        if let Some(contact) = &self.counterparty_contact {
            order.counterparty_contact = Some(contact.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_body() -> CreateOrderBody {
        CreateOrderBody {
            world_id_hash: Some("abc".to_string()),
            order_type: Some("buy".to_string()),
            amount_wld: Some(dec!(10.5)),
            amount_cop: Some(dec!(42000)),
            counterparty_contact: None,
        }
    }

    #[test]
    fn valid_payload_passes() {
        let order = validate_new_order(valid_body()).unwrap();
        assert_eq!(order.world_id_hash, "abc");
        assert_eq!(order.order_type, "buy");
        assert_eq!(order.counterparty_contact, None);
    }

    #[test]
    fn empty_world_id_hash_rejected() {
        let body = CreateOrderBody {
            world_id_hash: Some(String::new()),
            ..valid_body()
        };
        let err = validate_new_order(body).unwrap_err();
        assert_eq!(err.field, "world_id_hash");
    }

    #[test]
    fn missing_type_rejected() {
        let body = CreateOrderBody {
            order_type: None,
            ..valid_body()
        };
        let err = validate_new_order(body).unwrap_err();
        assert_eq!(err.field, "type");
    }

    #[test]
    fn zero_amount_rejected() {
        let body = CreateOrderBody {
            amount_wld: Some(Decimal::ZERO),
            ..valid_body()
        };
        let err = validate_new_order(body).unwrap_err();
        assert_eq!(err.field, "amount_wld");
    }

    #[test]
    fn missing_amount_cop_rejected() {
        let body = CreateOrderBody {
            amount_cop: None,
            ..valid_body()
        };
        let err = validate_new_order(body).unwrap_err();
        assert_eq!(err.field, "amount_cop");
    }

    #[test]
    fn amounts_normalized_to_column_scales() {
        let body = CreateOrderBody {
            amount_wld: Some(dec!(1.123456789)),
            amount_cop: Some(dec!(42000.999)),
            ..valid_body()
        };
        let order = validate_new_order(body).unwrap();
        assert_eq!(order.amount_wld, dec!(1.12345679));
        assert_eq!(order.amount_cop, dec!(42001.00));
    }

    #[test]
    fn empty_contact_treated_as_absent() {
        let body = CreateOrderBody {
            counterparty_contact: Some(String::new()),
            ..valid_body()
        };
        let order = validate_new_order(body).unwrap();
        assert_eq!(order.counterparty_contact, None);
    }

    #[test]
    fn patch_applies_only_present_fields() {
        let mut order = Order {
            id: 1,
            world_id_hash: "abc".to_string(),
            order_type: "buy".to_string(),
            amount_wld: dec!(10.5),
            amount_cop: dec!(42000),
            status: STATUS_OPEN.to_string(),
            counterparty_contact: Some("@laura".to_string()),
            created_at: Utc::now(),
        };

        OrderPatch {
            status: Some("MATCHED".to_string()),
            counterparty_contact: None,
        }
        .apply(&mut order);

        assert_eq!(order.status, "MATCHED");
        assert_eq!(order.counterparty_contact.as_deref(), Some("@laura"));
    }

    #[test]
    fn order_serializes_type_under_wire_name() {
        let order = Order {
            id: 1,
            world_id_hash: "abc".to_string(),
            order_type: "sell".to_string(),
            amount_wld: dec!(2),
            amount_cop: dec!(8000),
            status: STATUS_OPEN.to_string(),
            counterparty_contact: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["type"], "sell");
        assert!(json.get("order_type").is_none());
        assert_eq!(json["counterparty_contact"], serde_json::Value::Null);
    }
}
