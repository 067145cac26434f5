//! Read-only snapshot of a session, rebuilt after every command for rendering.

use chrono::NaiveDate;
use serde::Serialize;

use poforge_core::{Cost, SessionId};

use crate::order::{LineItem, OrderSession, SessionState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupplierEntry {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderView {
    pub session_id: SessionId,
    pub state: SessionState,
    pub supplier_name: Option<String>,
    pub supplier_code: String,
    pub date: NaiveDate,
    pub items: Vec<LineItem>,
    pub total: Cost,
    pub next_sequence: u32,
    pub suppliers: Vec<SupplierEntry>,
}

impl OrderView {
    pub fn is_empty(&self) -> bool {
        self.state == SessionState::Empty
    }
}

impl From<&OrderSession> for OrderView {
    fn from(session: &OrderSession) -> Self {
        Self {
            session_id: session.id_typed(),
            state: session.state(),
            supplier_name: session.supplier_name().map(str::to_string),
            supplier_code: session.supplier_code().to_string(),
            date: session.date(),
            items: session.items().to_vec(),
            total: session.running_total(),
            next_sequence: session.next_sequence(),
            suppliers: session
                .suppliers()
                .iter()
                .map(|(name, code)| SupplierEntry {
                    name: name.to_string(),
                    code: code.to_string(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_session() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let mut session = OrderSession::new(SessionId::new(), date);
        session.select_supplier("B&Q").unwrap();
        session.add_item("Paint", Cost::from_pennies(1899), "Shed").unwrap();

        let view = OrderView::from(&session);
        assert!(!view.is_empty());
        assert_eq!(view.supplier_name.as_deref(), Some("B&Q"));
        assert_eq!(view.supplier_code, "BQ");
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.total, Cost::from_pennies(1899));
        assert_eq!(view.next_sequence, 2);
        assert_eq!(view.suppliers.len(), 4);
    }

    #[test]
    fn serializes_state_in_snake_case() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let session = OrderSession::new(SessionId::new(), date);
        let json = serde_json::to_value(OrderView::from(&session)).unwrap();
        assert_eq!(json["state"], "empty");
        assert_eq!(json["total"], "0.00");
    }
}
