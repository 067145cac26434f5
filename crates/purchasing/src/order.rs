use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use poforge_core::{Aggregate, AggregateRoot, Cost, DomainError, DomainResult, SessionId};
use poforge_events::{Command, Event};

use crate::sku::format_sku;
use crate::supplier::{strip_whitespace, SupplierDirectory};

/// Location used when the user leaves the field blank.
pub const DEFAULT_LOCATION: &str = "Location";

/// Purchase order line item.
///
/// `sequence` and `sku` are fixed when the item is added; later supplier or
/// date changes only affect items added after them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub sequence: u32,
    pub description: String,
    pub cost: Cost,
    pub location: String,
    pub supplier_code: String,
    pub date: NaiveDate,
    pub sku: String,
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Empty,
    HasItems,
}

/// Aggregate root: one user's in-progress purchase order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSession {
    id: SessionId,
    suppliers: SupplierDirectory,
    supplier_name: Option<String>,
    supplier_code: String,
    date: NaiveDate,
    items: Vec<LineItem>,
    /// Highest sequence number handed out since the last reset.
    last_sequence: u32,
    version: u64,
}

impl OrderSession {
    /// New empty session with the stock supplier map.
    pub fn new(id: SessionId, date: NaiveDate) -> Self {
        Self::with_suppliers(id, date, SupplierDirectory::with_defaults())
    }

    pub fn with_suppliers(id: SessionId, date: NaiveDate, suppliers: SupplierDirectory) -> Self {
        Self {
            id,
            suppliers,
            supplier_name: None,
            supplier_code: String::new(),
            date,
            items: Vec::new(),
            last_sequence: 0,
            version: 0,
        }
    }

    pub fn id_typed(&self) -> SessionId {
        self.id
    }

    pub fn suppliers(&self) -> &SupplierDirectory {
        &self.suppliers
    }

    /// Display name of the selected supplier, if one was chosen.
    pub fn supplier_name(&self) -> Option<&str> {
        self.supplier_name.as_deref()
    }

    /// Code stamped on new items (empty until a supplier is selected).
    pub fn supplier_code(&self) -> &str {
        &self.supplier_code
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sequence number the next added item will receive.
    pub fn next_sequence(&self) -> u32 {
        self.last_sequence.saturating_add(1)
    }

    pub fn state(&self) -> SessionState {
        if self.items.is_empty() {
            SessionState::Empty
        } else {
            SessionState::HasItems
        }
    }

    /// Sum of all item costs (zero for an empty order).
    pub fn running_total(&self) -> Cost {
        self.items.iter().map(|item| item.cost).sum()
    }
}

impl AggregateRoot for OrderSession {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: SelectSupplier (free-text name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectSupplier {
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SelectDate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectDate {
    pub date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddSupplier (insert or overwrite a supplier map entry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSupplier {
    pub name: String,
    pub code: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub description: String,
    pub cost: Cost,
    pub location: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveLastItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLastItem {
    pub occurred_at: DateTime<Utc>,
}

/// Command: Reset (start a new purchase order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reset {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionCommand {
    SelectSupplier(SelectSupplier),
    SelectDate(SelectDate),
    AddSupplier(AddSupplier),
    AddItem(AddItem),
    RemoveLastItem(RemoveLastItem),
    Reset(Reset),
}

impl Command for SessionCommand {
    fn command_type(&self) -> &'static str {
        match self {
            SessionCommand::SelectSupplier(_) => "purchasing.session.select_supplier",
            SessionCommand::SelectDate(_) => "purchasing.session.select_date",
            SessionCommand::AddSupplier(_) => "purchasing.session.add_supplier",
            SessionCommand::AddItem(_) => "purchasing.session.add_item",
            SessionCommand::RemoveLastItem(_) => "purchasing.session.remove_last_item",
            SessionCommand::Reset(_) => "purchasing.session.reset",
        }
    }
}

/// Event: SupplierSelected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierSelected {
    pub name: String,
    pub code: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: DateSelected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSelected {
    pub date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SupplierAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierAdded {
    pub name: String,
    pub code: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub item: LineItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LastItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastItemRemoved {
    pub item: LineItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderReset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReset {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    SupplierSelected(SupplierSelected),
    DateSelected(DateSelected),
    SupplierAdded(SupplierAdded),
    ItemAdded(ItemAdded),
    LastItemRemoved(LastItemRemoved),
    OrderReset(OrderReset),
}

impl Event for SessionEvent {
    fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::SupplierSelected(_) => "purchasing.session.supplier_selected",
            SessionEvent::DateSelected(_) => "purchasing.session.date_selected",
            SessionEvent::SupplierAdded(_) => "purchasing.session.supplier_added",
            SessionEvent::ItemAdded(_) => "purchasing.session.item_added",
            SessionEvent::LastItemRemoved(_) => "purchasing.session.last_item_removed",
            SessionEvent::OrderReset(_) => "purchasing.session.reset",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SessionEvent::SupplierSelected(e) => e.occurred_at,
            SessionEvent::DateSelected(e) => e.occurred_at,
            SessionEvent::SupplierAdded(e) => e.occurred_at,
            SessionEvent::ItemAdded(e) => e.occurred_at,
            SessionEvent::LastItemRemoved(e) => e.occurred_at,
            SessionEvent::OrderReset(e) => e.occurred_at,
        }
    }
}

impl Aggregate for OrderSession {
    type Command = SessionCommand;
    type Event = SessionEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            SessionEvent::SupplierSelected(e) => {
                self.supplier_name = Some(e.name.clone());
                self.supplier_code = e.code.clone();
            }
            SessionEvent::DateSelected(e) => {
                self.date = e.date;
            }
            SessionEvent::SupplierAdded(e) => {
                // Already normalised by `handle`.
                let _ = self.suppliers.insert(&e.name, &e.code);
            }
            SessionEvent::ItemAdded(e) => {
                self.last_sequence = self.last_sequence.max(e.item.sequence);
                self.items.push(e.item.clone());
            }
            SessionEvent::LastItemRemoved(e) => {
                if self.items.last().map(|item| item.sequence) == Some(e.item.sequence) {
                    self.items.pop();
                }
            }
            SessionEvent::OrderReset(_) => {
                self.items.clear();
                self.last_sequence = 0;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SessionCommand::SelectSupplier(cmd) => self.handle_select_supplier(cmd),
            SessionCommand::SelectDate(cmd) => Ok(vec![SessionEvent::DateSelected(DateSelected {
                date: cmd.date,
                occurred_at: cmd.occurred_at,
            })]),
            SessionCommand::AddSupplier(cmd) => self.handle_add_supplier(cmd),
            SessionCommand::AddItem(cmd) => self.handle_add_item(cmd),
            SessionCommand::RemoveLastItem(cmd) => self.handle_remove_last(cmd),
            SessionCommand::Reset(cmd) => Ok(vec![SessionEvent::OrderReset(OrderReset {
                occurred_at: cmd.occurred_at,
            })]),
        }
    }
}

impl OrderSession {
    fn handle_select_supplier(
        &self,
        cmd: &SelectSupplier,
    ) -> Result<Vec<SessionEvent>, DomainError> {
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("supplier name is required"));
        }

        // Known suppliers resolve to their code; free text becomes the code itself.
        let (name, code) = match self.suppliers.lookup(name) {
            Some((known, code)) => (known.to_string(), code.to_string()),
            None => (name.to_string(), strip_whitespace(name)),
        };

        Ok(vec![SessionEvent::SupplierSelected(SupplierSelected {
            name,
            code,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_supplier(&self, cmd: &AddSupplier) -> Result<Vec<SessionEvent>, DomainError> {
        let (name, code) = SupplierDirectory::normalize_entry(&cmd.name, &cmd.code)?;
        Ok(vec![SessionEvent::SupplierAdded(SupplierAdded {
            name,
            code,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_item(&self, cmd: &AddItem) -> Result<Vec<SessionEvent>, DomainError> {
        let description = cmd.description.trim();
        if description.is_empty() {
            return Err(DomainError::validation("item description is required"));
        }
        if !cmd.cost.is_positive() {
            return Err(DomainError::validation("item cost must be greater than zero"));
        }
        if cmd.cost > Cost::MAX {
            return Err(DomainError::validation(format!(
                "item cost must not exceed {}",
                Cost::MAX
            )));
        }
        if self.running_total().checked_add(cmd.cost).is_none() {
            return Err(DomainError::validation("running total would overflow"));
        }

        let sequence = self
            .last_sequence
            .checked_add(1)
            .ok_or_else(|| DomainError::invariant("sequence number overflow"))?;

        let mut location = strip_whitespace(&cmd.location);
        if location.is_empty() {
            location = DEFAULT_LOCATION.to_string();
        }

        let sku = format_sku(self.date, sequence, cmd.cost, &location, &self.supplier_code);

        Ok(vec![SessionEvent::ItemAdded(ItemAdded {
            item: LineItem {
                sequence,
                description: description.to_string(),
                cost: cmd.cost,
                location,
                supplier_code: self.supplier_code.clone(),
                date: self.date,
                sku,
            },
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove_last(&self, cmd: &RemoveLastItem) -> Result<Vec<SessionEvent>, DomainError> {
        let item = self.items.last().ok_or_else(DomainError::empty_order)?;
        Ok(vec![SessionEvent::LastItemRemoved(LastItemRemoved {
            item: item.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }
}

/// Direct operations, stamped with the current time.
///
/// Each one builds the matching command and runs it through
/// `poforge_events::execute`, so a rejected call leaves the session unchanged.
impl OrderSession {
    pub fn add_item(
        &mut self,
        description: impl Into<String>,
        cost: Cost,
        location: impl Into<String>,
    ) -> DomainResult<LineItem> {
        let cmd = SessionCommand::AddItem(AddItem {
            description: description.into(),
            cost,
            location: location.into(),
            occurred_at: Utc::now(),
        });
        match single_event(poforge_events::execute(self, &cmd)?)? {
            SessionEvent::ItemAdded(e) => Ok(e.item),
            other => Err(unexpected(&other)),
        }
    }

    pub fn remove_last_item(&mut self) -> DomainResult<LineItem> {
        let cmd = SessionCommand::RemoveLastItem(RemoveLastItem {
            occurred_at: Utc::now(),
        });
        match single_event(poforge_events::execute(self, &cmd)?)? {
            SessionEvent::LastItemRemoved(e) => Ok(e.item),
            other => Err(unexpected(&other)),
        }
    }

    pub fn reset(&mut self) {
        let cmd = SessionCommand::Reset(Reset {
            occurred_at: Utc::now(),
        });
        // Reset is unconditional; handle never rejects it.
        let _ = poforge_events::execute(self, &cmd);
    }

    pub fn add_supplier(&mut self, name: &str, code: &str) -> DomainResult<()> {
        let cmd = SessionCommand::AddSupplier(AddSupplier {
            name: name.to_string(),
            code: code.to_string(),
            occurred_at: Utc::now(),
        });
        poforge_events::execute(self, &cmd)?;
        Ok(())
    }

    pub fn select_supplier(&mut self, name: &str) -> DomainResult<()> {
        let cmd = SessionCommand::SelectSupplier(SelectSupplier {
            name: name.to_string(),
            occurred_at: Utc::now(),
        });
        poforge_events::execute(self, &cmd)?;
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        let cmd = SessionCommand::SelectDate(SelectDate {
            date,
            occurred_at: Utc::now(),
        });
        let _ = poforge_events::execute(self, &cmd);
    }
}

fn single_event(mut events: Vec<SessionEvent>) -> DomainResult<SessionEvent> {
    match (events.pop(), events.is_empty()) {
        (Some(event), true) => Ok(event),
        _ => Err(DomainError::invariant("expected exactly one event")),
    }
}

fn unexpected(event: &SessionEvent) -> DomainError {
    DomainError::invariant(format!("unexpected event {}", event.event_type()))
}
