use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrismart_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, Money, OrderId, Quantity, SessionId,
};
use agrismart_events::{Event, execute};

use crate::receipt::{BuyerDetails, LineSnapshot, OrderReceipt};

/// Whether the ledger currently holds any lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerState {
    Empty,
    NonEmpty,
}

/// One product's accumulated quantity and price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub unit_price: Money,
    pub quantity: Quantity,
    /// `unit_price × quantity`, checked when the line was last added to.
    pub line_total: Money,
}

/// Aggregate root: the cart ledger of one shopper session.
///
/// Lines are keyed by product name and kept in insertion order. There is at
/// most one line per name. The running total always fits in a `u64`: an add
/// that would overflow it is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLedger {
    id: SessionId,
    lines: Vec<(String, CartLine)>,
    total: Money,
    version: u64,
}

impl CartLedger {
    /// A fresh, empty ledger.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            total: Money::ZERO,
            version: 0,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> LedgerState {
        if self.lines.is_empty() {
            LedgerState::Empty
        } else {
            LedgerState::NonEmpty
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, name: &str) -> Option<&CartLine> {
        self.lines.iter().find(|(n, _)| n == name).map(|(_, line)| line)
    }

    /// Sum of `unit_price × quantity` over all lines; zero when empty.
    pub fn compute_total(&self) -> Money {
        self.total
    }

    /// Lines in insertion order.
    pub fn snapshot_lines(&self) -> Vec<LineSnapshot> {
        self.lines
            .iter()
            .map(|(name, line)| LineSnapshot {
                name: name.clone(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                line_total: line.line_total,
            })
            .collect()
    }

    /// Add `quantity` units of a product.
    ///
    /// A repeat add for the same name only grows the quantity; the line keeps
    /// the price it was first added with. Errors only if the accumulated
    /// quantity or the cart total would overflow, in which case nothing
    /// changes.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        unit_price: Money,
        quantity: Quantity,
    ) -> DomainResult<()> {
        let name = name.into();
        if let Some(existing) = self.line(&name) {
            if existing.unit_price != unit_price {
                tracing::warn!(
                    product = %name,
                    line_price = %existing.unit_price,
                    requested_price = %unit_price,
                    "price differs from existing cart line; keeping line price"
                );
            }
        }

        let command = CartCommand::AddItem(AddItem {
            session_id: self.id,
            name,
            unit_price,
            quantity,
            occurred_at: Utc::now(),
        });
        execute(self, &command)?;
        Ok(())
    }

    /// Check out: validate buyer fields, emit a receipt and clear the ledger.
    ///
    /// On error the ledger is unchanged.
    pub fn checkout(
        &mut self,
        buyer_name: &str,
        buyer_location: &str,
        buyer_contact: &str,
    ) -> DomainResult<OrderReceipt> {
        let command = CartCommand::Checkout(Checkout {
            session_id: self.id,
            order_id: OrderId::new(),
            buyer_name: buyer_name.to_string(),
            buyer_location: buyer_location.to_string(),
            buyer_contact: buyer_contact.to_string(),
            occurred_at: Utc::now(),
        });

        let events = execute(self, &command)?;
        events
            .into_iter()
            .find_map(|ev| match ev {
                CartEvent::OrderPlaced(e) => Some(e.receipt),
                CartEvent::ItemAdded(_) => None,
            })
            .ok_or_else(|| DomainError::invariant("checkout produced no receipt"))
    }
}

impl AggregateRoot for CartLedger {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub session_id: SessionId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Command: Checkout. Buyer fields are raw user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkout {
    pub session_id: SessionId,
    pub order_id: OrderId,
    pub buyer_name: String,
    pub buyer_location: String,
    pub buyer_contact: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
    Checkout(Checkout),
}

/// Event: ItemAdded.
///
/// `unit_price` is the price the line carries after the add and
/// `line_quantity` its accumulated quantity. `line_total` and `cart_total`
/// are the amounts after the add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub session_id: SessionId,
    pub name: String,
    pub unit_price: Money,
    pub added: Quantity,
    pub line_quantity: Quantity,
    pub line_total: Money,
    pub cart_total: Money,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrderPlaced. Applying it empties the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub session_id: SessionId,
    pub receipt: OrderReceipt,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    OrderPlaced(OrderPlaced),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "cart.ledger.item_added",
            CartEvent::OrderPlaced(_) => "cart.ledger.order_placed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::OrderPlaced(e) => e.occurred_at,
        }
    }
}

impl Aggregate for CartLedger {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => {
                let line = CartLine {
                    unit_price: e.unit_price,
                    quantity: e.line_quantity,
                    line_total: e.line_total,
                };
                match self.lines.iter_mut().find(|(n, _)| *n == e.name) {
                    Some((_, existing)) => *existing = line,
                    None => self.lines.push((e.name.clone(), line)),
                }
                self.total = e.cart_total;
            }
            CartEvent::OrderPlaced(_) => {
                self.lines.clear();
                self.total = Money::ZERO;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem(cmd) => self.handle_add_item(cmd),
            CartCommand::Checkout(cmd) => self.handle_checkout(cmd),
        }
    }
}

impl CartLedger {
    fn ensure_session(&self, session_id: SessionId) -> Result<(), DomainError> {
        if self.id != session_id {
            return Err(DomainError::invariant("session_id mismatch"));
        }
        Ok(())
    }

    fn handle_add_item(&self, cmd: &AddItem) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_session(cmd.session_id)?;

        let existing = self.line(&cmd.name);
        let (unit_price, line_quantity, previous_line_total) = match existing {
            Some(existing) => {
                let accumulated = existing.quantity.checked_add(cmd.quantity).ok_or_else(|| {
                    DomainError::invariant(format!("quantity of '{}' would overflow", cmd.name))
                })?;
                (existing.unit_price, accumulated, existing.line_total)
            }
            None => (cmd.unit_price, cmd.quantity, Money::ZERO),
        };

        let overflow = || DomainError::invariant("cart total would overflow");
        let line_total = unit_price.checked_times(line_quantity).ok_or_else(overflow)?;
        let cart_total = self
            .total
            .checked_sub(previous_line_total)
            .and_then(|rest| rest.checked_add(line_total))
            .ok_or_else(overflow)?;

        Ok(vec![CartEvent::ItemAdded(ItemAdded {
            session_id: cmd.session_id,
            name: cmd.name.clone(),
            unit_price,
            added: cmd.quantity,
            line_quantity,
            line_total,
            cart_total,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_checkout(&self, cmd: &Checkout) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_session(cmd.session_id)?;

        let buyer = BuyerDetails::new(&cmd.buyer_name, &cmd.buyer_location, &cmd.buyer_contact)?;

        if self.is_empty() {
            return Err(DomainError::invariant("cannot check out an empty cart"));
        }

        let receipt = OrderReceipt {
            order_id: cmd.order_id,
            buyer,
            lines: self.snapshot_lines(),
            total: self.compute_total(),
            placed_at: cmd.occurred_at,
        };

        Ok(vec![CartEvent::OrderPlaced(OrderPlaced {
            session_id: cmd.session_id,
            receipt,
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::MISSING_BUYER_FIELDS;
    use proptest::prelude::*;

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    fn price(n: u64) -> Money {
        Money::new(n)
    }

    fn test_ledger() -> CartLedger {
        CartLedger::new(SessionId::new())
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn new_ledger_is_empty_with_zero_total() {
        let ledger = test_ledger();
        assert_eq!(ledger.state(), LedgerState::Empty);
        assert!(ledger.snapshot_lines().is_empty());
        assert_eq!(ledger.compute_total(), Money::ZERO);
        assert_eq!(ledger.version(), 0);
    }

    #[test]
    fn repeated_add_accumulates_into_one_line() {
        let mut ledger = test_ledger();
        ledger.add_item("Maize", price(3000), qty(2)).unwrap();
        ledger.add_item("Maize", price(3000), qty(3)).unwrap();

        assert_eq!(ledger.len(), 1);
        assert_eq!(
            ledger.line("Maize"),
            Some(&CartLine {
                unit_price: price(3000),
                quantity: qty(5),
                line_total: price(15_000),
            })
        );
        assert_eq!(ledger.state(), LedgerState::NonEmpty);
    }

    #[test]
    fn repeated_add_with_other_price_keeps_line_price() {
        let mut ledger = test_ledger();
        ledger.add_item("Maize", price(3000), qty(1)).unwrap();
        ledger.add_item("Maize", price(9999), qty(1)).unwrap();

        let line = ledger.line("Maize").unwrap();
        assert_eq!(line.unit_price, price(3000));
        assert_eq!(line.quantity, qty(2));
        assert_eq!(ledger.compute_total(), price(6000));
    }

    #[test]
    fn snapshot_follows_insertion_order() {
        let mut ledger = test_ledger();
        ledger.add_item("Tomatoes (crate)", price(1500), qty(1)).unwrap();
        ledger.add_item("Beans (90kg bag)", price(6000), qty(1)).unwrap();
        ledger.add_item("Tomatoes (crate)", price(1500), qty(1)).unwrap();

        let names: Vec<String> = ledger.snapshot_lines().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Tomatoes (crate)", "Beans (90kg bag)"]);
    }

    #[test]
    fn quantity_overflow_is_rejected_without_change() {
        let mut ledger = test_ledger();
        ledger.add_item("Maize", price(1), qty(u32::MAX)).unwrap();
        let before = ledger.clone();

        let err = ledger.add_item("Maize", price(1), qty(1)).unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("would overflow") => {}
            _ => panic!("Expected InvariantViolation for quantity overflow"),
        }
        assert_eq!(ledger, before);
    }

    #[test]
    fn line_total_overflow_is_rejected_without_change() {
        let mut ledger = test_ledger();
        let err = ledger.add_item("Gold", price(u64::MAX), qty(2)).unwrap_err();
        assert_eq!(err, DomainError::invariant("cart total would overflow"));
        assert!(ledger.is_empty());
        assert_eq!(ledger.version(), 0);
    }

    #[test]
    fn cart_total_overflow_is_rejected_without_change() {
        let mut ledger = test_ledger();
        ledger.add_item("Gold", price(u64::MAX - 10), qty(1)).unwrap();
        let before = ledger.clone();

        let err = ledger.add_item("Maize", price(11), qty(1)).unwrap_err();
        assert_eq!(err, DomainError::invariant("cart total would overflow"));
        assert_eq!(ledger, before);
        assert_eq!(ledger.compute_total(), price(u64::MAX - 10));

        ledger.add_item("Maize", price(10), qty(1)).unwrap();
        assert_eq!(ledger.compute_total(), price(u64::MAX));
    }

    #[test]
    fn checkout_with_blank_name_leaves_ledger_untouched() {
        let mut ledger = test_ledger();
        ledger.add_item("Maize", price(3000), qty(2)).unwrap();
        let snapshot = ledger.snapshot_lines();
        let total = ledger.compute_total();
        let version = ledger.version();

        let err = ledger.checkout("", "Nairobi", "0700000000").unwrap_err();
        assert_eq!(err, DomainError::validation(MISSING_BUYER_FIELDS));
        assert_eq!(ledger.snapshot_lines(), snapshot);
        assert_eq!(ledger.compute_total(), total);
        assert_eq!(ledger.version(), version);
    }

    #[test]
    fn whitespace_only_field_counts_as_missing() {
        let mut ledger = test_ledger();
        ledger.add_item("Maize", price(3000), qty(1)).unwrap();
        let err = ledger.checkout("Jane", "Nairobi", "   ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(ledger.state(), LedgerState::NonEmpty);
    }

    #[test]
    fn successful_checkout_resets_ledger() {
        let mut ledger = test_ledger();
        ledger.add_item("Maize", price(3000), qty(1)).unwrap();
        ledger.add_item("Avocados (crate)", price(2000), qty(4)).unwrap();

        let receipt = ledger.checkout("Jane", "Nairobi", "0700000000").unwrap();
        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.total, price(11_000));
        assert_eq!(receipt.buyer.name(), "Jane");

        assert!(ledger.snapshot_lines().is_empty());
        assert_eq!(ledger.compute_total(), Money::ZERO);
        assert_eq!(ledger.state(), LedgerState::Empty);
    }

    #[test]
    fn checkout_of_empty_cart_is_rejected() {
        let mut ledger = test_ledger();
        let err = ledger.checkout("Jane", "Nairobi", "0700000000").unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) if msg.contains("empty cart") => {}
            _ => panic!("Expected InvariantViolation for empty cart checkout"),
        }
        assert_eq!(ledger.version(), 0);
    }

    #[test]
    fn blank_buyer_field_on_empty_cart_is_a_validation_error() {
        let mut ledger = test_ledger();
        let err = ledger.checkout("", "Nairobi", "0700000000").unwrap_err();
        assert_eq!(err, DomainError::validation(MISSING_BUYER_FIELDS));
        assert_eq!(ledger.version(), 0);
    }

    #[test]
    fn ledger_is_reusable_after_checkout() {
        let mut ledger = test_ledger();
        ledger.add_item("Maize", price(3000), qty(1)).unwrap();
        ledger.checkout("A", "B", "C").unwrap();

        ledger.add_item("Beans (90kg bag)", price(6000), qty(1)).unwrap();
        let receipt = ledger.checkout("A", "B", "C").unwrap();
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.lines[0].name, "Beans (90kg bag)");
        assert_eq!(receipt.lines[0].quantity, qty(1));
    }

    #[test]
    fn end_to_end_beans_and_tomatoes() {
        let mut ledger = test_ledger();
        ledger.add_item("Beans (90kg bag)", price(6000), qty(2)).unwrap();
        ledger.add_item("Tomatoes (crate)", price(1500), qty(3)).unwrap();
        assert_eq!(ledger.compute_total(), price(16_500));

        let receipt = ledger.checkout("A", "B", "C").unwrap();
        assert_eq!(receipt.total, price(16_500));
        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.lines[0].line_total, price(12_000));
        assert_eq!(receipt.lines[1].line_total, price(4_500));
        assert_eq!(receipt.item_count(), 5);
        assert!(ledger.is_empty());
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut ledger = test_ledger();
        ledger.add_item("Maize", price(3000), qty(1)).unwrap();
        let before = ledger.clone();

        let cmd = CartCommand::AddItem(AddItem {
            session_id: ledger.session_id(),
            name: "Maize".to_string(),
            unit_price: price(3000),
            quantity: qty(2),
            occurred_at: test_time(),
        });
        let events1 = ledger.handle(&cmd).unwrap();
        let events2 = ledger.handle(&cmd).unwrap();

        assert_eq!(ledger, before);
        assert_eq!(events1, events2);
        match &events1[0] {
            CartEvent::ItemAdded(e) => {
                assert_eq!(e.added, qty(2));
                assert_eq!(e.line_quantity, qty(3));
            }
            _ => panic!("Expected ItemAdded event"),
        }
    }

    #[test]
    fn commands_for_another_session_are_rejected() {
        let ledger = test_ledger();
        let cmd = CartCommand::AddItem(AddItem {
            session_id: SessionId::new(),
            name: "Maize".to_string(),
            unit_price: price(3000),
            quantity: qty(1),
            occurred_at: test_time(),
        });
        let err = ledger.handle(&cmd).unwrap_err();
        assert_eq!(err, DomainError::invariant("session_id mismatch"));
    }

    #[test]
    fn version_increments_on_apply() {
        let mut ledger = test_ledger();
        ledger.add_item("Maize", price(3000), qty(1)).unwrap();
        assert_eq!(ledger.version(), 1);
        ledger.add_item("Maize", price(3000), qty(1)).unwrap();
        assert_eq!(ledger.version(), 2);
        ledger.checkout("A", "B", "C").unwrap();
        assert_eq!(ledger.version(), 3);
    }

    #[test]
    fn event_types_are_stable() {
        let session_id = SessionId::new();
        let at = test_time();
        let ev = CartEvent::ItemAdded(ItemAdded {
            session_id,
            name: "Maize".to_string(),
            unit_price: price(3000),
            added: qty(1),
            line_quantity: qty(1),
            line_total: price(3000),
            cart_total: price(3000),
            occurred_at: at,
        });
        assert_eq!(ev.event_type(), "cart.ledger.item_added");
        assert_eq!(ev.occurred_at(), at);
    }

    #[test]
    fn receipt_serializes_plain_amounts() {
        let mut ledger = test_ledger();
        ledger.add_item("Maize", price(3000), qty(2)).unwrap();
        let receipt = ledger.checkout("Jane", "Nairobi", "0700000000").unwrap();

        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["total"], 6000);
        assert_eq!(json["lines"][0]["quantity"], 2);
        assert_eq!(json["buyer"]["location"], "Nairobi");
    }

    fn produce() -> impl Strategy<Value = Vec<(usize, u32)>> {
        prop::collection::vec((0usize..5, 1u32..50), 0..20)
    }

    const NAMES: [(&str, u64); 5] = [
        ("Maize (90kg bag)", 3000),
        ("Beans (90kg bag)", 6000),
        ("Potatoes (50kg bag)", 2500),
        ("Tomatoes (crate)", 1500),
        ("Avocados (crate)", 2000),
    ];

    fn fill(adds: &[(usize, u32)]) -> CartLedger {
        let mut ledger = test_ledger();
        for &(i, n) in adds {
            let (name, unit) = NAMES[i];
            ledger.add_item(name, price(unit), qty(n)).unwrap();
        }
        ledger
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the total always equals the sum over the current snapshot.
        #[test]
        fn total_matches_snapshot(adds in produce()) {
            let mut ledger = test_ledger();
            for &(i, n) in &adds {
                let (name, unit) = NAMES[i];
                ledger.add_item(name, price(unit), qty(n)).unwrap();
                let snapshot_total: u64 = ledger
                    .snapshot_lines()
                    .iter()
                    .map(|l| l.unit_price.amount() * u64::from(l.quantity.get()))
                    .sum();
                prop_assert_eq!(ledger.compute_total().amount(), snapshot_total);
            }
        }

        /// Property: at most one line per product, whatever the add sequence.
        #[test]
        fn one_line_per_product(adds in produce()) {
            let ledger = fill(&adds);
            let mut distinct: Vec<usize> = adds.iter().map(|&(i, _)| i).collect();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(ledger.len(), distinct.len());
        }

        /// Property: the order of adds does not change the total.
        #[test]
        fn total_is_order_independent(adds in produce()) {
            let forward = fill(&adds);
            let mut reversed = adds.clone();
            reversed.reverse();
            let backward = fill(&reversed);
            prop_assert_eq!(forward.compute_total(), backward.compute_total());
        }

        /// Property: a checkout with a blank field never changes the ledger.
        #[test]
        fn invalid_checkout_is_a_no_op(
            adds in produce(),
            blank in 0usize..3,
            padding in " {0,4}"
        ) {
            let mut ledger = fill(&adds);
            let before = ledger.clone();

            let mut fields = ["Jane".to_string(), "Nairobi".to_string(), "0700000000".to_string()];
            fields[blank] = padding;
            let result = ledger.checkout(&fields[0], &fields[1], &fields[2]);

            prop_assert!(result.is_err());
            prop_assert_eq!(ledger, before);
        }
    }
}
