use super::EntityId;

/// Turn bookkeeping: the fixed acting order and whose turn it is.
///
/// The order is built once during scenario initialization (player characters
/// first, then monsters, each in roster order) and its length never changes
/// afterwards. `current_turn` always indexes into `turn_order` while it is
/// non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TurnState {
    pub(crate) turn_order: Vec<EntityId>,
    pub(crate) current_turn: usize,
}

impl TurnState {
    /// Creates an empty turn state (no order yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// The acting order, by entity id.
    pub fn turn_order(&self) -> &[EntityId] {
        &self.turn_order
    }

    /// Index of the acting entity within [`turn_order`](Self::turn_order).
    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    /// The entity whose turn it is, if an order has been set.
    pub fn current_entity(&self) -> Option<EntityId> {
        self.turn_order.get(self.current_turn).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.turn_order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.turn_order.len()
    }
}
