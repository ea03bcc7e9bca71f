pub mod abilities;
pub mod common;
pub mod entities;
pub mod turn;

pub use abilities::{Ability, BASE_ABILITIES, Trait, derive_abilities};
pub use common::EntityId;
pub use entities::GameEntity;
pub use turn::TurnState;
