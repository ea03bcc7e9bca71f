/// Game configuration constants and tunable resolution policy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Clamp health into `[0, HEALTH_MAX]` after attacks and heals.
    /// When disabled, health follows the raw arithmetic and may go negative
    /// or exceed the creation bound.
    pub clamp_health: bool,

    /// Upper bound applied to the defensive bonus after a defend action.
    /// `None` leaves it uncapped so a defend always adds its full magnitude.
    pub defensive_bonus_cap: Option<i32>,
}

impl GameConfig {
    // ===== creation-time bounds =====
    pub const HEALTH_MAX: i32 = 100;
    pub const ATTRIBUTE_MAX: i32 = 20;
    pub const DEFENSIVE_BONUS_MAX: i32 = 10;

    // ===== creation-time defaults =====
    pub const DEFAULT_HEALTH: i32 = 100;
    pub const DEFAULT_ATTRIBUTE: i32 = 10;

    // ===== resolution arithmetic =====
    /// Sides of the die rolled for every action.
    pub const ROLL_SIDES: u32 = 20;
    /// Attribute value at which the roll is taken at face value.
    pub const MODIFIER_SCALE: u32 = 10;
    /// Largest magnitude any single action can produce.
    pub const MAGNITUDE_MAX: u32 = 20;

    pub fn new() -> Self {
        Self {
            clamp_health: true,
            defensive_bonus_cap: None,
        }
    }

    /// Raw arithmetic with no post-mutation clamping.
    pub fn unclamped() -> Self {
        Self {
            clamp_health: false,
            defensive_bonus_cap: None,
        }
    }

    pub fn with_defensive_bonus_cap(mut self, cap: i32) -> Self {
        self.defensive_bonus_cap = Some(cap);
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
