//! Numeric weapon profile read by the combat formulas.

/// Damage type for defense interactions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    /// Slugs and shrapnel. Strong against plating, weak against shields.
    #[default]
    Kinetic,
    /// Lasers and plasma. Burns through shields.
    Thermal,
    /// Ion and EMP weapons. Always halved.
    Electromagnetic,
    Explosive,
    Impact,
}

impl DamageType {
    /// Multiplier applied when the hit lands on an active shield.
    pub fn vs_shield(self) -> f32 {
        match self {
            DamageType::Kinetic => 0.75,
            DamageType::Thermal => 1.25,
            DamageType::Electromagnetic => 0.5,
            DamageType::Explosive | DamageType::Impact => 1.0,
        }
    }

    /// Multiplier applied when the hit lands on armor plating.
    pub fn vs_armor(self) -> f32 {
        match self {
            DamageType::Kinetic => 1.5,
            DamageType::Electromagnetic => 0.5,
            DamageType::Thermal | DamageType::Explosive | DamageType::Impact => 1.0,
        }
    }

    /// Multiplier against a target with neither shield nor armor.
    pub fn vs_unprotected(self) -> f32 {
        match self {
            DamageType::Electromagnetic => 0.5,
            _ => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponStats {
    pub min_damage: i32,
    pub max_damage: i32,
    /// Percent chance in `[0, 100]`.
    pub crit_chance: u32,
    pub crit_multiplier: f32,
    pub damage_type: DamageType,
    /// Zero means "use the table default".
    pub base_accuracy: i32,
    /// Chebyshev tiles.
    pub range: i32,
    pub ignores_cover: bool,
}

impl WeaponStats {
    pub fn new(min_damage: i32, max_damage: i32, damage_type: DamageType) -> Self {
        Self {
            min_damage,
            max_damage,
            damage_type,
            ..Self::default()
        }
    }

    /// Adjacent-only weapon (fists, claws, rams).
    pub fn melee(min_damage: i32, max_damage: i32) -> Self {
        Self {
            range: 1,
            base_accuracy: 75,
            damage_type: DamageType::Impact,
            ..Self::new(min_damage, max_damage, DamageType::Impact)
        }
    }

    pub fn with_range(mut self, range: i32) -> Self {
        self.range = range;
        self
    }

    pub fn with_accuracy(mut self, base_accuracy: i32) -> Self {
        self.base_accuracy = base_accuracy;
        self
    }

    pub fn with_crit(mut self, chance: u32, multiplier: f32) -> Self {
        self.crit_chance = chance;
        self.crit_multiplier = multiplier;
        self
    }

    pub fn ignoring_cover(mut self) -> Self {
        self.ignores_cover = true;
        self
    }

    pub fn is_melee(&self) -> bool {
        self.range <= 1
    }
}

impl Default for WeaponStats {
    fn default() -> Self {
        Self {
            min_damage: 1,
            max_damage: 1,
            crit_chance: 0,
            crit_multiplier: 2.0,
            damage_type: DamageType::Kinetic,
            base_accuracy: 0,
            range: 8,
            ignores_cover: false,
        }
    }
}
