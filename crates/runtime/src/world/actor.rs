use ironclad_core::{Defense, EntityId, Position, ResourceMeter, TargetSize, WeaponStats};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Faction {
    Player,
    Hostile,
}

/// Weapons carried by an actor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Loadout {
    pub melee: WeaponStats,
    pub ranged: Option<WeaponStats>,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            melee: WeaponStats::melee(4, 8),
            ranged: None,
        }
    }
}

/// A scheduled turn-taker: the player mech or one hostile unit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Actor {
    pub id: EntityId,
    pub name: String,
    pub faction: Faction,
    pub position: Position,
    pub speed: i32,
    pub integrity: ResourceMeter,
    pub shield: ResourceMeter,
    pub armor: i32,
    pub size: TargetSize,
    pub loadout: Loadout,
    /// Whether this actor reacts to sound.
    pub can_hear: bool,
    /// Noise produced by this actor's last action, 0-100.
    pub noise: i32,
    pub active: bool,
}

impl Actor {
    pub fn new(id: EntityId, name: impl Into<String>, faction: Faction, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            faction,
            position,
            speed: 100,
            integrity: ResourceMeter::full(30),
            shield: ResourceMeter::default(),
            armor: 0,
            size: TargetSize::Normal,
            loadout: Loadout::default(),
            can_hear: true,
            noise: 0,
            active: true,
        }
    }

    pub fn player(position: Position) -> Self {
        Self::new(EntityId::PLAYER, "Player", Faction::Player, position)
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_integrity(mut self, maximum: u32) -> Self {
        self.integrity = ResourceMeter::full(maximum);
        self
    }

    pub fn with_shield(mut self, maximum: u32) -> Self {
        self.shield = ResourceMeter::full(maximum);
        self
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_melee(mut self, weapon: WeaponStats) -> Self {
        self.loadout.melee = weapon;
        self
    }

    pub fn with_ranged(mut self, weapon: WeaponStats) -> Self {
        self.loadout.ranged = Some(weapon);
        self
    }

    pub fn deaf(mut self) -> Self {
        self.can_hear = false;
        self
    }

    pub fn is_player(&self) -> bool {
        self.faction == Faction::Player
    }

    pub fn is_alive(&self) -> bool {
        self.active && !self.integrity.is_depleted()
    }

    pub fn health_percent(&self) -> u32 {
        self.integrity.percent()
    }

    pub fn defense(&self) -> Defense {
        Defense {
            armor: self.armor,
            shield: self.shield.current,
        }
    }

    /// Routes a hit through the shield first, then integrity. Returns
    /// `(absorbed_by_shield, integrity_lost)`.
    pub fn take_damage(&mut self, amount: i32) -> (u32, u32) {
        let amount = amount.max(0) as u32;
        let absorbed = self.shield.drain(amount);
        let lost = self.integrity.drain(amount - absorbed);
        if self.integrity.is_depleted() {
            self.active = false;
        }
        (absorbed, lost)
    }
}
