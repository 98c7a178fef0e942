use serde::{Deserialize, Serialize};

use crate::constants::build::SLOT_NAMES;
use crate::entities::builds;

/// The ten named mod slots of a build. Values are free-text mod identifiers
/// and are not checked against the mod catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSlots {
    pub aura: Option<String>,
    pub exilus: Option<String>,
    pub mod1: Option<String>,
    pub mod2: Option<String>,
    pub mod3: Option<String>,
    pub mod4: Option<String>,
    pub mod5: Option<String>,
    pub mod6: Option<String>,
    pub mod7: Option<String>,
    pub mod8: Option<String>,
}

impl BuildSlots {
    #[must_use]
    pub fn is_slot(name: &str) -> bool {
        SLOT_NAMES.contains(&name)
    }

    #[must_use]
    pub fn slot(&self, name: &str) -> Option<Option<&str>> {
        let value = match name {
            "aura" => &self.aura,
            "exilus" => &self.exilus,
            "mod1" => &self.mod1,
            "mod2" => &self.mod2,
            "mod3" => &self.mod3,
            "mod4" => &self.mod4,
            "mod5" => &self.mod5,
            "mod6" => &self.mod6,
            "mod7" => &self.mod7,
            "mod8" => &self.mod8,
            _ => return None,
        };
        Some(value.as_deref())
    }

    pub fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "aura" => Some(&mut self.aura),
            "exilus" => Some(&mut self.exilus),
            "mod1" => Some(&mut self.mod1),
            "mod2" => Some(&mut self.mod2),
            "mod3" => Some(&mut self.mod3),
            "mod4" => Some(&mut self.mod4),
            "mod5" => Some(&mut self.mod5),
            "mod6" => Some(&mut self.mod6),
            "mod7" => Some(&mut self.mod7),
            "mod8" => Some(&mut self.mod8),
            _ => None,
        }
    }

    /// Overwrites each named slot with its new value. Names that are not
    /// slots are skipped. Returns how many slots were written.
    pub fn apply<I, K>(&mut self, changes: I) -> usize
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: AsRef<str>,
    {
        let mut applied = 0;
        for (name, value) in changes {
            if let Some(slot) = self.slot_mut(name.as_ref()) {
                *slot = value;
                applied += 1;
            }
        }
        applied
    }
}

impl From<&builds::Model> for BuildSlots {
    fn from(model: &builds::Model) -> Self {
        Self {
            aura: model.aura.clone(),
            exilus: model.exilus.clone(),
            mod1: model.mod1.clone(),
            mod2: model.mod2.clone(),
            mod3: model.mod3.clone(),
            mod4: model.mod4.clone(),
            mod5: model.mod5.clone(),
            mod6: model.mod6.clone(),
            mod7: model.mod7.clone(),
            mod8: model.mod8.clone(),
        }
    }
}

/// A stored build. Serializes as `id` plus the ten slot names; the owner is
/// never embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Build {
    pub id: i32,
    #[serde(flatten)]
    pub slots: BuildSlots,
    #[serde(skip)]
    pub user_id: i32,
}

impl From<builds::Model> for Build {
    fn from(model: builds::Model) -> Self {
        Self {
            id: model.id,
            slots: BuildSlots::from(&model),
            user_id: model.user_id,
        }
    }
}
