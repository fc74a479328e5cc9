//! Value objects of the factory floor.

use serde::{Deserialize, Serialize};

use workshop_core::ValueObject;

/// Name of the one employee nobody wants on the floor.
pub const TROUBLEMAKER: &str = "Bender";

/// How many shipments the cargo bay holds before it is full.
pub const CARGO_BAY_CAPACITY: usize = 2;

/// Above this many parts in one shipment, somebody swears.
pub const NUMBER_OF_PARTS_TOO_MUCH_TO_HANDLE: u64 = 10;

/// Employee, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Employee(String);

impl Employee {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_troublemaker(&self) -> bool {
        self.0 == TROUBLEMAKER
    }
}

impl core::fmt::Display for Employee {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of part (e.g. "wheels", "chassis").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarPart(String);

impl CarPart {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for CarPart {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A pack of identical parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarPartPack {
    pub part: CarPart,
    pub quantity: u32,
}

impl CarPartPack {
    pub fn new(part: impl Into<String>, quantity: u32) -> Self {
        Self {
            part: CarPart::new(part),
            quantity,
        }
    }
}

impl core::fmt::Display for CarPartPack {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {} pcs", self.part, self.quantity)
    }
}

impl ValueObject for CarPartPack {}

/// A named delivery of part packs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    pub name: String,
    pub packs: Vec<CarPartPack>,
}

impl Shipment {
    pub fn new(name: impl Into<String>, packs: Vec<CarPartPack>) -> Self {
        Self {
            name: name.into(),
            packs,
        }
    }

    /// Sum of every pack, widened so that no shipment can overflow it.
    pub fn total_parts(&self) -> u64 {
        self.packs.iter().map(|p| u64::from(p.quantity)).sum()
    }
}

impl ValueObject for Shipment {}

/// Something said out loud on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curse {
    pub word: String,
    pub meaning: String,
}

impl Curse {
    /// What gets said when a shipment is too big.
    pub fn awe_at_delivery() -> Self {
        Self {
            word: "Boltov tebe v korobky peredach".to_string(),
            meaning: "awe in the face of the amount of parts delivered".to_string(),
        }
    }
}

impl ValueObject for Curse {}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarModel {
    ModelT,
    ModelV,
}

impl CarModel {
    /// Bill of materials for one car.
    pub fn needed_parts(self) -> Vec<CarPartPack> {
        let mut parts = vec![
            CarPartPack::new("wheels", 2),
            CarPartPack::new("engine", 1),
            CarPartPack::new("bits and pieces", 2),
        ];
        if self == CarModel::ModelV {
            parts.push(CarPartPack::new("chassis", 1));
        }
        parts
    }
}

impl core::fmt::Display for CarModel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CarModel::ModelT => f.write_str("Model T"),
            CarModel::ModelV => f.write_str("Model V"),
        }
    }
}

/// `a 1 pcs, b 2 pcs` (the way packs are narrated in events).
pub(crate) fn describe_packs(packs: &[CarPartPack]) -> String {
    packs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_v_needs_a_chassis_on_top_of_model_t() {
        let t = CarModel::ModelT.needed_parts();
        let v = CarModel::ModelV.needed_parts();

        assert_eq!(v.len(), t.len() + 1);
        assert!(v.starts_with(&t));
        assert_eq!(v.last(), Some(&CarPartPack::new("chassis", 1)));
    }

    #[test]
    fn models_display_with_a_space() {
        assert_eq!(CarModel::ModelT.to_string(), "Model T");
        assert_eq!(CarModel::ModelV.to_string(), "Model V");
    }

    #[test]
    fn shipment_counts_every_part() {
        let shipment = Shipment::new(
            "model T spare parts",
            vec![
                CarPartPack::new("wheels", 20),
                CarPartPack::new("engine", 7),
                CarPartPack::new("bits and pieces", 2),
            ],
        );
        assert_eq!(shipment.total_parts(), 29);
    }

    #[test]
    fn packs_are_described_in_order() {
        let packs = [CarPartPack::new("wheels", 20), CarPartPack::new("engine", 7)];
        assert_eq!(describe_packs(&packs), "wheels 20 pcs, engine 7 pcs");
    }

    #[test]
    fn only_bender_is_trouble() {
        assert!(Employee::new("Bender").is_troublemaker());
        assert!(!Employee::new("bender").is_troublemaker());
        assert!(!Employee::new("Yoda").is_troublemaker());
    }
}
