use serde::{Deserialize, Serialize};

use workshop_events::Event;

use crate::model::{CarModel, CarPartPack, Curse, Employee, Shipment, describe_packs};

/// Event: an employee joined the factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAssignedToFactory {
    pub employee: Employee,
}

/// Event: a shipment now waits in the cargo bay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentTransferredToCargoBay {
    pub shipment: Shipment,
}

/// Event: everything waiting in the cargo bay went into inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentUnpackedInCargoBay {
    pub employee: Employee,
    pub packs: Vec<CarPartPack>,
}

/// Event: a car left the line, consuming `packs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarProduced {
    pub employee: Employee,
    pub model: CarModel,
    pub packs: Vec<CarPartPack>,
}

/// Event: something was said within the walls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurseWordUttered {
    pub curse: Curse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum FactoryEvent {
    EmployeeAssigned(EmployeeAssignedToFactory),
    ShipmentTransferred(ShipmentTransferredToCargoBay),
    ShipmentUnpacked(ShipmentUnpackedInCargoBay),
    CarProduced(CarProduced),
    CurseWordUttered(CurseWordUttered),
}

impl FactoryEvent {
    pub fn employee_assigned(employee: Employee) -> Self {
        FactoryEvent::EmployeeAssigned(EmployeeAssignedToFactory { employee })
    }

    pub fn shipment_transferred(shipment: Shipment) -> Self {
        FactoryEvent::ShipmentTransferred(ShipmentTransferredToCargoBay { shipment })
    }

    pub fn shipment_unpacked(employee: Employee, packs: Vec<CarPartPack>) -> Self {
        FactoryEvent::ShipmentUnpacked(ShipmentUnpackedInCargoBay { employee, packs })
    }

    pub fn car_produced(employee: Employee, model: CarModel, packs: Vec<CarPartPack>) -> Self {
        FactoryEvent::CarProduced(CarProduced {
            employee,
            model,
            packs,
        })
    }

    pub fn curse_word_uttered(curse: Curse) -> Self {
        FactoryEvent::CurseWordUttered(CurseWordUttered { curse })
    }
}

impl Event for FactoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            FactoryEvent::EmployeeAssigned(_) => "factory.employee_assigned",
            FactoryEvent::ShipmentTransferred(_) => "factory.shipment_transferred",
            FactoryEvent::ShipmentUnpacked(_) => "factory.shipment_unpacked",
            FactoryEvent::CarProduced(_) => "factory.car_produced",
            FactoryEvent::CurseWordUttered(_) => "factory.curse_word_uttered",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

impl core::fmt::Display for FactoryEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FactoryEvent::EmployeeAssigned(e) => {
                write!(f, "new worker joins our forces: '{}'", e.employee)
            }
            FactoryEvent::ShipmentTransferred(e) => write!(
                f,
                "Shipment '{}' transferred to cargo bay: {}",
                e.shipment.name,
                describe_packs(&e.shipment.packs)
            ),
            FactoryEvent::ShipmentUnpacked(e) => {
                write!(f, "{} unpacked {}", e.employee, describe_packs(&e.packs))
            }
            FactoryEvent::CarProduced(e) => write!(
                f,
                "Car {} built by {} using {}",
                e.model,
                e.employee,
                describe_packs(&e.packs)
            ),
            FactoryEvent::CurseWordUttered(e) => write!(
                f,
                "'{}' was heard within the walls. It meant: '{}'",
                e.curse.word, e.curse.meaning
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_narrate_themselves() {
        let yoda = Employee::new("Yoda");
        let packs = vec![CarPartPack::new("wheels", 2), CarPartPack::new("engine", 1)];

        assert_eq!(
            FactoryEvent::employee_assigned(yoda.clone()).to_string(),
            "new worker joins our forces: 'Yoda'"
        );
        assert_eq!(
            FactoryEvent::shipment_transferred(Shipment::new("chassis", vec![CarPartPack::new("chassis", 4)]))
                .to_string(),
            "Shipment 'chassis' transferred to cargo bay: chassis 4 pcs"
        );
        assert_eq!(
            FactoryEvent::shipment_unpacked(yoda.clone(), packs.clone()).to_string(),
            "Yoda unpacked wheels 2 pcs, engine 1 pcs"
        );
        assert_eq!(
            FactoryEvent::car_produced(yoda, CarModel::ModelT, packs).to_string(),
            "Car Model T built by Yoda using wheels 2 pcs, engine 1 pcs"
        );
        assert_eq!(
            FactoryEvent::curse_word_uttered(Curse::awe_at_delivery()).to_string(),
            "'Boltov tebe v korobky peredach' was heard within the walls. \
             It meant: 'awe in the face of the amount of parts delivered'"
        );
    }

    #[test]
    fn serialized_events_carry_their_tag() {
        let ev = FactoryEvent::employee_assigned(Employee::new("Luke"));
        let json = serde_json::to_value(&ev).unwrap();

        assert_eq!(json["type"], "employee_assigned");
        assert_eq!(json["data"]["employee"], "Luke");

        let back: FactoryEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, ev);
    }

    #[test]
    fn event_types_are_namespaced() {
        let ev = FactoryEvent::curse_word_uttered(Curse::awe_at_delivery());
        assert_eq!(ev.event_type(), "factory.curse_word_uttered");
        assert_eq!(ev.version(), 1);
    }
}
