use std::collections::{BTreeMap, HashMap};

use crate::event::FactoryEvent;
use crate::model::{CarPart, CarPartPack, Employee, Shipment};

/// Read-only view of a factory, derived from its journal.
///
/// Every accessor folds the whole journal again; nothing is cached. The state
/// has no identity of its own, it is a function of the events it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactoryState {
    journal: Vec<FactoryEvent>,
}

impl FactoryState {
    pub fn new(journal: Vec<FactoryEvent>) -> Self {
        Self { journal }
    }

    pub fn journal(&self) -> &[FactoryEvent] {
        &self.journal
    }

    /// A new state with `events` appended. `self` is left untouched.
    pub fn evolve(&self, events: &[FactoryEvent]) -> Self {
        let mut journal = self.journal.clone();
        journal.extend_from_slice(events);
        Self { journal }
    }

    /// Record one event in place.
    pub(crate) fn record(&mut self, event: FactoryEvent) {
        self.journal.push(event);
    }

    /// Everyone ever assigned, in order of arrival.
    pub fn employees(&self) -> Vec<Employee> {
        self.journal
            .iter()
            .filter_map(|e| match e {
                FactoryEvent::EmployeeAssigned(e) => Some(e.employee.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn is_assigned(&self, employee: &Employee) -> bool {
        self.journal
            .iter()
            .any(|e| matches!(e, FactoryEvent::EmployeeAssigned(e) if &e.employee == employee))
    }

    /// Shipments in the cargo bay; unpacking empties the bay.
    pub fn shipments_waiting_to_be_unpacked(&self) -> Vec<Shipment> {
        self.journal.iter().fold(Vec::new(), |mut waiting, event| {
            match event {
                FactoryEvent::ShipmentTransferred(e) => waiting.push(e.shipment.clone()),
                FactoryEvent::ShipmentUnpacked(_) => waiting.clear(),
                _ => {}
            }
            waiting
        })
    }

    /// Parts on the shelves: unpacked minus consumed by produced cars.
    ///
    /// Only parts that were unpacked at least once show up.
    pub fn inventory(&self) -> BTreeMap<CarPart, i64> {
        let unpacked = sum_by_part(self.journal.iter().filter_map(|e| match e {
            FactoryEvent::ShipmentUnpacked(e) => Some(e.packs.as_slice()),
            _ => None,
        }));
        let used = sum_by_part(self.journal.iter().filter_map(|e| match e {
            FactoryEvent::CarProduced(e) => Some(e.packs.as_slice()),
            _ => None,
        }));

        unpacked
            .into_iter()
            .map(|(part, qty)| {
                let consumed = used.get(&part).copied().unwrap_or(0);
                (part, qty - consumed)
            })
            .collect()
    }

    /// Units of `part` on the shelves (0 when never unpacked).
    pub fn stock_of(&self, part: &CarPart) -> i64 {
        self.inventory().get(part).copied().unwrap_or(0)
    }

    pub fn employees_who_have_produced_cars(&self) -> Vec<Employee> {
        self.journal
            .iter()
            .filter_map(|e| match e {
                FactoryEvent::CarProduced(e) => Some(e.employee.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn employees_who_have_unpacked_today(&self) -> Vec<Employee> {
        self.journal
            .iter()
            .filter_map(|e| match e {
                FactoryEvent::ShipmentUnpacked(e) => Some(e.employee.clone()),
                _ => None,
            })
            .collect()
    }
}

fn sum_by_part<'a>(packs: impl Iterator<Item = &'a [CarPartPack]>) -> HashMap<CarPart, i64> {
    let mut totals = HashMap::new();
    for pack in packs.flatten() {
        *totals.entry(pack.part.clone()).or_insert(0) += i64::from(pack.quantity);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CarModel, Curse};
    use proptest::prelude::*;

    fn yoda() -> Employee {
        Employee::new("Yoda")
    }

    fn shipment(name: &str, packs: &[(&str, u32)]) -> Shipment {
        Shipment::new(
            name,
            packs.iter().map(|(p, q)| CarPartPack::new(*p, *q)).collect(),
        )
    }

    #[test]
    fn empty_journal_knows_nothing() {
        let state = FactoryState::default();
        assert!(state.employees().is_empty());
        assert!(state.shipments_waiting_to_be_unpacked().is_empty());
        assert!(state.inventory().is_empty());
    }

    #[test]
    fn employees_keep_journal_order() {
        let state = FactoryState::new(vec![
            FactoryEvent::employee_assigned(Employee::new("Yoda")),
            FactoryEvent::curse_word_uttered(Curse::awe_at_delivery()),
            FactoryEvent::employee_assigned(Employee::new("Luke")),
        ]);
        assert_eq!(state.employees(), vec![Employee::new("Yoda"), Employee::new("Luke")]);
        assert!(state.is_assigned(&Employee::new("Luke")));
        assert!(!state.is_assigned(&Employee::new("Lea")));
    }

    #[test]
    fn unpacking_empties_the_cargo_bay() {
        let first = shipment("one", &[("chassis", 4)]);
        let second = shipment("two", &[("wheels", 2)]);
        let third = shipment("three", &[("engine", 1)]);

        let state = FactoryState::new(vec![
            FactoryEvent::employee_assigned(yoda()),
            FactoryEvent::shipment_transferred(first.clone()),
            FactoryEvent::shipment_transferred(second.clone()),
        ]);
        assert_eq!(state.shipments_waiting_to_be_unpacked(), vec![first, second]);

        let state = state.evolve(&[
            FactoryEvent::shipment_unpacked(yoda(), vec![]),
            FactoryEvent::shipment_transferred(third.clone()),
        ]);
        assert_eq!(state.shipments_waiting_to_be_unpacked(), vec![third]);
    }

    #[test]
    fn inventory_subtracts_what_cars_consumed() {
        let state = FactoryState::new(vec![
            FactoryEvent::shipment_unpacked(
                yoda(),
                vec![
                    CarPartPack::new("wheels", 5),
                    CarPartPack::new("engine", 2),
                    CarPartPack::new("bits and pieces", 5),
                    CarPartPack::new("wheels", 1),
                ],
            ),
            FactoryEvent::car_produced(yoda(), CarModel::ModelT, CarModel::ModelT.needed_parts()),
        ]);

        let inventory = state.inventory();
        assert_eq!(inventory.get(&CarPart::new("wheels")), Some(&4));
        assert_eq!(inventory.get(&CarPart::new("engine")), Some(&1));
        assert_eq!(inventory.get(&CarPart::new("bits and pieces")), Some(&3));
        assert_eq!(inventory.get(&CarPart::new("chassis")), None);
        assert_eq!(state.stock_of(&CarPart::new("chassis")), 0);
    }

    #[test]
    fn daily_usage_is_tracked_per_employee() {
        let state = FactoryState::new(vec![
            FactoryEvent::shipment_unpacked(yoda(), vec![CarPartPack::new("wheels", 5)]),
            FactoryEvent::car_produced(Employee::new("Luke"), CarModel::ModelT, vec![]),
        ]);
        assert_eq!(state.employees_who_have_unpacked_today(), vec![yoda()]);
        assert_eq!(state.employees_who_have_produced_cars(), vec![Employee::new("Luke")]);
    }

    #[test]
    fn evolve_leaves_the_source_state_alone() {
        let before = FactoryState::default();
        let after = before.evolve(&[FactoryEvent::employee_assigned(yoda())]);
        assert!(before.journal().is_empty());
        assert_eq!(after.journal().len(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Stock per part equals everything unpacked minus everything consumed.
        #[test]
        fn inventory_is_unpacked_minus_used(
            unpacked in prop::collection::vec(0u32..50, 1..8),
            used in prop::collection::vec(0u32..50, 0..8),
        ) {
            let mut journal = vec![];
            for qty in &unpacked {
                journal.push(FactoryEvent::shipment_unpacked(yoda(), vec![CarPartPack::new("wheels", *qty)]));
            }
            for qty in &used {
                journal.push(FactoryEvent::car_produced(yoda(), CarModel::ModelT, vec![CarPartPack::new("wheels", *qty)]));
            }

            let state = FactoryState::new(journal);
            let expected = unpacked.iter().map(|q| i64::from(*q)).sum::<i64>()
                - used.iter().map(|q| i64::from(*q)).sum::<i64>();

            prop_assert_eq!(state.stock_of(&CarPart::new("wheels")), expected);
        }

        /// Folding the journal in two steps gives the same state as in one.
        #[test]
        fn evolve_is_associative(names in prop::collection::vec("[a-z]{1,6}", 0..10), split in 0usize..10) {
            let events: Vec<_> = names.iter().map(|n| FactoryEvent::employee_assigned(Employee::new(n.clone()))).collect();
            let split = split.min(events.len());

            let all_at_once = FactoryState::default().evolve(&events);
            let in_two = FactoryState::default().evolve(&events[..split]).evolve(&events[split..]);

            prop_assert_eq!(all_at_once.employees(), in_two.employees());
            prop_assert_eq!(all_at_once, in_two);
        }
    }
}
