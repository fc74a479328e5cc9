use thiserror::Error;

use workshop_core::DomainError;

use crate::model::{CarModel, Employee};

/// What an employee was ordered to do when it turned out they do not work here.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Task {
    UnpackCargoBay,
    BuildCar,
}

impl core::fmt::Display for Task {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Task::UnpackCargoBay => f.write_str("unpack the cargo bay"),
            Task::BuildCar => f.write_str("build a car"),
        }
    }
}

/// A factory rule refused a command. One variant per rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FactoryError {
    #[error("the name of {0} only one can have")]
    DuplicateEmployee(Employee),

    #[error("Guys with the name 'bender' are trouble")]
    Troublemaker(Employee),

    #[error("there has to be somebody at the factory in order to accept the shipment")]
    NobodyAtFactory,

    #[error("Empty shipments are not accepted!")]
    EmptyShipment,

    #[error("More than two shipments can't fit into this cargo bay")]
    CargoBayFull,

    #[error("{employee} must be assigned to the factory to {task}")]
    UnknownEmployee { employee: Employee, task: Task },

    #[error("{0} may only unpack and inventory all Shipments in the CargoBay once a day")]
    UnpackQuotaReached(Employee),

    #[error("{0} may only produce a car once a day")]
    ProductionQuotaReached(Employee),

    #[error("There should be a shipment to unpack")]
    NothingToUnpack,

    #[error("There is not enough part to build {0} car")]
    NotEnoughParts(CarModel),
}

impl FactoryError {
    /// Stable machine-readable code.
    pub fn kind(&self) -> &'static str {
        match self {
            FactoryError::DuplicateEmployee(_) => "duplicate-employee",
            FactoryError::Troublemaker(_) => "troublemaker",
            FactoryError::NobodyAtFactory => "no-employee",
            FactoryError::EmptyShipment => "empty-shipment",
            FactoryError::CargoBayFull => "cargo-bay-full",
            FactoryError::UnknownEmployee { .. } => "unknown-employee",
            FactoryError::UnpackQuotaReached(_) | FactoryError::ProductionQuotaReached(_) => {
                "quota-reached"
            }
            FactoryError::NothingToUnpack => "nothing-to-unpack",
            FactoryError::NotEnoughParts(_) => "part-not-found",
        }
    }
}

impl From<FactoryError> for DomainError {
    fn from(value: FactoryError) -> Self {
        match value {
            FactoryError::EmptyShipment => DomainError::validation(value.to_string()),
            other => DomainError::invariant(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_employee_names_the_task() {
        let err = FactoryError::UnknownEmployee {
            employee: Employee::new("Lea"),
            task: Task::UnpackCargoBay,
        };
        assert_eq!(
            err.to_string(),
            "Lea must be assigned to the factory to unpack the cargo bay"
        );
        assert_eq!(err.kind(), "unknown-employee");
    }

    #[test]
    fn quotas_share_a_kind() {
        let yoda = Employee::new("Yoda");
        assert_eq!(FactoryError::UnpackQuotaReached(yoda.clone()).kind(), "quota-reached");
        assert_eq!(FactoryError::ProductionQuotaReached(yoda).kind(), "quota-reached");
    }

    #[test]
    fn converts_into_domain_error_keeping_the_message() {
        let err: DomainError = FactoryError::NotEnoughParts(CarModel::ModelV).into();
        assert_eq!(
            err,
            DomainError::InvariantViolation("There is not enough part to build Model V car".into())
        );

        let err: DomainError = FactoryError::EmptyShipment.into();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
