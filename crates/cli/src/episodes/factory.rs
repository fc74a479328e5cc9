use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use tracing::info;

use workshop_core::AggregateId;
use workshop_events::{EventBus, EventEnvelope, InMemoryEventBus};
use workshop_factory::{CarModel, CarPartPack, FactoryCommand, FactoryEvent, FactoryId, Shipment};
use workshop_infra::{
    CommandDispatcher, FactoryFloor, FactoryInventoryProjection, FactoryStock, InMemoryJournalStore,
    WorkshopConfig,
};

/// How the day went.
#[derive(Debug)]
pub struct FactoryDay {
    pub accepted: usize,
    pub rejected: usize,
    pub journal: Vec<FactoryEvent>,
    pub stock: FactoryStock,
}

fn model_t_spare_parts() -> Shipment {
    Shipment::new(
        "model T spare parts",
        vec![
            CarPartPack::new("wheels", 20),
            CarPartPack::new("engine", 7),
            CarPartPack::new("bits and pieces", 2),
        ],
    )
}

fn the_day() -> Vec<FactoryCommand> {
    vec![
        FactoryCommand::transfer_shipment(Shipment::new("chassis", vec![CarPartPack::new("chassis", 4)])),
        FactoryCommand::assign_employee("Yoda"),
        FactoryCommand::assign_employee("Luke"),
        // the same name twice?
        FactoryCommand::assign_employee("Yoda"),
        // why does that name ring a bell?
        FactoryCommand::assign_employee("Bender"),
        FactoryCommand::unpack_shipments("Lea"),
        FactoryCommand::unpack_shipments("Yoda"),
        FactoryCommand::transfer_shipment(model_t_spare_parts()),
        FactoryCommand::unpack_shipments("Yoda"),
        FactoryCommand::transfer_shipment(model_t_spare_parts()),
        FactoryCommand::transfer_shipment(model_t_spare_parts()),
        FactoryCommand::transfer_shipment(model_t_spare_parts()),
        FactoryCommand::unpack_shipments("Luke"),
        FactoryCommand::produce_car("Yoda", CarModel::ModelT),
        FactoryCommand::produce_car("Luke", CarModel::ModelV),
    ]
}

pub fn run(config: &WorkshopConfig) -> Result<FactoryDay> {
    let bus: Arc<InMemoryEventBus<EventEnvelope<JsonValue>>> = Arc::new(InMemoryEventBus::new());
    let published = bus.subscribe();
    let dispatcher = CommandDispatcher::new(InMemoryJournalStore::new(), bus);
    let floor = FactoryFloor::new(FactoryId::new(AggregateId::new()), dispatcher, config.work_delay);

    info!(factory = %floor.factory_id(), "A new day at the factory starts");

    let mut accepted = 0;
    let mut rejected = 0;
    for command in the_day() {
        match floor.order(command) {
            Ok(_) => accepted += 1,
            Err(err) if err.is_rejection() => rejected += 1,
            Err(err) => return Err(err).context("the factory broke down"),
        }
    }

    info!("It's the end of the day. Only events that were allowed to be recorded are in the journal:");
    let journal = floor.journal().context("reading the journal")?;
    for event in &journal {
        info!("!> {event}");
    }

    let mut projection = FactoryInventoryProjection::new();
    for envelope in published.drain() {
        projection
            .apply_envelope(&envelope)
            .map_err(|e| anyhow::anyhow!("{e}"))?;
    }
    let stock = projection.get(floor.factory_id().0).cloned().unwrap_or_default();

    for (part, quantity) in &stock.parts {
        info!("  {part}: {quantity} left");
    }
    info!(cars = stock.total_cars(), accepted, rejected, "It seems, this was an interesting day! Two Yodas there should be not!");

    Ok(FactoryDay {
        accepted,
        rejected,
        journal,
        stock,
    })
}
