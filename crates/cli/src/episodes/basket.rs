use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use workshop_basket::{BasketMessage, MessageQueue, ProductBasket, codec};

pub fn run(message_file: &Path) -> Result<ProductBasket> {
    info!("A new product basket, filled through plain blocking method calls");
    let mut basket = ProductBasket::new();
    basket.add_product("butter", 1.0)?;
    basket.add_product("pepper", 2.0)?;

    info!("The same request, stored as a message and applied later");
    let message = BasketMessage::add("candles", 5.0);
    info!(message = %message, "message created");
    basket.apply(&message)?;

    info!("Messages can wait in a queue; the basket does not have to be there yet");
    let queue = MessageQueue::new();
    queue.send(BasketMessage::add("Chablis wine", 1.0)).map_err(|e| anyhow::anyhow!("{e:?}"))?;
    queue.send(BasketMessage::add("Shrimps", 10.0)).map_err(|e| anyhow::anyhow!("{e:?}"))?;

    info!("That is temporal decoupling. Now we deliver what was queued");
    for outcome in queue.deliver_to(&mut basket) {
        outcome?;
    }

    info!("A message can also become bytes, travel, and become a message again");
    let rosemary = BasketMessage::add("rosemary", 1.0);
    let bytes = codec::encode(&rosemary)?;
    info!(bytes = ?bytes, "serialized");
    info!(text = %String::from_utf8_lossy(&bytes), "the same bytes, read as text");
    let read_back = codec::decode(&bytes)?;
    basket.apply(&read_back)?;

    info!(path = %message_file.display(), "Bytes on disk wait for us just as well");
    codec::save(message_file, &rosemary)
        .with_context(|| format!("saving message to {}", message_file.display()))?;
    let from_disk = codec::load(message_file)
        .with_context(|| format!("loading message from {}", message_file.display()))?;
    basket.apply(&from_disk)?;

    info!("Not every request can be honored; the basket explains itself");
    basket.apply(&BasketMessage::remove("chai tea", 1.0))?;
    basket.apply(&BasketMessage::remove("candles", 10.0))?;
    basket.apply(&BasketMessage::remove("pepper", 2.0))?;

    info!("What we have aggregated in our product basket so far:");
    for (name, quantity) in basket.product_totals() {
        info!("  {name}: {quantity}");
    }

    Ok(basket)
}
