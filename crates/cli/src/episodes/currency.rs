use anyhow::{Context, Result};
use tracing::{info, warn};

use workshop_money::{CurrencyAmount, Decimal};

/// An invoice line worked through with currency amounts.
#[derive(Debug)]
pub struct Invoice {
    pub subtotal: CurrencyAmount,
    pub tax: CurrencyAmount,
    pub total: CurrencyAmount,
    pub per_person: CurrencyAmount,
    pub mixing_refused: bool,
}

pub fn run() -> Result<Invoice> {
    info!("A currency amount is a decimal that knows its currency");

    let lines: Vec<CurrencyAmount> = ["12.50 EUR", "7.25 eur", "30 Eur"]
        .into_iter()
        .map(|s| s.parse::<CurrencyAmount>().with_context(|| format!("parsing '{s}'")))
        .collect::<Result<_>>()?;

    let subtotal = lines
        .iter()
        .try_fold(CurrencyAmount::new(lines[0].currency(), Decimal::ZERO), |acc, line| acc.try_add(line))?;
    info!(%subtotal, "subtotal");

    let tax = subtotal.try_mul(Decimal::new(20, 2))?.round(2);
    let total = subtotal.try_add(&tax)?;
    info!(%tax, %total, "with 20% tax");

    let per_person = total.div(Decimal::from(3))?.round(2);
    info!(%per_person, "split between three");

    let share = per_person.ratio(&total)?.round_dp(4);
    info!(%share, "each share, as a fraction of the total");

    info!("Mixing currencies is not something a value object lets you do");
    let dollars: CurrencyAmount = "5 USD".parse()?;
    let mixing_refused = match total.try_add(&dollars) {
        Ok(_) => false,
        Err(err) => {
            warn!("{err}");
            true
        }
    };

    Ok(Invoice {
        subtotal,
        tax,
        total,
        per_person,
        mixing_refused,
    })
}
