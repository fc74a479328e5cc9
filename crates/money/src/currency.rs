use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Currency tag. `None` means "no currency given" and only mixes with itself.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyType {
    #[default]
    None,
    Eur,
    Usd,
    Aud,
    Cad,
    Chf,
    Gbp,
    Jpy,
    Rub,
    Mxn,
}
