//! VAT/WHT money math per tax-policy code.

pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use service::MoneyPolicy;
pub use types::{PolicyAmounts, VatPolicy, Withholding};
