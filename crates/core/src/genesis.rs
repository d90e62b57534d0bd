//! Ledger bootstrap.
//!
//! A freshly bootstrapped ledger contains:
//! - The administrator identity from the configuration
//! - The configured creation policy
//! - Optionally one seeded poll, opened by the administrator

use crate::{Ledger, LedgerConfig, Result};
use tracing::info;

/// Build a ledger from `config`, opening the seed poll if one is configured.
///
/// The seed poll goes through `Ledger::create_poll`, so it is validated like
/// any other poll and shows up as the first `PollCreated` event.
pub fn bootstrap(config: &LedgerConfig) -> Result<Ledger> {
    config.validate()?;

    let mut ledger = Ledger::with_policy(config.administrator.clone(), config.creation_policy);

    if let Some(seed) = &config.seed_poll {
        let id = ledger.create_poll(
            &config.administrator,
            seed.question.clone(),
            seed.options.iter().cloned(),
        )?;
        info!(poll_id = id, "seed poll opened");
    }

    Ok(ledger)
}
