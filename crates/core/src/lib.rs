//! pollvote-core: a single-poll voting ledger.
//!
//! The ledger holds at most one current poll:
//! - `create_poll`: open a poll with a question and at least two options
//! - `vote`: one vote per identity while the poll is active
//! - `end_voting`: the administrator closes the poll for good
//! - `results`: aggregate tallies of the current poll

mod error;
mod poll;
mod ledger;
mod config;
pub mod event;
pub mod genesis;

pub use error::{LedgerError, Result};
pub use poll::{Identity, Poll, PollId, PollResults, MIN_OPTIONS};
pub use ledger::Ledger;
pub use config::{CreationPolicy, LedgerConfig, SeedPoll};
pub use event::{Event, EventLog, Record};
pub use genesis::bootstrap;
