//! Ledger notifications.
//!
//! Every successful transition appends exactly one event. The log is
//! append-only; hosts forward entries to indexers or UI refresh hooks and
//! may drain what they have delivered.

use crate::{Identity, PollId};
use serde::{Deserialize, Serialize};

/// A notification emitted by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PollCreated {
        poll_id: PollId,
        question: String,
        options: Vec<String>,
    },
    VoteCast {
        identity: Identity,
        poll_id: PollId,
        option_index: usize,
    },
    PollEnded {
        poll_id: PollId,
    },
}

impl Event {
    /// The poll this event concerns.
    pub fn poll_id(&self) -> PollId {
        match self {
            Event::PollCreated { poll_id, .. }
            | Event::VoteCast { poll_id, .. }
            | Event::PollEnded { poll_id } => *poll_id,
        }
    }
}

/// An event together with its position in emission order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Starts at 0 and never repeats, even across drains.
    pub sequence: u64,
    #[serde(flatten)]
    pub event: Event,
}

/// Append-only event log.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    records: Vec<Record>,
    next_sequence: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: Event) {
        self.records.push(Record {
            sequence: self.next_sequence,
            event,
        });
        self.next_sequence += 1;
    }

    /// Undelivered records, oldest first.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Take every undelivered record. Sequence numbering continues.
    pub fn drain(&mut self) -> Vec<Record> {
        std::mem::take(&mut self.records)
    }

    /// Render undelivered records as newline-delimited JSON.
    pub fn to_json_lines(&self) -> serde_json::Result<String> {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        Ok(out)
    }
}
