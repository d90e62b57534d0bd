//! The poll ledger: holds the current poll and processes votes.
//!
//! Every operation validates first and mutates last, so a returned error
//! means nothing changed. Hosts serialize writers through `&mut Ledger`.

use crate::event::{Event, EventLog, Record};
use crate::{CreationPolicy, Identity, LedgerError, Poll, PollId, PollResults, Result};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// The voting ledger.
#[derive(Clone, Debug)]
pub struct Ledger {
    /// Identity allowed to end polls.
    administrator: Identity,

    /// Who may open polls.
    creation_policy: CreationPolicy,

    /// The poll being voted on, or the last one ended.
    current_poll: Option<Poll>,

    /// Id handed to the next created poll.
    next_poll_id: PollId,

    /// Last poll each identity voted in.
    last_voted: HashMap<Identity, PollId>,

    /// Notifications not yet drained by the host.
    events: EventLog,
}

impl Ledger {
    /// Create an empty ledger administered by `administrator`.
    pub fn new<S: Into<Identity>>(administrator: S) -> Self {
        Self::with_policy(administrator, CreationPolicy::default())
    }

    /// Create an empty ledger with an explicit creation policy.
    pub fn with_policy<S: Into<Identity>>(administrator: S, creation_policy: CreationPolicy) -> Self {
        let administrator = administrator.into();
        debug!(%administrator, ?creation_policy, "ledger constructed");

        Self {
            administrator,
            creation_policy,
            current_poll: None,
            next_poll_id: 1,
            last_voted: HashMap::new(),
            events: EventLog::new(),
        }
    }

    /// Open a new poll, replacing the current one.
    ///
    /// Vote records are kept: an identity that voted earlier may vote again
    /// because the new poll has a fresh id.
    pub fn create_poll<Q, I, S>(&mut self, caller: &str, question: Q, options: I) -> Result<PollId>
    where
        Q: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.creation_policy == CreationPolicy::AdministratorOnly && caller != self.administrator {
            return Err(rejected("create_poll", caller, self.unauthorized(caller)));
        }

        let id = self.next_poll_id;
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let poll = Poll::open(id, caller, question.into(), options)
            .map_err(|err| rejected("create_poll", caller, err))?;

        if let Some(previous) = self.current_poll.as_ref().filter(|p| p.is_active()) {
            info!(previous = previous.id(), poll_id = id, "replacing active poll");
        }

        self.next_poll_id += 1;
        self.events.push(Event::PollCreated {
            poll_id: id,
            question: poll.question().to_string(),
            options: poll.options().to_vec(),
        });
        info!(poll_id = id, %caller, options = poll.options().len(), "poll created");
        self.current_poll = Some(poll);

        Ok(id)
    }

    /// Cast `identity`'s vote for option `option_index` of the current poll.
    pub fn vote(&mut self, identity: &str, option_index: usize) -> Result<()> {
        let poll = match self.current_poll.as_mut() {
            Some(poll) if poll.is_active() => poll,
            _ => return Err(rejected("vote", identity, LedgerError::InactivePoll)),
        };

        poll.check_option(option_index)
            .map_err(|err| rejected("vote", identity, err))?;

        let poll_id = poll.id();
        if self.last_voted.get(identity) == Some(&poll_id) {
            let err = LedgerError::AlreadyVoted {
                identity: identity.to_string(),
                poll_id,
            };
            return Err(rejected("vote", identity, err));
        }

        poll.tally(option_index);
        self.last_voted.insert(identity.to_string(), poll_id);
        self.events.push(Event::VoteCast {
            identity: identity.to_string(),
            poll_id,
            option_index,
        });
        debug!(poll_id, %identity, option_index, "vote cast");

        Ok(())
    }

    /// End the current poll. Administrator only; ending twice is an error.
    pub fn end_voting(&mut self, caller: &str) -> Result<()> {
        if caller != self.administrator {
            return Err(rejected("end_voting", caller, self.unauthorized(caller)));
        }

        let poll = match self.current_poll.as_mut() {
            Some(poll) if poll.is_active() => poll,
            _ => return Err(rejected("end_voting", caller, LedgerError::InactivePoll)),
        };

        poll.close();
        let poll_id = poll.id();
        let total: u64 = poll.vote_counts().iter().sum();
        self.events.push(Event::PollEnded { poll_id });
        info!(poll_id, total_votes = total, "poll ended");

        Ok(())
    }

    /// Snapshot of the current poll, or an empty snapshot if none exists.
    pub fn results(&self) -> PollResults {
        self.current_poll
            .as_ref()
            .map(Poll::results)
            .unwrap_or_default()
    }

    /// Id of the current poll, `None` before the first poll.
    pub fn current_poll_id(&self) -> Option<PollId> {
        self.current_poll.as_ref().map(Poll::id)
    }

    /// Last poll `identity` voted in, `None` if it never voted.
    pub fn last_voted_poll(&self, identity: &str) -> Option<PollId> {
        self.last_voted.get(identity).copied()
    }

    /// Whether `identity` has already voted in the current poll.
    pub fn has_voted(&self, identity: &str) -> bool {
        match self.current_poll_id() {
            Some(current) => self.last_voted_poll(identity) == Some(current),
            None => false,
        }
    }

    /// Whether a poll exists and accepts votes.
    pub fn is_active(&self) -> bool {
        self.current_poll.as_ref().is_some_and(Poll::is_active)
    }

    pub fn current_poll(&self) -> Option<&Poll> {
        self.current_poll.as_ref()
    }

    pub fn administrator(&self) -> &str {
        &self.administrator
    }

    pub fn creation_policy(&self) -> CreationPolicy {
        self.creation_policy
    }

    /// Undelivered notifications, oldest first.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Take every undelivered notification.
    pub fn drain_events(&mut self) -> Vec<Record> {
        self.events.drain()
    }

    fn unauthorized(&self, caller: &str) -> LedgerError {
        LedgerError::Unauthorized {
            identity: caller.to_string(),
        }
    }
}

fn rejected(operation: &'static str, caller: &str, err: LedgerError) -> LedgerError {
    warn!(operation, %caller, kind = err.kind(), "{}", err);
    err
}
