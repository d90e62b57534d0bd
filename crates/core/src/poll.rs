//! Poll types.
//!
//! A poll is one voting round:
//! ```text
//! Poll {
//!   id          : PollId        // Assigned by the ledger, never reused
//!   question    : String        // Non-empty
//!   options     : List<String>  // At least two, order is the vote target
//!   vote_counts : List<u64>     // Index-aligned with options
//!   active      : bool          // true until ended, never reopened
//! }
//! ```

use crate::{LedgerError, Result};
use serde::{Deserialize, Serialize};

/// A poll identifier. The ledger hands out 1, 2, 3, ...
pub type PollId = u64;

/// The principal a caller acts as (a wallet address, an account name).
pub type Identity = String;

/// Minimum number of options a poll must offer.
pub const MIN_OPTIONS: usize = 2;

/// A single voting round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub(crate) id: PollId,
    pub(crate) creator: Identity,
    pub(crate) question: String,
    pub(crate) options: Vec<String>,
    pub(crate) vote_counts: Vec<u64>,
    pub(crate) active: bool,
}

impl Poll {
    /// Validate a poll definition and open it with zeroed tallies.
    pub(crate) fn open(
        id: PollId,
        creator: &str,
        question: String,
        options: Vec<String>,
    ) -> Result<Self> {
        validate_definition(&question, &options)?;

        let vote_counts = vec![0; options.len()];
        Ok(Self {
            id,
            creator: creator.to_string(),
            question,
            options,
            vote_counts,
            active: true,
        })
    }

    pub fn id(&self) -> PollId {
        self.id
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn vote_counts(&self) -> &[u64] {
        &self.vote_counts
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Check that `index` names one of this poll's options.
    pub(crate) fn check_option(&self, index: usize) -> Result<()> {
        if index >= self.options.len() {
            return Err(LedgerError::InvalidOption {
                index,
                option_count: self.options.len(),
            });
        }
        Ok(())
    }

    /// Add one vote to `index`. Callers check the index first.
    pub(crate) fn tally(&mut self, index: usize) {
        self.vote_counts[index] += 1;
    }

    pub(crate) fn close(&mut self) {
        self.active = false;
    }

    /// Take a snapshot of the public view of this poll.
    pub fn results(&self) -> PollResults {
        PollResults {
            question: self.question.clone(),
            options: self.options.clone(),
            vote_counts: self.vote_counts.clone(),
            active: self.active,
        }
    }
}

fn validate_definition(question: &str, options: &[String]) -> Result<()> {
    if question.is_empty() {
        return Err(LedgerError::invalid_input("question must not be empty"));
    }
    if options.len() < MIN_OPTIONS {
        return Err(LedgerError::invalid_input(format!(
            "a poll needs at least {} options, got {}",
            MIN_OPTIONS,
            options.len()
        )));
    }
    if let Some(position) = options.iter().position(|o| o.is_empty()) {
        return Err(LedgerError::invalid_input(format!(
            "option {} must not be empty",
            position
        )));
    }
    Ok(())
}

/// Aggregate view of the current poll, as returned by `Ledger::results`.
///
/// With no poll ever created every field is empty and `active` is false.
/// An ended poll with zero votes still lists its options, which is the only
/// way to tell the two apart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollResults {
    pub question: String,
    pub options: Vec<String>,
    pub vote_counts: Vec<u64>,
    pub active: bool,
}

impl PollResults {
    /// True when no poll has been created yet.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn total_votes(&self) -> u64 {
        self.vote_counts.iter().sum()
    }

    /// Integer share of the total for option `index`, rounded down.
    /// Zero when nothing has been cast or the index is out of range.
    pub fn share_percent(&self, index: usize) -> u64 {
        let total = self.total_votes();
        match self.vote_counts.get(index) {
            Some(&count) if total > 0 => (count as u128 * 100 / total as u128) as u64,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn open_zeroes_tallies() {
        let poll = Poll::open(1, "admin", "Test question?".into(), options(&["A", "B", "C"])).unwrap();

        assert_eq!(poll.id(), 1);
        assert_eq!(poll.creator(), "admin");
        assert_eq!(poll.vote_counts(), &[0, 0, 0]);
        assert!(poll.is_active());
    }

    #[test]
    fn open_rejects_bad_definitions() {
        let cases = [
            ("", options(&["A", "B"])),
            ("Q?", options(&["A"])),
            ("Q?", vec![]),
            ("Q?", options(&["A", ""])),
        ];

        for (question, opts) in cases {
            let err = Poll::open(1, "admin", question.to_string(), opts.clone()).unwrap_err();
            assert!(
                matches!(err, LedgerError::InvalidInput(_)),
                "expected InvalidInput for {:?} / {:?}, got {:?}",
                question,
                opts,
                err
            );
        }
    }

    #[test]
    fn whitespace_text_is_accepted() {
        let poll = Poll::open(1, "admin", " ".into(), options(&["A", " "])).unwrap();
        assert_eq!(poll.question(), " ");
        assert_eq!(poll.options()[1], " ");
    }

    #[test]
    fn duplicate_labels_are_kept() {
        let poll = Poll::open(1, "admin", "Q?".into(), options(&["Same", "Same"])).unwrap();
        assert_eq!(poll.options(), &["Same".to_string(), "Same".to_string()]);
        assert_eq!(poll.vote_counts().len(), 2);
    }

    #[test]
    fn check_option_bounds() {
        let poll = Poll::open(1, "admin", "Q?".into(), options(&["A", "B"])).unwrap();

        assert!(poll.check_option(0).is_ok());
        assert!(poll.check_option(1).is_ok());
        assert_eq!(
            poll.check_option(2),
            Err(LedgerError::InvalidOption { index: 2, option_count: 2 })
        );
    }

    #[test]
    fn results_shares() {
        let results = PollResults {
            question: "Q?".into(),
            options: options(&["A", "B", "C"]),
            vote_counts: vec![2, 1, 0],
            active: true,
        };

        assert_eq!(results.total_votes(), 3);
        assert_eq!(results.share_percent(0), 66);
        assert_eq!(results.share_percent(1), 33);
        assert_eq!(results.share_percent(2), 0);
        assert_eq!(results.share_percent(9), 0);
        assert!(!results.is_empty());
    }

    #[test]
    fn share_of_huge_tallies() {
        let results = PollResults {
            question: "Q?".into(),
            options: options(&["A", "B"]),
            vote_counts: vec![u64::MAX / 2, u64::MAX / 2],
            active: false,
        };
        assert_eq!(results.share_percent(0), 50);
    }

    #[test]
    fn default_results_are_empty() {
        let results = PollResults::default();
        assert!(results.is_empty());
        assert!(!results.active);
        assert_eq!(results.total_votes(), 0);
        assert_eq!(results.share_percent(0), 0);
    }
}
