//! Move proposer interface: external move sources and their validation.
//!
//! A [`MoveProposer`] is anything that can look at a position (as FEN) and
//! suggest a move in coordinate text like `"e2e4"` - a remote AI service, a
//! local engine process, a scripted test opponent. Proposers are untrusted:
//! every reply is re-validated against the engine before use, and anything
//! malformed or illegal is discarded with a log line rather than an error
//! surfaced to the game.
//!
//! Proposers that block on I/O can run off-thread via
//! [`propose_in_background`], which returns a [`PendingProposal`] handle the
//! caller polls from its own loop.

use arbiter_core::{parse_move, Coord, ParseMoveError};
use arbiter_engine::Game;
use std::sync::mpsc;
use std::thread;
use thiserror::Error;
use tracing::{debug, warn};

/// A source of move suggestions.
///
/// `propose` receives the position as a FEN record and replies with
/// four-character coordinate text (`"e2e4"`), or `None` when it has nothing
/// to offer. Replies are suggestions only; the caller validates them.
pub trait MoveProposer {
    /// Human-readable name, used in log output.
    fn name(&self) -> &str;

    /// Suggests a move for the side to move in `fen`.
    fn propose(&mut self, fen: &str) -> Option<String>;
}

/// A validated move suggestion, safe to pass to
/// [`Game::make_move`](arbiter_engine::Game::make_move).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proposal {
    pub from: Coord,
    pub to: Coord,
}

/// Why a proposer's reply was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProposalError {
    #[error("malformed reply: {0}")]
    Malformed(#[from] ParseMoveError),

    #[error("illegal move: {0}")]
    Illegal(String),
}

/// Checks a raw proposer reply against the current position.
///
/// The reply must parse as coordinate text, name an origin square holding a
/// piece of the side to move, and name a destination that the engine deems
/// legal from that origin.
pub fn validate(game: &Game, reply: &str) -> Result<Proposal, ProposalError> {
    let (from, to) = parse_move(reply)?;

    let owned = game
        .board()
        .piece_at(from)
        .is_some_and(|p| p.color == game.side_to_move());
    if !owned {
        return Err(ProposalError::Illegal(format!(
            "{}: no {} piece on {}",
            reply,
            game.side_to_move(),
            from
        )));
    }

    if !game.legal_moves_from(from).contains(&to) {
        return Err(ProposalError::Illegal(format!(
            "{}: {} is not a legal destination from {}",
            reply, to, from
        )));
    }

    Ok(Proposal { from, to })
}

/// Asks a proposer for a move and validates the reply.
///
/// Returns `None` when the proposer offers nothing or its reply fails
/// validation; rejected replies are logged and dropped, never applied.
pub fn request_move(game: &Game, proposer: &mut dyn MoveProposer) -> Option<Proposal> {
    let fen = game.to_fen();
    let reply = proposer.propose(&fen)?;
    match validate(game, &reply) {
        Ok(proposal) => {
            debug!(proposer = proposer.name(), reply = %reply, "proposal accepted");
            Some(proposal)
        }
        Err(error) => {
            warn!(
                proposer = proposer.name(),
                reply = %reply,
                %error,
                "proposal discarded"
            );
            None
        }
    }
}

/// A proposer reply being computed on a background thread.
///
/// The worker sends exactly one message and exits; the channel is bounded at
/// one so the worker never outlives an abandoned handle by much.
pub struct PendingProposal {
    rx: mpsc::Receiver<Option<String>>,
}

impl PendingProposal {
    /// Polls for the reply without blocking.
    ///
    /// Outer `None` means the worker has not finished yet; `Some(None)`
    /// means it finished with nothing to offer. The reply is still
    /// unvalidated - pass it to [`validate`].
    pub fn try_take(&self) -> Option<Option<String>> {
        self.rx.try_recv().ok()
    }

    /// Blocks until the worker finishes.
    pub fn wait(self) -> Option<String> {
        self.rx.recv().ok().flatten()
    }
}

/// Runs a proposer on a background thread for one request.
///
/// The proposer is moved into the worker; spawn a fresh request per turn.
/// The position is captured as FEN up front, so the game can keep changing
/// while the worker thinks - the caller decides whether a late reply still
/// applies.
pub fn propose_in_background<P>(mut proposer: P, fen: String) -> PendingProposal
where
    P: MoveProposer + Send + 'static,
{
    let (tx, rx) = mpsc::sync_channel(1);
    thread::spawn(move || {
        let reply = proposer.propose(&fen);
        // The handle may have been dropped; nothing to do then.
        let _ = tx.send(reply);
    });
    PendingProposal { rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbiter_core::Color;
    use std::time::Duration;

    /// Replays a fixed list of replies, recording the FEN it was shown.
    struct Scripted {
        replies: Vec<Option<&'static str>>,
        seen: Vec<String>,
    }

    impl Scripted {
        fn new(replies: Vec<Option<&'static str>>) -> Self {
            Scripted {
                replies,
                seen: Vec::new(),
            }
        }
    }

    impl MoveProposer for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        fn propose(&mut self, fen: &str) -> Option<String> {
            self.seen.push(fen.to_string());
            if self.replies.is_empty() {
                None
            } else {
                self.replies.remove(0).map(str::to_string)
            }
        }
    }

    fn at(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    #[test]
    fn validate_accepts_a_legal_reply() {
        let game = Game::new();
        let proposal = validate(&game, "e2e4").unwrap();
        assert_eq!(proposal.from, at("e2"));
        assert_eq!(proposal.to, at("e4"));
    }

    #[test]
    fn validate_rejects_malformed_text() {
        let game = Game::new();
        assert!(matches!(
            validate(&game, "e2e4e5"),
            Err(ProposalError::Malformed(ParseMoveError::BadLength(7)))
        ));
        assert!(matches!(
            validate(&game, "e9e4"),
            Err(ProposalError::Malformed(ParseMoveError::BadSquare(_)))
        ));
    }

    #[test]
    fn validate_rejects_an_illegal_destination() {
        let game = Game::new();
        assert!(matches!(
            validate(&game, "e2e5"),
            Err(ProposalError::Illegal(_))
        ));
    }

    #[test]
    fn validate_rejects_the_wrong_side() {
        let game = Game::new();
        // Black pawn, but it is White to move.
        assert!(matches!(
            validate(&game, "e7e5"),
            Err(ProposalError::Illegal(_))
        ));
        // Empty square.
        assert!(matches!(
            validate(&game, "e4e5"),
            Err(ProposalError::Illegal(_))
        ));
    }

    #[test]
    fn request_move_shows_the_position_and_applies_cleanly() {
        let mut game = Game::new();
        let mut proposer = Scripted::new(vec![Some("e2e4")]);
        let proposal = request_move(&game, &mut proposer).unwrap();
        assert_eq!(proposer.seen.len(), 1);
        assert!(proposer.seen[0].starts_with("rnbqkbnr/"));
        assert!(game.make_move(proposal.from, proposal.to, None));
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn request_move_discards_bad_replies() {
        let game = Game::new();
        let mut proposer = Scripted::new(vec![Some("zzzz")]);
        assert_eq!(request_move(&game, &mut proposer), None);

        let mut proposer = Scripted::new(vec![Some("e2e5")]);
        assert_eq!(request_move(&game, &mut proposer), None);
    }

    #[test]
    fn request_move_passes_silence_through() {
        let game = Game::new();
        let mut proposer = Scripted::new(vec![None]);
        assert_eq!(request_move(&game, &mut proposer), None);
    }

    #[test]
    fn background_proposal_delivers_the_reply() {
        let proposer = Scripted::new(vec![Some("e2e4")]);
        let pending = propose_in_background(proposer, Game::new().to_fen());
        assert_eq!(pending.wait().as_deref(), Some("e2e4"));
    }

    #[test]
    fn background_proposal_can_be_polled() {
        /// Blocks until the test releases it.
        struct Gated {
            gate: mpsc::Receiver<()>,
        }

        impl MoveProposer for Gated {
            fn name(&self) -> &str {
                "gated"
            }

            fn propose(&mut self, _fen: &str) -> Option<String> {
                self.gate.recv().ok();
                Some("g1f3".to_string())
            }
        }

        let (release, gate) = mpsc::channel();
        let pending = propose_in_background(Gated { gate }, Game::new().to_fen());
        assert_eq!(pending.try_take(), None);

        release.send(()).unwrap();
        let reply = loop {
            if let Some(reply) = pending.try_take() {
                break reply;
            }
            thread::sleep(Duration::from_millis(1));
        };
        assert_eq!(reply.as_deref(), Some("g1f3"));
    }

    #[test]
    fn dropping_the_handle_does_not_wedge_the_worker() {
        let proposer = Scripted::new(vec![Some("e2e4")]);
        let pending = propose_in_background(proposer, Game::new().to_fen());
        drop(pending);
        // Worker sends into a capacity-one channel and exits on its own.
        thread::sleep(Duration::from_millis(5));
    }
}
