//! Engine unit tests, run as integration tests.
//!
//! These exercise the engine against the nullable delegate/clock. They live
//! under `tests/` rather than in a `#[cfg(test)]` module inside the crate
//! because `agora-nullables` depends on `agora-voting`: an in-crate test
//! module would link a second, test-cfg copy of the crate, so a
//! `NullDelegate` (implementing the delegate trait from the normal copy)
//! would not satisfy the trait as seen from the test copy.

use agora_nullables::{NullClock, NullDelegate};
use agora_power::SnapshotToken;
use agora_types::{Address, Pct, Timestamp};
use agora_voting::{Choice, VoteSettings, VotingEngine, VotingError};

    fn addr(n: u8) -> Address {
        Address::new(format!("agr_voter_{n:02}"))
    }

    fn settings(support: u64, participation: u64, min_duration: u64) -> VoteSettings {
        VoteSettings::new(
            Pct::percent(support),
            Pct::percent(participation),
            min_duration,
        )
    }

    /// Engine over a token with the given (holder, balance) pairs, minted at
    /// block 1. The clock starts at block 2 so the first vote snapshots the
    /// fully minted block 1.
    fn token_engine(balances: &[(u8, u128)]) -> (VotingEngine<SnapshotToken>, NullClock) {
        let mut token = SnapshotToken::new();
        for (n, amount) in balances {
            token
                .mint(&addr(*n), *amount, agora_types::BlockNumber::new(1))
                .unwrap();
        }
        let mut engine = VotingEngine::new(token);
        engine.initialize(settings(50, 20, 300)).unwrap();
        (engine, NullClock::new(1000, 2))
    }

    #[test]
    fn initialize_is_one_shot() {
        let mut engine = VotingEngine::new(SnapshotToken::new());
        engine.initialize(settings(50, 20, 300)).unwrap();
        let err = engine.initialize(settings(60, 30, 300)).unwrap_err();
        assert!(matches!(err, VotingError::AlreadyInitialized));
    }

    #[test]
    fn initialize_validates_settings() {
        let mut engine = VotingEngine::new(SnapshotToken::new());
        let err = engine.initialize(settings(50, 20, 0)).unwrap_err();
        assert!(matches!(err, VotingError::DurationZero));

        let err = engine.initialize(settings(100, 20, 300)).unwrap_err();
        assert!(matches!(err, VotingError::InvalidPct(_)));
        assert!(!engine.is_initialized());
    }

    #[test]
    fn create_requires_initialization() {
        let mut engine = VotingEngine::new(SnapshotToken::new());
        let mut delegate = NullDelegate::new();
        let clock = NullClock::new(1000, 2);
        let err = engine
            .create_vote(
                &addr(1),
                Vec::new(),
                Vec::new(),
                Timestamp::EPOCH,
                Timestamp::EPOCH,
                false,
                Choice::None,
                clock.context(),
                &mut delegate,
            )
            .unwrap_err();
        assert!(matches!(err, VotingError::NotInitialized));
    }

    #[test]
    fn create_captures_snapshot_and_power() {
        let (mut engine, clock) = token_engine(&[(1, 60), (2, 40)]);
        let mut delegate = NullDelegate::new();
        let id = engine
            .create_vote(
                &addr(1),
                b"metadata".to_vec(),
                Vec::new(),
                Timestamp::EPOCH,
                Timestamp::EPOCH,
                false,
                Choice::None,
                clock.context(),
                &mut delegate,
            )
            .unwrap();

        let vote = engine.get_vote(id).unwrap();
        assert_eq!(vote.snapshot_block, agora_types::BlockNumber::new(1));
        assert_eq!(vote.voting_power, 100);
        assert_eq!(vote.start, Timestamp::new(1000));
        assert_eq!(vote.end, Timestamp::new(1300));
        assert!(vote.is_open(clock.now()));
        assert!(!vote.executed);
        assert_eq!(vote.support_required, Pct::percent(50));
        assert_eq!(vote.participation_required, Pct::percent(20));
    }

    #[test]
    fn create_clamps_past_start_to_now() {
        let (mut engine, clock) = token_engine(&[(1, 100)]);
        let mut delegate = NullDelegate::new();
        let id = engine
            .create_vote(
                &addr(1),
                Vec::new(),
                Vec::new(),
                Timestamp::new(500),
                Timestamp::EPOCH,
                false,
                Choice::None,
                clock.context(),
                &mut delegate,
            )
            .unwrap();
        let vote = engine.get_vote(id).unwrap();
        assert_eq!(vote.start, Timestamp::new(1000));
        assert_eq!(vote.end, Timestamp::new(1300));
    }

    #[test]
    fn create_rejects_short_window() {
        let (mut engine, clock) = token_engine(&[(1, 100)]);
        let mut delegate = NullDelegate::new();
        let err = engine
            .create_vote(
                &addr(1),
                Vec::new(),
                Vec::new(),
                Timestamp::new(1000),
                Timestamp::new(1299),
                false,
                Choice::None,
                clock.context(),
                &mut delegate,
            )
            .unwrap_err();
        match err {
            VotingError::InvalidDuration {
                now,
                start,
                end,
                min_duration,
            } => {
                assert_eq!(now, Timestamp::new(1000));
                assert_eq!(start, Timestamp::new(1000));
                assert_eq!(end, Timestamp::new(1299));
                assert_eq!(min_duration, 300);
            }
            other => panic!("expected InvalidDuration, got {other:?}"),
        }
        assert_eq!(engine.votes_len(), 0);
    }

    #[test]
    fn create_rejects_zero_voting_power() {
        let mut engine = VotingEngine::new(SnapshotToken::new());
        engine.initialize(settings(50, 20, 300)).unwrap();
        let mut delegate = NullDelegate::new();
        let clock = NullClock::new(1000, 2);
        let err = engine
            .create_vote(
                &addr(1),
                Vec::new(),
                Vec::new(),
                Timestamp::EPOCH,
                Timestamp::EPOCH,
                false,
                Choice::None,
                clock.context(),
                &mut delegate,
            )
            .unwrap_err();
        assert!(matches!(err, VotingError::ZeroVotingPower(_)));
    }

    #[test]
    fn can_vote_tracks_window_and_weight() {
        let (mut engine, clock) = token_engine(&[(1, 60), (2, 40)]);
        let mut delegate = NullDelegate::new();
        let id = engine
            .create_vote(
                &addr(1),
                Vec::new(),
                Vec::new(),
                Timestamp::EPOCH,
                Timestamp::EPOCH,
                false,
                Choice::None,
                clock.context(),
                &mut delegate,
            )
            .unwrap();

        assert!(engine.can_vote(id, &addr(1), clock.now()));
        assert!(!engine.can_vote(id, &addr(9), clock.now()));
        assert!(!engine.can_vote(id + 1, &addr(1), clock.now()));

        clock.advance(300);
        assert!(!engine.can_vote(id, &addr(1), clock.now()));
    }

    #[test]
    fn settings_change_applies_to_future_votes_only() {
        let (mut engine, clock) = token_engine(&[(1, 100)]);
        let mut delegate = NullDelegate::new();
        let first = engine
            .create_vote(
                &addr(1),
                Vec::new(),
                Vec::new(),
                Timestamp::EPOCH,
                Timestamp::EPOCH,
                false,
                Choice::None,
                clock.context(),
                &mut delegate,
            )
            .unwrap();

        engine.change_settings(settings(60, 30, 600)).unwrap();

        let second = engine
            .create_vote(
                &addr(1),
                Vec::new(),
                Vec::new(),
                Timestamp::EPOCH,
                Timestamp::EPOCH,
                false,
                Choice::None,
                clock.context(),
                &mut delegate,
            )
            .unwrap();

        assert_eq!(
            engine.get_vote(first).unwrap().support_required,
            Pct::percent(50)
        );
        assert_eq!(
            engine.get_vote(second).unwrap().support_required,
            Pct::percent(60)
        );
        assert_eq!(
            engine.get_vote(second).unwrap().end,
            Timestamp::new(1000 + 600)
        );
    }

    #[test]
    fn change_settings_requires_initialization() {
        let mut engine = VotingEngine::new(SnapshotToken::new());
        let err = engine.change_settings(settings(50, 20, 300)).unwrap_err();
        assert!(matches!(err, VotingError::NotInitialized));
    }
