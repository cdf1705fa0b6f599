//! Confrontation and game record tests.

use std::sync::Arc;

use lasvegas::core::{GameConfig, PlayerId, RollSource};
use lasvegas::env::GameEnvironment;
use lasvegas::play::{ConfrontConfig, ConfrontReport, Confrontation, Game, GameRecord};
use lasvegas::policy::{by_name, LoadedDice, Seat, POLICY_NAMES};
use lasvegas::rules::RuleBook;

fn rules(config: GameConfig) -> Arc<RuleBook> {
    Arc::new(RuleBook::from_config(&config).unwrap())
}

/// Every bundled policy seated once in a four-player game.
fn bundled() -> Vec<Seat> {
    POLICY_NAMES.iter().map(|name| Seat::bundled(name).unwrap()).collect()
}

#[test]
fn test_bundled_policies_confront() {
    let config = ConfrontConfig::new().with_games(20).with_seed_offset(1_000).with_threads(3);
    let report = Confrontation::new(rules(GameConfig::for_players(4)), bundled, config).run().unwrap();

    assert_eq!(report.games(), 20);
    assert_eq!(report.policy_names(), {
        let mut names = POLICY_NAMES.to_vec();
        names.sort_unstable();
        names
    });
    for name in POLICY_NAMES {
        let counts = report.rank_counts(name).unwrap();
        assert_eq!(counts.iter().sum::<usize>(), 20);
        assert!(counts.len() <= 4);
    }
    let firsts: usize = POLICY_NAMES.iter().map(|name| report.rank_counts(name).unwrap()[0]).sum();
    assert!(firsts >= 20);
}

#[test]
fn test_thread_count_does_not_change_the_report() {
    let base = ConfrontConfig::new().with_games(9).with_seed_offset(50);
    let reports: Vec<ConfrontReport> = [1, 2, 5, 16]
        .into_iter()
        .map(|threads| {
            Confrontation::new(rules(GameConfig::for_players(3)), bundled_three, base.clone().with_threads(threads))
                .run()
                .unwrap()
        })
        .collect();
    assert!(reports.windows(2).all(|pair| pair[0] == pair[1]));
}

fn bundled_three() -> Vec<Seat> {
    vec![
        Seat::bundled("greedy_first").unwrap(),
        Seat::bundled("greedy_score").unwrap(),
        Seat::random("Bot"),
    ]
}

#[test]
fn test_solo_confrontation_ranks_against_pools() {
    let config = ConfrontConfig::new().with_games(5);
    let report = Confrontation::new(rules(GameConfig::for_players(1)), || vec![Seat::random("solo")], config)
        .run()
        .unwrap();

    let counts = report.rank_counts("random").unwrap();
    assert_eq!(counts.iter().sum::<usize>(), 5);
    assert!(counts.len() <= 3);
}

#[test]
fn test_zero_games() {
    let config = ConfrontConfig::new().with_games(0).with_threads(4);
    let report = Confrontation::new(rules(GameConfig::for_players(2)), Vec::new, config).run().unwrap();
    assert_eq!(report.games(), 0);
    assert!(report.policy_names().is_empty());
    assert_eq!(report.win_rate("random"), None);
}

#[test]
fn test_records_survive_bincode_and_replay() {
    let confrontation = Confrontation::new(rules(GameConfig::for_players(4)), bundled, ConfrontConfig::new());
    for index in 0..3 {
        let record = confrontation.play_one(index).unwrap();
        let decoded = GameRecord::from_bytes(&record.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, record);

        let env = decoded.replay().unwrap();
        assert_eq!(env.ranking(), record.standings);
        assert_eq!(env.seed(), index as u64);
    }
}

#[test]
fn test_loaded_dice_game_replays() {
    let env = GameEnvironment::from_config(&GameConfig::for_players(3), 31).unwrap();
    let seats = vec![
        Seat::new("heavy", by_name("greedy_score").unwrap())
            .with_rollicy(Box::new(LoadedDice::new(vec![0.0, 0.0, 0.0, 0.0, 1.0, 3.0]))),
        Seat::random("a"),
        Seat::random("b"),
    ];
    let record = Game::new(env, seats, 8).run().unwrap();

    let heavy: Vec<_> = record.turns.iter().filter(|turn| turn.player == PlayerId::new(0)).collect();
    assert!(heavy.iter().all(|turn| turn.source == RollSource::Manual));
    assert!(heavy.iter().all(|turn| turn.play.index() >= 4));
    assert_eq!(record.seat_names, vec!["heavy", "a", "b"]);
    assert!(record.replay().is_ok());
}
