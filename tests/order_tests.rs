//! Turn order and first-player chip tests.
//!
//! The cycle is fixed for the whole game; the chip moves one seat per round.

use lasvegas::core::{GameConfig, GameRng, OrderHint, PlayerId, Starter};
use lasvegas::env::{GameEnvironment, RoundOrder};
use lasvegas::rules::RuleBook;

fn ids(raw: &[u8]) -> Vec<PlayerId> {
    raw.iter().copied().map(PlayerId::new).collect()
}

/// Play the current round to its end with the first legal play.
fn finish_round(env: &mut GameEnvironment) {
    let round = env.round();
    while env.round() == round && !env.is_over() {
        let player = env.current_player().unwrap();
        env.roll(player).unwrap();
        let play = env.legal_plays()[0];
        env.apply(play).unwrap();
    }
}

#[test]
fn test_identity_order_and_explicit_starter() {
    let config = GameConfig::for_players(4)
        .with_order(OrderHint::Identity)
        .with_starter(Starter::Player(2));
    let env = GameEnvironment::from_config(&config, 0).unwrap();

    assert_eq!(env.state().order.cycle(), ids(&[0, 1, 2, 3]).as_slice());
    assert_eq!(env.current_player(), Some(PlayerId::new(2)));
    assert_eq!(env.upcoming().collect::<Vec<_>>(), ids(&[2, 3, 0, 1]));
}

#[test]
fn test_chip_rotates_through_the_cycle() {
    let config = GameConfig::for_players(3)
        .with_order(OrderHint::Partial(vec![Some(2), Some(0), Some(1)]))
        .with_starter(Starter::FirstInOrder);
    let mut env = GameEnvironment::from_config(&config, 4).unwrap();

    let mut starters = Vec::new();
    while !env.is_over() {
        starters.push(env.current_player().unwrap());
        finish_round(&mut env);
    }
    assert_eq!(starters, ids(&[2, 0, 1, 2]));
}

#[test]
fn test_partial_hint_keeps_relative_offsets() {
    let config = GameConfig::for_players(5).with_order(OrderHint::Partial(vec![Some(4), None, None, Some(0)]));
    for seed in 0..20 {
        let env = GameEnvironment::from_config(&config, seed).unwrap();
        let order = &env.state().order;
        assert_eq!(order.cycle().len(), 5);
        assert_eq!(order.cycle()[0], PlayerId::new(4));
        assert_eq!(order.offset(PlayerId::new(4), PlayerId::new(0)), Some(3));

        let mut sorted = order.cycle().to_vec();
        sorted.sort();
        assert_eq!(sorted, ids(&[0, 1, 2, 3, 4]));
    }
}

#[test]
fn test_random_order_depends_on_seed_only() {
    let config = GameConfig::for_players(5);
    let cycles: Vec<Vec<PlayerId>> = (0..30)
        .map(|seed| {
            GameEnvironment::from_config(&config, seed)
                .unwrap()
                .state()
                .order
                .cycle()
                .to_vec()
        })
        .collect();

    let again = GameEnvironment::from_config(&config, 7).unwrap();
    assert_eq!(again.state().order.cycle(), cycles[7].as_slice());
    assert!(cycles.iter().any(|cycle| cycle != &cycles[0]));
}

#[test]
fn test_invalid_hints_are_rejected() {
    let cases = [
        OrderHint::Partial(vec![Some(0), Some(0)]),
        OrderHint::Partial(vec![Some(3)]),
        OrderHint::Partial(vec![None, None, None, None]),
    ];
    for hint in cases {
        let err = RuleBook::from_config(&GameConfig::for_players(3).with_order(hint)).unwrap_err();
        assert_eq!(err.field, "order");
    }

    let err = RuleBook::from_config(&GameConfig::for_players(3).with_starter(Starter::Player(3))).unwrap_err();
    assert_eq!(err.field, "starter");
}

#[test]
fn test_resolve_pours_missing_players_into_gaps() {
    let hint = [None, Some(PlayerId::new(1)), None];
    for seed in 0..10 {
        let order = RoundOrder::resolve(&hint, Starter::FirstInOrder, 4, &mut GameRng::new(seed));
        assert_eq!(order.cycle()[1], PlayerId::new(1));
        assert_eq!(order.starter(), order.cycle()[0]);
        assert_eq!(order.position(PlayerId::new(1)), Some(1));
    }
}

#[test]
fn test_solo_order_is_trivial() {
    let env = GameEnvironment::from_config(&GameConfig::for_players(1), 3).unwrap();
    assert_eq!(env.state().order.cycle(), ids(&[0]).as_slice());
    assert_eq!(env.current_player(), Some(PlayerId::new(0)));
}
