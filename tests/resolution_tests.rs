//! Casino resolution scenarios, pure and through the environment.

use lasvegas::core::{
    BillSupply, CasinoId, CasinoMinimum, EntityId, ExtraCollection, GameConfig, OrderHint, PlayerId, Roll, Starter,
};
use lasvegas::env::{GameEnvironment, StepOutcome};
use lasvegas::rules::{competition_ranks, resolve_casino, Score, TierOutcome};

const C: CasinoId = CasinoId(0);

#[test]
fn test_rulebook_example_ties_cancel() {
    // Red and green tie at the top, blue wins the next bill, yellow the one after.
    let result = resolve_casino(C, &[4, 4, 2, 1], &[10_000, 20_000, 50_000, 90_000]);

    assert_eq!(result.tiers.len(), 3);
    assert!(matches!(&result.tiers[0], TierOutcome::Forfeited { bill: 90_000, entities, .. } if entities.len() == 2));
    assert_eq!(result.gain_of(EntityId(2)), (50_000, 1));
    assert_eq!(result.gain_of(EntityId(3)), (20_000, 1));
    assert_eq!(result.gain_of(EntityId(0)), (0, 0));
    assert_eq!(result.leftover, vec![10_000]);
    assert_eq!(result.forfeited(), 90_000);
}

#[test]
fn test_three_way_tie_below_a_winner() {
    let result = resolve_casino(C, &[5, 2, 2, 2], &[30_000, 60_000]);

    assert_eq!(result.gain_of(EntityId(0)), (60_000, 1));
    assert_eq!(result.tiers[1].winner(), None);
    assert_eq!(result.tiers[1].bill(), 30_000);
    assert!(result.leftover.is_empty());
}

#[test]
fn test_more_winners_than_bills() {
    let result = resolve_casino(C, &[1, 2, 3, 4], &[70_000]);
    assert_eq!(result.tiers.len(), 1);
    assert_eq!(result.gain_of(EntityId(3)), (70_000, 1));
    assert!(result.leftover.is_empty());
}

#[test]
fn test_nobody_placed() {
    let result = resolve_casino(C, &[0, 0, 0], &[10_000, 40_000]);
    assert!(result.tiers.is_empty());
    assert_eq!(result.leftover, vec![10_000, 40_000]);
}

#[test]
fn test_scores_rank_by_money_then_bills() {
    let scores = [
        Score::new(100_000, 2),
        Score::new(100_000, 3),
        Score::new(90_000, 5),
        Score::new(100_000, 2),
    ];
    assert_eq!(competition_ranks(&scores), vec![2, 1, 4, 2]);
}

/// Two players with one collecting neutral pool, one casino, fixed bills.
fn single_casino(bills: Vec<u64>, minimum: u64, collects: bool) -> GameEnvironment {
    let config = GameConfig::default()
        .with_starting_dice(vec![vec![3, 0, 1], vec![0, 3, 1]])
        .with_casinos(1)
        .with_bills(BillSupply::PerCasino(vec![bills]))
        .with_casino_minimum(CasinoMinimum::Global(minimum))
        .with_extra_collection(ExtraCollection::All(collects))
        .with_order(OrderHint::Identity)
        .with_starter(Starter::Player(0))
        .with_rounds(1);
    GameEnvironment::from_config(&config, 0).unwrap()
}

fn all_on_casino(env: &mut GameEnvironment, player: u8) -> StepOutcome {
    let player = PlayerId::new(player);
    let mut roll = Roll::empty(3, 1);
    for (colour, &dice) in env.dice_to_roll(player).to_vec().iter().enumerate() {
        roll.add(EntityId(colour as u8), C, dice);
    }
    env.roll_with(player, roll).unwrap();
    env.apply(C).unwrap()
}

#[test]
fn test_tied_players_let_the_pool_win() {
    let mut env = single_casino(vec![10, 20, 30], 60, true);
    all_on_casino(&mut env, 0);
    let outcome = all_on_casino(&mut env, 1);

    // 3 vs 3 vs 2 neutral dice: 30 forfeited, the pool takes 20.
    let StepOutcome::GameOver(summary) = outcome else {
        panic!("single round game should be over");
    };
    assert_eq!(summary.casinos[0].forfeited(), 30);
    assert_eq!(summary.gain_of(EntityId(2)), (20, 1));
    assert_eq!(env.scoreboard().get(EntityId(2)), Some(Score::new(20, 1)));

    let ranking = env.ranking();
    assert_eq!(ranking[0].entity, EntityId(2));
    assert_eq!((ranking[1].rank, ranking[2].rank), (2, 2));
    assert_eq!(env.ledger().forfeited, vec![30]);
    assert_eq!(env.casino_bills(C), &[10]);
}

#[test]
fn test_leftovers_carry_into_the_next_round() {
    let config = GameConfig::default()
        .with_starting_dice(vec![vec![2, 0], vec![0, 2]])
        .with_casinos(1)
        .with_bills(BillSupply::PerCasino(vec![vec![10, 20, 40, 50]]))
        .with_casino_minimum(CasinoMinimum::Global(60))
        .with_order(OrderHint::Identity)
        .with_starter(Starter::Player(0))
        .with_rounds(2);
    let mut env = GameEnvironment::from_config(&config, 3).unwrap();
    let first_stack = env.casino_bills(C).to_vec();
    assert!(first_stack.iter().sum::<u64>() >= 60);

    // Both players throw 2 dice on the only casino: the top bill is forfeited.
    let mut roll = Roll::empty(2, 1).with_dice(EntityId(0), C, 2);
    env.roll_with(PlayerId::new(0), roll).unwrap();
    env.apply(C).unwrap();
    roll = Roll::empty(2, 1).with_dice(EntityId(1), C, 2);
    env.roll_with(PlayerId::new(1), roll).unwrap();
    assert!(matches!(env.apply(C).unwrap(), StepOutcome::RoundOver(_)));

    let leftover = &first_stack[..first_stack.len() - 1];
    let second_stack = env.casino_bills(C);
    assert!(second_stack.starts_with(leftover) || leftover.iter().all(|bill| second_stack.contains(bill)));
    assert!(second_stack.iter().sum::<u64>() >= 60 || env.state().bank.remaining() == 0);
    assert_eq!(env.scoreboard().total_money(), 0);
}

#[test]
fn test_pool_winnings_return_to_the_bank() {
    let mut env = single_casino(vec![10, 20, 30], 60, false);
    all_on_casino(&mut env, 0);
    all_on_casino(&mut env, 1);

    assert_eq!(env.ledger().returned, vec![20]);
    assert_eq!(env.ledger().forfeited, vec![30]);
    assert_eq!(env.scoreboard().total_money(), 0);
    assert_eq!(env.ranking().len(), 2);
    assert_eq!(env.state().bank.total(), 50);
}
