//! Guard-state and target-lock invariants across faints and swaps.

use combat_core::{
    ActionKind, CombatEvent, CombatantState, EntityId, FaintAction, ReviveAction, SwapAllyAction,
};
use combat_runtime::CombatSession;

fn party_session() -> CombatSession {
    CombatSession::builder()
        .party_member(CombatantState::new(EntityId(5), 60, 10))
        .party_member(CombatantState::new(EntityId(9), 55, 10))
        .foe(CombatantState::new(EntityId(3), 50, 8))
        .build()
        .expect("session build failed")
}

#[test]
fn faint_clears_guard_in_the_same_frame_and_forever() {
    let mut session = party_session();
    session.engine_mut().set_guarding(EntityId(3), true);
    assert_eq!(session.engine().guarding_entities(), vec![EntityId(3)]);

    session.enqueue(FaintAction::single(EntityId(3))).unwrap();

    let mut faint_started = false;
    for _ in 0..128 {
        session.step(0.1);
        faint_started |= session.engine().events().iter().any(|event| {
            matches!(event, CombatEvent::ActionStarted { kind: ActionKind::Faint })
        });
        if faint_started {
            assert!(
                !session.engine().guarding_entities().contains(&EntityId(3)),
                "stale guard flag survived the faint"
            );
        }
        if session.settled() {
            break;
        }
    }
    assert!(faint_started, "faint action never ran");
    let fainted = session
        .engine()
        .state()
        .combatant(EntityId(3))
        .expect("combatant missing");
    assert!(fainted.fainted);
    assert!(!session.engine().state().turn.order.contains(&EntityId(3)));
}

#[test]
fn faint_clears_target_lock_on_the_fainting_entity() {
    let mut session = party_session();
    session.engine_mut().set_target_lock(Some(EntityId(3)));
    session.enqueue(FaintAction::single(EntityId(3))).unwrap();
    session.run_until_settled(0.1, 128).expect("did not settle");
    assert_eq!(session.engine().target_lock(), None);
}

#[test]
fn swap_clears_lock_and_guard_and_reorders_slots() {
    let mut session = party_session();
    session.engine_mut().set_guarding(EntityId(5), true);
    session.engine_mut().set_target_lock(Some(EntityId(5)));

    session
        .enqueue(SwapAllyAction::new(EntityId(5), EntityId(9)))
        .unwrap();
    session.run_until_settled(0.1, 128).expect("did not settle");

    assert_eq!(session.engine().target_lock(), None);
    assert!(session.engine().guarding_entities().is_empty());
    assert_eq!(
        session.engine().state().roster.player_slots(),
        &[EntityId(9), EntityId(5)]
    );
    assert_eq!(
        session.stage().party.swaps(),
        vec![(EntityId(5), EntityId(9))]
    );
    assert!(session
        .engine()
        .events()
        .iter()
        .any(|event| matches!(
            event,
            CombatEvent::Swapped {
                outgoing: EntityId(5),
                incoming: EntityId(9),
            }
        )));
}

#[test]
fn unrelated_lock_survives_a_swap() {
    let mut session = party_session();
    session.engine_mut().set_target_lock(Some(EntityId(3)));
    session
        .enqueue(SwapAllyAction::new(EntityId(5), EntityId(9)))
        .unwrap();
    session.run_until_settled(0.1, 128).expect("did not settle");
    assert_eq!(session.engine().target_lock(), Some(EntityId(3)));
}

#[test]
fn revive_restores_life_and_reschedules() {
    let mut session = party_session();
    session.enqueue(FaintAction::single(EntityId(3))).unwrap();
    session.run_until_settled(0.1, 128).expect("did not settle");

    session
        .enqueue(ReviveAction::new(vec![EntityId(3)], 25).unwrap())
        .unwrap();
    session.run_until_settled(0.1, 128).expect("did not settle");

    let revived = session
        .engine()
        .state()
        .combatant(EntityId(3))
        .expect("combatant missing");
    assert!(!revived.fainted);
    assert_eq!(revived.life, 25);
    assert!(session.engine().state().turn.order.contains(&EntityId(3)));
    assert!(session
        .engine()
        .events()
        .iter()
        .any(|event| matches!(event, CombatEvent::Revived { entity: EntityId(3) })));
}
