//! End-to-end scripted fights: secondary effects, faint sweep, session exit.

use combat_core::{
    CombatEvent, CombatantState, EndTurnAction, EntityId, ExitCombatAction, MoveKind,
    UseMoveAction,
};
use combat_runtime::{CombatSession, Scenario, ScriptStep};

#[test]
fn slam_halves_into_guard_then_breaks_it() {
    let mut session = CombatSession::builder()
        .party_member(CombatantState::new(EntityId(1), 60, 10))
        .foe(CombatantState::new(EntityId(2), 50, 8))
        .build()
        .unwrap();
    session.engine_mut().set_guarding(EntityId(2), true);

    session
        .enqueue(UseMoveAction::new(MoveKind::Slam, EntityId(1), &[EntityId(2)]).unwrap())
        .unwrap();
    session.run_until_settled(0.1, 256).expect("did not settle");

    let target = session.engine().state().combatant(EntityId(2)).unwrap();
    // Guard halves Slam's 35 power to 17; the BreakGuard secondary then
    // drops the stance once the animation resolves.
    assert_eq!(target.life, 33);
    assert!(!target.guarding);
    assert!(session.engine().guarding_entities().is_empty());
}

#[test]
fn siren_song_leeches_half_the_damage_dealt() {
    let mut session = CombatSession::builder()
        .party_member(CombatantState::new(EntityId(1), 60, 10).with_life(30))
        .foe(CombatantState::new(EntityId(2), 50, 8))
        .build()
        .unwrap();

    session
        .enqueue(UseMoveAction::new(MoveKind::SirenSong, EntityId(1), &[EntityId(2)]).unwrap())
        .unwrap();
    session.run_until_settled(0.1, 256).expect("did not settle");

    // 15 damage dealt, half leeched back to the source.
    assert_eq!(
        session.engine().state().combatant(EntityId(2)).unwrap().life,
        35
    );
    assert_eq!(
        session.engine().state().combatant(EntityId(1)).unwrap().life,
        37
    );
}

#[test]
fn lethal_move_sweeps_target_into_a_faint() {
    let mut session = CombatSession::builder()
        .party_member(CombatantState::new(EntityId(1), 60, 10))
        .foe(CombatantState::new(EntityId(2), 50, 8).with_life(20))
        .build()
        .unwrap();

    session
        .enqueue(UseMoveAction::new(MoveKind::Flare, EntityId(1), &[EntityId(2)]).unwrap())
        .unwrap();
    session.enqueue(EndTurnAction).unwrap();
    session.run_until_settled(0.1, 512).expect("did not settle");

    let target = session.engine().state().combatant(EntityId(2)).unwrap();
    assert_eq!(target.life, 0);
    assert!(target.fainted);
    assert!(!session.engine().state().turn.order.contains(&EntityId(2)));
    assert!(session
        .engine()
        .events()
        .iter()
        .any(|event| matches!(event, CombatEvent::Fainted { entity: EntityId(2) })));
}

#[test]
fn scripted_skirmish_runs_to_exit() {
    let mut session = CombatSession::builder()
        .party_member(CombatantState::new(EntityId(0), 60, 12))
        .party_member(CombatantState::new(EntityId(1), 55, 10))
        .foe(CombatantState::new(EntityId(10), 50, 8))
        .foe(CombatantState::new(EntityId(11), 45, 8))
        .build()
        .unwrap();

    let scenario = Scenario::new(
        "integration-skirmish",
        vec![
            ScriptStep::Enqueue(
                UseMoveAction::new(MoveKind::Tackle, EntityId(0), &[EntityId(10)])
                    .unwrap()
                    .into(),
            ),
            ScriptStep::Enqueue(EndTurnAction.into()),
            ScriptStep::Enqueue(
                UseMoveAction::new(MoveKind::Flare, EntityId(10), &[EntityId(1)])
                    .unwrap()
                    .into(),
            ),
            ScriptStep::Enqueue(EndTurnAction.into()),
            ScriptStep::Enqueue(ExitCombatAction.into()),
        ],
    );

    let events = scenario.run(&mut session).expect("scenario failed");
    assert!(events
        .iter()
        .any(|event| matches!(event, CombatEvent::CombatExited)));

    let turn_ends = events
        .iter()
        .filter(|event| matches!(event, CombatEvent::TurnEnded { .. }))
        .count();
    assert_eq!(turn_ends, 2);

    // Both moves played their cues in order.
    assert_eq!(
        session.stage().audio.played(),
        vec!["hit_soft".to_string(), "flame_burst".to_string()]
    );
}
