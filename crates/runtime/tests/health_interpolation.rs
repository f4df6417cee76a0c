//! Displayed-life interpolation and move gating.

use combat_core::{
    CombatEvent, CombatantState, CustomEffectAction, CustomEffectFlags, EndTurnAction, EntityId,
    MoveKind, UseMoveAction,
};
use combat_runtime::CombatSession;

fn duel(target_life: u32) -> CombatSession {
    CombatSession::builder()
        .party_member(CombatantState::new(EntityId(1), 60, 10))
        .foe(CombatantState::new(EntityId(2), 100, 10).with_life(target_life))
        .build()
        .expect("session build failed")
}

fn life_of(session: &CombatSession, entity: EntityId) -> u32 {
    session
        .engine()
        .state()
        .combatant(entity)
        .expect("combatant missing")
        .life
}

#[test]
fn health_bar_converges_without_undershoot() {
    // 100 -> 40 at 20 life-points/second, dt = 0.1: two points per tick,
    // done within ceil((100-40)/20/0.1) = 30 interpolation ticks.
    let mut session = duel(100);
    session
        .enqueue(
            CustomEffectAction::new(vec![EntityId(2)])
                .unwrap()
                .with_final_life(vec![(EntityId(2), 40)])
                .with_flags(CustomEffectFlags::WAIT | CustomEffectFlags::LERP_LIFE),
        )
        .unwrap();

    let mut first_decrement = None;
    let mut reached_final = None;
    for frame in 0..128 {
        session.step(0.1);
        let life = life_of(&session, EntityId(2));
        assert!(life >= 40, "frame {frame}: displayed life {life} undershot 40");
        if life < 100 && first_decrement.is_none() {
            first_decrement = Some(frame);
        }
        if life == 40 {
            reached_final = Some(frame);
            break;
        }
    }
    let (start, end) = (
        first_decrement.expect("interpolation never started"),
        reached_final.expect("interpolation never converged"),
    );
    assert!(
        end - start < 30,
        "took {} ticks to cover 60 points at 2/tick",
        end - start
    );
}

#[test]
fn end_turn_waits_for_final_life_and_back_delay() {
    let mut session = duel(60);
    session
        .enqueue(UseMoveAction::new(MoveKind::Tackle, EntityId(1), &[EntityId(2)]).unwrap())
        .unwrap();
    session.enqueue(EndTurnAction).unwrap();

    let back_delay_frames = (session.engine().config().move_back_delay / 0.1).round() as u32;
    let mut frame_reached_final = None;
    let mut frame_turn_ended = None;
    for frame in 0..256 {
        session.step(0.1);
        if frame_reached_final.is_none() && life_of(&session, EntityId(2)) == 40 {
            frame_reached_final = Some(frame);
        }
        let ended = session
            .engine()
            .events()
            .iter()
            .any(|event| matches!(event, CombatEvent::TurnEnded { .. }));
        // The next action must not run while life is still interpolating.
        if frame_reached_final.is_none() {
            assert!(!ended, "turn ended while health bar was still moving");
        }
        if ended {
            frame_turn_ended = Some(frame);
            break;
        }
    }

    let reached = frame_reached_final.expect("life never reached 40");
    let ended = frame_turn_ended.expect("turn never ended");
    assert_eq!(life_of(&session, EntityId(2)), 40);
    assert!(
        ended >= reached + back_delay_frames,
        "turn ended at frame {ended}, life settled at {reached}, back delay is {back_delay_frames} frames"
    );
}

#[test]
fn kickoff_spends_skill_and_plays_cues_once() {
    let mut session = duel(60);
    session
        .enqueue(UseMoveAction::new(MoveKind::Flare, EntityId(1), &[EntityId(2)]).unwrap())
        .unwrap();
    session.run_until_settled(0.1, 256).expect("did not settle");

    // Flare costs 4 skill points and plays one cue, one burst per target.
    assert_eq!(
        session
            .engine()
            .state()
            .combatant(EntityId(1))
            .unwrap()
            .skill_points,
        6
    );
    assert_eq!(session.stage().audio.played(), vec!["flame_burst".to_string()]);
    assert_eq!(session.stage().fx.spawned().len(), 1);
    assert_eq!(life_of(&session, EntityId(2)), 35);
}
