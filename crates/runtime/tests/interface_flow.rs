//! Sub-menu and dialogue interrupts.

use combat_core::{
    ActionKind, CombatEvent, CombatantState, EndTurnAction, EnginePhase, EntityId,
    OpenSubMenuAction, ReadMessageAction, SubMenuKind, ToggleHudAction,
};
use combat_runtime::{CombatSession, OpenSurface};

fn session() -> CombatSession {
    CombatSession::builder()
        .party_member(CombatantState::new(EntityId(1), 60, 10))
        .foe(CombatantState::new(EntityId(2), 60, 10))
        .build()
        .expect("session build failed")
}

fn turn_ended(session: &CombatSession) -> bool {
    session
        .engine()
        .events()
        .iter()
        .any(|event| matches!(event, CombatEvent::TurnEnded { .. }))
}

#[test]
fn sub_menu_suspends_until_selection() {
    let mut session = session();
    session
        .enqueue(
            OpenSubMenuAction::new(
                SubMenuKind::Moves,
                vec!["Tackle".into(), "Slam".into()],
                None,
                None,
            )
            .unwrap(),
        )
        .unwrap();
    session.enqueue(EndTurnAction).unwrap();

    session.step(0.1);
    assert_eq!(session.engine().phase(), EnginePhase::Paused);
    assert!(matches!(
        session.stage().menu.open_surface(),
        Some(OpenSurface::SubMenu(_))
    ));

    // The queued follow-up must not run while the menu is open.
    for _ in 0..16 {
        session.step(0.1);
    }
    assert!(!turn_ended(&session));

    // Out-of-bounds selection is ignored and the menu re-prompts.
    session.choose(7).unwrap();
    assert!(session.stage().menu.open_surface().is_some());
    assert!(!turn_ended(&session));

    session.choose(1).unwrap();
    assert!(session.stage().menu.open_surface().is_none());
    assert_eq!(session.stage().menu.selections(), vec![1]);
    session.run_until_settled(0.1, 64).expect("did not settle");
    assert!(turn_ended(&session));
}

#[test]
fn timed_message_auto_closes_and_releases_the_queue() {
    let mut session = session();
    session
        .enqueue(ReadMessageAction::new("It's super effective!", false))
        .unwrap();
    session.enqueue(EndTurnAction).unwrap();

    session.step(0.1);
    assert_eq!(session.engine().phase(), EnginePhase::Paused);

    // Default hold is 0.75 s; well within 32 frames at dt = 0.1.
    session.run_until_settled(0.1, 32).expect("did not settle");
    assert!(turn_ended(&session));
}

#[test]
fn interactive_message_waits_for_confirmation() {
    let mut session = session();
    session
        .enqueue(ReadMessageAction::new("Press A.", true))
        .unwrap();
    session.enqueue(EndTurnAction).unwrap();

    for _ in 0..32 {
        session.step(0.1);
    }
    assert!(!turn_ended(&session));
    assert_eq!(session.engine().phase(), EnginePhase::Paused);

    session.close_message().unwrap();
    session.run_until_settled(0.1, 64).expect("did not settle");
    assert!(turn_ended(&session));
    let completed_reads = session
        .engine()
        .events()
        .iter()
        .filter(|event| {
            matches!(
                event,
                CombatEvent::ActionCompleted {
                    kind: ActionKind::ReadMessage
                }
            )
        })
        .count();
    assert_eq!(completed_reads, 1);
}

#[test]
fn hud_toggle_reaches_state_and_host() {
    let mut session = session();
    session.enqueue(ToggleHudAction { visible: false }).unwrap();
    session.run_until_settled(0.1, 16).expect("did not settle");
    assert!(!session.engine().state().hud_visible);
    assert!(!session.stage().menu.hud_visible());

    session.enqueue(ToggleHudAction { visible: true }).unwrap();
    session.run_until_settled(0.1, 16).expect("did not settle");
    assert!(session.engine().state().hud_visible);
    assert!(session.stage().menu.hud_visible());
}
