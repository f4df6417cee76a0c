//! Headless demo: a scripted two-on-two skirmish, logged to stdout.

use combat_core::{
    CombatantState, EndTurnAction, EntityId, ExitCombatAction, MoveKind, ReadMessageAction,
    StagePos, UseMoveAction,
};
use combat_runtime::{CombatSession, Scenario, ScriptStep};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut session = CombatSession::builder()
        .party_member(CombatantState::new(EntityId(0), 60, 12))
        .party_member(CombatantState::new(EntityId(1), 55, 10))
        .foe(CombatantState::new(EntityId(10), 50, 8))
        .foe(CombatantState::new(EntityId(11), 45, 8))
        .place(EntityId(0), StagePos::new(-2.0, 0.0))
        .place(EntityId(1), StagePos::new(-2.0, 1.5))
        .place(EntityId(10), StagePos::new(2.0, 0.0))
        .place(EntityId(11), StagePos::new(2.0, 1.5))
        .build()?;

    let scenario = Scenario::new(
        "skirmish",
        vec![
            ScriptStep::Enqueue(ReadMessageAction::new("A wild pair appears!", false).into()),
            ScriptStep::Enqueue(
                UseMoveAction::new(MoveKind::Tackle, EntityId(0), &[EntityId(10)])?.into(),
            ),
            ScriptStep::Enqueue(EndTurnAction.into()),
            ScriptStep::Enqueue(
                UseMoveAction::new(MoveKind::Flare, EntityId(10), &[EntityId(1)])?.into(),
            ),
            ScriptStep::Enqueue(EndTurnAction.into()),
            ScriptStep::Enqueue(
                UseMoveAction::new(MoveKind::Slam, EntityId(1), &[EntityId(11)])?.into(),
            ),
            ScriptStep::Enqueue(EndTurnAction.into()),
            ScriptStep::Enqueue(ExitCombatAction.into()),
        ],
    );

    let events = scenario.run(&mut session)?;
    for event in &events {
        info!(?event, "combat event");
    }
    info!(
        sounds = ?session.stage().audio.played(),
        bursts = session.stage().fx.spawned().len(),
        "stage summary"
    );
    Ok(())
}
