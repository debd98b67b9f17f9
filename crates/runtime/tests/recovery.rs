mod common;

use encounter_core::{CombatOutcome, CombatantId, Faction, SpeakerClass};
use runtime::{AttackActionProvider, Event, Runtime, Topic};

use common::*;

#[tokio::test(start_paused = true)]
async fn unknown_opponent_becomes_a_mirror_of_the_protagonist() {
    let runtime = Runtime::builder()
        .request(request(protagonist(80, 25, 10), &["ghost-x"]))
        .pool(pool(vec![enemy("wolf", "Grey Wolf", 40, 15, 10)]))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let snapshot = handle.snapshot().await.unwrap();
    let opponents: Vec<_> = snapshot
        .roster
        .iter()
        .filter(|c| c.faction() == Faction::OpponentSide)
        .collect();
    assert_eq!(opponents.len(), 1);

    let ghost = opponents[0];
    let hero = snapshot.combatant(&"hero".into()).unwrap();
    assert_eq!(ghost.id(), &CombatantId::from("ghost:ghost-x"));
    assert_eq!(ghost.name, "Shadow of Lin");
    assert_eq!(ghost.current_hp(), 80);
    assert_eq!(
        (ghost.attack, ghost.defense, ghost.speed),
        (hero.attack, hero.defense, hero.speed)
    );

    let notice = &snapshot.log[0];
    assert_eq!(notice.speaker, SpeakerClass::System);
    assert!(notice.text.contains("ghost-x"));
}

#[tokio::test(start_paused = true)]
async fn recovery_notice_is_published_on_start_and_fight_is_winnable() {
    let mut runtime = Runtime::builder()
        .request(request(protagonist(100, 25, 10), &["ghost-x"]))
        .pool(pool(Vec::new()))
        .player_provider(AttackActionProvider)
        .build()
        .await
        .unwrap();
    let mut logs = runtime.handle().subscribe(Topic::Log);

    let payload = runtime.run().await.unwrap();

    let notice = next_matching(&mut logs, |event| match event {
        Event::Log(entry) => Some(entry),
        _ => None,
    })
    .await;
    assert_eq!(notice.id, 0);
    assert_eq!(notice.speaker, SpeakerClass::System);

    // Equal speed, so the protagonist always strikes first.
    assert_eq!(payload.outcome, CombatOutcome::Victory);
    assert_eq!(payload.opponent_ids, [CombatantId::from("ghost:ghost-x")]);
    assert_eq!(payload.final_player_state.hp, 30);
    assert!(payload.dispositions.contains_key(&CombatantId::from("ghost:ghost-x")));
}
