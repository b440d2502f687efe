use std::time::Duration;

use alien_invasion::consts::*;
use alien_invasion::persistence::SaveStore;
use alien_invasion::runner::{Game, NullRenderer};
use alien_invasion::sim::{
    Command, Difficulty, Formation, GameEvent, GamePhase, KeyBinding, Rect, Session, Snapshot,
    Sweep, tick,
};

fn beginner(seed: u64) -> Session {
    Session::new("player", Difficulty::Beginner, KeyBinding::default(), seed)
}

/// Put a short laser just under `(row, col)` so the next tick's step lands on it
fn aim_at(session: &mut Session, row: usize, col: usize) {
    let alien = session.formation.get(row, col).unwrap().rect().center();
    let dx = match session.formation.sweep() {
        Sweep::Right => session.formation.speed as f32,
        Sweep::Left => -(session.formation.speed as f32),
    };
    let x = alien.x + dx;
    let step = session.tuning.laser_speed;
    session
        .laser
        .launch(Rect::new(x - 2.0, alien.y + step, x + 2.0, alien.y + step + 20.0));
}

#[test]
fn clearing_a_beginner_round() {
    let mut session = beginner(42);
    let mut events = Vec::new();

    // Bottom row first so a shot never clips the row beneath its target
    for row in (0..2).rev() {
        for col in 0..ALIEN_COLS {
            aim_at(&mut session, row, col);
            let snap = tick(&mut session);
            events.extend(snap.events);
        }
    }

    assert_eq!(session.round, 1);
    assert_eq!(session.lives(), 3);
    assert_eq!(session.score, 1600);
    assert_eq!(session.formation.alive(), 16);
    for alien in session.formation.cells() {
        assert!(alien.is_visible());
        assert_eq!(alien.rect().center(), Formation::home_center(alien.row, alien.col));
    }

    let kills = events
        .iter()
        .filter(|e| matches!(e, GameEvent::AlienDestroyed { .. }))
        .count();
    assert_eq!(kills, 16);
    assert!(events.contains(&GameEvent::ScoreMilestone { score: 1000 }));
    assert!(events.iter().any(|e| matches!(e, GameEvent::RoundCleared { round: 1, .. })));
}

#[test]
fn cannon_held_against_left_wall() {
    let mut session = beginner(1);
    session.cannon.slide(-2000.0);
    assert_eq!(session.cannon.rect().left(), CANNON_WALL_MARGIN);

    session.apply(Command::StartMoveLeft);
    for _ in 0..3 {
        let snap = tick(&mut session);
        assert_eq!(snap.cannon.rect.left(), CANNON_WALL_MARGIN);
    }
}

#[test]
fn projectile_on_cannon_costs_one_life() {
    let mut session = beginner(9);
    let cannon = session.cannon.rect();
    let projectile = &mut session.projectiles[0];
    projectile
        .sprite
        .place(Rect::new(cannon.left() + 20.0, cannon.top(), cannon.left() + 24.0, cannon.top() + 36.0));
    projectile.sprite.show();

    let first = tick(&mut session);
    let second = tick(&mut session);
    assert_eq!(first.cannon.lives, 2);
    assert_eq!(second.cannon.lives, 2);
    let hits = first
        .events
        .iter()
        .chain(&second.events)
        .filter(|e| matches!(e, GameEvent::CannonHit { .. }))
        .count();
    assert_eq!(hits, 1);
}

#[test]
fn formation_reaching_the_cannon_ends_the_game() {
    let mut session = beginner(3);
    let mut last: Option<Snapshot> = None;
    let mut invaded = false;
    for _ in 0..20_000 {
        // No enemy fire, so only the invasion can end this game
        session.projectiles.clear();
        let snap = tick(&mut session);
        invaded |= snap.events.contains(&GameEvent::Invaded);
        let over = snap.is_over();
        last = Some(snap);
        if over {
            break;
        }
    }
    let last = last.unwrap();
    assert!(invaded);
    assert_eq!(last.phase, GamePhase::GameOver);
    assert_eq!(last.cannon.lives, 0);
    assert_eq!(last.round, 0);
}

#[test]
fn save_and_resume_mid_round() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path(), "leaderboard.txt");

    let mut session = Session::new("mira", Difficulty::Advanced, KeyBinding::wasd_space(), 8);
    for _ in 0..90 {
        tick(&mut session);
    }
    aim_at(&mut session, 3, 4);
    tick(&mut session);
    session.apply(Command::Pause);
    store.save(&session).unwrap();

    let restored = store.load("mira").unwrap().into_session(8, session.tuning.clone());
    let (before, after) = (session.snapshot(), restored.snapshot());
    assert_eq!(after.phase, GamePhase::Paused);
    assert_eq!(after.round, before.round);
    assert_eq!(after.score, before.score);
    assert_eq!(after.cannon, before.cannon);
    assert_eq!(after.bunkers, before.bunkers);
    let cells = |s: &Snapshot| -> Vec<_> {
        s.aliens
            .iter()
            .map(|a| (a.row, a.col, a.visible, a.visible.then_some(a.rect)))
            .collect()
    };
    assert_eq!(cells(&after), cells(&before));
    assert_eq!(after.visible_aliens().count(), 31);
}

#[test]
fn game_over_updates_leaderboard_and_drops_save() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path(), "leaderboard.txt");
    let board_path = dir.path().join("leaderboard.txt");
    std::fs::write(&board_path, "old:300\nnova:100\n").unwrap();

    let mut session = Session::new("nova", Difficulty::Beginner, KeyBinding::default(), 4);
    session.score = 700;
    session.cannon.lives = 1;
    let mut game = Game::new(session, store.clone(), &board_path, Duration::from_millis(16));
    game.save().unwrap();
    assert_eq!(store.list().unwrap(), vec!["nova"]);

    // Let enemy fire run its course with the cannon parked
    let mut ticks = 0;
    while !game.is_finished() {
        game.update(Duration::from_millis(16), &mut NullRenderer).unwrap();
        ticks += 1;
        assert!(ticks < 100_000);
    }

    assert!(game.session().is_over());
    assert!(store.list().unwrap().is_empty());
    let board = game.leaderboard().unwrap();
    assert_eq!(board.score_of("nova"), Some(game.session().score));
    assert!(game.session().score >= 700);
    assert!(!game.command(Command::Resume));
}

#[test]
fn new_game_name_checks() {
    let dir = tempfile::tempdir().unwrap();
    let store = SaveStore::new(dir.path(), "leaderboard.txt");
    store.save(&beginner(1)).unwrap();
    assert!(store.ensure_available("player").is_err());
    assert!(store.ensure_available("  ").is_err());
    assert!(store.ensure_available("someone").is_ok());
}
