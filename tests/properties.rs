use alien_invasion::consts::*;
use alien_invasion::persistence::SaveRecord;
use alien_invasion::sim::{Command, Difficulty, GamePhase, KeyBinding, Session, tick};
use alien_invasion::Tuning;
use proptest::prelude::*;

/// Commands without cheats
const PLAIN: [Command; 7] = [
    Command::StartMoveLeft,
    Command::StopMoveLeft,
    Command::StartMoveRight,
    Command::StopMoveRight,
    Command::Fire,
    Command::Pause,
    Command::Resume,
];

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![Just(Difficulty::Beginner), Just(Difficulty::Advanced)]
}

/// (command index, ticks to run after it); indexes past the table mean "no command"
fn script() -> impl Strategy<Value = Vec<(usize, u8)>> {
    prop::collection::vec((0..PLAIN.len() + 3, 0u8..12), 1..120)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_across_play(seed in any::<u64>(), difficulty in difficulty(), script in script()) {
        let mut session = Session::new("prop", difficulty, KeyBinding::default(), seed);
        let mut last_score = 0;
        let mut last_round = 0;
        let mut last_bunkers: Vec<u32> = session.bunkers.iter().map(|b| b.strength).collect();

        for (choice, ticks) in script {
            if let Some(&command) = PLAIN.get(choice) {
                session.apply(command);
            }
            for _ in 0..ticks {
                let snap = tick(&mut session);

                prop_assert!(snap.score >= last_score);
                prop_assert_eq!(snap.score % POINTS_PER_ALIEN, 0);
                prop_assert!(snap.cannon.lives <= MAX_LIVES);
                prop_assert!(snap.cannon.rect.left() >= CANNON_WALL_MARGIN);
                prop_assert!(snap.cannon.rect.right() <= FIELD_WIDTH - CANNON_WALL_MARGIN);
                prop_assert!(snap.projectiles.len() <= session.max_projectiles());
                prop_assert_eq!(snap.aliens.len(), difficulty.alien_count());
                prop_assert_eq!(snap.visible_aliens().count(), session.formation.alive());
                if snap.laser.active {
                    prop_assert_eq!(snap.laser.rect.size(), session.cannon.muzzle().size());
                }

                // Bunkers only wear down within a round without cheats
                let strengths: Vec<u32> = snap.bunkers.iter().map(|b| b.strength).collect();
                if snap.round == last_round {
                    for (now, before) in strengths.iter().zip(&last_bunkers) {
                        prop_assert!(now <= before);
                    }
                }
                last_bunkers = strengths;
                last_score = snap.score;
                last_round = snap.round;

                if snap.phase == GamePhase::GameOver {
                    prop_assert_eq!(snap.cannon.lives, 0);
                }
            }
        }
    }

    #[test]
    fn escalation_is_cumulative(rounds in 0u32..60) {
        let mut session = Session::new("prop", Difficulty::Advanced, KeyBinding::default(), 0);
        for _ in 0..rounds {
            session.advance_round();
        }
        prop_assert_eq!(session.max_projectiles(), 4 + (rounds / 3) as usize);
        prop_assert_eq!(session.projectile_speed, 4 + rounds / 5);
        prop_assert_eq!(session.formation.speed, 1 + rounds / 7);
        prop_assert!(session.projectiles.iter().all(|p| p.speed == session.projectile_speed));
        prop_assert!(session.formation.cells().iter().all(|a| a.is_visible()));
    }

    #[test]
    fn save_record_survives_play(seed in any::<u64>(), difficulty in difficulty(), ticks in 0usize..400) {
        let mut session = Session::new("prop", difficulty, KeyBinding::wasd_w(), seed);
        for i in 0..ticks {
            if i % 9 == 0 {
                session.apply(Command::Fire);
            }
            tick(&mut session);
        }
        prop_assume!(!session.is_over());

        let record = SaveRecord::from_session(&session);
        let decoded = SaveRecord::decode(&record.encode()).unwrap();
        prop_assert_eq!(&decoded, &record);

        let restored = decoded.into_session(seed, Tuning::default());
        prop_assert_eq!(restored.score, session.score);
        prop_assert_eq!(restored.formation.alive(), session.formation.alive());
        prop_assert_eq!(restored.cannon.rect(), session.cannon.rect());
    }
}
