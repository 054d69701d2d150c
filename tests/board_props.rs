use naval_combat::{AttackResult, Board, Cell, FLEET};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64, size: usize) -> Option<(Board, SmallRng)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let board = Board::random(size, &FLEET, &mut rng, 10).ok()?;
    Some((board, rng))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ships_never_touch(seed in any::<u64>(), size in 10usize..16) {
        let Some((board, _)) = random_board(seed, size) else {
            return Ok(());
        };
        let ships = board.ships();
        for (i, a) in ships.iter().enumerate() {
            for b in &ships[i + 1..] {
                for (ar, ac) in a.cells() {
                    for (br, bc) in b.cells() {
                        prop_assert!(ar.abs_diff(br) > 1 || ac.abs_diff(bc) > 1);
                    }
                }
            }
        }
        let ship_cells: usize = ships.iter().map(|s| s.ship_type().length()).sum();
        let marked = (0..size)
            .flat_map(|r| (0..size).map(move |c| (r, c)))
            .filter(|&(r, c)| board.cell(r, c).unwrap() == Cell::Ship)
            .count();
        prop_assert_eq!(marked, ship_cells);
    }

    #[test]
    fn repeat_attack_changes_nothing(seed in any::<u64>(), row in 0usize..12, col in 0usize..12) {
        let Some((mut board, _)) = random_board(seed, 12) else {
            return Ok(());
        };
        let first = board.receive_attack(row, col).unwrap();
        prop_assert_ne!(first, AttackResult::AlreadyAttacked);
        let after = board.clone();
        for _ in 0..3 {
            prop_assert_eq!(board.receive_attack(row, col).unwrap(), AttackResult::AlreadyAttacked);
        }
        prop_assert_eq!(board, after);
    }

    #[test]
    fn each_ship_sinks_once(seed in any::<u64>()) {
        let Some((mut board, mut rng)) = random_board(seed, 12) else {
            return Ok(());
        };
        let mut cells: Vec<_> = (0..12).flat_map(|r| (0..12).map(move |c| (r, c))).collect();
        // Fisher-Yates with the seeded generator
        for i in (1..cells.len()).rev() {
            let j = rng.random_range(0..=i);
            cells.swap(i, j);
        }
        let mut sunk = Vec::new();
        for (r, c) in cells {
            let all_before = board.all_ships_sunk();
            if let AttackResult::Sunk(name) = board.receive_attack(r, c).unwrap() {
                prop_assert!(!all_before);
                sunk.push(name);
            }
            let expect_all = board.ships().iter().all(|s| s.hit_count() == s.ship_type().length());
            prop_assert_eq!(board.all_ships_sunk(), expect_all);
        }
        sunk.sort_unstable();
        let mut names: Vec<_> = FLEET.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        prop_assert_eq!(sunk, names);
    }
}
