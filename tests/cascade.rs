use sandfall_lib::model::config::GridConfig;
use sandfall_lib::model::grid::CellLocation;
use sandfall_lib::model::sandpile::{Avalanche, GrainDrop, RunSession, Sandpile};

fn config(width: u32, height: u32, max_cell_height: u32) -> GridConfig {
    GridConfig {
        width,
        height,
        max_cell_height,
    }
}

fn session(x: u32, y: u32, count: u32, iterations: u32) -> RunSession {
    RunSession {
        iterations,
        drops: vec![GrainDrop {
            location: CellLocation::new(x, y),
            count,
        }],
    }
}

#[test]
fn test_interior_cascades_conserve_grains() {
    // Thirty single grains on the centre of a 21x21 grid never push a
    // cascade anywhere near the boundary, so nothing is lost.
    let mut pile = Sandpile::new();
    pile.setup(&config(21, 21, 3)).unwrap();
    pile.run(&session(10, 10, 1, 30)).unwrap();
    assert_eq!(pile.grid().unwrap().total_grains(), 30);
}

#[test]
fn test_edge_topple_loses_exactly_the_offgrid_share() {
    // Four grains on the west edge: the toppled cell owes one grain per
    // neighbour, and the missing west neighbour swallows its share.
    let mut pile = Sandpile::new();
    pile.setup(&config(3, 3, 3)).unwrap();
    pile.run(&session(0, 1, 4, 1)).unwrap();

    let grid = pile.grid().unwrap();
    assert_eq!(grid.total_grains(), 3);
    assert_eq!(
        pile.avalanches(),
        &[Avalanche {
            turn: 0,
            size: 3,
            time: 1,
        }]
    );
}

#[test]
fn test_grid_is_stable_after_every_run() {
    let mut pile = Sandpile::new();
    pile.setup(&config(9, 9, 3)).unwrap();
    pile.run(&session(4, 4, 3, 300)).unwrap();

    let grid = pile.grid().unwrap();
    assert!(grid
        .cells()
        .iter()
        .all(|&height| u32::from(height) <= grid.max_cell_height()));
}

#[test]
fn test_avalanche_history_matches_known_sequence() {
    // One grain per turn on an 11x11 grid: the centre topples on turns 3,
    // 7 and 11, and turn 15 starts the first multi-cell cascade.
    let mut pile = Sandpile::new();
    pile.setup(&config(11, 11, 3)).unwrap();
    pile.run(&session(5, 5, 1, 16)).unwrap();
    assert_eq!(
        pile.avalanches(),
        &[
            Avalanche {
                turn: 3,
                size: 4,
                time: 1,
            },
            Avalanche {
                turn: 7,
                size: 4,
                time: 1,
            },
            Avalanche {
                turn: 11,
                size: 4,
                time: 1,
            },
            Avalanche {
                turn: 15,
                size: 24,
                time: 6,
            },
        ]
    );
}

#[test]
fn test_history_grows_monotonically_across_runs() {
    let mut pile = Sandpile::new();
    pile.setup(&config(11, 11, 3)).unwrap();
    let work = session(5, 5, 1, 10);

    let mut previous = 0;
    for _ in 0..3 {
        pile.run(&work).unwrap();
        let current = pile.avalanches().len();
        assert!(current >= previous);
        assert!(current - previous <= 10);
        previous = current;
    }
}

#[test]
fn test_single_cell_grid_loses_every_topple() {
    // A 1x1 grid has no neighbours: the cell topples into the void and no
    // overspill is ever processed, so no avalanche is recorded either.
    let mut pile = Sandpile::new();
    pile.setup(&config(1, 1, 3)).unwrap();
    pile.run(&session(0, 0, 5, 1)).unwrap();

    assert_eq!(pile.grid().unwrap().total_grains(), 0);
    assert!(pile.avalanches().is_empty());
}

#[test]
fn test_two_cell_grid_keeps_only_the_east_share() {
    let mut pile = Sandpile::new();
    pile.setup(&config(2, 1, 3)).unwrap();
    pile.run(&session(0, 0, 4, 1)).unwrap();

    let grid = pile.grid().unwrap();
    assert_eq!(grid.cells(), &[0, 1]);
    assert_eq!(
        pile.avalanches(),
        &[Avalanche {
            turn: 0,
            size: 1,
            time: 1,
        }]
    );
}

#[test]
fn test_zero_iteration_session_is_a_no_op() {
    let mut pile = Sandpile::new();
    pile.setup(&config(5, 5, 3)).unwrap();
    pile.run(&session(2, 2, 4, 0)).unwrap();
    assert_eq!(pile.grid().unwrap().total_grains(), 0);
    assert!(pile.avalanches().is_empty());
}

#[test]
fn test_zero_threshold_topples_on_every_increment() {
    // With threshold 0 a cell topples the moment it holds anything. On a
    // single-cell grid the grain falls straight off.
    let mut pile = Sandpile::new();
    pile.setup(&config(1, 1, 0)).unwrap();
    pile.run(&session(0, 0, 1, 5)).unwrap();
    assert_eq!(pile.grid().unwrap().total_grains(), 0);
}
