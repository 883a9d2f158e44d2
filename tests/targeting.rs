use glam::IVec2;
use haunted_arcade::entity::ghost::{AiMode, GhostMode, Mood, Pursuit};
use haunted_arcade::entity::motion::Motion;
use haunted_arcade::entity::targeting::{
    open_options, pursuit_target, steer, target_tile, Brain, GhostView, PlayerView, PursuitContext,
};
use haunted_arcade::map::direction::Direction;
use haunted_arcade::map::Maze;
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use smallvec::smallvec;

mod common;

const SCATTER: IVec2 = IVec2::new(1, 1);

fn brain(pursuit: Pursuit, mode: GhostMode) -> Brain {
    Brain {
        mode,
        frightened: false,
        ai_mode: AiMode::Classic,
        mood: Mood::Wary,
        pursuit,
        scatter_target: SCATTER,
    }
}

fn social(mood: Mood) -> Brain {
    Brain {
        ai_mode: AiMode::Social,
        mood,
        ..brain(Pursuit::Aggressive, GhostMode::Chase)
    }
}

fn ghost_view(tile: IVec2, pursuit: Pursuit, scatter_target: IVec2) -> GhostView {
    GhostView {
        tile,
        scatter_target,
        pursuit,
    }
}

fn context(player_tile: IVec2, heading: Direction) -> PursuitContext {
    PursuitContext {
        player: PlayerView {
            tile: player_tile,
            position: Maze::tile_center(player_tile),
            heading,
        },
        ghosts: smallvec![],
        own_index: None,
        bounds: IVec2::new(27, 30),
    }
}

fn at(tile: IVec2) -> Motion {
    Motion::new(tile, 80.0)
}

#[test]
fn test_aggressive_targets_the_player() {
    let ctx = context(IVec2::new(10, 10), Direction::Left);
    let target = pursuit_target(&brain(Pursuit::Aggressive, GhostMode::Chase), &at(IVec2::new(1, 1)), &ctx);
    assert_eq!(target, IVec2::new(10, 10));
}

#[test]
fn test_ambush_leads_the_player() {
    let ambush = brain(Pursuit::Ambush, GhostMode::Chase);
    let ctx = context(IVec2::new(10, 10), Direction::Right);
    assert_eq!(pursuit_target(&ambush, &at(IVec2::ONE), &ctx), IVec2::new(14, 10));

    // Clamped to the grid near an edge.
    let ctx = context(IVec2::new(26, 10), Direction::Right);
    assert_eq!(pursuit_target(&ambush, &at(IVec2::ONE), &ctx), IVec2::new(27, 10));
    let ctx = context(IVec2::new(5, 2), Direction::Up);
    assert_eq!(pursuit_target(&ambush, &at(IVec2::ONE), &ctx), IVec2::new(5, 0));
}

#[test]
fn test_flanking_mirrors_the_aggressor() {
    let flank = brain(Pursuit::Flanking, GhostMode::Chase);
    let mut ctx = context(IVec2::new(10, 10), Direction::Up);
    ctx.ghosts = smallvec![
        ghost_view(IVec2::new(20, 20), Pursuit::Ambush, SCATTER),
        ghost_view(IVec2::new(6, 8), Pursuit::Aggressive, SCATTER),
    ];
    // Two ahead is (10, 8); mirrored through it from (6, 8).
    assert_eq!(pursuit_target(&flank, &at(IVec2::ONE), &ctx), IVec2::new(14, 8));

    // Without an aggressor the first ghost in the roster is the pivot.
    ctx.ghosts = smallvec![ghost_view(IVec2::new(10, 6), Pursuit::Shy, SCATTER)];
    assert_eq!(pursuit_target(&flank, &at(IVec2::ONE), &ctx), IVec2::new(10, 10));

    // Alone, it pivots on itself.
    ctx.ghosts = smallvec![];
    assert_eq!(pursuit_target(&flank, &at(IVec2::new(10, 8)), &ctx), IVec2::new(10, 8));
}

#[test]
fn test_shy_retreats_within_eight_tiles() {
    let shy = brain(Pursuit::Shy, GhostMode::Chase);

    // Exactly eight tiles away is still too close.
    let ctx = context(IVec2::new(10, 2), Direction::Left);
    assert_eq!(pursuit_target(&shy, &at(IVec2::new(2, 2)), &ctx), SCATTER);

    let ctx = context(IVec2::new(11, 2), Direction::Left);
    assert_eq!(pursuit_target(&shy, &at(IVec2::new(2, 2)), &ctx), IVec2::new(11, 2));
}

#[test]
fn test_classic_modes() {
    let mut rng = SmallRng::seed_from_u64(0);
    let ctx = context(IVec2::new(10, 10), Direction::Left);
    let motion = at(IVec2::new(4, 4));

    let scatter = brain(Pursuit::Aggressive, GhostMode::Scatter);
    assert_eq!(target_tile(&scatter, &motion, &ctx, &mut rng), SCATTER);

    let chase = brain(Pursuit::Aggressive, GhostMode::Chase);
    assert_eq!(target_tile(&chase, &motion, &ctx, &mut rng), IVec2::new(10, 10));

    let frightened = Brain {
        frightened: true,
        ..chase
    };
    assert_eq!(target_tile(&frightened, &motion, &ctx, &mut rng), IVec2::new(4, 4));
}

#[test]
fn test_social_targets_follow_mood() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut ctx = context(IVec2::new(10, 10), Direction::Left);
    ctx.ghosts = smallvec![
        ghost_view(IVec2::new(4, 4), Pursuit::Aggressive, SCATTER),
        ghost_view(IVec2::new(20, 4), Pursuit::Ambush, IVec2::new(26, 1)),
        ghost_view(IVec2::new(20, 20), Pursuit::Shy, IVec2::new(1, 29)),
    ];
    ctx.own_index = Some(0);
    let motion = at(IVec2::new(4, 4));

    assert_eq!(target_tile(&social(Mood::Friendly), &motion, &ctx, &mut rng), SCATTER);
    assert_eq!(target_tile(&social(Mood::Wary), &motion, &ctx, &mut rng), SCATTER);
    assert_eq!(target_tile(&social(Mood::Anxious), &motion, &ctx, &mut rng), SCATTER);
    assert_eq!(target_tile(&social(Mood::Curious), &motion, &ctx, &mut rng), IVec2::new(10, 10));

    // Betrayed ghosts hunt the player even during scatter.
    let betrayed = Brain {
        mode: GhostMode::Scatter,
        ..social(Mood::Betrayed)
    };
    assert_eq!(target_tile(&betrayed, &motion, &ctx, &mut rng), IVec2::new(10, 10));

    for seed in 0..16 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let target = target_tile(&social(Mood::Tricked), &motion, &ctx, &mut rng);
        assert!(
            target == IVec2::new(26, 1) || target == IVec2::new(1, 29),
            "tricked ghost picked its own corner: {target}"
        );
    }
}

#[test]
fn test_tricked_alone_keeps_its_corner() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut ctx = context(IVec2::new(10, 10), Direction::Left);
    ctx.ghosts = smallvec![ghost_view(IVec2::new(4, 4), Pursuit::Aggressive, SCATTER)];
    ctx.own_index = Some(0);

    let target = target_tile(&social(Mood::Tricked), &at(IVec2::new(4, 4)), &ctx, &mut rng);
    assert_eq!(target, SCATTER);
}

const CORRIDOR: [&str; 3] = ["#####", "#...#", "#####"];
const CROSS: [&str; 5] = ["#####", "##.##", "#...#", "##.##", "#####"];

#[test]
fn test_no_reversal_unless_cornered() {
    let maze = Maze::from_layout("corridor", &CORRIDOR).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let ctx = context(IVec2::new(1, 1), Direction::Left);
    let chase = brain(Pursuit::Aggressive, GhostMode::Chase);

    // The player is behind, but turning around is off the table.
    let mut motion = at(IVec2::new(2, 1));
    motion.direction = Some(Direction::Right);
    assert_eq!(open_options(&motion, &maze).as_slice(), &[Direction::Right]);
    steer(&chase, &mut motion, &maze, &ctx, &mut rng);
    assert_eq!(motion.direction, Some(Direction::Right));

    // A dead end forces the reversal.
    let mut motion = at(IVec2::new(3, 1));
    motion.direction = Some(Direction::Right);
    assert!(open_options(&motion, &maze).is_empty());
    steer(&chase, &mut motion, &maze, &ctx, &mut rng);
    assert_eq!(motion.direction, Some(Direction::Left));
    assert_eq!(motion.next_direction, Some(Direction::Left));
}

#[test]
fn test_frightened_wanders_legally() {
    let maze = Maze::from_layout("cross", &CROSS).unwrap();
    let ctx = context(IVec2::new(1, 2), Direction::Left);
    let frightened = Brain {
        frightened: true,
        ..brain(Pursuit::Aggressive, GhostMode::Chase)
    };

    for seed in 0..32 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut motion = at(IVec2::new(2, 2));
        motion.direction = Some(Direction::Right);
        steer(&frightened, &mut motion, &maze, &ctx, &mut rng);

        let choice = motion.direction.unwrap();
        assert_ne!(choice, Direction::Left);
        assert!(motion.can_move(choice, &maze));
    }
}

#[test]
fn test_steer_closes_in_on_target() {
    let maze = Maze::from_layout("cross", &CROSS).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let ctx = context(IVec2::new(2, 3), Direction::Left);

    let mut motion = at(IVec2::new(2, 2));
    steer(&brain(Pursuit::Aggressive, GhostMode::Chase), &mut motion, &maze, &ctx, &mut rng);
    assert_eq!(motion.direction, Some(Direction::Down));
}
