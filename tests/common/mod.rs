#![allow(dead_code)]

use glam::IVec2;
use haunted_arcade::entity::Actor;
use haunted_arcade::events::{EventKind, GameEvent};
use haunted_arcade::game::Game;
use haunted_arcade::map::layouts::MazeVariant;
use haunted_arcade::settings::GameConfig;
use haunted_arcade::theme::{EnemyConfig, EnemyType, PlayerConfig, ThemeConfig};

/// A small maze with a row of sealed one-tile pens along the bottom. Ghosts spawned
/// in a pen never move, so tests decide exactly when and where contact happens.
pub const ARENA: MazeVariant = MazeVariant {
    name: "arena",
    layout: &[
        "###########",
        "#o.......o#",
        "#.#######.#",
        "#....f....#",
        "#.#######.#",
        "#.........#",
        "###########",
        "# # # # # #",
        "###########",
    ],
};

pub const ARENA_ALT: MazeVariant = MazeVariant {
    name: "arena-alt",
    layout: &[
        "###########",
        "#o.......o#",
        "#.###.###.#",
        "#....f....#",
        "#.###.###.#",
        "#.........#",
        "###########",
        "# # # # # #",
        "###########",
    ],
};

/// Row 3 wraps around.
pub const TUNNEL: MazeVariant = MazeVariant {
    name: "tunnel",
    layout: &[
        "#######",
        "#.....#",
        "#.###.#",
        "  ...  ",
        "#.###.#",
        "#.....#",
        "#######",
        "# # # #",
        "#######",
    ],
};

pub const ARENA_PELLETS: usize = 31;
pub const PLAYER_START: IVec2 = IVec2::new(5, 5);
pub const POWER_LEFT: IVec2 = IVec2::new(1, 1);
pub const POWER_RIGHT: IVec2 = IVec2::new(9, 1);
pub const FRUIT_TILE: IVec2 = IVec2::new(5, 3);

/// The sealed pens in [`ARENA`], left to right.
pub const PENS: [IVec2; 5] = [
    IVec2::new(1, 7),
    IVec2::new(3, 7),
    IVec2::new(5, 7),
    IVec2::new(7, 7),
    IVec2::new(9, 7),
];

pub fn penned_ghost(name: &str, pen: IVec2) -> EnemyConfig {
    EnemyConfig {
        kind: EnemyType::Ghost,
        name: Some(name.to_string()),
        spawn: Some(pen),
        scatter_target: Some(IVec2::new(1, 1)),
        ..EnemyConfig::default()
    }
}

/// The classic four, each locked in a pen, with Pac-Man on a pellet in the middle.
pub fn penned_theme() -> ThemeConfig {
    ThemeConfig {
        id: "penned".to_string(),
        player: PlayerConfig {
            spawn: Some(PLAYER_START),
            ..PlayerConfig::default()
        },
        enemies: ["blinky", "pinky", "inky", "clyde"]
            .iter()
            .zip(PENS)
            .map(|(name, pen)| penned_ghost(name, pen))
            .collect(),
    }
}

/// Five penned ghosts, enough to saturate the capture combo.
pub fn five_ghost_theme() -> ThemeConfig {
    ThemeConfig {
        id: "five".to_string(),
        enemies: ["blinky", "pinky", "inky", "clyde", "sue"]
            .iter()
            .zip(PENS)
            .map(|(name, pen)| penned_ghost(name, pen))
            .collect(),
        ..penned_theme()
    }
}

pub fn arena_config() -> GameConfig {
    GameConfig {
        high_score: 0,
        power_ups_enabled: true,
        theme: penned_theme(),
        seed: Some(7),
        mazes: vec![ARENA, ARENA_ALT],
        ..GameConfig::default()
    }
}

pub fn arena_game() -> Game {
    Game::new(arena_config()).expect("arena config is valid")
}

pub fn game_with(config: GameConfig) -> Game {
    Game::new(config).expect("config is valid")
}

/// Puts the player on the center of `tile`, stopped.
pub fn place_player(game: &mut Game, tile: IVec2) {
    let motion = game.player_mut().motion_mut();
    motion.place(tile);
    motion.direction = None;
    motion.next_direction = None;
}

/// Drops ghost `index` right on top of the player.
pub fn place_ghost_on_player(game: &mut Game, index: usize) {
    let tile = game.player().tile();
    game.ghosts_mut()[index].motion_mut().place(tile);
}

/// Eats every pellet except those on `keep`, bypassing scoring.
pub fn strip_pellets(game: &mut Game, keep: &[IVec2]) {
    let maze = game.maze_mut();
    let tiles: Vec<IVec2> = maze
        .pellet_tiles()
        .chain(maze.power_pellet_tiles())
        .filter(|tile| !keep.contains(tile))
        .collect();
    for tile in tiles {
        maze.consume(tile);
    }
}

pub fn count(game: &Game, kind: EventKind) -> usize {
    game.events().history_of(kind).count()
}

pub fn last(game: &Game, kind: EventKind) -> Option<GameEvent> {
    game.events().last(kind).cloned()
}
