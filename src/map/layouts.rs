//! The built-in maze variants, rotated through as levels advance.
//!
//! `#` is a wall, `.` a pellet, `o` a power pellet, `f` a pellet marking the
//! fruit tile and a space is open floor. Rows containing a double space wrap.

/// A named static layout.
#[derive(Debug, Clone, Copy)]
pub struct MazeVariant {
    pub name: &'static str,
    pub layout: &'static [&'static str],
}

pub const CLASSIC: MazeVariant = MazeVariant {
    name: "classic",
    layout: &[
        "############################",
        "#............##............#",
        "#.####.#####.##.#####.####.#",
        "#o####.#####.##.#####.####o#",
        "#.####.#####.##.#####.####.#",
        "#..........................#",
        "#.####.##.########.##.####.#",
        "#.####.##.########.##.####.#",
        "#......##....##....##......#",
        "######.##### ## #####.######",
        "     #.##### ## #####.#     ",
        "     #.##          ##.#     ",
        "     #.## ######## ##.#     ",
        "######.## ######## ##.######",
        "      .   ########   .      ",
        "######.## ######## ##.######",
        "     #.## ######## ##.#     ",
        "     #.##    f     ##.#     ",
        "     #.## ######## ##.#     ",
        "######.## ######## ##.######",
        "#............##............#",
        "#.####.#####.##.#####.####.#",
        "#.####.#####.##.#####.####.#",
        "#o..##.......  .......##..o#",
        "###.##.##.########.##.##.###",
        "###.##.##.########.##.##.###",
        "#......##....##....##......#",
        "#.##########.##.##########.#",
        "#.##########.##.##########.#",
        "#..........................#",
        "############################",
    ],
};

pub const CROSSROADS: MazeVariant = MazeVariant {
    name: "crossroads",
    layout: &[
        "############################",
        "#............##............#",
        "#.####.#####.##.#####.####.#",
        "#o####.#####.##.#####.####o#",
        "#.####.#####.##.#####.####.#",
        "#..........................#",
        "#.####.##.###..###.##.####.#",
        "#.####.##.###..###.##.####.#",
        "#......##..........##......#",
        "######.##### ## #####.######",
        "     #.##### ## #####.#     ",
        "     #.##          ##.#     ",
        "     #.## ######## ##.#     ",
        "######.## ######## ##.######",
        "      .   ########   .      ",
        "######.## ######## ##.######",
        "     #.## ######## ##.#     ",
        "     #.##     f    ##.#     ",
        "     #.## ######## ##.#     ",
        "######.## ######## ##.######",
        "#..........................#",
        "#.####.#####.##.#####.####.#",
        "#.####.#####.##.#####.####.#",
        "#...##.......  .......##...#",
        "###.##.##.########.##.##.###",
        "###.##.##.########.##.##.###",
        "#......##..........##......#",
        "#.##########....##########.#",
        "#.##########....##########.#",
        "#o........................o#",
        "############################",
    ],
};

pub const HAUNTED: MazeVariant = MazeVariant {
    name: "haunted",
    layout: &[
        "############################",
        "#..........................#",
        "#.####.#####.##.#####.####.#",
        "#o####.#####.##.#####.####o#",
        "#.####.#####.##.#####.####.#",
        "#..........................#",
        "#.####.##.########.##.####.#",
        "#.####.##.########.##.####.#",
        "#......##....##....##......#",
        "######.##### ## #####.######",
        "     #.##### ## #####.#     ",
        "     #.##          ##.#     ",
        "     #.## ######## ##.#     ",
        "######.## ######## ##.######",
        "      .   ########   .      ",
        "######.## ######## ##.######",
        "     #.## ######## ##.#     ",
        "     #.##    f     ##.#     ",
        "     #.## ######## ##.#     ",
        "######.## ######## ##.######",
        "#o...........##...........o#",
        "#.####.#####.##.#####.####.#",
        "#.####.#####.##.#####.####.#",
        "#...##.......  .......##...#",
        "###.##.##.########.##.##.###",
        "###.##.##.########.##.##.###",
        "#......##....##....##......#",
        "#.##########.##.##########.#",
        "#.##########.##.##########.#",
        "#..........................#",
        "############################",
    ],
};

/// Variants in level order. Level `n` uses `MAZE_VARIANTS[(n - 1) % len]`.
pub const MAZE_VARIANTS: [MazeVariant; 3] = [CLASSIC, CROSSROADS, HAUNTED];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_dimensions() {
        for variant in MAZE_VARIANTS {
            assert_eq!(variant.layout.len(), 31, "{}", variant.name);
            for row in variant.layout {
                assert_eq!(row.len(), 28, "{}: {row:?}", variant.name);
            }
        }
    }

    #[test]
    fn test_variant_boundaries() {
        for variant in MAZE_VARIANTS {
            assert!(variant.layout[0].chars().all(|c| c == '#'));
            assert!(variant.layout[30].chars().all(|c| c == '#'));
        }
    }

    #[test]
    fn test_variant_power_pellets() {
        let counts: Vec<usize> = MAZE_VARIANTS
            .iter()
            .map(|variant| variant.layout.iter().map(|row| row.matches('o').count()).sum())
            .collect();
        assert_eq!(counts, vec![4, 4, 4]);
    }

    #[test]
    fn test_variant_names_unique() {
        assert_ne!(MAZE_VARIANTS[0].name, MAZE_VARIANTS[1].name);
        assert_ne!(MAZE_VARIANTS[1].name, MAZE_VARIANTS[2].name);
    }
}
