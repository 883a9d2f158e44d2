//! The narrative panels shown between levels.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryPanel {
    pub title: &'static str,
    pub caption: &'static str,
}

pub const PANELS: [MemoryPanel; 5] = [
    MemoryPanel {
        title: "Memory 1: The Challenge",
        caption: "Pac-Man accepted the haunted arcade's wager: clear endless mazes and your friends go free.",
    },
    MemoryPanel {
        title: "Memory 2: The Pact",
        caption: "The ghosts were once champions too. Betrayed by the arcade master, they now roam as wardens.",
    },
    MemoryPanel {
        title: "Memory 3: A Broken Promise",
        caption: "Pac-Man almost escaped, but returned when he heard the ghosts' pleas for help.",
    },
    MemoryPanel {
        title: "Memory 4: Hidden Exit",
        caption: "Legends whisper of a door behind the neon maze that opens only when trust outweighs fear.",
    },
    MemoryPanel {
        title: "Memory 5: Ghostly Bonds",
        caption: "Blinky guards the exit, Pinky maps secret routes, Inky listens, Clyde just wants a friend.",
    },
];

/// The panel revealed on reaching `level`. Levels below 1 show the first panel.
pub fn memory_panel(level: u32) -> MemoryPanel {
    match level {
        0 => PANELS[0],
        level => PANELS[(level as usize - 1) % PANELS.len()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panels_cycle() {
        assert_eq!(memory_panel(0), PANELS[0]);
        assert_eq!(memory_panel(1), PANELS[0]);
        assert_eq!(memory_panel(2), PANELS[1]);
        assert_eq!(memory_panel(5), PANELS[4]);
        assert_eq!(memory_panel(6), PANELS[0]);
    }
}
