//! Dashboard tiles

use crate::models::Stats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub label: &'static str,
    pub value: i64,
    /// Drawn in the alert colour
    pub highlight: bool,
}

pub fn tiles(stats: &Stats) -> Vec<Tile> {
    vec![
        Tile {
            label: "Titles",
            value: stats.items.total,
            highlight: false,
        },
        Tile {
            label: "Acquisitions",
            value: stats.items.acquisitions,
            highlight: false,
        },
        Tile {
            label: "Members",
            value: stats.users.total,
            highlight: false,
        },
        Tile {
            label: "Borrowers",
            value: stats.users.active,
            highlight: false,
        },
        Tile {
            label: "Active loans",
            value: stats.loans.active,
            highlight: false,
        },
        Tile {
            label: "Overdue loans",
            value: stats.loans.overdue,
            highlight: stats.loans.overdue > 0,
        },
        Tile {
            label: "Returned today",
            value: stats.loans.returned_today,
            highlight: false,
        },
    ]
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.highlight { " !" } else { "" };
        write!(f, "{:<14} {:>6}{}", self.label, self.value, marker)
    }
}
