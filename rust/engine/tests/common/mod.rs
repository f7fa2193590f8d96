#![allow(dead_code)]

use handball_engine::roster::{Lineup, Player, Roster};

/// Three forwards, three midfielders, three defense and a keeper.
pub fn lineup(prefix: &str, count: usize, offense: f64, defense: f64, variance: f64) -> Lineup {
    let make = |pos: &str| -> Vec<Player> {
        (1..=count)
            .map(|i| Player::new(format!("{prefix} {pos}{i}"), offense, defense, variance))
            .collect()
    };
    Lineup {
        forwards: make("F"),
        midfielders: make("M"),
        defense: make("D"),
        goalkeeper: Some(Player::keeper(format!("{prefix} GK"), 0.5, variance)),
    }
}

/// A full roster: 3/3/3/1 starters and 2/2/2/1 bench, every outfield
/// player sharing the same ratings.
pub fn roster(name: &str, offense: f64, defense: f64, variance: f64) -> Roster {
    Roster::new(
        name,
        lineup(&format!("{name} S"), 3, offense, defense, variance),
        lineup(&format!("{name} B"), 2, offense, defense, variance),
    )
}

pub fn roster_with_reserves(name: &str, offense: f64, defense: f64, reserves: usize) -> Roster {
    let extra = (1..=reserves)
        .map(|i| Player::new(format!("{name} R{i}"), offense, defense, 0.0))
        .collect();
    roster(name, offense, defense, 0.0).with_reserves(extra)
}
