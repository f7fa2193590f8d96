//! Plain-text rendering of match outcomes for terminal display.
//!
//! ## Example
//!
//! ```rust
//! use handball_engine::MatchResult;
//! use handball_cli::formatters::format_result;
//!
//! assert_eq!(format_result(MatchResult::Tie, "Hawks", "Owls"), "Tie");
//! assert_eq!(format_result(MatchResult::AwayWin, "Hawks", "Owls"), "Owls win");
//! ```

use handball_engine::MatchResult;
use handball_engine::report::TeamBox;
use handball_engine::roster::Role;

/// `"Hawks 12 - 9 Owls"`
pub fn format_scoreline(home: &TeamBox, away: &TeamBox) -> String {
    format!("{} {} - {} {}", home.name, home.score, away.score, away.name)
}

pub fn format_result(result: MatchResult, home: &str, away: &str) -> String {
    match result {
        MatchResult::HomeWin => format!("{} win", home),
        MatchResult::AwayWin => format!("{} win", away),
        MatchResult::Tie => "Tie".to_string(),
    }
}

fn role_tag(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Forward) => "F",
        Some(Role::Midfielder) => "M",
        Some(Role::Defense) => "D",
        Some(Role::Goalkeeper) => "GK",
        None => "-",
    }
}

/// One line per player who took a shot, then the team tallies.
pub fn format_box_score(team: &TeamBox) -> Vec<String> {
    let mut lines = vec![format!("{} ({})", team.name, team.score)];
    for p in team.players.iter().filter(|p| p.shots > 0) {
        lines.push(format!(
            "  {:<24} {:<2} {:>2}/{:<2}",
            p.name,
            role_tag(p.role),
            p.goals,
            p.shots
        ));
    }
    let t = &team.tally;
    lines.push(format!(
        "  shots {} | pass TO {} | shot TO {} ({} off target) | recoveries {} | buzzer {}",
        t.shot_attempts,
        t.pass_turnovers,
        t.shot_turnovers,
        t.off_target_turnovers,
        t.offensive_recoveries,
        t.buzzer_beaters
    ));
    lines
}
