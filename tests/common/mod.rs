//! Shared fixtures: a small synthetic draft history written as CSV

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "year,overall_pick,position,nationality,age,to_year,games_played,goals,\
assists,points,plus_minus,goalie_games_played,goalie_wins,goalie_losses,goalie_ties_overtime,\
save_percentage,goals_against_average";

pub const POSITIONS: [&str; 5] = ["C", "LW", "RW", "D", "G"];
pub const NATIONALITIES: [&str; 2] = ["CAN", "USA"];

/// One row per (year, position, nationality); earlier picks have longer careers
pub fn draft_csv(first_year: i64, last_year: i64) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');

    let mut pick = 0i64;
    for year in first_year..=last_year {
        for position in POSITIONS {
            for nationality in NATIONALITIES {
                pick = pick % 210 + 7;
                let age = 18.0 + (pick % 3) as f64 * 0.5;
                let games = (1200 - pick * 5).max(0) as f64;

                if position == "G" {
                    let wins = games * 0.45;
                    csv.push_str(&format!(
                        "{year},{pick},{position},{nationality},{age},{to},{games},0,0,0,0,\
                         {games},{wins},{losses},{ot},0.91{d},2.{d}5\n",
                        to = year + 12,
                        losses = games * 0.4,
                        ot = games * 0.15,
                        d = pick % 10,
                    ));
                } else {
                    let goals = games * 0.25;
                    let assists = games * 0.35;
                    csv.push_str(&format!(
                        "{year},{pick},{position},{nationality},{age},{to},{games},{goals},\
                         {assists},{points},{pm},,,,,,\n",
                        to = year + 10,
                        points = goals + assists,
                        pm = 20 - pick % 40,
                    ));
                }
            }
        }
    }

    csv
}

pub fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// History spanning the default year cutoff
pub fn draft_file() -> NamedTempFile {
    write_csv(&draft_csv(2005, 2019))
}
