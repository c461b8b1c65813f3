//! Console tables for projections and reference options

use crate::projection::{GoalieLine, SkaterLine, StatLine};
use crate::reference::{country_name, COUNTRY_CODES, POSITION_CODES};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ColumnConstraint, Table, Width};
use std::collections::BTreeMap;

pub const SKATER_HEADERS: [&str; 5] = ["Games Played", "Goals", "Assists", "Points", "Plus Minus"];

pub const GOALIE_HEADERS: [&str; 6] = [
    "Goalie Games Played",
    "Goalie Wins",
    "Goalie Losses",
    "Goalie Ties Overtime",
    "Save Percentage",
    "Goals Against Average",
];

fn header(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Magenta)
        .add_attribute(Attribute::Bold)
}

/// Table with bold magenta headers and a dimmed first column of at least `first_width`
fn styled_table(headers: &[&str], first_width: u16) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(headers.iter().map(|h| header(h)).collect::<Vec<_>>());
    if let Some(column) = table.column_mut(0) {
        column.set_constraint(ColumnConstraint::LowerBoundary(Width::Fixed(first_width)));
    }
    table
}

fn dim(text: impl ToString) -> Cell {
    Cell::new(text).add_attribute(Attribute::Dim)
}

fn stat(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn skater_table(line: &SkaterLine) -> Table {
    let mut table = styled_table(&SKATER_HEADERS, 15);
    table.add_row(vec![
        dim(stat(line.games_played)),
        Cell::new(stat(line.goals)),
        Cell::new(stat(line.assists)),
        Cell::new(stat(line.points)),
        Cell::new(stat(line.plus_minus)),
    ]);
    table
}

pub fn goalie_table(line: &GoalieLine) -> Table {
    let mut table = styled_table(&GOALIE_HEADERS, 15);
    table.add_row(vec![
        dim(stat(line.games_played)),
        Cell::new(stat(line.wins)),
        Cell::new(stat(line.losses)),
        Cell::new(stat(line.ties_overtime)),
        Cell::new(format!("{:.3}", line.save_percentage)),
        Cell::new(stat(line.goals_against_average)),
    ]);
    table
}

/// Goalie or skater table, whichever the stat line holds
pub fn stat_line_table(line: &StatLine) -> Table {
    match line {
        StatLine::Skater(skater) => skater_table(skater),
        StatLine::Goalie(goalie) => goalie_table(goalie),
    }
}

pub fn nationality_options_table() -> Table {
    let mut table = styled_table(&["Country Code", "Country"], 12);
    for (code, country) in COUNTRY_CODES {
        table.add_row(vec![dim(code), Cell::new(country)]);
    }
    table
}

pub fn position_options_table() -> Table {
    let mut table = styled_table(&["Position Options"], 12);
    for position in POSITION_CODES {
        table.add_row(vec![dim(position)]);
    }
    table
}

/// Drafted players per nationality code, with the country name when known
pub fn nationality_counts_table(counts: &BTreeMap<String, usize>) -> Table {
    let mut table = styled_table(&["Country Code", "Country", "Drafted"], 12);
    for (code, count) in counts {
        table.add_row(vec![
            dim(code),
            Cell::new(country_name(code).unwrap_or("-")),
            Cell::new(count),
        ]);
    }
    table
}

/// The `limit` most important features, in the order given
pub fn importance_table(ranked: &[(String, f64)], limit: usize) -> Table {
    let mut table = styled_table(&["Feature", "Importance"], 15);
    for (name, importance) in ranked.iter().take(limit) {
        table.add_row(vec![dim(name), Cell::new(format!("{:.3}", importance))]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skater_table() {
        let line = SkaterLine {
            games_played: 812.456,
            goals: 201.0,
            assists: 310.5,
            points: 511.5,
            plus_minus: -4.25,
        };
        let rendered = skater_table(&line).to_string();

        for label in SKATER_HEADERS {
            assert!(rendered.contains(label), "missing {label}");
        }
        assert!(rendered.contains("812.46"));
        assert!(rendered.contains("-4.25"));
        assert!(!rendered.contains("Goalie"));
    }

    #[test]
    fn test_goalie_table() {
        let line = GoalieLine {
            games_played: 300.0,
            wins: 150.0,
            losses: 110.0,
            ties_overtime: 30.0,
            save_percentage: 0.9123,
            goals_against_average: 2.71,
        };
        let rendered = stat_line_table(&StatLine::Goalie(line)).to_string();

        for label in GOALIE_HEADERS {
            assert!(rendered.contains(label), "missing {label}");
        }
        assert!(rendered.contains("0.912"));
        assert!(rendered.contains("2.71"));
    }

    #[test]
    fn test_option_tables() {
        let positions = position_options_table().to_string();
        for code in POSITION_CODES {
            assert!(positions.contains(code));
        }

        let countries = nationality_options_table().to_string();
        assert!(countries.contains("Country Code"));
        assert!(countries.contains("Canada"));
        assert!(countries.contains("USA"));
    }

    #[test]
    fn test_nationality_counts_table() {
        let counts = BTreeMap::from([("CAN".to_string(), 40), ("ZZZ".to_string(), 2)]);
        let rendered = nationality_counts_table(&counts).to_string();

        assert!(rendered.contains("Canada"));
        assert!(rendered.contains("40"));
        assert!(rendered.contains("ZZZ"));
    }

    #[test]
    fn test_importance_table_limit() {
        let ranked = vec![
            ("overall_pick".to_string(), 0.61),
            ("age".to_string(), 0.2341),
            ("position_G".to_string(), 0.1),
        ];
        let rendered = importance_table(&ranked, 2).to_string();

        assert!(rendered.contains("overall_pick"));
        assert!(rendered.contains("0.234"));
        assert!(!rendered.contains("position_G"));
    }
}
