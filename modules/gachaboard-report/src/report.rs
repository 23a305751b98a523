//! CSV emission of the final leaderboard.

use std::io::Write;

use anyhow::Result;

use gachaboard_common::LeaderboardRow;

const HEADER: [&str; 8] = [
    "user_id",
    "username",
    "rare_count",
    "epic_count",
    "legendary_count",
    "gold_total",
    "special_total",
    "score",
];

/// Write the rows as CSV, header first. The score column renders with one
/// decimal place — the full precision of the tenths representation.
pub fn write_csv<W: Write>(rows: &[LeaderboardRow], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record([
            row.user_id.clone(),
            row.display_name.clone(),
            row.rare_count.to_string(),
            row.epic_count.to_string(),
            row.legendary_count.to_string(),
            row.gold_total.to_string(),
            row.special_total.to_string(),
            format!("{:.1}", row.score),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
