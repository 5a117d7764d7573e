use colored::Colorize;

use crate::lcu::Rarity;

/// Color already laid-out text by rarity tier
pub fn paint_rarity(text: &str, rarity: Rarity) -> String {
    match rarity {
        Rarity::Mythic => text.magenta().to_string(),
        Rarity::Ultimate => text.yellow().to_string(),
        Rarity::Legendary => text.red().to_string(),
        Rarity::Epic => text.cyan().to_string(),
        _ => text.to_string(),
    }
}

/// Format orange essence value
pub fn format_essence(value: i64) -> String {
    format!("{} OE", value)
}

/// Truncate long item names for table display
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Prompt user for yes/no confirmation
pub fn confirm_action(prompt: &str) -> bool {
    use std::io::{self, Write};

    print!("{} (y/N): ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Rule line spanning columns laid out by [`table_row`]
pub fn table_rule(widths: &[usize]) -> String {
    let gaps = 2 * widths.len().saturating_sub(1);
    "=".repeat(widths.iter().sum::<usize>() + gaps)
}

/// Pad each cell to its column width. Cells past the last width are dropped.
pub fn table_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref(), width = width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_names() {
        assert_eq!(truncate("Arcade Sona", 20), "Arcade Sona");
        assert_eq!(truncate("Spirit Blossom Thresh", 10), "Spirit ...");
    }

    #[test]
    fn table_rows_line_up_with_the_rule() {
        let widths = [8, 6, 4];
        let header = table_row(&["Loot ID", "Name", "OE"], &widths);
        let row = table_row(&["SKIN_1", "Ahri", "1350", "extra"], &widths);

        assert_eq!(header, "Loot ID   Name    OE");
        assert_eq!(row, "SKIN_1    Ahri    1350");
        assert_eq!(table_rule(&widths).len(), row.len());
    }
}
