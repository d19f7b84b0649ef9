//! Terminal rendering for markdown output.
//!
//! Rich mode styles headers and inline markup with termimad and lays out
//! outline tables as aligned columns. Plain mode prints the markdown as is.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));
        skin.table.set_fg(Color::AnsiValue(244));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for block in split_tables(markdown) {
            match block {
                Block::Table(rows) => self.skin.print_text(&rows),
                Block::Line(line) if line.starts_with('#') => {
                    // Keep the hashes visible so heading levels stay readable
                    println!("\x1b[34m{line}\x1b[0m");
                }
                Block::Line(line) => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[derive(Debug, PartialEq)]
enum Block<'a> {
    Line(&'a str),
    Table(String),
}

/// Groups consecutive `|` rows so termimad can size the table columns.
fn split_tables(markdown: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut table = String::new();

    for line in markdown.lines() {
        if line.starts_with('|') {
            table.push_str(line);
            table.push('\n');
            continue;
        }
        if !table.is_empty() {
            blocks.push(Block::Table(std::mem::take(&mut table)));
        }
        blocks.push(Block::Line(line));
    }
    if !table.is_empty() {
        blocks.push(Block::Table(table));
    }
    blocks
}
