//! Terminal table sink: tabled for layout, owo-colors for the diff tones.

use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use azrh_core::{Cell, TableSink, Tone};

/// Renders tables to stdout. Cells toned `Alert` (differs from the chosen
/// version) print red, `Changed` (differs between compared releases) print
/// green, matching what operators scan for in each flow.
pub struct TerminalTable;

impl TerminalTable {
    pub fn new() -> Self {
        Self
    }
}

fn paint(cell: &Cell) -> String {
    match cell.tone {
        Tone::Plain => cell.text.clone(),
        Tone::Changed => cell.text.green().to_string(),
        Tone::Alert => cell.text.red().to_string(),
    }
}

impl TableSink for TerminalTable {
    fn table(&mut self, header: &[&str], rows: Vec<Vec<Cell>>) {
        let mut builder = Builder::default();
        builder.push_record(header.iter().copied());
        for row in &rows {
            builder.push_record(row.iter().map(paint));
        }

        let mut table = builder.build();
        table.with(Style::blank());
        println!("{table}");
    }
}
