//! Encoding summary for the console

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{EncodedDataset, FeatureGroup};

/// Shape and column-role counts of one encoding run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EncodingSummary {
    pub original_rows: usize,
    pub original_columns: usize,
    pub processed_rows: usize,
    pub processed_columns: usize,
    pub numeric_columns: usize,
    pub binary_columns: usize,
    pub one_hot_blocks: usize,
    pub one_hot_columns: usize,
    pub passthrough_columns: usize,
    pub elided: Vec<String>,
}

impl EncodingSummary {
    pub fn from_dataset(original_shape: (usize, usize), dataset: &EncodedDataset) -> Self {
        let matrix = &dataset.matrix;
        Self {
            original_rows: original_shape.0,
            original_columns: original_shape.1,
            processed_rows: matrix.height(),
            processed_columns: matrix.width(),
            numeric_columns: matrix.group_width(FeatureGroup::Numeric),
            binary_columns: matrix.group_width(FeatureGroup::Binary),
            one_hot_blocks: dataset.encoder.categorical().one_hot_blocks(),
            one_hot_columns: matrix.group_width(FeatureGroup::OneHot),
            passthrough_columns: matrix.group_width(FeatureGroup::Passthrough),
            elided: dataset.encoder.categorical().elided_columns(),
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("ENCODING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Original shape"),
            Cell::new(format!("{} × {}", self.original_rows, self.original_columns)),
        ]);
        table.add_row(vec![
            Cell::new("🔢 Scaled numeric"),
            Cell::new(self.numeric_columns),
        ]);
        table.add_row(vec![
            Cell::new("⚖️  Binary mapped"),
            Cell::new(self.binary_columns),
        ]);
        table.add_row(vec![
            Cell::new("🧩 One-hot"),
            Cell::new(format!(
                "{} column(s) from {} block(s)",
                self.one_hot_columns, self.one_hot_blocks
            )),
        ]);
        if self.passthrough_columns > 0 {
            table.add_row(vec![
                Cell::new("➡️  Passthrough"),
                Cell::new(self.passthrough_columns),
            ]);
        }
        table.add_row(vec![
            Cell::new("🗑️  Elided (single value)"),
            Cell::new(self.elided.len()).fg(if self.elided.is_empty() {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("✅ Processed shape"),
            Cell::new(format!("{} × {}", self.processed_rows, self.processed_columns))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.elided.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Elided columns").yellow(),
                style(format!("({})", self.elided.len())).dim()
            );
            for column in &self.elided {
                println!("        {} {}", style("•").dim(), column);
            }
        }
    }
}
