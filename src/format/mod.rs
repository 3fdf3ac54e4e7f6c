//! Output formatting for the price report (table, JSON, markdown, CSV).

use crate::analysis::PriceReport;
use crate::config::OutputFormat;

/// Formats a price report for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the report in the configured format.
    pub fn format_report(&self, report: &PriceReport) -> String {
        match self.format {
            OutputFormat::Table => self.table_report(report),
            OutputFormat::Json => self.json_report(report),
            OutputFormat::Markdown => self.markdown_report(report),
            OutputFormat::Csv => self.csv_report(report),
        }
    }

    fn json_report(&self, report: &PriceReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn table_report(&self, report: &PriceReport) -> String {
        let mut lines = Vec::new();

        lines.push("=== PRICE ANALYSIS ===".to_string());
        lines.push(format!("Product: {}", report.product));
        lines.push(format!("Valid prices found: {}", report.count));
        lines.push(format!("Average price: ${}", report.average));
        lines.push(format!("Median price: ${}", report.median));
        lines.push(format!("Price range: ${} - ${}", report.min, report.max));
        lines.push("======================".to_string());

        lines.join("\n")
    }

    fn markdown_report(&self, report: &PriceReport) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", report.product));
        lines.push(String::new());
        lines.push(format!("- **Valid prices:** {}", report.count));
        lines.push(format!("- **Average:** ${:.2}", report.average));
        lines.push(format!("- **Median:** ${:.2}", report.median));
        lines.push(format!("- **Range:** ${:.2} - ${:.2}", report.min, report.max));

        lines.join("\n")
    }

    fn csv_report(&self, report: &PriceReport) -> String {
        let mut lines = Vec::new();

        lines.push("product,count,average,median,min,max".to_string());
        lines.push(format!(
            "\"{}\",{},{},{},{},{}",
            report.product.replace('"', "\"\""),
            report.count,
            report.average,
            report.median,
            report.min,
            report.max
        ));

        lines.join("\n")
    }
}
