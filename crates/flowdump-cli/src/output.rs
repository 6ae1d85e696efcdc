//! Stdout rendering

use flowdump_core::FlowRecord;
use std::io::Write;

/// Print records as a pretty JSON array; `[]` when there are none
pub fn print_records(records: &[FlowRecord]) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = serde_json::to_string_pretty(records)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rendered)?;
    Ok(())
}
