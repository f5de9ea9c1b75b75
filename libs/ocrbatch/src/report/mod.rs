use anyhow::Result;
use std::io::Write;

use crate::engine::RecognitionResult;

pub const SEPARATOR: &str = "---------------------------------";

/// Writes one separator plus `Result:` line per recognition result, in
/// order, or a single notice when the engine returned nothing.
pub fn write_results<W: Write>(out: &mut W, results: &[RecognitionResult]) -> std::io::Result<()> {
    if results.is_empty() {
        writeln!(out, "No results returned from OCR processing")?;
        return Ok(());
    }

    for result in results {
        writeln!(out, "{}", SEPARATOR)?;
        writeln!(out, "Result: {}", result.text)?;
    }
    Ok(())
}

/// Machine-readable variant of the report, one JSON array of results.
pub fn write_results_json<W: Write>(out: &mut W, results: &[RecognitionResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn result(text: &str) -> RecognitionResult {
        RecognitionResult::new(Path::new("photo.jpg"), text.to_string())
    }

    #[test]
    fn test_empty_results_notice() {
        let mut out = Vec::new();
        write_results(&mut out, &[]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "No results returned from OCR processing\n"
        );
    }

    #[test]
    fn test_one_line_per_result_in_order() {
        let mut out = Vec::new();
        write_results(&mut out, &[result("Hello World"), result("second page")]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            format!(
                "{sep}\nResult: Hello World\n{sep}\nResult: second page\n",
                sep = SEPARATOR
            )
        );
    }

    #[test]
    fn test_json_report_is_parseable() {
        let mut out = Vec::new();
        write_results_json(&mut out, &[result("Hello World")]).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["text"], "Hello World");
    }
}
