use std::path::Path;

use resextract::{Collection, ExtractionReport, ExtractorConfig, LocaleFailure, WrittenFile};
use serde_json::{Value, json};

pub fn print_report(report: &ExtractionReport) {
    for file in &report.written {
        println!("✅ {} ({} entries)", file.path.display(), file.entries);
    }
    for failure in report.skipped.iter().chain(&report.write_failures) {
        println!("⚠️  {}: {}", failure.locale, failure.message);
    }
    println!(
        "Written: {}, skipped: {}, write failures: {}",
        report.written.len(),
        report.skipped.len(),
        report.write_failures.len()
    );
}

pub fn print_plan(config: &ExtractorConfig, collection: &Collection) {
    for bundle in collection.result.iter() {
        println!(
            "{} ({} entries)",
            config.target_path(bundle.locale()).display(),
            bundle.len()
        );
        for (name, value) in bundle.iter() {
            println!("  {} = {}", name, value);
        }
    }
    for failure in &collection.skipped {
        println!("⚠️  {}: {}", failure.locale, failure.message);
    }
    println!("Dry-run mode: no files were written");
}

// Paths go out as lossy strings; serde refuses a `Path` that is not UTF-8.
fn path_json(path: &Path) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}

fn written_json(file: &WrittenFile) -> Value {
    json!({
        "locale": file.locale,
        "path": path_json(&file.path),
        "entries": file.entries
    })
}

fn failure_json(failure: &LocaleFailure) -> Value {
    json!({
        "kind": failure.kind,
        "locale": failure.locale,
        "path": path_json(&failure.path),
        "message": failure.message
    })
}

pub fn report_json(config: &ExtractorConfig, report: &ExtractionReport) -> Value {
    json!({
        "input": path_json(config.input_root()),
        "output": path_json(config.output_root()),
        "dry_run": false,
        "summary": {
            "written": report.written.len(),
            "skipped": report.skipped.len(),
            "write_failures": report.write_failures.len()
        },
        "written": report.written.iter().map(written_json).collect::<Vec<_>>(),
        "skipped": report.skipped.iter().map(failure_json).collect::<Vec<_>>(),
        "write_failures": report.write_failures.iter().map(failure_json).collect::<Vec<_>>()
    })
}

pub fn plan_json(config: &ExtractorConfig, collection: &Collection) -> Value {
    let planned: Vec<Value> = collection
        .result
        .iter()
        .map(|bundle| {
            json!({
                "locale": bundle.locale(),
                "path": path_json(&config.target_path(bundle.locale())),
                "entries": bundle.len()
            })
        })
        .collect();
    json!({
        "input": path_json(config.input_root()),
        "output": path_json(config.output_root()),
        "dry_run": true,
        "summary": {
            "planned": planned.len(),
            "skipped": collection.skipped.len()
        },
        "planned": planned,
        "skipped": collection.skipped.iter().map(failure_json).collect::<Vec<_>>()
    })
}

pub fn write_json(path: &Path, payload: &Value) -> Result<(), String> {
    let text = serde_json::to_string_pretty(payload)
        .map_err(|e| format!("Failed to serialize report JSON: {}", e))?;
    std::fs::write(path, text)
        .map_err(|e| format!("Failed to write report JSON '{}': {}", path.display(), e))
}
