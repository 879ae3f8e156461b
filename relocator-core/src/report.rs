// Report generation from a relocation

use crate::fingerprint::{Field, Fingerprint};
use crate::relocate::Relocation;
use crate::scorer::field_list;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

pub fn render_report(relocation: &Relocation, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(relocation)),
        ReportFormat::Json => generate_json_report(relocation),
    }
}

pub fn generate_text_report(relocation: &Relocation) -> String {
    let mut report = String::new();

    report.push_str(&format!(
        "Original element #{}: {}\n\n",
        relocation.target_id,
        describe(&relocation.original)
    ));

    for candidate in &relocation.candidates {
        report.push_str(&format!(
            "Candidate element #{}: {}\n",
            candidate.index(),
            describe(&candidate.fingerprint)
        ));
        for field in &candidate.matched {
            report.push_str(&format!(
                "  \"{}\" parameter is identical, candidate weight is increased by {}\n",
                field,
                relocation.weights.weight(*field)
            ));
        }
        report.push_str(&format!(
            "  weight: {} (matched: {})\n",
            candidate.weight,
            field_list(&candidate.matched)
        ));
    }

    report.push('\n');
    if relocation.ties > 1 {
        report.push_str(&format!(
            "Note: {} candidates share the biggest weight, picked candidate #{}\n",
            relocation.ties,
            relocation.winner.index()
        ));
    }
    report.push_str(&format!("Biggest element weight: {}\n", relocation.max_weight));
    report.push_str(&format!("Found element: {}\n", relocation.path));

    report
}

pub fn generate_json_report(relocation: &Relocation) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Relocator",
                "version": env!("CARGO_PKG_VERSION"),
                "format": "json"
            },
            "target_id": relocation.target_id,
            "original": relocation.original,
            "weights": relocation.weights,
            "candidates": relocation.candidates,
            "result": {
                "index": relocation.winner.index(),
                "weight": relocation.max_weight,
                "ties": relocation.ties,
                "fingerprint": relocation.winner.fingerprint,
                "path": relocation.path
            }
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

// One-line summary of a fingerprint, absent fields shown as '-'
fn describe(fingerprint: &Fingerprint) -> String {
    [
        Field::Tag,
        Field::Id,
        Field::Class,
        Field::Title,
        Field::Href,
        Field::Content,
    ]
    .iter()
    .map(|field| match fingerprint.get(*field) {
        Some(value) => format!("{}={:?}", field, value),
        None => format!("{}=-", field),
    })
    .collect::<Vec<_>>()
    .join(" ")
}
