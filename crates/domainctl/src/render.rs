//! Output rendering for the domainctl CLI.

use domain_core::Registry;
use domainctl::DomainFailure;
use serde_json::Value;

/// Print domains and their skills in tabular format.
pub fn print_domain_list(registry: &Registry) {
    if registry.is_empty() {
        println!("No domains found.");
        return;
    }

    println!(
        "{:<20}  {:<20}  {:<24}  {:<20}  {:<8}",
        "DOMAIN", "DIRECTORY", "SKILL", "ALIAS", "BRIDGE"
    );
    println!("{}", "-".repeat(100));

    for (name, domain) in registry {
        if domain.skills.is_empty() {
            println!(
                "{:<20}  {:<20}  {:<24}  {:<20}  {:<8}",
                truncate(name, 20),
                truncate(&domain.directory, 20),
                "-",
                "-",
                "-"
            );
            continue;
        }
        for skill in domain.skills.values() {
            println!(
                "{:<20}  {:<20}  {:<24}  {:<20}  {:<8}",
                truncate(name, 20),
                truncate(&domain.directory, 20),
                truncate(&skill.name, 24),
                truncate(&skill.alias, 20),
                skill.bridge.as_str(),
            );
        }
    }

    println!();
    println!(
        "{} domain(s), {} skill(s)",
        registry.len(),
        registry.skill_count()
    );
}

/// Print domains skipped by a best-effort scan to stderr.
pub fn print_failures(failures: &[DomainFailure]) {
    for failure in failures {
        eprintln!("warning: skipped domain {}: {}", failure.directory, failure.error);
    }
}

/// Print a JSON value with indentation.
pub fn print_json(value: &Value) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_json_reports_success() {
        let value = serde_json::json!({ "name": "leon", "skills": ["greeting"] });
        assert!(print_json(&value).is_ok());
    }

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("leon", 20), "leon");
    }

    #[test]
    fn truncate_shortens_long_strings() {
        assert_eq!(truncate("productivity-tools", 10), "product...");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("éééééééééééé", 6), "ééé...");
    }
}
