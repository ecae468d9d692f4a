//! Skill Extractor — matches the taxonomy against normalized resume text.

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::scoring::taxonomy::{taxonomy, SkillTaxonomy};

/// Extracts skills using the process-wide taxonomy.
pub fn extract_skills(normalized_text: &str) -> Vec<String> {
    extract_skills_with(taxonomy(), normalized_text)
}

/// Returns the display names of every taxonomy term found in `normalized_text`,
/// in taxonomy order, deduplicated case-insensitively (first occurrence wins).
pub fn extract_skills_with(taxonomy: &SkillTaxonomy, normalized_text: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut found = Vec::new();

    for pattern in taxonomy.patterns() {
        if !pattern.is_match(normalized_text) {
            continue;
        }
        if seen.insert(pattern.display_name.to_lowercase()) {
            trace!(term = pattern.term, category = ?pattern.category, "Matched skill");
            found.push(pattern.display_name.clone());
        }
    }

    debug!("Extracted {} skills", found.len());
    found
}
