// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Movement-pattern extraction, the generator's first stage.
//!
//! Looks for `<material> <verb> from <source> to <destination> [via <hub>]`
//! in each clause of the description. This stage is best-effort: a clause
//! that does not match is skipped, and an empty result hands over to the
//! fallback tokenizer.

use std::sync::OnceLock;

use regex::Regex;

use super::vocab::title_case;

/// One extracted movement: a material flowing from a source to a destination
/// through an activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementStep {
    pub material: Option<String>,
    pub activity: String,
    pub source: String,
    pub destination: String,
}

fn movement_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?x)
            ^
            (?: (?P<material>.+?) \s+ )?
            (?: (?:is|are|was|were) \s+ )?
            (?: (?P<verb>shipped|transported|sent|moved|delivered|distributed|flows?) \s+ )?
            from \s+ (?P<src>.+?)
            \s+ to \s+ (?P<dst>.+?)
            (?: \s+ via \s+ (?P<via>.+?) )?
            \s* $
            ",
        )
        .expect("movement pattern compiles")
    })
}

/// Splits the description into clauses and extracts one step per matching
/// clause, in input order.
pub fn extract_steps(text: &str) -> Vec<MovementStep> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c| matches!(c, '.' | ';' | ','))
        .flat_map(|clause| clause.split(" then "))
        .filter_map(|clause| extract_step(clause.trim()))
        .collect()
}

fn extract_step(clause: &str) -> Option<MovementStep> {
    if clause.is_empty() {
        return None;
    }
    let captures = movement_pattern().captures(clause)?;

    let material = captures
        .name("material")
        .map(|m| clean_phrase(m.as_str()))
        .filter(|m| !m.is_empty());
    let source = clean_phrase(captures.name("src")?.as_str());
    let destination = clean_phrase(captures.name("dst")?.as_str());
    if source.is_empty() || destination.is_empty() {
        return None;
    }

    // A `via` hub names the activity outright; otherwise the verb does, with
    // a generic fallback for bare "from X to Y" clauses.
    let activity = match captures.name("via") {
        Some(via) => clean_phrase(via.as_str()),
        None => captures
            .name("verb")
            .map(|v| v.as_str().to_owned())
            .unwrap_or_else(|| "transport".to_owned()),
    };

    Some(MovementStep {
        material: material.map(|m| title_case(&m)),
        activity: title_case(&activity),
        source: title_case(&source),
        destination: title_case(&destination),
    })
}

/// Drops leading articles and surrounding punctuation from a captured phrase.
fn clean_phrase(phrase: &str) -> String {
    let trimmed = phrase.trim_matches(|c: char| !c.is_alphanumeric());
    let without_article = trimmed
        .strip_prefix("the ")
        .or_else(|| trimmed.strip_prefix("a "))
        .or_else(|| trimmed.strip_prefix("an "))
        .unwrap_or(trimmed);
    without_article.trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::{extract_steps, MovementStep};

    #[test]
    fn extracts_verb_pattern() {
        let steps = extract_steps("Pallets shipped from the factory to the warehouse");
        assert_eq!(
            steps,
            vec![MovementStep {
                material: Some("Pallets".to_owned()),
                activity: "Shipped".to_owned(),
                source: "Factory".to_owned(),
                destination: "Warehouse".to_owned(),
            }]
        );
    }

    #[test]
    fn via_names_the_activity() {
        let steps = extract_steps("goods are moved from plant to store via cross docking");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].activity, "Cross Docking");
        assert_eq!(steps[0].source, "Plant");
        assert_eq!(steps[0].destination, "Store");
    }

    #[test]
    fn bare_from_to_defaults_the_activity() {
        let steps = extract_steps("from supplier to plant");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].material, None);
        assert_eq!(steps[0].activity, "Transport");
    }

    #[test]
    fn multiple_clauses_chain_in_order() {
        let steps =
            extract_steps("parts shipped from supplier to plant. boxes sent from plant to dc");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].destination, "Plant");
        assert_eq!(steps[1].source, "Plant");
    }

    #[test]
    fn then_separates_clauses_too() {
        let steps = extract_steps("from a to b then from b to c");
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn non_matching_text_yields_nothing() {
        assert!(extract_steps("two raw materials consumed in a bom").is_empty());
        assert!(extract_steps("").is_empty());
    }
}
