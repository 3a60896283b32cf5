// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Keyword vocabularies for the fallback tokenizer.
//!
//! Matching is exact and longest-phrase-first; the phrase length cap below
//! bounds how many words the scanner joins per attempt.

/// Longest phrase in either vocabulary, in words.
pub const MAX_PHRASE_WORDS: usize = 3;

const MATERIALS: &[&str] = &[
    "raw material",
    "raw materials",
    "finished good",
    "finished goods",
    "work in progress",
    "semi finished good",
    "distribution center",
    "dc",
    "warehouse",
    "supplier",
    "factory",
    "plant",
    "store",
    "retailer",
    "customer",
    "component",
    "components",
    "part",
    "parts",
    "product",
    "products",
    "goods",
    "material",
    "materials",
    "item",
    "items",
    "sku",
    "pallet",
    "pallets",
];

const ACTIVITIES: &[&str] = &[
    "bill of materials",
    "bom",
    "assembly",
    "production",
    "manufacturing",
    "machining",
    "distribution",
    "distributed",
    "shipping",
    "shipped",
    "ship",
    "transport",
    "transported",
    "delivery",
    "delivered",
    "picking",
    "packing",
    "packaging",
    "inspection",
    "procurement",
    "receiving",
    "storage",
];

pub fn is_material_phrase(phrase: &str) -> bool {
    MATERIALS.contains(&phrase)
}

pub fn is_activity_phrase(phrase: &str) -> bool {
    ACTIVITIES.contains(&phrase)
}

/// Upper bound on a numeric quantity prefix, matching the reach of the
/// number-word list. Larger digit runs are not treated as quantities.
pub const MAX_QUANTITY: usize = 12;

/// Quantity prefixes the tokenizer consumes ahead of a keyword phrase.
/// Unknown words return `None` and the default quantity of 1 applies.
pub fn quantity_word(word: &str) -> Option<usize> {
    if let Ok(n) = word.parse::<usize>() {
        return (1..=MAX_QUANTITY).contains(&n).then_some(n);
    }
    let n = match word {
        "a" | "an" | "one" | "single" => 1,
        "two" | "pair" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        _ => return None,
    };
    Some(n)
}

/// Display label for a matched phrase: known acronyms keep their casing,
/// everything else is title-cased word by word.
pub fn canonical_label(phrase: &str) -> String {
    match phrase {
        "dc" => return "DC".to_owned(),
        "bom" => return "BOM".to_owned(),
        "sku" => return "SKU".to_owned(),
        _ => {}
    }
    title_case(phrase)
}

pub fn title_case(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len());
    for (i, word) in phrase.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
