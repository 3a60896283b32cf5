// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fallback tokenizer, the generator's second stage.
//!
//! A left-to-right scan over the lowercased words: each position optionally
//! consumes a quantity prefix, then tries the longest keyword phrase first.
//! Words that match nothing are skipped silently; this is best-effort
//! extraction, not a grammar.

use super::vocab::{
    canonical_label, is_activity_phrase, is_material_phrase, quantity_word, MAX_PHRASE_WORDS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Material,
    Activity,
}

impl TokenKind {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Activity => "activity",
        }
    }
}

/// A recognized vocabulary hit: kind, display label, and the quantity taken
/// from a preceding count word (default 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub label: String,
    pub quantity: usize,
}

pub fn tokenize(text: &str) -> Vec<Token> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect();

    let mut tokens = Vec::new();
    let mut i = 0;
    while i < words.len() {
        let (quantity, start) = match quantity_word(words[i]) {
            Some(q) if i + 1 < words.len() => (q, i + 1),
            _ => (1, i),
        };

        // Quantity consumption only commits when a phrase actually matches.
        match longest_match(&words, start) {
            Some((token_kind, phrase, consumed)) => {
                tokens.push(Token {
                    kind: token_kind,
                    label: canonical_label(phrase.as_str()),
                    quantity,
                });
                i = start + consumed;
            }
            None => i += 1,
        }
    }
    tokens
}

fn longest_match(words: &[&str], start: usize) -> Option<(TokenKind, String, usize)> {
    for len in (1..=MAX_PHRASE_WORDS).rev() {
        if start + len > words.len() {
            continue;
        }
        let phrase = words[start..start + len].join(" ");
        if is_material_phrase(&phrase) {
            return Some((TokenKind::Material, phrase, len));
        }
        if is_activity_phrase(&phrase) {
            return Some((TokenKind::Activity, phrase, len));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{tokenize, Token, TokenKind};

    fn token(kind: TokenKind, label: &str, quantity: usize) -> Token {
        Token {
            kind,
            label: label.to_owned(),
            quantity,
        }
    }

    #[test]
    fn scans_quantities_and_longest_phrases() {
        let tokens = tokenize("two raw materials into a bill of materials");
        assert_eq!(
            tokens,
            vec![
                token(TokenKind::Material, "Raw Materials", 2),
                token(TokenKind::Activity, "Bill Of Materials", 1),
            ]
        );
    }

    #[test]
    fn unmatched_words_are_skipped_silently() {
        let tokens = tokenize("deliver utterly mysterious widgets to the warehouse quickly");
        assert_eq!(tokens, vec![token(TokenKind::Material, "Warehouse", 1)]);
    }

    #[test]
    fn quantity_without_following_keyword_does_not_consume() {
        let tokens = tokenize("three fancy warehouse");
        // "three" prefixes "fancy" which matches nothing; the scan moves on
        // and the warehouse keeps the default quantity.
        assert_eq!(tokens, vec![token(TokenKind::Material, "Warehouse", 1)]);
    }

    #[test]
    fn oversized_numbers_are_plain_words_not_quantities() {
        let tokens = tokenize("999999999 pallets stored in storage");
        assert_eq!(
            tokens,
            vec![
                token(TokenKind::Material, "Pallets", 1),
                token(TokenKind::Activity, "Storage", 1),
            ]
        );
    }

    #[test]
    fn punctuation_is_stripped_from_words() {
        let tokens = tokenize("Factory, warehouse; (shipping).");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].label, "Shipping");
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("nothing recognizable here at all").is_empty());
    }

    #[test]
    fn scenario_tokens_alternate_as_expected() {
        let tokens =
            tokenize("two raw materials consumed in a bom to produce a finished good distributed to a dc");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Material,
                TokenKind::Activity,
                TokenKind::Material,
                TokenKind::Activity,
                TokenKind::Material,
            ]
        );
        assert_eq!(tokens[0].quantity, 2);
        assert_eq!(tokens[1].label, "BOM");
        assert_eq!(tokens[4].label, "DC");
    }
}
