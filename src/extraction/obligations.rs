//! Obligation attribution: collects "shall"/"must" sentences per party.
//! The party is the first organization-typed subject token in the
//! sentence; everything else lands in the explicit `AllParties` bucket.

use crate::errors::Result;
use crate::linguistic::{split_sentences, AnalyzedText, DependencyRole, EntityLabel};
use serde::{Deserialize, Serialize};

/// Obligated party. The default bucket is an explicit variant rather
/// than a magic string, so a party literally named "All Parties" cannot
/// collide with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    AllParties,
    Named(String),
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Party::AllParties => f.write_str("All Parties"),
            Party::Named(name) => f.write_str(name),
        }
    }
}

/// One party with its obligation sentences in encounter order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObligationEntry {
    pub party: Party,
    pub sentences: Vec<String>,
}

/// Ordered party → obligations mapping. Parties are unique and keep
/// insertion order; sentences keep encounter order per party.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObligationMap {
    entries: Vec<ObligationEntry>,
}

impl ObligationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sentence under a party, creating the party on first use
    pub fn record(&mut self, party: Party, sentence: impl Into<String>) {
        let sentence = sentence.into();
        match self.entries.iter_mut().find(|e| e.party == party) {
            Some(entry) => entry.sentences.push(sentence),
            None => self.entries.push(ObligationEntry {
                party,
                sentences: vec![sentence],
            }),
        }
    }

    /// Fold another map into this one, preserving encounter order
    pub fn merge(&mut self, other: ObligationMap) {
        for entry in other.entries {
            for sentence in entry.sentences {
                self.record(entry.party.clone(), sentence);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObligationEntry> {
        self.entries.iter()
    }

    /// Number of distinct parties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total obligation sentences across all parties
    pub fn total_obligations(&self) -> usize {
        self.entries.iter().map(|e| e.sentences.len()).sum()
    }

    /// Look up one party's obligations
    pub fn get(&self, party: &Party) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| &e.party == party)
            .map(|e| e.sentences.as_slice())
    }
}

/// Extracts per-party obligation sentences from one clause
pub struct ObligationExtractor;

impl ObligationExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Build a fresh per-clause obligation map. Without a linguistic
    /// view there is no entity structure, so every obligation attributes
    /// to `Party::AllParties`.
    pub fn extract(&self, body: &str, analyzed: Option<&AnalyzedText>) -> Result<ObligationMap> {
        let mut map = ObligationMap::new();

        match analyzed {
            Some(view) => {
                for sentence in &view.sentences {
                    if !is_obligation_sentence(&sentence.text) {
                        continue;
                    }
                    let party = sentence
                        .tokens
                        .iter()
                        .find(|t| {
                            matches!(
                                t.dependency,
                                DependencyRole::NominalSubject
                                    | DependencyRole::PassiveNominalSubject
                            ) && t.entity == Some(EntityLabel::Organization)
                        })
                        .map(|t| Party::Named(t.text.clone()))
                        .unwrap_or(Party::AllParties);
                    map.record(party, sentence.text.trim());
                }
            }
            None => {
                for sentence in split_sentences(body) {
                    if is_obligation_sentence(&sentence) {
                        map.record(Party::AllParties, sentence.trim());
                    }
                }
            }
        }

        Ok(map)
    }
}

impl Default for ObligationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn is_obligation_sentence(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("shall") || lower.contains("must")
}
