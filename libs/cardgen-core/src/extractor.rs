//! Heuristic flashcard extractor.
//!
//! Fallback used when AI generation is unavailable. Derives flashcards from
//! structured study text with a single forward scan over its lines:
//!
//! ```markdown
//! # Cognitive Biases
//! - Anchoring: relying too heavily on the first piece of information.
//!   - First impressions
//! 1. Availability heuristic
//! 2. Confirmation bias
//! 3. Survivorship bias
//! | Term | Definition |
//! Key takeaway: Biases are systematic, not random.
//! ```
//!
//! Headers, title lines, and `Label:` lines set the current category; bullet
//! definitions, numbered runs, table rows, and takeaway callouts emit cards
//! tagged with it. Patterns are tried in a fixed order and the first match
//! wins; a matched group of lines is consumed atomically and never rescanned.

use regex::Regex;

use crate::types::{RawFlashcard, DEFAULT_CATEGORY};

/// Line-pattern scanner turning study text into raw flashcards.
///
/// Pure and total: any string input terminates with a (possibly empty) list,
/// so independent extractions are safe to run concurrently.
pub struct HeuristicExtractor {
    md_header: Regex,
    title_line: Regex,
    section_header: Regex,
    takeaway: Regex,
    bullet_def: Regex,
    sub_item: Regex,
    sub_marker: Regex,
    numbered: Regex,
    table_row: Regex,
    table_sep: Regex,
    dashes: Regex,
}

impl Default for HeuristicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self {
            md_header: Regex::new(r"^#{1,3}\s+(.+)").unwrap(),
            title_line: Regex::new(r"^([A-Z][^:]{3,50})(?:\s*[-–—]\s*.+)?$").unwrap(),
            section_header: Regex::new(r"^([A-Za-z][^:]{3,50}):\s*$").unwrap(),
            takeaway: Regex::new(r"(?i)^[-*]?\s*(?:key\s+)?takeaway:\s*(.+)").unwrap(),
            bullet_def: Regex::new(r"^[-*]\s+(.+?):\s+(.{10,})$").unwrap(),
            sub_item: Regex::new(r"^\s{2,}[*+-]\s+").unwrap(),
            sub_marker: Regex::new(r"^[*+-]\s+").unwrap(),
            numbered: Regex::new(r"^\d+[.)]\s+(.+)").unwrap(),
            table_row: Regex::new(r"^\|\s*(.+?)\s*\|\s*(.+?)\s*\|$").unwrap(),
            table_sep: Regex::new(r"^\|[-\s|]+\|$").unwrap(),
            dashes: Regex::new(r"^[-\s]+$").unwrap(),
        }
    }

    /// Extract flashcards from text, in document scan order.
    pub fn extract(&self, text: &str) -> Vec<RawFlashcard> {
        let lines: Vec<&str> = text.split('\n').collect();

        let mut cards = Vec::new();
        let mut category = DEFAULT_CATEGORY.to_string();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].trim();

            // Skip empty lines and markdown artifacts
            if line.is_empty()
                || line == "```"
                || line == "---"
                || line == "|||"
                || self.table_sep.is_match(line)
            {
                i += 1;
                continue;
            }

            // Category from markdown headers (# Header)
            if let Some(caps) = self.md_header.captures(line) {
                let header = caps[1].trim();
                let len = header.chars().count();
                if len > 2 && len < 60 {
                    category = header.to_string();
                }
                i += 1;
                continue;
            }

            // Category from title-case lines ("TITLE - Subtitle", no colon)
            if !line.contains(':') {
                if let Some(caps) = self.title_line.captures(line) {
                    category = caps[1].trim().to_string();
                    i += 1;
                    continue;
                }
            }

            // Category from section headers ending with a bare colon
            if let Some(caps) = self.section_header.captures(line) {
                category = caps[1].trim().to_string();
                i += 1;
                continue;
            }

            // "Key takeaway:" callouts, optionally followed by a
            // parenthesized annotation on the next line
            if let Some(caps) = self.takeaway.captures(line) {
                let mut answer = caps[1].trim().to_string();
                if i + 1 < lines.len() && lines[i + 1].trim().starts_with('(') {
                    let annotation = lines[i + 1].trim().replace(['(', ')'], "");
                    answer.push_str(" — ");
                    answer.push_str(annotation.trim());
                    i += 1;
                }
                cards.push(RawFlashcard {
                    question: "What is the key takeaway?".to_string(),
                    answer,
                    category: category.clone(),
                });
                i += 1;
                continue;
            }

            // "- Term: definition" bullets, merging indented sub-items
            if let Some(caps) = self.bullet_def.captures(line) {
                let term = caps[1].trim();
                let mut answer = caps[2].trim().to_string();

                // Sub-items must be indented; stop at the first blank or
                // non-indented line
                let mut sub_items: Vec<String> = Vec::new();
                let mut j = i + 1;
                while j < lines.len() {
                    let next_raw = lines[j];
                    if next_raw.trim().is_empty() || !self.sub_item.is_match(next_raw) {
                        break;
                    }
                    let item = self.sub_marker.replace(next_raw.trim(), "");
                    sub_items.push(item.trim().to_string());
                    j += 1;
                }

                if !sub_items.is_empty() {
                    answer = format!("{}. {}", answer, sub_items.join(". "));
                }

                let term_len = term.chars().count();
                if (3..=80).contains(&term_len) {
                    cards.push(RawFlashcard {
                        question: format!("What is \"{term}\"?"),
                        answer,
                        category: category.clone(),
                    });
                }

                i = j;
                continue;
            }

            // Numbered lists: only runs of 3+ consecutive items emit
            if self.numbered.is_match(line) {
                let mut items: Vec<String> = Vec::new();
                let mut j = i;
                while j < lines.len() {
                    match self.numbered.captures(lines[j].trim()) {
                        Some(caps) => items.push(caps[1].trim().to_string()),
                        None => break,
                    }
                    j += 1;
                }

                if items.len() >= 3 {
                    let listed = items
                        .iter()
                        .enumerate()
                        .map(|(idx, item)| format!("{}. {}", idx + 1, item))
                        .collect::<Vec<_>>()
                        .join(", ");
                    cards.push(RawFlashcard {
                        question: format!("List the {} items under \"{}\"", items.len(), category),
                        answer: listed,
                        category: category.clone(),
                    });

                    for (idx, item) in items.iter().enumerate() {
                        if item.chars().count() > 15 {
                            cards.push(RawFlashcard {
                                question: format!("What is #{} in \"{}\"?", idx + 1, category),
                                answer: item.clone(),
                                category: category.clone(),
                            });
                        }
                    }
                }

                // The run is consumed whether or not it emitted
                i = j;
                continue;
            }

            // Markdown table rows (| Front | Back |)
            if let Some(caps) = self.table_row.captures(line) {
                let front = caps[1].trim();
                let back = caps[2].trim();
                let label = front.to_lowercase();
                if label != "front"
                    && label != "back"
                    && !self.dashes.is_match(front)
                    && back.chars().count() > 3
                {
                    cards.push(RawFlashcard {
                        question: front.to_string(),
                        answer: back.to_string(),
                        category: category.clone(),
                    });
                }
                i += 1;
                continue;
            }

            i += 1;
        }

        cards
    }
}

/// Extract flashcards from text with a fresh extractor.
pub fn extract(text: &str) -> Vec<RawFlashcard> {
    HeuristicExtractor::new().extract(text)
}
