//! Markdown deck files.
//!
//! # Format
//! ```markdown
//! ID: 6f1c2a4e-8d0b-4b7e-9a35-2f1d7c9e0b11
//! Q: What is the capital of France?
//! A: Paris
//! H: City of light
//! T: geography, europe
//!
//! Q: Explain borrowing
//! A: Borrowing allows references without ownership.
//! Multiple lines are supported.
//! ```
//!
//! `ID:`, `H:` and `T:` are optional. Cards without an ID get a fresh one,
//! so write the deck back with [`write`] to keep their identities stable.
//!
//! A continuation line that would otherwise read as a field marker (or is
//! blank but not empty) is escaped with a `\` before its first non-blank
//! character; the parser drops that backslash again.

use crate::error::{Error, Result};
use crate::types::{CardId, Flashcard};
use std::collections::HashSet;

/// Parse markdown deck content into flashcards.
pub fn parse(content: &str) -> Result<Vec<Flashcard>> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut parser = Parser::default();
    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }
    parser.finish()
}

/// Render flashcards in the deck format, IDs included.
///
/// Fails with [`Error::Unwritable`] for a card that would not parse back
/// unchanged: text with leading or trailing whitespace or a carriage
/// return, or a tag that is empty, padded, or holds a comma or line break.
pub fn write(cards: &[Flashcard]) -> Result<String> {
    let blocks = cards.iter().map(write_card).collect::<Result<Vec<_>>>()?;
    Ok(blocks.join("\n"))
}

const FIELD_PREFIXES: [&str; 5] = ["ID:", "Q:", "A:", "H:", "T:"];

fn write_card(card: &Flashcard) -> Result<String> {
    check_text(card, "front", &card.front)?;
    check_text(card, "back", &card.back)?;
    check_text(card, "hint", &card.hint)?;
    if let Some(tag) = card.tags.iter().find(|tag| !is_writable_tag(tag)) {
        return Err(Error::Unwritable {
            id: card.id,
            reason: format!("tag {:?} is empty, padded or holds a separator", tag),
        });
    }

    let mut block = format!(
        "ID: {}\nQ: {}\nA: {}\n",
        card.id,
        escape(&card.front),
        escape(&card.back)
    );
    if !card.hint.is_empty() {
        block.push_str(&format!("H: {}\n", escape(&card.hint)));
    }
    if !card.tags.is_empty() {
        block.push_str(&format!("T: {}\n", card.tags.join(", ")));
    }
    Ok(block)
}

fn check_text(card: &Flashcard, field: &str, text: &str) -> Result<()> {
    if text.trim() != text || text.contains('\r') {
        return Err(Error::Unwritable {
            id: card.id,
            reason: format!("{} has surrounding whitespace or a carriage return", field),
        });
    }
    Ok(())
}

fn is_writable_tag(tag: &str) -> bool {
    !tag.is_empty() && tag.trim() == tag && !tag.contains([',', '\n', '\r'])
}

fn needs_escape(line: &str) -> bool {
    let body = line.trim();
    if body.is_empty() {
        return !line.is_empty();
    }
    body.starts_with('\\') || FIELD_PREFIXES.iter().any(|prefix| body.starts_with(prefix))
}

/// Escape every continuation line of a field. The first line follows the
/// field marker and is never mistaken for one.
fn escape(text: &str) -> String {
    let mut lines = text.split('\n');
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push('\n');
        if needs_escape(line) {
            let body = line.trim_start();
            out.push_str(&line[..line.len() - body.len()]);
            out.push('\\');
            out.push_str(body);
        } else {
            out.push_str(line);
        }
    }
    out
}

fn unescape(line: &str) -> String {
    let body = line.trim_start();
    match body.strip_prefix('\\') {
        Some(rest) => format!("{}{}", &line[..line.len() - body.len()], rest),
        None => line.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Question,
    Answer,
    Hint,
}

struct CardBuilder {
    id: Option<CardId>,
    question: Option<String>,
    answer: Option<String>,
    hint: Option<String>,
    tags: Vec<String>,
    start_line: usize,
}

impl CardBuilder {
    fn new(start_line: usize) -> Self {
        Self {
            id: None,
            question: None,
            answer: None,
            hint: None,
            tags: Vec::new(),
            start_line,
        }
    }

    fn build(self) -> Result<Flashcard> {
        let question = self.question.ok_or(Error::MissingQuestion {
            line: self.start_line,
        })?;
        let answer = self.answer.ok_or(Error::MissingAnswer {
            line: self.start_line,
        })?;

        Ok(Flashcard::with_id(
            self.id.unwrap_or_default(),
            question.trim(),
            answer.trim(),
            self.hint.as_deref().unwrap_or_default().trim(),
            self.tags,
        ))
    }
}

#[derive(Default)]
struct Parser {
    cards: Vec<Flashcard>,
    seen_ids: HashSet<CardId>,
    current: Option<CardBuilder>,
    current_field: Option<Field>,
    buffer: Vec<String>,
}

impl Parser {
    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match LineType::parse(line) {
            LineType::Id(value) => self.handle_id(value, line_num)?,
            LineType::Question(text) => self.handle_question(text, line_num)?,
            LineType::Answer(text) => self.start_field(Field::Answer, text, line_num),
            LineType::Hint(text) => self.start_field(Field::Hint, text, line_num),
            LineType::Tags(text) => self.handle_tags(text, line_num),
            LineType::Text(text) => {
                if self.current_field.is_none() {
                    return Err(Error::StrayText { line: line_num });
                }
                self.buffer.push(unescape(text));
            }
            LineType::Empty => self.buffer.push(String::new()),
        }
        Ok(())
    }

    fn handle_id(&mut self, value: &str, line_num: usize) -> Result<()> {
        self.flush_buffer();
        self.close_card()?;

        let id = value.parse::<CardId>().map_err(|_| Error::InvalidId {
            line: line_num,
            value: value.to_string(),
        })?;

        let mut card = CardBuilder::new(line_num);
        card.id = Some(id);
        self.current = Some(card);
        self.current_field = None;
        Ok(())
    }

    fn handle_question(&mut self, text: &str, line_num: usize) -> Result<()> {
        self.flush_buffer();

        // A second question starts the next card
        if self.current.as_ref().is_some_and(|c| c.question.is_some()) {
            self.close_card()?;
        }
        self.start_field(Field::Question, text, line_num);
        Ok(())
    }

    fn start_field(&mut self, field: Field, text: &str, line_num: usize) {
        self.flush_buffer();
        self.current.get_or_insert_with(|| CardBuilder::new(line_num));
        self.current_field = Some(field);
        self.buffer.push(text.to_string());
    }

    fn handle_tags(&mut self, text: &str, line_num: usize) {
        self.flush_buffer();
        let card = self.current.get_or_insert_with(|| CardBuilder::new(line_num));
        card.tags.extend(
            text.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(String::from),
        );
        self.current_field = None;
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let content = self.buffer.join("\n");
        self.buffer.clear();

        if let Some(ref mut card) = self.current {
            match self.current_field {
                Some(Field::Question) => card.question = Some(content),
                Some(Field::Answer) => card.answer = Some(content),
                Some(Field::Hint) => card.hint = Some(content),
                // Only blank lines reach here; text is rejected as stray
                None => {}
            }
        }
    }

    fn close_card(&mut self) -> Result<()> {
        self.current_field = None;
        let Some(builder) = self.current.take() else {
            return Ok(());
        };

        let line = builder.start_line;
        let card = builder.build()?;
        if !self.seen_ids.insert(card.id) {
            return Err(Error::DuplicateId { id: card.id, line });
        }
        self.cards.push(card);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Flashcard>> {
        self.flush_buffer();
        self.close_card()?;
        Ok(self.cards)
    }
}

enum LineType<'a> {
    Id(&'a str),
    Question(&'a str),
    Answer(&'a str),
    Hint(&'a str),
    Tags(&'a str),
    Text(&'a str),
    Empty,
}

impl<'a> LineType<'a> {
    fn parse(line: &'a str) -> Self {
        // Trailing whitespace on a field's first line belongs to the text
        let trimmed = line.trim_start();

        if let Some(rest) = trimmed.strip_prefix("ID:") {
            Self::Id(rest.trim())
        } else if let Some(rest) = trimmed.strip_prefix("Q:") {
            Self::Question(rest.trim_start())
        } else if let Some(rest) = trimmed.strip_prefix("A:") {
            Self::Answer(rest.trim_start())
        } else if let Some(rest) = trimmed.strip_prefix("H:") {
            Self::Hint(rest.trim_start())
        } else if let Some(rest) = trimmed.strip_prefix("T:") {
            Self::Tags(rest.trim())
        } else if trimmed.trim_end().is_empty() {
            Self::Empty
        } else {
            Self::Text(line)
        }
    }
}
