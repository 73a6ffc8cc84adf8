//! Text rendering of questions and pitch patterns.

use kaki_core::{pitch_levels, segment, AnswerOption, PitchLevel, Session, Word};

use crate::messages::Lang;

/// Draw a pitch pattern as two rows: high morae above, low morae below.
///
/// The trailing `○` stands for an attached particle.
pub fn pitch_pattern(yomi: &str, pitch: u32) -> String {
    let morae = segment(yomi);
    let levels = pitch_levels(morae.len(), pitch);

    let mut high = String::new();
    let mut low = String::new();
    for (i, level) in levels.iter().enumerate() {
        let mora = morae.get(i).map(String::as_str).unwrap_or("○");
        let blank = " ".repeat(mora.chars().count() * 2);
        match level {
            PitchLevel::High => {
                high.push_str(mora);
                low.push_str(&blank);
            }
            PitchLevel::Low => {
                high.push_str(&blank);
                low.push_str(mora);
            }
        }
    }

    format!("{}\n{}", high.trim_end(), low.trim_end())
}

/// One option line, marked once the question is answered.
pub fn option_line(index: usize, option: &AnswerOption, answered: Option<usize>) -> String {
    let mark = match answered {
        Some(_) if option.correct => "✓",
        Some(clicked) if clicked == index => "✗",
        _ => " ",
    };
    format!("{mark} {}) {} [{}]", index + 1, option.yomi, option.pitch)
}

fn details(word: &Word, show_pattern: bool) -> String {
    let mut text = format!("  {} / {}", word.pos, word.definition);
    if show_pattern {
        text.push_str("\n\n");
        text.push_str(&pitch_pattern(&word.yomi, word.pitch));
    }
    text
}

/// Render the current question, its options and any feedback.
pub fn question(session: &Session, lang: Lang, show_details: bool) -> String {
    let Some(word) = session.word() else {
        return String::new();
    };
    let answer = session.answer();

    let mut lines = vec![
        format!("{}  ({})", word.tango, lang.remaining(session.queue().len())),
        String::new(),
    ];
    lines.extend(
        session
            .options()
            .iter()
            .enumerate()
            .map(|(i, option)| option_line(i, option, answer.map(|a| a.clicked))),
    );

    if let Some(answer) = answer {
        lines.push(String::new());
        lines.push(if answer.correct { lang.correct() } else { lang.incorrect() }.to_string());
    }

    if show_details {
        lines.push(String::new());
        lines.push(details(word, answer.is_some()));
    }

    lines.push(String::new());
    lines.push(
        if answer.is_some() { lang.answered_help() } else { lang.question_help() }.to_string(),
    );

    lines.join("\n")
}
