use super::Bubble;
use super::BubbleAlignment;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Author;
use crate::domain::models::Message;

fn create_lines(author: Author, alignment: BubbleAlignment, text: &str) -> Vec<String> {
    Config::set(ConfigKey::Username, "testuser");
    let message = Message::new(author, text);

    return Bubble::new(&message, alignment, 50)
        .as_lines()
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| return span.content.to_string())
                .collect::<Vec<String>>()
                .join("");
        })
        .collect::<Vec<String>>();
}

fn as_snapshot(lines: &[String]) -> String {
    return lines
        .iter()
        .map(|line| return line.trim_end().to_string())
        .collect::<Vec<String>>()
        .join("\n");
}

#[test]
fn it_renders_a_short_bubble() {
    let lines = create_lines(Author::Innobot, BubbleAlignment::Left, "Hi there!");

    insta::assert_snapshot!(as_snapshot(&lines), @r###"
    ╭Innobot────╮
    │ Hi there! │
    ╰───────────╯
    "###);
}

#[test]
fn it_wraps_long_lines_at_the_window_edge() {
    let text = "Plug the red jumper into the 5V pin and the black jumper into GND, then double-check the polarity before you press the power switch on.";
    let lines = create_lines(Author::Innobot, BubbleAlignment::Left, text);

    insta::assert_snapshot!(as_snapshot(&lines), @r###"
    ╭Innobot────────────────────────────────────────╮
    │ Plug the red jumper into the 5V pin and the   │
    │ black jumper into GND, then double-check the  │
    │ polarity before you press the power switch    │
    │ on.                                           │
    ╰───────────────────────────────────────────────╯
    "###);
}

#[test]
fn it_keeps_explicit_line_breaks() {
    let lines = create_lines(
        Author::Innobot,
        BubbleAlignment::Left,
        "Step 1: wire it.\nStep 2: flash it.",
    );

    insta::assert_snapshot!(as_snapshot(&lines), @r###"
    ╭Innobot────────────╮
    │ Step 1: wire it.  │
    │ Step 2: flash it. │
    ╰───────────────────╯
    "###);
}

#[test]
fn it_renders_an_empty_placeholder_bubble() {
    let lines = create_lines(Author::Innobot, BubbleAlignment::Left, "");

    insta::assert_snapshot!(as_snapshot(&lines), @r###"
    ╭Innobot──╮
    │         │
    ╰─────────╯
    "###);
}

#[test]
fn it_right_aligns_user_bubbles() {
    let lines = create_lines(Author::User, BubbleAlignment::Right, "Hi!");

    assert_eq!(lines.len(), 3);
    for line in &lines {
        assert!(line.starts_with(&" ".repeat(38)));
        assert_eq!(line.chars().count(), 50);
    }
    assert_eq!(lines[0].trim_start(), "╭testuser──╮");
    assert_eq!(lines[1].trim_start(), "│ Hi!      │");
    assert_eq!(lines[2].trim_start(), "╰──────────╯");
}

#[test]
fn it_breaks_words_longer_than_the_window() {
    let text = "a".repeat(60);
    let lines = create_lines(Author::Innobot, BubbleAlignment::Left, &text);

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1].trim_end(), format!("│ {} │", "a".repeat(45)));
    assert!(lines[2].starts_with(&format!("│ {}", "a".repeat(15))));
}

#[test]
fn it_pads_every_line_to_the_window_width() {
    let text = "One ragged line.\nAnd a much much longer second line to force uneven wrapping widths.";
    let lines = create_lines(Author::Innobot, BubbleAlignment::Left, text);

    for line in &lines {
        assert_eq!(line.chars().count(), 50);
    }
}
