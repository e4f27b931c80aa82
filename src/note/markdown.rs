//! Markdown rendering for notes.

use super::{MarkdownNote, SectionContent};

/// Render a note as a Markdown document.
///
/// Sections are separated by one blank line and the document ends with a
/// single newline.
pub fn render(note: &MarkdownNote) -> String {
    let mut blocks = vec![
        format!("# {}", note.title()),
        format!("- Quelle: {}", note.source_url()),
        section("TL;DR", bullets(note.tldr())),
        section("Kernaussagen", bullets(note.key_points())),
        section(
            "Struktur / Outline",
            note.outline()
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}. {}", i + 1, item))
                .collect(),
        ),
    ];

    if !note.quotes().is_empty() {
        blocks.push(section(
            "Wichtige Zitate",
            note.quotes()
                .iter()
                .map(|q| format!("- \"{}\" ({})", q.text, q.timestamp))
                .collect(),
        ));
    }

    for (name, content) in note.additional_sections() {
        let lines = match content {
            SectionContent::Items(items) => bullets(items),
            SectionContent::Text(text) => vec![text.clone()],
        };
        blocks.push(section(name, lines));
    }

    let mut output = blocks.join("\n\n");
    output.push('\n');
    output
}

fn bullets(items: &[String]) -> Vec<String> {
    items.iter().map(|item| format!("- {}", item)).collect()
}

fn section(heading: &str, lines: Vec<String>) -> String {
    if lines.is_empty() {
        return format!("## {}", heading);
    }
    format!("## {}\n\n{}", heading, lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Quote;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> MarkdownNote {
        MarkdownNote::new(
            "Rust Ownership",
            "https://www.youtube.com/watch?v=abc",
            strings(&["eins", "zwei", "drei", "vier"]),
            strings(&["Kern A", "Kern B"]),
            strings(&["Intro", "Hauptteil", "Fazit"]),
        )
        .unwrap()
        .with_quotes(vec![Quote::new("quote text", "01:23")])
    }

    #[test]
    fn test_sections_and_order() {
        let md = render(&sample());

        assert_eq!(md.matches("## TL;DR").count(), 1);
        let tldr = md.split("## TL;DR\n\n").nth(1).unwrap();
        let tldr_lines: Vec<&str> = tldr
            .lines()
            .take_while(|l| !l.is_empty())
            .collect();
        assert_eq!(tldr_lines, vec!["- eins", "- zwei", "- drei", "- vier"]);

        assert!(md.contains("- \"quote text\" (01:23)\n"));
        assert!(md.contains("## Struktur / Outline\n\n1. Intro\n2. Hauptteil\n3. Fazit\n"));
    }

    #[test]
    fn test_full_layout() {
        let note = sample().with_sections(vec![
            ("Offene Fragen".to_string(), SectionContent::Items(strings(&["Warum?"]))),
            ("Fazit".to_string(), SectionContent::Text("Lohnt sich.".to_string())),
        ]);

        let expected = "\
# Rust Ownership

- Quelle: https://www.youtube.com/watch?v=abc

## TL;DR

- eins
- zwei
- drei
- vier

## Kernaussagen

- Kern A
- Kern B

## Struktur / Outline

1. Intro
2. Hauptteil
3. Fazit

## Wichtige Zitate

- \"quote text\" (01:23)

## Offene Fragen

- Warum?

## Fazit

Lohnt sich.
";
        assert_eq!(render(&note), expected);
    }

    #[test]
    fn test_quotes_section_omitted_when_empty() {
        let note = sample().with_quotes(Vec::new());
        let md = note.to_markdown();
        assert!(!md.contains("## Wichtige Zitate"));
        assert!(md.ends_with("3. Fazit\n"));
        assert!(!md.contains("\n\n\n"));
    }
}
