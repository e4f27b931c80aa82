//! Prompt templates for ytnotes.
//!
//! Prompts can be customized by placing a `notes.toml` file in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    pub notes: NotePrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for note generation.
///
/// The user template receives `{{url}}`, `{{title}}` and `{{transcript}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotePrompts {
    pub system: String,
    pub user: String,
}

impl Default for NotePrompts {
    fn default() -> Self {
        Self {
            system: r#"Du bist ein AI-Agent, der YouTube-Video-Transkripte analysiert und strukturierte Notizen erstellt.

Deine Aufgabe:
- Analysiere das bereitgestellte Transkript gründlich
- Extrahiere die wichtigsten Inhalte
- Erstelle eine klar strukturierte Zusammenfassung

Antworte ausschließlich im folgenden JSON-Format:
{
  "title": "Aussagekräftiger Titel des Videos/Themas",
  "tldr": ["Punkt 1", "Punkt 2", "Punkt 3"],
  "key_points": ["Kernaussage 1", "Kernaussage 2", "..."],
  "outline": ["Gliederungspunkt 1", "Gliederungspunkt 2", "..."],
  "quotes": [{"text": "Wichtiges Zitat", "timestamp": "MM:SS"}],
  "additional_sections": {
    "Offene Fragen": ["Frage 1", "Frage 2"],
    "Glossar": ["Begriff: Erklärung"]
  }
}

Wichtig:
- TL;DR: 3-5 prägnante Bullet Points
- Kernaussagen: Die wichtigsten Erkenntnisse (mindestens eine)
- Outline: Logische Struktur des Inhalts (mindestens ein Punkt)
- Zitate nur mit exakten Zeitstempeln aus dem Transkript ([MM:SS])
- Zusatzsektionen sind optional aber erwünscht"#
                .to_string(),

            user: r#"Analysiere bitte das folgende YouTube-Video-Transkript und erstelle strukturierte Notizen:

Video-URL: {{url}}
Videotitel: {{title}}

Transkript:
{{transcript}}

Erstelle eine strukturierte Analyse mit den wichtigsten Inhalten, Kernaussagen und einer logischen Gliederung."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let notes_path = custom_path.join("notes.toml");
            if notes_path.exists() {
                let content = std::fs::read_to_string(&notes_path)?;
                prompts.notes = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.notes.system.contains("\"tldr\""));
        assert!(prompts.notes.user.contains("{{transcript}}"));
        assert!(prompts.notes.user.contains("{{url}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_provided_vars_override_custom() {
        let mut custom = HashMap::new();
        custom.insert("lang".to_string(), "Deutsch".to_string());
        custom.insert("url".to_string(), "ignored".to_string());
        let prompts = Prompts::load(None, Some(&custom)).unwrap();

        let mut vars = HashMap::new();
        vars.insert("url".to_string(), "https://youtu.be/x".to_string());

        let result = prompts.render_with_custom("{{url}} in {{lang}}", &vars);
        assert_eq!(result, "https://youtu.be/x in Deutsch");
    }

    #[test]
    fn test_load_custom_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("notes.toml"),
            "system = \"Be brief.\"\nuser = \"{{transcript}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.notes.system, "Be brief.");
        assert_eq!(prompts.notes.user, "{{transcript}}");
    }
}
