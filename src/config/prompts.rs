//! Prompt templates for Restyle.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub rewrite: RewritePrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompt used for every chunk of a rewrite.
///
/// `{{directive}}` receives the style directive and `{{chunk}}` the chunk text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewritePrompts {
    pub template: String,
}

impl Default for RewritePrompts {
    fn default() -> Self {
        Self {
            template: r#"{{directive}}
Rewrite the following passage in a natural style. Avoid mechanical or robotic wording and keep the main idea intact.
Keep the passage in its original language. If it is Vietnamese, keep it in Vietnamese and use fitting local expressions.

{{chunk}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let rewrite_path = custom_path.join("rewrite.toml");
            if rewrite_path.exists() {
                let content = std::fs::read_to_string(&rewrite_path)?;
                prompts.rewrite = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// The template is scanned once; substituted values are copied verbatim and never
    /// re-scanned, so placeholders inside a value stay as they are. Unknown placeholders are
    /// left in place.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            let value = after
                .find("}}")
                .and_then(|end| vars.get(&after[..end]).map(|v| (v, end)));
            match value {
                Some((value, end)) => {
                    out.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
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
        assert!(prompts.rewrite.template.contains("{{directive}}"));
        assert!(prompts.rewrite.template.contains("{{chunk}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = std::collections::HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let mut vars = std::collections::HashMap::new();
        vars.insert("style".to_string(), "Blog".to_string());
        vars.insert("chunk".to_string(), "write {{style}} here".to_string());

        let result = Prompts::render("[{{style}}] {{chunk}}", &vars);
        assert_eq!(result, "[Blog] write {{style}} here");
    }

    #[test]
    fn test_render_keeps_unknown_and_unclosed_placeholders() {
        let mut vars = std::collections::HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());

        assert_eq!(
            Prompts::render("{{missing}} {{name}} {{ {{name}}", &vars),
            "{{missing}} Alice {{ Alice"
        );
        assert_eq!(Prompts::render("trailing {{name", &vars), "trailing {{name");
    }

    #[test]
    fn test_provided_vars_override_custom() {
        let mut prompts = Prompts::default();
        prompts.variables.insert("audience".to_string(), "students".to_string());
        prompts.variables.insert("chunk".to_string(), "ignored".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("chunk".to_string(), "text".to_string());

        let result = prompts.render_with_custom("For {{audience}}: {{chunk}}", &vars);
        assert_eq!(result, "For students: text");
    }

    #[test]
    fn test_load_custom_rewrite_prompt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("rewrite.toml"),
            "template = \"{{directive}} :: {{chunk}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.rewrite.template, "{{directive}} :: {{chunk}}");
    }
}
