//! Template renderer.

use super::{TemplateData, TemplateError};
use handlebars::{no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;

/// Builds the registry shared by all publishing templates.
///
/// Output is markdown, so nothing is HTML-escaped. Strict mode turns a
/// misspelled variable into a render error instead of an empty string.
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(no_escape);
    registry.set_strict_mode(true);
    registry.register_helper("eq", Box::new(eq_helper));
    registry
}

/// `(eq a b)`: truthy when both parameters are present and equal JSON values,
/// e.g. `{{#if (eq event_name "schedule")}}`.
fn eq_helper(
    helper: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let equal = match (helper.param(0), helper.param(1)) {
        (Some(left), Some(right)) => left.value() == right.value(),
        _ => false,
    };
    if equal {
        out.write("true")?;
    }
    Ok(())
}

/// Renders PR titles, commit messages and PR bodies.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: create_handlebars_registry(),
        }
    }

    /// Renders a single-line PR title.
    ///
    /// Only the first line of the output is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the title is blank.
    pub fn render_pr_title(
        &self,
        format: &str,
        data: &TemplateData,
    ) -> Result<String, TemplateError> {
        let rendered = self.render_template(format, data)?;
        let title = rendered.lines().next().unwrap_or_default().trim();
        if title.is_empty() {
            return Err(TemplateError::Empty { what: "PR title" });
        }
        Ok(title.to_string())
    }

    /// Renders a commit message, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the message is blank.
    pub fn render_commit_message(
        &self,
        format: &str,
        data: &TemplateData,
    ) -> Result<String, TemplateError> {
        let message = self.render_template(format, data)?;
        let message = message.trim();
        if message.is_empty() {
            return Err(TemplateError::Empty {
                what: "commit message",
            });
        }
        Ok(message.to_string())
    }

    /// Renders a PR body.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_pr_body(
        &self,
        template: &str,
        data: &TemplateData,
    ) -> Result<String, TemplateError> {
        self.render_template(template, data)
    }

    /// Renders a template with the given data.
    fn render_template<T: Serialize>(
        &self,
        template: &str,
        data: &T,
    ) -> Result<String, TemplateError> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}
