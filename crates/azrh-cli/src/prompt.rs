//! Terminal implementation of the interaction port, backed by dialoguer.

use async_trait::async_trait;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, MultiSelect};

use azrh_core::{AzrhError, InteractionPort, Result};

/// Prompts the operator on the controlling terminal. Every call blocks until
/// an answer arrives; Esc/Ctrl-C surfaces as an interaction error and
/// unwinds the run.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

fn prompt_failed(err: dialoguer::Error) -> AzrhError {
    AzrhError::Interaction(err.to_string())
}

#[async_trait]
impl InteractionPort for TerminalPrompter {
    async fn select_many(
        &self,
        prompt: &str,
        options: &[String],
        preselect_all: bool,
    ) -> Result<Vec<usize>> {
        if options.is_empty() {
            return Ok(Vec::new());
        }
        let defaults = vec![preselect_all; options.len()];
        MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(options)
            .defaults(&defaults)
            .interact()
            .map_err(prompt_failed)
    }

    async fn select_one(&self, prompt: &str, options: &[String]) -> Result<usize> {
        FuzzySelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(options)
            .interact()
            .map_err(prompt_failed)
    }

    async fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(prompt_failed)
    }
}
