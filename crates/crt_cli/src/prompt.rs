//! Interactive prompts.

use crt_templates::{
    is_valid_project_name, AddOn, Category, TemplateError, TemplateRegistry, TemplateResult,
    TemplateSelector, DEFAULT_PROJECT_NAME, PROJECT_NAME_RULE,
};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

/// Everything the create flow may ask the user.
///
/// Declining a prompt (Esc) yields [`TemplateError::Cancelled`].
pub trait Prompter: TemplateSelector {
    /// Ask for a project name, re-asking until it is valid.
    fn project_name(&mut self) -> TemplateResult<String>;

    /// Pick any number of add-ons; returns their keys in display order.
    fn select_addons(&mut self, addons: &[AddOn]) -> TemplateResult<Vec<String>>;

    /// Ask whether to install dependencies now.
    fn confirm_install(&mut self) -> TemplateResult<bool>;
}

/// Terminal prompts backed by dialoguer.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

/// Ctrl+C while a prompt reads input surfaces as an interrupted read.
fn prompt_error(err: dialoguer::Error) -> TemplateError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
            TemplateError::Cancelled
        }
        dialoguer::Error::IO(e) => TemplateError::Io(e),
    }
}

impl TemplateSelector for DialoguerPrompter {
    fn select_category(&mut self, categories: &[Category]) -> TemplateResult<String> {
        let labels: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        let index = Select::with_theme(&self.theme)
            .with_prompt("Select a language")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(TemplateError::Cancelled)?;

        Ok(categories[index].value.clone())
    }

    fn select_template(
        &mut self,
        category: &Category,
        registry: &TemplateRegistry,
    ) -> TemplateResult<String> {
        let labels: Vec<&str> = category
            .templates
            .iter()
            .map(|t| registry.display_name(t))
            .collect();
        let index = Select::with_theme(&self.theme)
            .with_prompt("Select a template")
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(TemplateError::Cancelled)?;

        Ok(category.templates[index].clone())
    }
}

impl Prompter for DialoguerPrompter {
    fn project_name(&mut self) -> TemplateResult<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt("Project name")
            .default(DEFAULT_PROJECT_NAME.to_string())
            .validate_with(|input: &String| -> Result<(), &str> {
                if is_valid_project_name(input) {
                    Ok(())
                } else {
                    Err(PROJECT_NAME_RULE)
                }
            })
            .interact_text()
            .map_err(prompt_error)
    }

    fn select_addons(&mut self, addons: &[AddOn]) -> TemplateResult<Vec<String>> {
        let labels: Vec<&str> = addons.iter().map(|a| a.label.as_str()).collect();
        let selected = MultiSelect::with_theme(&self.theme)
            .with_prompt("Select additional features")
            .items(&labels)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(TemplateError::Cancelled)?;

        Ok(selected
            .into_iter()
            .map(|index| addons[index].value.clone())
            .collect())
    }

    fn confirm_install(&mut self) -> TemplateResult<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt("Install dependencies now?")
            .default(true)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(TemplateError::Cancelled)
    }
}
