//! CLI command definitions.
//!
//! The tool has a single command: create a project. Category flags take an
//! optional template name, so `--ts tw my-app` and `my-app --ts` both parse.
//! Categories declared only in a `templates.yaml` are chosen with
//! `--category <name> [template]`.

use std::path::PathBuf;

use clap::Parser;
use crt_templates::DEFAULT_REPOSITORY;

pub mod create;

/// create-react-template - scaffold a React project from a template
#[derive(Parser, Debug, Clone)]
#[command(name = "create-react-template")]
#[command(version, about = "Scaffold a new React project from a template")]
#[command(long_about = r#"
Scaffold a new React project from a template, optionally layering add-ons
(Tailwind CSS, Shadcn UI) on top and installing dependencies.

Anything not given on the command line is asked for interactively.

EXAMPLES:
  create-react-template my-app
  create-react-template my-app --ts tw
  create-react-template --js vanilla my-app --skip-install
  create-react-template my-app --ts vanilla --local --addon tailwind
  create-react-template my-app --category rs cli --local

EXIT CODES:
  0 - Success (also when dependency installation fails or is declined)
  1 - Error
"#)]
pub struct Cli {
    /// Name of the project directory to create
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: Option<String>,

    /// Use a JavaScript template, optionally naming it
    #[arg(
        long,
        value_name = "TEMPLATE",
        num_args = 0..=1,
        default_missing_value = "",
        conflicts_with = "ts"
    )]
    pub js: Option<String>,

    /// Use a TypeScript template, optionally naming it
    #[arg(
        long,
        value_name = "TEMPLATE",
        num_args = 0..=1,
        default_missing_value = "",
        conflicts_with = "category"
    )]
    pub ts: Option<String>,

    /// Use any registered category (by value or flag name), optionally naming a template
    #[arg(
        long,
        value_names = ["CATEGORY", "TEMPLATE"],
        num_args = 1..=2,
        conflicts_with = "js"
    )]
    pub category: Vec<String>,

    /// Copy the base template from the local template directory
    #[arg(long)]
    pub local: bool,

    /// Add-on to apply on top of the template (repeatable, applied in order)
    #[arg(long = "addon", value_name = "ADDON")]
    pub addons: Vec<String>,

    /// Install dependencies without asking
    #[arg(long, conflicts_with = "skip_install")]
    pub install: bool,

    /// Do not install dependencies
    #[arg(long)]
    pub skip_install: bool,

    /// Local template directory (base templates for --local, and add-ons)
    #[arg(long, env = "CRT_TEMPLATES_DIR", value_name = "DIR")]
    pub templates_dir: Option<PathBuf>,

    /// Repository the base templates are fetched from
    #[arg(long, env = "CRT_TEMPLATE_REPO", value_name = "REPO", default_value = DEFAULT_REPOSITORY)]
    pub repo: String,

    /// Leave *.ejs placeholder files unrendered
    #[arg(long)]
    pub no_render: bool,

    /// Show the package manager's output while installing
    #[arg(long)]
    pub show_install_output: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// The category given on the command line, with the template name that
    /// followed it.
    ///
    /// The first element is `--js`/`--ts`, or the raw `--category` argument.
    pub fn category_flag(&self) -> Option<(&str, Option<&str>)> {
        fn non_empty(template: &str) -> Option<&str> {
            Some(template).filter(|t| !t.is_empty())
        }

        if let Some(template) = self.js.as_deref() {
            return Some(("--js", non_empty(template)));
        }
        if let Some(template) = self.ts.as_deref() {
            return Some(("--ts", non_empty(template)));
        }
        match self.category.as_slice() {
            [] => None,
            [category] => Some((category.as_str(), None)),
            [category, template, ..] => Some((category.as_str(), non_empty(template))),
        }
    }
}
