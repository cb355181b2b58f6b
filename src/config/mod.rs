//! Configuration module for Restyle.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, RewritePrompts};
pub use settings::{
    FailurePolicy, GenerationSettings, OutputSettings, PromptSettings, RewriteSettings, Settings,
    SourceSettings,
};
