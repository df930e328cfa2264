//! @acp:module "Confirmation Prompts"
//! @acp:summary "Overwrite confirmation with a cancel outcome that stops the whole batch"
//! @acp:domain prompt
//! @acp:layer service

use std::cell::RefCell;
use std::collections::VecDeque;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm as ConfirmPrompt;

use crate::error::{IconError, Result};

/// Answer to a confirmation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    /// The user aborted; callers stop the whole operation
    Cancelled,
}

/// @acp:summary "Source of yes/no/cancel answers"
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> Result<Confirmation>;
}

/// Interactive prompt on the terminal; Esc or `q` cancels
#[derive(Debug, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> Result<Confirmation> {
        let answer = ConfirmPrompt::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact_opt()
            .map_err(|e| IconError::Prompt(e.to_string()))?;

        Ok(match answer {
            Some(true) => Confirmation::Yes,
            Some(false) => Confirmation::No,
            None => Confirmation::Cancelled,
        })
    }
}

/// Answers yes to everything (`--yes`)
#[derive(Debug, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> Result<Confirmation> {
        Ok(Confirmation::Yes)
    }
}

/// Replays a fixed list of answers and records the prompts it was shown
///
/// Runs out as `No`.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: RefCell<VecDeque<Confirmation>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = Confirmation>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            prompts: RefCell::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> Result<Confirmation> {
        self.prompts.borrow_mut().push(prompt.to_string());
        Ok(self
            .answers
            .borrow_mut()
            .pop_front()
            .unwrap_or(Confirmation::No))
    }
}
