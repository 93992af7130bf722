use dialoguer::{Input, Select};
use goodgit_core::error::GoodgitError;

fn prompt_error(e: dialoguer::Error) -> GoodgitError {
    GoodgitError::Prompt {
        message: e.to_string(),
    }
}

/// Ask for a non-empty line of text.
pub fn input(message: &str) -> Result<String, GoodgitError> {
    Input::<String>::new()
        .with_prompt(message)
        .validate_with(|value: &String| -> Result<(), &str> {
            if value.trim().is_empty() {
                Err("value cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(prompt_error)
}

/// Pick one of `choices`.
pub fn select(message: &str, choices: &[String]) -> Result<String, GoodgitError> {
    if choices.is_empty() {
        return Err(GoodgitError::Prompt {
            message: format!("{message}: nothing to choose from"),
        });
    }
    let index = Select::new()
        .with_prompt(message)
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    Ok(choices[index].clone())
}
