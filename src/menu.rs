//! Interactive numbered menu shared by every provider.
//!
//! Input and output are generic so the menu can be driven from tests.

use crate::ai::{
    self, ChatService, DEFAULT_IMAGE_PROMPT, DEFAULT_IMAGE_SYSTEM_INSTRUCTION,
    DEFAULT_SYSTEM_INSTRUCTION,
};
use crate::models::NormalizedResult;
use crate::{Error, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Text,
    Image,
    Multimodal,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Text),
            "2" => Some(Self::Image),
            "3" => Some(Self::Multimodal),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Answered(NormalizedResult),
    Failed,
    Exited,
    InvalidChoice,
}

/// Show the menu once, run the chosen operation and print the result.
///
/// Request failures are reported on `out` and yield [`MenuOutcome::Failed`];
/// only I/O errors on `input`/`out` are returned as `Err`.
pub async fn run_menu<R: BufRead, W: Write>(
    service: &dyn ChatService,
    system_override: Option<&str>,
    input: &mut R,
    out: &mut W,
) -> Result<MenuOutcome> {
    writeln!(out, "Choose an option:")?;
    writeln!(out, "1. Send text message")?;
    writeln!(out, "2. Send image with prompt")?;
    writeln!(out, "3. Send multimodal message (text + multiple images)")?;
    writeln!(out, "4. Exit")?;

    let Some(choice) = read_line(input, out, "\nEnter your choice (1-4): ")? else {
        return Ok(MenuOutcome::Exited);
    };

    let model = service.model_label();
    let result = match MenuChoice::parse(&choice) {
        Some(MenuChoice::Text) => {
            let text = read_line(input, out, "Enter your text message: ")?.unwrap_or_default();
            writeln!(out, "\nSending text message to {}...", model)?;
            let system = system_override.unwrap_or(DEFAULT_SYSTEM_INSTRUCTION);
            ai::send_text(service, system, &text).await
        }
        Some(MenuChoice::Image) => {
            let path = read_line(input, out, "Enter path to image file: ")?.unwrap_or_default();
            let prompt = read_line(
                input,
                out,
                "Enter your prompt about the image (or press Enter for default): ",
            )?
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_PROMPT.to_string());
            writeln!(out, "\nSending image and prompt to {}...", model)?;
            let system = system_override.unwrap_or(DEFAULT_IMAGE_SYSTEM_INSTRUCTION);
            ai::send_image(service, system, &PathBuf::from(path), &prompt).await
        }
        Some(MenuChoice::Multimodal) => {
            let text = read_line(input, out, "Enter your text message: ")?.unwrap_or_default();
            let image_paths = read_image_paths(input, out)?;
            let system = system_override.unwrap_or(DEFAULT_SYSTEM_INSTRUCTION);

            if image_paths.is_empty() {
                writeln!(
                    out,
                    "No valid image paths provided. Sending as text-only message."
                )?;
                ai::send_text(service, system, &text).await
            } else {
                writeln!(out, "\nSending multimodal message to {}...", model)?;
                ai::send_multimodal(service, system, &text, &image_paths).await
            }
        }
        Some(MenuChoice::Exit) => {
            writeln!(out, "Goodbye!")?;
            return Ok(MenuOutcome::Exited);
        }
        None => {
            writeln!(out, "Invalid choice. Please enter 1, 2, 3, or 4.")?;
            return Ok(MenuOutcome::InvalidChoice);
        }
    };

    match result {
        Ok(answer) => {
            writeln!(out, "\n--- {} Response ---", model)?;
            writeln!(out, "{}", answer.text)?;
            Ok(MenuOutcome::Answered(answer))
        }
        Err(e) => {
            tracing::debug!("Menu operation failed: {:?}", e);
            writeln!(out, "{}", describe_error(&e))?;
            Ok(MenuOutcome::Failed)
        }
    }
}

/// User-facing one-line description, prefixed by failure category.
pub fn describe_error(error: &Error) -> String {
    match error {
        Error::Configuration { .. } => format!("Configuration Error: {}", error),
        Error::NotFound(_) => format!("File Error: {}", error),
        Error::Transport { .. } | Error::ResponseBody { .. } | Error::HttpStatus { .. } => {
            format!("Request Error: {}", error)
        }
        Error::MalformedBody { .. } | Error::UnrecognizedResponseShape(_) => {
            format!("Response Error: {}", error)
        }
        Error::GenerationBlocked { reason } => {
            format!("The model did not produce a response (reason: {})", reason)
        }
        Error::Io(_) | Error::Serialization(_) => format!("Error: {}", error),
    }
}

fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Collect image paths until a blank line, skipping files that do not exist.
fn read_image_paths<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    loop {
        let line = read_line(
            input,
            out,
            "Enter path to image file (or press Enter to finish): ",
        )?;
        let Some(line) = line.filter(|l| !l.is_empty()) else {
            break;
        };

        let path = PathBuf::from(&line);
        if path.is_file() {
            paths.push(path);
        } else {
            writeln!(out, "Warning: Image file not found: {}", line)?;
        }
    }
    Ok(paths)
}
