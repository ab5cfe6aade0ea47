use std::io::Write as _;

use leaflet_core::channel::{Channel, ChannelError, ChannelMessage};

/// CLI channel that reads questions from stdin and prints answers to stdout.
///
/// `exit`, `quit`, an empty line, or EOF ends the session.
#[derive(Debug, Default)]
pub struct CliChannel;

impl CliChannel {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Channel for CliChannel {
    async fn recv(&mut self) -> Result<Option<ChannelMessage>, ChannelError> {
        let line = tokio::task::spawn_blocking(read_prompt_line)
            .await
            .map_err(|e| ChannelError::Other(e.to_string()))?
            .map_err(ChannelError::Io)?;

        let Some(line) = line else {
            return Ok(None);
        };
        Ok(parse_input(&line).map(|text| ChannelMessage { text }))
    }

    async fn send(&mut self, text: &str) -> Result<(), ChannelError> {
        println!("Leaflet: {text}");
        Ok(())
    }
}

/// Blocking prompt + read of one stdin line. `None` means EOF.
fn read_prompt_line() -> std::io::Result<Option<String>> {
    print!("You: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    let bytes = std::io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        println!();
        return Ok(None);
    }
    Ok(Some(line))
}

fn parse_input(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed == "exit" || trimmed == "quit" {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
