#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let prefix = text
            .trim()
            .split(' ')
            .next()
            .unwrap_or_default()
            .to_string();

        let cmd = SlashCommand { command: prefix };
        if cmd.is_quit() || cmd.is_clear() {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_clear(&self) -> bool {
        return ["/clear", "/reset", "/new"].contains(&self.command.as_str());
    }
}
