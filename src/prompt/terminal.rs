use std::io::{self, BufRead, StdinLock, Stdout, Write};

use super::{Choice, Prompter, TextPrompt};

/// Line-based prompter over any reader/writer pair.
///
/// End of input cancels the current question.
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompter<StdinLock<'static>, Stdout> {
    /// Prompter bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `question` and read one trimmed line; `None` at end of input.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "? {} › ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn text(&mut self, prompt: &TextPrompt<'_>) -> io::Result<Option<String>> {
        let question = match &prompt.initial {
            Some(initial) => format!("{} ({})", prompt.message, initial),
            None => prompt.message.to_string(),
        };

        loop {
            let Some(answer) = self.ask(&question)? else {
                return Ok(None);
            };

            if !answer.is_empty() {
                return Ok(Some(answer));
            }
            if let Some(initial) = &prompt.initial {
                return Ok(Some(initial.clone()));
            }
            match prompt.required {
                Some(required) => writeln!(self.output, "  {}", required)?,
                None => return Ok(None),
            }
        }
    }

    fn multiselect(&mut self, message: &str, choices: &[Choice]) -> io::Result<Option<Vec<usize>>> {
        writeln!(self.output, "? {}", message)?;
        for (index, choice) in choices.iter().enumerate() {
            let mark = if choice.selected { "x" } else { " " };
            writeln!(self.output, "  {:>3}. [{}] {}", index + 1, mark, choice.title)?;
        }

        let question = "Numbers or ranges (e.g. 1,3,5-7), 'a' for all, 'n' for none, Enter keeps [x]";
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };

            match answer.to_lowercase().as_str() {
                "" => {
                    let marked = choices
                        .iter()
                        .enumerate()
                        .filter(|(_, choice)| choice.selected)
                        .map(|(index, _)| index)
                        .collect();
                    return Ok(Some(marked));
                }
                "a" | "all" => return Ok(Some((0..choices.len()).collect())),
                "n" | "none" => return Ok(Some(Vec::new())),
                other => match parse_selection(other, choices.len()) {
                    Ok(indices) => return Ok(Some(indices)),
                    Err(e) => writeln!(self.output, "  {}", e)?,
                },
            }
        }
    }

    fn confirm(&mut self, message: &str, initial: bool) -> io::Result<Option<bool>> {
        let hint = if initial { "Y/n" } else { "y/N" };
        let question = format!("{} ({})", message, hint);

        loop {
            let Some(answer) = self.ask(&question)? else {
                return Ok(None);
            };

            match answer.to_lowercase().as_str() {
                "" => return Ok(Some(initial)),
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => writeln!(self.output, "  Please answer y or n")?,
            }
        }
    }

    fn say(&mut self, message: &str) {
        if let Err(e) = writeln!(self.output, "{}", message) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

/// Parse 1-based numbers and ranges like `1,3 5-7` into sorted 0-based indices.
pub fn parse_selection(input: &str, len: usize) -> Result<Vec<usize>, String> {
    let mut indices = Vec::new();

    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let (start, end) = match token.split_once('-') {
            Some((start, end)) => (parse_position(start, len)?, parse_position(end, len)?),
            None => {
                let position = parse_position(token, len)?;
                (position, position)
            }
        };

        if start > end {
            return Err(format!("Invalid range: {}", token));
        }
        indices.extend(start..=end);
    }

    indices.sort_unstable();
    indices.dedup();
    Ok(indices)
}

fn parse_position(token: &str, len: usize) -> Result<usize, String> {
    let number: usize = token
        .trim()
        .parse()
        .map_err(|_| format!("Not a number: {}", token))?;

    if number == 0 || number > len {
        return Err(format!("{} is out of range (1-{})", number, len));
    }
    Ok(number - 1)
}
