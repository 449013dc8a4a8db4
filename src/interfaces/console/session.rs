use super::command::{Command, Line, tokenize};
use crate::application::workflow::Workflow;
use crate::domain::field::Field;
use crate::domain::operation::{MERCHANTS_UNAVAILABLE, Operation};
use crate::error::Result;
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Drives a [`Workflow`] from lines of text.
///
/// Loads the merchant list first, then reads one command per line until
/// `quit` or end of input. Each operation's output region is printed after
/// the operation settles.
pub struct Console<W: Write> {
    workflow: Workflow,
    output: W,
}

impl<W: Write> Console<W> {
    pub fn new(workflow: Workflow, output: W) -> Self {
        Self { workflow, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        self.workflow.bootstrap().await;
        let merchants = self.workflow.merchant_options().await;
        if merchants.is_empty() {
            let purchase_output = self.workflow.output(Operation::Purchase).await;
            if purchase_output == MERCHANTS_UNAVAILABLE {
                writeln!(self.output, "{purchase_output}")?;
            } else {
                writeln!(self.output, "The backend lists no merchants.")?;
            }
        } else {
            writeln!(self.output, "Loaded {} merchants.", merchants.len())?;
        }
        writeln!(self.output, "Type `help` for commands.")?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let words = tokenize(&line);
            if words.is_empty() {
                continue;
            }
            match Line::try_parse_from(words) {
                Ok(Line {
                    command: Command::Quit,
                }) => break,
                Ok(line) => self.execute(line.command).await?,
                Err(e) => write!(self.output, "{}", e.render())?,
            }
            self.output.flush()?;
        }
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Set { field, value } => {
                self.workflow.set(field, value.join(" ")).await;
            }
            Command::Merchants => {
                let options = self.workflow.merchant_options().await;
                if options.is_empty() {
                    writeln!(self.output, "No merchants loaded.")?;
                }
                for option in options {
                    writeln!(self.output, "{option}")?;
                }
            }
            Command::Show => {
                for field in Field::ALL {
                    let value = self.workflow.value(field).await;
                    writeln!(self.output, "{:<17} {}", field.key(), value)?;
                }
                for operation in Operation::ALL {
                    let state = if self.workflow.is_enabled(operation) {
                        "enabled"
                    } else {
                        "disabled"
                    };
                    writeln!(self.output, "[{operation}] {state}")?;
                }
            }
            command => {
                if let Some((operation, values)) = command.operation() {
                    for (field, value) in values {
                        self.workflow.set(field, value).await;
                    }
                    let outcome = self.workflow.trigger(operation).await;
                    writeln!(self.output, "[{operation}]\n{outcome}")?;
                }
            }
        }
        Ok(())
    }
}
