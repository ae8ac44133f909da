use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::Result;
use crate::handlers;
use crate::models::{Reply, Route};
use crate::AppState;

pub const BANNER: &str = "🤖 AI Chatbot with Web Search: Type 'exit' to quit.";
pub const PROMPT: &str = "You: ";
pub const GOODBYE: &str = "Goodbye!";
pub const FETCHING_NEWS: &str = "Fetching the latest news...🔍";
pub const NO_NEWS: &str = "No news found. Try another query.";
pub const NEWS_HEADER: &str = "📰 **Latest News Summary:**";

/// Interactive read-dispatch-print loop over an arbitrary terminal.
///
/// One turn is handled at a time; the next line is only read once the
/// previous reply has been written. Any service or I/O failure ends the loop
/// with that error.
pub struct ChatLoop<'a, R, W> {
    state: &'a AppState,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> ChatLoop<'a, R, W> {
    pub fn new(state: &'a AppState, input: R, output: W) -> Self {
        Self {
            state,
            input,
            output,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.output, "\n{}\n", BANNER)?;

        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                // EOF behaves like "exit"
                writeln!(self.output)?;
                self.render(&Reply::Goodbye)?;
                return Ok(());
            }

            let reply = self.turn(&line).await?;
            self.render(&reply)?;
            if reply == Reply::Goodbye {
                return Ok(());
            }
        }
    }

    async fn turn(&mut self, line: &str) -> Result<Reply> {
        let route = handlers::route(line);
        debug!(?route, "dispatching input");

        match route {
            Route::Exit => Ok(Reply::Goodbye),
            Route::News(query) => {
                writeln!(self.output, "{}", FETCHING_NEWS)?;
                self.output.flush()?;
                handlers::news(self.state, &query).await
            }
            Route::Chat(message) => handlers::chat(self.state, &message).await,
        }
    }

    fn render(&mut self, reply: &Reply) -> Result<()> {
        match reply {
            Reply::Goodbye => writeln!(self.output, "{}", GOODBYE)?,
            Reply::NoNews => writeln!(self.output, "{}", NO_NEWS)?,
            Reply::NewsSummary(summary) => {
                writeln!(self.output, "\n{}\n", NEWS_HEADER)?;
                writeln!(self.output, "{}", summary)?;
            }
            Reply::Answer(text) => writeln!(self.output, "AI: {}", text)?,
        }
        self.output.flush()?;
        Ok(())
    }
}
