use crate::commands::QueryArgs;
use crate::error::Error;
use crate::runner::{Runnable, Runner};
use crate::window::WindowMode;

#[derive(clap::Args, Clone)]
pub(crate) struct AbsoluteCommand {
    #[command(flatten)]
    args: QueryArgs,

    /// Start of the window, e.g. 2024-06-15T10:00:00Z
    #[arg(short, long)]
    start: Option<String>,

    /// End of the window, defaults to now
    #[arg(short, long)]
    end: Option<String>,
}

impl AbsoluteCommand {
    pub fn args(&self) -> &QueryArgs {
        &self.args
    }

    fn mode(&self) -> WindowMode {
        WindowMode::Absolute {
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }
}

impl Runnable for AbsoluteCommand {
    fn runner(&self) -> impl Runner {
        AbsoluteRunner {
            command: self.clone(),
        }
    }
}

struct AbsoluteRunner {
    command: AbsoluteCommand,
}

impl Runner for AbsoluteRunner {
    /// Fetch events between two fixed timestamps
    async fn run(&mut self) -> Result<(), Error> {
        // A missing start is reported by the resolver, together with other window errors
        self.report(self.command.args(), &self.command.mode()).await?;
        Ok(())
    }
}
