use crate::commands::QueryArgs;
use crate::error::{Error, LogsError};
use crate::runner::{Runnable, Runner};
use crate::window::{DayAnchor, Span, SpanUnit, WindowMode};

#[derive(clap::Args, Clone)]
pub(crate) struct RelativeCommand {
    #[command(flatten)]
    args: QueryArgs,

    /// Window length: an integer followed by m, h, d or w (e.g. 30m, 6h, 2w)
    #[arg(short, long, default_value = "5m", conflicts_with = "amount")]
    window: String,

    /// Window length as a plain integer, used together with --unit
    #[arg(short, long, requires = "unit")]
    amount: Option<u64>,

    /// Unit of --amount
    #[arg(short, long, value_enum, requires = "amount")]
    unit: Option<SpanUnit>,

    /// End the window on a day of this month (full English name).
    /// Defaults to the current month when only --day is given.
    #[arg(short, long)]
    month: Option<String>,

    /// End the window on this day of the month.
    /// Defaults to today when only --month is given.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=31))]
    day: Option<u32>,

    /// Which instant of the chosen day ends the window
    #[arg(long, value_enum, default_value_t = DayAnchor::EndOfDay)]
    anchor: DayAnchor,
}

impl RelativeCommand {
    pub fn args(&self) -> &QueryArgs {
        &self.args
    }

    /// Pick the window mode from the options present
    ///
    /// Any of --month, --day or a non-default --anchor ends the window on a specific day.
    fn mode(&self) -> Result<WindowMode, LogsError> {
        let span = match (self.amount, self.unit) {
            (Some(amount), Some(unit)) => Span::new(amount, unit),
            _ => Span::parse(&self.window)?,
        };

        let month = self
            .month
            .clone()
            .filter(|month| !month.trim().eq_ignore_ascii_case("current"));

        if month.is_none() && self.day.is_none() && self.anchor == DayAnchor::EndOfDay {
            return Ok(WindowMode::Relative(span));
        }

        Ok(WindowMode::RelativeWithEnd {
            span,
            month,
            day: self.day,
            anchor: self.anchor,
        })
    }
}

impl Runnable for RelativeCommand {
    fn runner(&self) -> impl Runner {
        RelativeRunner {
            command: self.clone(),
        }
    }
}

struct RelativeRunner {
    command: RelativeCommand,
}

impl Runner for RelativeRunner {
    /// Fetch events of a window ending now or on the chosen day
    async fn run(&mut self) -> Result<(), Error> {
        let mode = self.command.mode().map_err(|e| self.failure(e))?;
        self.report(self.command.args(), &mode).await?;
        Ok(())
    }
}
