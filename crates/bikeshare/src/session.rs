//! Interactive prompt → load → report → raw rows → restart loop.
//!
//! Generic over its input and output so tests can drive it with in-memory
//! buffers. End of input at any prompt ends the session cleanly.

use std::io::{self, BufRead, Write};

use bikeshare_core::models::{City, FilterSpec, TripTable};
use bikeshare_core::settings::{PresetFilters, Settings};
use bikeshare_core::validation::{validate, Answer, Choice, DayChoice, MonthChoice};
use bikeshare_data::analysis::analyze_trips;
use bikeshare_data::loader::TripLoader;
use bikeshare_data::paginator::Paginator;
use bikeshare_ui::raw_view::render_raw_page;
use bikeshare_ui::report_view::{render_report, render_report_json};
use tracing::{debug, error, info};

const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
const CITY_PROMPT: &str = "Would you like to see data for Chicago, New York City, or Washington?";
const MONTH_PROMPT: &str =
    "Which month? January, February, March, April, May, June, or all?";
const DAY_PROMPT: &str =
    "Which day? Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday, or all?";
const RESTART_PROMPT: &str = "Would you like to restart? Enter yes or no.";

/// Session behaviour taken from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub page_size: usize,
    pub json: bool,
    pub once: bool,
    /// Filters supplied as flags; they replace the prompts on the first pass.
    pub presets: PresetFilters,
}

impl SessionOptions {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self {
            page_size: settings.page_size as usize,
            json: settings.wants_json(),
            once: settings.once,
            presets: settings.preset_filters()?,
        })
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            page_size: bikeshare_data::paginator::DEFAULT_PAGE_SIZE,
            json: false,
            once: false,
            presets: PresetFilters::default(),
        }
    }
}

/// Whether the user is still there after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    EndOfInput,
}

pub struct Session<'a, R, W> {
    loader: &'a TripLoader,
    options: SessionOptions,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(loader: &'a TripLoader, options: SessionOptions, input: R, output: W) -> Self {
        Self {
            loader,
            options,
            input,
            output,
        }
    }

    /// Run iterations until the user declines a restart, `--once` is set, or
    /// input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "{GREETING}")?;

        let mut presets = self.options.presets;
        let mut iteration = 0u32;
        loop {
            iteration += 1;
            let Some((city, spec)) = self.choose_filters(presets)? else {
                debug!("Input ended while choosing filters");
                break;
            };
            presets = PresetFilters::default();

            info!("Iteration {iteration}: {city} ({spec})");
            if self.explore(city, &spec)? == Flow::EndOfInput {
                break;
            }

            if self.options.once || !self.confirm_restart()? {
                break;
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    fn choose_filters(
        &mut self,
        presets: PresetFilters,
    ) -> io::Result<Option<(City, FilterSpec)>> {
        let city = match presets.city {
            Some(city) => city,
            None => match self.ask::<City>(CITY_PROMPT)? {
                Some(city) => city,
                None => return Ok(None),
            },
        };
        let month = match presets.month {
            Some(month) => month,
            None => match self.ask::<MonthChoice>(MONTH_PROMPT)? {
                Some(month) => month,
                None => return Ok(None),
            },
        };
        let day = match presets.day {
            Some(day) => day,
            None => match self.ask::<DayChoice>(DAY_PROMPT)? {
                Some(day) => day,
                None => return Ok(None),
            },
        };
        let spec = FilterSpec::new(month.0, day.0);
        if presets.is_complete() {
            writeln!(self.output, "Filters from the command line: {city} ({spec})")?;
        }
        writeln!(self.output, "{}", "-".repeat(40))?;
        Ok(Some((city, spec)))
    }

    /// Load, report and page through one filtered table.
    ///
    /// A load failure is shown to the user and ends only this iteration.
    fn explore(&mut self, city: City, spec: &FilterSpec) -> anyhow::Result<Flow> {
        let table = match self.loader.load(city, spec) {
            Ok(table) => table,
            Err(err) => {
                error!("Failed to load {city} data: {err}");
                writeln!(self.output, "Could not load {city} data: {err}")?;
                return Ok(Flow::Continue);
            }
        };

        let analysis = analyze_trips(&table);
        let report = if self.options.json {
            render_report_json(&analysis, spec)?
        } else {
            render_report(&analysis, spec)
        };
        writeln!(self.output, "{report}")?;

        self.show_raw_rows(&table)
    }

    fn show_raw_rows(&mut self, table: &TripTable) -> anyhow::Result<Flow> {
        let mut pages = Paginator::new(table, self.options.page_size)?;
        if pages.len() == 0 {
            writeln!(self.output, "No raw data to display.")?;
            return Ok(Flow::Continue);
        }

        let mut prompt = format!(
            "Would you like to see {} lines of raw data? Enter yes or no.",
            pages.page_size()
        );
        loop {
            match self.ask::<Answer>(&prompt)? {
                None => return Ok(Flow::EndOfInput),
                Some(Answer::No) => return Ok(Flow::Continue),
                Some(Answer::Yes) => {}
            }

            let first_index = pages.position();
            if let Some(page) = pages.next() {
                let page_number = first_index / pages.page_size() + 1;
                writeln!(self.output, "Page {page_number} of {}", pages.page_count())?;
                write!(self.output, "{}", render_raw_page(page, first_index, table.city()))?;
            }
            if pages.rows_remaining() == 0 {
                writeln!(self.output, "No more raw data to display.")?;
                return Ok(Flow::Continue);
            }
            prompt = format!(
                "Would you like to see {} more lines? Enter yes or no.",
                pages.page_size()
            );
        }
    }

    /// Anything other than yes/y ends the session.
    fn confirm_restart(&mut self) -> io::Result<bool> {
        writeln!(self.output, "{RESTART_PROMPT}")?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(false);
        };
        Ok(matches!(validate::<Answer>(&line), Ok(Answer::Yes)))
    }

    /// Prompt until the answer validates. `None` on end of input.
    fn ask<T: Choice>(&mut self, prompt: &str) -> io::Result<Option<T>> {
        loop {
            writeln!(self.output, "{prompt}")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match validate::<T>(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => {
                    debug!("Rejected {} answer: {}", T::KIND, line.trim());
                    writeln!(self.output, "{err}")?;
                }
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
