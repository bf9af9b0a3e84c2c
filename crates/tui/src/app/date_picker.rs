use chrono::NaiveDate;
use chrono_tz::Tz;
use engine::DateRange;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerField {
    #[default]
    From,
    To,
}

/// The `From`/`To` form shown in place of the table.
#[derive(Debug, Default)]
pub struct DatePickerState {
    pub open: bool,
    pub from: String,
    pub to: String,
    pub focus: PickerField,
    pub message: Option<String>,
}

impl DatePickerState {
    /// Opens the form, prefilled with the active range if there is one.
    pub fn open(&mut self, current: Option<&DateRange>, tz: Tz) {
        self.open = true;
        self.focus = PickerField::From;
        self.message = None;
        match current {
            Some(range) => {
                self.from = format_day(range.start().with_timezone(&tz).date_naive());
                self.to = format_day(range.end().with_timezone(&tz).date_naive());
            }
            None => {
                self.from.clear();
                self.to.clear();
            }
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.message = None;
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            PickerField::From => PickerField::To,
            PickerField::To => PickerField::From,
        };
    }

    fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            PickerField::From => &mut self.from,
            PickerField::To => &mut self.to,
        }
    }

    /// Only digits and `-` are accepted, up to `YYYY-MM-DD` length.
    pub fn push(&mut self, ch: char) {
        if !(ch.is_ascii_digit() || ch == '-') {
            return;
        }
        let field = self.active_field_mut();
        if field.len() < DATE_LEN {
            field.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        self.active_field_mut().pop();
    }

    /// Builds the range the form describes.
    ///
    /// An empty `To`, or `To` equal to `From`, selects that single day.
    pub fn range(&self, tz: Tz) -> Result<DateRange, String> {
        let from = self.from.trim();
        if from.is_empty() {
            return Err("Enter a start date (YYYY-MM-DD).".to_string());
        }
        let first = parse_day(from)?;

        let to = self.to.trim();
        if to.is_empty() {
            return Ok(DateRange::single_day(first, tz));
        }
        let last = parse_day(to)?;
        if first == last {
            return Ok(DateRange::single_day(first, tz));
        }

        DateRange::days(first, last, tz).map_err(|_| "End date is before start date.".to_string())
    }
}

fn parse_day(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| format!("Invalid date {input:?}, expected YYYY-MM-DD."))
}

fn format_day(day: NaiveDate) -> String {
    day.format(DATE_FORMAT).to_string()
}
