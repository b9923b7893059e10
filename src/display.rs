use chrono::{Datelike, Local, NaiveDate, Weekday};
use owo_colors::OwoColorize;

const LINE: &str = "__________________________________________________________________";

/// Terminal front end; the only place that knows about colors.
pub struct Ui {
    color: bool,
}

impl Ui {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn print_response(&self, message: &str) {
        println!("{}", format_separator(self.color));
        println!();
        println!("{message}");
        println!("{}", format_separator(self.color));
        println!();
    }

    pub fn print_error(&self, message: &str) {
        if self.color {
            self.print_response(&message.red().to_string());
        } else {
            self.print_response(message);
        }
    }

    pub fn print_cheer(&self, quote: &str) {
        if self.color {
            self.print_response(&quote.yellow().to_string());
        } else {
            self.print_response(quote);
        }
    }

    pub fn print_greeting(&self) {
        let today = Local::now().date_naive();
        self.print_response(&greeting(today));
    }
}

fn format_separator(color: bool) -> String {
    if color {
        LINE.dimmed().to_string()
    } else {
        LINE.to_string()
    }
}

pub fn corruption_message(count: usize, recovery_file: &str) -> String {
    let unit = if count == 1 {
        "corrupted line"
    } else {
        "corrupted lines"
    };
    format!("Ugh. I skipped {count} {unit}.\nCheck {recovery_file} for recovery.")
}

pub fn greeting(today: NaiveDate) -> String {
    let day_message = match today.weekday() {
        Weekday::Mon => "My namesake day. How... fitting.",
        Weekday::Tue => "Tuesday already feels like a decade.",
        Weekday::Wed => "Happy hump day. Not.",
        Weekday::Thu => "Thursday. Almost there. Allegedly.",
        Weekday::Fri => "Friday. Finally. Don't get excited.",
        Weekday::Sat => "Weekend work? Cute.",
        Weekday::Sun => "Sunday scaries already? I live here.",
    };
    format!(
        "Ugh. It's Monday. Unhelpful, unwilling, and exactly what you deserve.\n\n\
         Today is {}\n\n{day_message}\n\n\
         Type 'help' for how to use this app. (It's cute that you think it'll work.)",
        today.format("%A, %-d %B %Y")
    )
}
