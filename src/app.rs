use clap::{CommandFactory, Parser};
use clap_complete::generate;
use std::io::{self, BufRead, IsTerminal};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::display::{Ui, corruption_message};
use crate::executor::{Executor, Outcome};
use crate::model::AppConfig;
use crate::parser::parse;
use crate::storage::{LoadResult, Storage, default_data_dir, load_cheers, load_config};
use crate::task_list::TaskList;

/// What the front end should show after one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Response(String),
    Cheer(String),
    Error(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Response(text) | Reply::Cheer(text) | Reply::Error(text) => text,
        }
    }
}

/// One running conversation: the live task list and where it is saved.
pub struct Session {
    tasks: TaskList,
    storage: Storage,
    executor: Executor,
    corrupted_on_load: usize,
    read_only: bool,
    finished: bool,
}

impl Session {
    /// Loads the task file. A failed load is logged, leaves the list empty and
    /// keeps the session from saving over a file it never read.
    pub fn start(storage: Storage, cheers: Vec<String>) -> Self {
        let (LoadResult { tasks, corrupted }, read_only) = match storage.load() {
            Ok(result) => (result, false),
            Err(err) => {
                warn!("{err}");
                warn!("changes in this session will not be saved");
                (LoadResult::default(), true)
            }
        };
        if corrupted > 0 {
            info!("{corrupted} corrupted lines will be dropped on exit");
        }
        let executor = Executor::new()
            .with_save_on_exit(corrupted > 0)
            .with_cheers(cheers);
        Self {
            tasks,
            storage,
            executor,
            corrupted_on_load: corrupted,
            read_only,
            finished: false,
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn corrupted_on_load(&self) -> usize {
        self.corrupted_on_load
    }

    /// The startup warning about skipped lines, if there were any.
    pub fn corruption_notice(&self) -> Option<String> {
        (self.corrupted_on_load > 0).then(|| {
            let recovery = self.storage.corrupted_path();
            corruption_message(self.corrupted_on_load, &recovery.display().to_string())
        })
    }

    /// True when the task file could not be read at startup.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        let command = match parse(line) {
            Ok(command) => command,
            Err(err) => return Reply::Error(err.to_string()),
        };
        match self.executor.execute(command, &mut self.tasks) {
            Ok(outcome) => self.apply(outcome),
            Err(err) => Reply::Error(err.to_string()),
        }
    }

    /// End of input behaves like `bye`.
    pub fn finish(&mut self) -> Option<Reply> {
        if self.finished {
            return None;
        }
        Some(self.handle_line("bye"))
    }

    fn apply(&mut self, outcome: Outcome) -> Reply {
        if outcome.should_persist {
            self.save();
        }
        if outcome.should_exit {
            self.finished = true;
        }
        if outcome.is_cheer {
            Reply::Cheer(outcome.message)
        } else {
            Reply::Response(outcome.message)
        }
    }

    // A failed save is a warning, never a reason to stop.
    fn save(&self) {
        if self.read_only {
            debug!("skipping save of {}", self.storage.path().display());
            return;
        }
        if let Err(err) = self.storage.save(&self.tasks) {
            warn!("{err}");
        }
    }
}

pub fn run() {
    init_logging();
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let config = load_config(&data_dir);
    let file_name = cli.file.clone().unwrap_or_else(|| config.data_file.clone());
    let ui = Ui::new(resolve_color(&cli, &config));

    let storage = Storage::new(&data_dir, file_name);
    let mut session = Session::start(storage, load_cheers(&data_dir));

    if let Some(Commands::Exec { words }) = &cli.command {
        show_corruption(&ui, &session);
        show(&ui, &session.handle_line(&words.join(" ")));
        if !session.is_finished() && session.corrupted_on_load() > 0 {
            // Only the cleanup save matters here; no farewell for a one-shot command.
            let _ = session.finish();
        }
        return;
    }

    if config.greeting {
        ui.print_greeting();
    }
    show_corruption(&ui, &session);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("failed to read input: {err}");
                break;
            }
        };
        show(&ui, &session.handle_line(&line));
        if session.is_finished() {
            return;
        }
    }

    if let Some(reply) = session.finish() {
        show(&ui, &reply);
    }
}

fn show(ui: &Ui, reply: &Reply) {
    match reply {
        Reply::Response(text) => ui.print_response(text),
        Reply::Cheer(text) => ui.print_cheer(text),
        Reply::Error(text) => ui.print_error(text),
    }
}

fn show_corruption(ui: &Ui, session: &Session) {
    if let Some(notice) = session.corruption_notice() {
        ui.print_error(&notice);
    }
}

fn resolve_color(cli: &Cli, config: &AppConfig) -> bool {
    if cli.no_color {
        return false;
    }
    config.color && io::stdout().is_terminal()
}

fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "monday=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}
