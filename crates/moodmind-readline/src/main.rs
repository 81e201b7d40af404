use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;

use moodmind_core::script::{HELP_KEYS, ScriptCatalog, builtin_strings};
use moodmind_core::session::MessageRole;
use moodmind_core::{AppConfig, Locale, MoodmindError};
use moodmind_interaction::voice::{LocaleSynthesizer, markup};
use moodmind_interaction::{SessionController, SessionEvent, Submission};

mod console_voice;

use console_voice::{ConsoleFallback, ConsoleSpeech, UnsupportedRecognizer};

const COMMANDS: &[&str] = &[
    "/start",
    "/listen",
    "/replay",
    "/stop",
    "/reset",
    "/lang",
    "/help",
    "/transcript",
    "/export",
];

#[derive(Parser, Debug)]
#[command(name = "moodmind")]
#[command(about = "MoodMind - interactive depression screening dialogue", long_about = None)]
struct Args {
    /// Session locale (id or en), overrides the config file
    #[arg(long)]
    locale: Option<String>,

    /// Path to config.toml (default: ~/.config/moodmind/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not speak assistant turns
    #[arg(long)]
    mute: bool,
}

/// Line editor helper: completes commands and `/lang` codes, hints the
/// locale argument and colors known commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<&'static str>,
    locales: Vec<&'static str>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.to_vec(),
            locales: Locale::all().into_iter().map(Locale::code).collect(),
        }
    }

    /// Replacement start and candidates for the text before the cursor.
    fn candidates(&self, line: &str) -> (usize, Vec<&'static str>) {
        if let Some(code) = line.strip_prefix("/lang ") {
            let code = code.trim_start();
            let start = line.len() - code.len();
            let codes = self.locales.iter().copied().filter(|c| c.starts_with(code)).collect();
            return (start, codes);
        }
        if line.starts_with('/') && !line.contains(' ') {
            let names = self.commands.iter().copied().filter(|c| c.starts_with(line)).collect();
            return (0, names);
        }
        (0, Vec::new())
    }

    fn hint_for(&self, line: &str) -> Option<String> {
        if line == "/lang " {
            return Some(self.locales.join("|"));
        }
        let (start, candidates) = self.candidates(line);
        let typed = &line[start..];
        match candidates.as_slice() {
            [only] if only.len() > typed.len() => Some(only[typed.len()..].to_string()),
            [first, ..] if start == 0 && first.len() > typed.len() => {
                Some(first[typed.len()..].to_string())
            }
            _ => None,
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.candidates(&line[..pos]);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: candidate.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !line.starts_with('/') {
            return Borrowed(line);
        }
        let (name, rest) = line.split_at(line.find(' ').unwrap_or(line.len()));
        if self.commands.iter().any(|cmd| *cmd == name) {
            Owned(format!("{}{}", name.bright_cyan(), rest))
        } else {
            Owned(line.red().to_string())
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, line: &str, _pos: usize, _forced: bool) -> bool {
        line.starts_with('/')
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.hint_for(line)
    }
}

impl Validator for CliHelper {}

/// A parsed REPL line.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Start,
    Listen,
    Replay,
    Stop,
    Reset,
    Lang(Option<String>),
    Help,
    Transcript,
    Export,
    Quit,
    Answer(String),
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed == "quit" || trimmed == "exit" {
            return Command::Quit;
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Answer(trimmed.to_string());
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        match name {
            "start" => Command::Start,
            "listen" => Command::Listen,
            "replay" => Command::Replay,
            "stop" => Command::Stop,
            "reset" => Command::Reset,
            "lang" => Command::Lang(parts.next().map(str::to_string)),
            "help" => Command::Help,
            "transcript" => Command::Transcript,
            "export" => Command::Export,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_assistant(text: &str) {
    for line in markup::plain_text(text).lines() {
        println!("{}", line.bright_blue());
    }
}

fn print_help(locale: Locale) {
    let strings = builtin_strings(locale);
    for key in HELP_KEYS {
        if let Some(text) = strings.text(key) {
            println!("{}", text.bright_black());
        }
    }
    println!();
    println!(
        "{}",
        "Commands: /start /listen /replay /stop /reset /lang <id|en> /help /transcript /export, quit"
            .bright_black()
    );
    println!("{}", "Any other input is sent as your answer.".bright_black());
}

fn report_error(err: &MoodmindError) {
    if err.is_soft() {
        println!("{}", err.to_string().yellow());
    } else {
        eprintln!("{}", format!("Error: {}", err).red());
    }
}

fn submit_answer(controller: &mut SessionController, answer: &str) {
    match controller.submit(answer) {
        Ok(Submission::NoOp) => {}
        Ok(Submission::Accepted(outcome)) => {
            if let Some(next) = &outcome.next_assistant_text {
                print_assistant(next);
            }
            if outcome.finished {
                println!();
                println!(
                    "{}",
                    format!("Session finished (score {}). Type /reset to start over.", outcome.score)
                        .bright_green()
                );
            }
        }
        Err(e) if e.is_out_of_sequence() => {
            println!("{}", "No question is waiting for an answer. Type /start to begin.".yellow());
        }
        Err(e) => report_error(&e),
    }
}

/// The main entry point for the MoodMind REPL.
///
/// 1. Loads the configuration and installs the tracing subscriber
/// 2. Builds the script catalog and the console voice port
/// 3. Spawns an event printer for asynchronous voice events
/// 4. Runs the rustyline loop, feeding commands and answers to the controller
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // ===== Configuration =====
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(code) = &args.locale {
        config.locale = Locale::parse(code)?;
    }
    init_tracing(&config);

    // ===== Backend Initialization =====
    let catalog = Arc::new(ScriptCatalog::with_thresholds(config.screening)?);
    let synthesizer = LocaleSynthesizer::new(Arc::new(ConsoleSpeech::new(&config.speech.voices)))
        .with_fallback(Arc::new(ConsoleFallback::new(config.speech.fallback_voice.clone())));

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<SessionEvent>();
    let mut controller = SessionController::new(
        catalog,
        config.locale,
        Arc::new(UnsupportedRecognizer),
        Arc::new(synthesizer),
        event_tx,
    )
    .with_voice(config.speech.enabled && !args.mute);

    tracing::debug!(
        "[moodmind] Session {} ready: locale={}, voice={}",
        controller.session_id(),
        controller.locale(),
        controller.voice_enabled()
    );

    // Spawn event printer
    let event_printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                SessionEvent::PartialTranscript { text } => {
                    println!("{}", format!("  … {}", text).dimmed());
                }
                SessionEvent::RecognitionError { kind, message } => {
                    println!("{}", format!("Microphone: {} ({})", message, kind).yellow());
                }
                SessionEvent::SynthesisUnavailable { locale } => {
                    println!(
                        "{}",
                        format!("No voice available for '{}', showing text only.", locale).yellow()
                    );
                }
                SessionEvent::SpeakingChanged { speaking } => {
                    tracing::trace!("[moodmind] speaking={}", speaking);
                }
            }
        }
    });

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    let strings = builtin_strings(controller.locale());
    println!("{}", "=== MoodMind ===".bright_magenta().bold());
    if let Some(description) = strings.text("description") {
        println!("{}", description.bright_black());
    }
    println!(
        "{}",
        "Type '/start' to begin, '/help' for help, or 'quit' to exit.".bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        controller.pump_recognition();
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match Command::parse(&line) {
                    Command::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Command::Start => match controller.start() {
                        Ok(outcome) => print_assistant(&outcome.initial_turn_text),
                        Err(e) if e.is_out_of_sequence() => {
                            println!("{}", "A session is already running. Type /reset first.".yellow());
                        }
                        Err(e) => report_error(&e),
                    },
                    Command::Listen => {
                        let listening = controller.toggle_listening();
                        controller.pump_recognition();
                        if listening {
                            println!("{}", "Listening... type /listen again to stop.".bright_black());
                        } else if let Some(draft) = controller.take_draft() {
                            println!("{}", format!("> {}", draft).green());
                            submit_answer(&mut controller, &draft);
                        }
                    }
                    Command::Replay => {
                        if controller.replay_last().is_none() {
                            println!("{}", "Nothing to replay yet.".bright_black());
                        }
                    }
                    Command::Stop => controller.stop_speaking(),
                    Command::Reset => {
                        controller.reset();
                        println!("{}", "Session reset.".bright_black());
                    }
                    Command::Lang(None) => {
                        println!("{}", format!("Current locale: {}", controller.locale()).bright_black());
                    }
                    Command::Lang(Some(code)) => {
                        match Locale::parse(&code).and_then(|locale| controller.change_locale(locale)) {
                            Ok(()) => println!(
                                "{}",
                                format!("Locale set to '{}'.", controller.locale()).bright_black()
                            ),
                            Err(e) if e.is_locale_locked() => println!(
                                "{}",
                                "The language cannot change during a session. Type /reset first."
                                    .yellow()
                            ),
                            Err(e) => report_error(&e),
                        }
                    }
                    Command::Help => print_help(controller.locale()),
                    Command::Transcript => {
                        for entry in controller.snapshot().transcript {
                            match entry.role {
                                MessageRole::Assistant => print_assistant(&entry.text),
                                MessageRole::User => println!("{}", format!("> {}", entry.text).green()),
                            }
                        }
                    }
                    Command::Export => match serde_json::to_string_pretty(&controller.snapshot()) {
                        Ok(json) => println!("{}", json),
                        Err(e) => eprintln!("{}", format!("Export failed: {}", e).red()),
                    },
                    Command::Answer(answer) => submit_answer(&mut controller, &answer),
                    Command::Unknown(input) => {
                        println!("{}", format!("Unknown command: {}", input).bright_black());
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    // Dropping the controller closes the event channel
    drop(controller);
    let _ = timeout(Duration::from_millis(500), event_printer).await;

    Ok(())
}
