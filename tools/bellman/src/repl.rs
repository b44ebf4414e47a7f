//! Interactive alarm shell
//!
//! mysql-cli style REPL over the alarm registry, with Tab completion for
//! command names and weekday arguments. Every command is synchronous; the
//! reconciliation loop keeps ticking on the runtime underneath.

use anyhow::{Context, Result};
use chime_alarms::{
    weekday_name, AlarmId, AlarmRegistry, AlarmScheduler, AlarmSnapshot, Clock, SystemClock,
    MAX_SNOOZES,
};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};
use std::path::Path;

// ============================================================================
// Tab Completion Helper
// ============================================================================

/// REPL helper providing Tab completion for commands and weekdays
struct BellHelper;

impl Helper for BellHelper {}

impl Hinter for BellHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for BellHelper {}

impl Validator for BellHelper {}

impl Completer for BellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        // 1. Command completion (no space yet)
        if !line.contains(' ') {
            return Ok(complete_command(line));
        }

        // 2. Weekday completion for the day argument of ADD/DEL/SNOOZE
        let parts: Vec<&str> = line.split_whitespace().collect();
        if let Some(cmd) = parts.first() {
            let cmd = cmd.to_uppercase();
            if matches!(cmd.as_str(), "ADD" | "DEL" | "DELETE" | "SNOOZE") {
                let typing_third = parts.len() == 3 && !line.ends_with(' ');
                let starting_third = parts.len() == 2 && line.ends_with(' ');
                if typing_third || starting_third {
                    let prefix = if starting_third { "" } else { parts[2] };
                    let start = line.len() - prefix.len();
                    return Ok(complete_weekday(prefix, start));
                }
            }
        }

        Ok((pos, vec![]))
    }
}

/// Complete command names
fn complete_command(prefix: &str) -> (usize, Vec<Pair>) {
    let commands = [
        "ADD", "DEL", "SNOOZE", "RESET", "LIST", "NOW", "CHECK", "STATUS", "HELP", "QUIT",
    ];
    let prefix_upper = prefix.to_uppercase();

    let matches: Vec<Pair> = commands
        .iter()
        .filter(|cmd| cmd.starts_with(&prefix_upper))
        .map(|cmd| Pair {
            display: (*cmd).to_string(),
            replacement: (*cmd).to_string(),
        })
        .collect();

    (0, matches)
}

/// Complete weekday names
fn complete_weekday(prefix: &str, start_pos: usize) -> (usize, Vec<Pair>) {
    let days = [
        "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    ];
    let prefix_lower = prefix.to_lowercase();

    let matches: Vec<Pair> = days
        .iter()
        .filter(|day| day.starts_with(&prefix_lower))
        .map(|day| Pair {
            display: (*day).to_string(),
            replacement: (*day).to_string(),
        })
        .collect();

    (start_pos, matches)
}

// ============================================================================
// REPL loop
// ============================================================================

/// Interactive REPL loop
pub fn run(
    registry: &AlarmRegistry,
    scheduler: &AlarmScheduler,
    history: Option<&Path>,
) -> Result<()> {
    let config = rustyline::Config::builder()
        .completion_type(rustyline::CompletionType::List)
        .build();
    let mut rl: Editor<BellHelper, DefaultHistory> =
        Editor::with_config(config).context("Failed to initialize readline")?;
    rl.set_helper(Some(BellHelper));
    if let Some(path) = history {
        // a missing history file just means a fresh session
        let _ = rl.load_history(path);
    }

    println!("{}", "Bellman Alarm Shell".bright_cyan().bold());
    println!(
        "Type '{}' for commands, {} for completion\n",
        "help".bright_yellow(),
        "Tab".bright_cyan()
    );

    loop {
        match rl.readline("bellman> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                // Add to history (ignore errors)
                let _ = rl.add_history_entry(line);

                match execute_command(registry, scheduler, line) {
                    Ok(true) => continue, // Normal command, continue REPL
                    Ok(false) => break,   // QUIT command
                    Err(e) => eprintln!("{} {}", "Error:".red(), e),
                }
            },
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C - ignore and continue
                println!("^C");
                continue;
            },
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                break;
            },
            Err(e) => {
                eprintln!("{} {}", "Readline error:".red(), e);
                break;
            },
        }
    }

    if let Some(path) = history {
        let _ = rl.save_history(path);
    }
    println!("Bye!");
    Ok(())
}

/// Execute a single REPL command
/// Returns Ok(true) to continue, Ok(false) to quit
fn execute_command(registry: &AlarmRegistry, scheduler: &AlarmScheduler, input: &str) -> Result<bool> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let cmd = parts.first().map(|s| s.to_uppercase());

    match cmd.as_deref() {
        Some("ADD") => match parts.as_slice() {
            [_, time, day] => {
                registry.add_alarm(time, day)?;
            },
            _ => println!("Usage: ADD <HH:MM> <day>"),
        },
        Some("DEL") | Some("DELETE") => match parts.as_slice() {
            [_, id] => {
                let id: AlarmId = id.parse()?;
                registry.remove(&id);
            },
            [_, time, day] => match registry.find_alarm_by_time_day(time, day)? {
                Some(found) => {
                    registry.remove(&found.id);
                },
                None => println!("Alarm not found."),
            },
            _ => println!("Usage: DEL <id> | DEL <HH:MM> <day>"),
        },
        Some("SNOOZE") => match parts.as_slice() {
            [_, id] => {
                let id: AlarmId = id.parse()?;
                registry.snooze(&id);
            },
            [_, time, day] => {
                if registry.snooze_alarm_by_time_day(time, day)?.is_none() {
                    println!("No alarm found for {time} on {day}.");
                }
            },
            _ => println!("Usage: SNOOZE <id> | SNOOZE <HH:MM> <day>"),
        },
        Some("RESET") => match parts.as_slice() {
            [_, id] => {
                let id: AlarmId = id.parse()?;
                if registry.reset_snooze(&id) {
                    println!("Snooze state cleared for {id}");
                } else {
                    println!("Alarm not found.");
                }
            },
            _ => println!("Usage: RESET <id>"),
        },
        Some("LIST") => {
            let json = parts.get(1).is_some_and(|flag| *flag == "--json");
            print_alarms(&registry.list(), json)?;
        },
        Some("NOW") => {
            let now = SystemClock.now();
            println!("Current time: {} on {}", now.time, weekday_name(now.day));
        },
        Some("CHECK") => {
            if scheduler.check_now().is_empty() {
                println!("No alarms due.");
            }
        },
        Some("STATUS") => {
            let status = scheduler.status();
            println!(
                "Scheduler: {} | alarms: {} ({} armed) | tick: {}s",
                if status.running {
                    "running".green()
                } else {
                    "stopped".red()
                },
                status.total_alarms,
                status.armed_alarms,
                status.tick_secs
            );
        },
        Some("HELP") | Some("?") => {
            print_help();
        },
        Some("QUIT") | Some("EXIT") | Some("Q") => {
            return Ok(false);
        },
        Some(unknown) => {
            println!(
                "Unknown command '{}'. Type '{}' for available commands.",
                unknown.red(),
                "help".bright_yellow()
            );
        },
        None => {},
    }

    Ok(true)
}

fn print_alarms(alarms: &[AlarmSnapshot], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(alarms)?);
        return Ok(());
    }
    if alarms.is_empty() {
        println!("No alarms registered.");
        return Ok(());
    }
    for alarm in alarms {
        let status = if alarm.active {
            "Active".green()
        } else {
            "Inactive".bright_black()
        };
        let time = if alarm.snooze_count > 0 {
            format!("{} (snoozed from {})", alarm.effective, alarm.scheduled)
        } else {
            alarm.effective.to_string()
        };
        println!(
            "ID: {} | Time: {} | Day: {} | Snoozes: {}/{} | {}",
            alarm.id,
            time,
            weekday_name(alarm.day),
            alarm.snooze_count,
            MAX_SNOOZES,
            status
        );
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  {}    Register an alarm", "ADD <HH:MM> <day>".bright_yellow());
    println!(
        "  {}   Delete by id, or by time and day",
        "DEL <id|HH:MM day>".bright_yellow()
    );
    println!(
        "  {} Push an alarm 5 minutes (max {} times)",
        "SNOOZE <id|HH:MM day>".bright_yellow(),
        MAX_SNOOZES
    );
    println!("  {}           Clear snooze state", "RESET <id>".bright_yellow());
    println!("  {}        Show alarms", "LIST [--json]".bright_yellow());
    println!("  {}                  Show current time", "NOW".bright_yellow());
    println!("  {}                Run a reconciliation pass now", "CHECK".bright_yellow());
    println!("  {}               Scheduler status", "STATUS".bright_yellow());
    println!("  {}                 Leave the shell", "QUIT".bright_yellow());
}
