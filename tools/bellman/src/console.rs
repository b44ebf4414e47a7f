//! Console notification sink

use chime_alarms::{AlarmEvent, Notifier};
use colored::Colorize;

/// Prints alarm events to stdout, the firing line highlighted
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, event: &AlarmEvent) {
        match event {
            AlarmEvent::Fired { .. } => {
                // leading newline so a firing mid-prompt stays readable
                println!("\n{}", event.to_string().bright_red().bold());
            },
            AlarmEvent::NotFound { .. } | AlarmEvent::SnoozeLimitReached { .. } => {
                println!("{}", event.to_string().yellow());
            },
            _ => println!("{event}"),
        }
    }
}
