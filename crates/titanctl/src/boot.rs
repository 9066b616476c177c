//! Boot banner and prompt

use crate::animator::Script;
use owo_colors::OwoColorize;
use std::time::Duration;
use titan_common::Role;

const DOT_INTERVAL: Duration = Duration::from_millis(300);

/// `<role>@<host>:~$ ` in the role's colour
pub fn prompt(role: Role, hostname: &str) -> String {
    let tag = format!("{}@{}", role, hostname);
    let tag = match role {
        Role::Admin => tag.red().bold().to_string(),
        Role::Builder => tag.cyan().bold().to_string(),
        Role::Guest => tag.green().bold().to_string(),
    };
    format!("{}:{}$ ", tag, "~".yellow())
}

fn system(text: &str) -> String {
    format!("{} {}", "[SYSTEM]".yellow(), text)
}

fn ok(text: &str) -> String {
    format!("{} {}\r\n", "[OK]".green(), text)
}

/// Teletype start-up sequence, ending at the first prompt
pub fn boot_script(hostname: &str, char_delay: Duration) -> Script {
    let ms = Duration::from_millis;
    Script::new()
        .type_text(
            system(&format!("INITIALIZING {} SECURE UPLINK...\r\n", hostname)),
            ms(20),
        )
        .pause(ms(300))
        .type_text(system("VERIFYING BIOMETRICS"), ms(20))
        .pause(DOT_INTERVAL)
        .write(".")
        .pause(DOT_INTERVAL)
        .write(".")
        .pause(DOT_INTERVAL)
        .write(".\r\n")
        .type_text(ok("RETINAL SCAN MATCH: GUEST"), ms(10))
        .pause(ms(200))
        .type_text(ok("ESTABLISHING ENCRYPTED TUNNEL TO R.A.I.S.A...."), ms(10))
        .pause(ms(600))
        .type_text(ok("CONNECTION ESTABLISHED."), ms(5))
        .write("\r\n")
        .type_text(
            format!(
                "Welcome to the {} Alpha Detachment External Interface.\r\n",
                hostname
            ),
            char_delay,
        )
        .type_text(
            format!("Type {} for available commands.\r\n", "help".yellow().bold()),
            char_delay,
        )
        .write("\r\n")
        .prompt()
}
