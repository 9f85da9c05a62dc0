//! Version and usage output.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
Usage: cardstack [OPTIONS]

Options:
  --items N          Number of cards in the demo deck
  --visible K        Cards materialized at once
  --duration-ms MS   Shuffle animation duration in milliseconds
  --lock-x           Prevent horizontal dragging
  --lock-y           Prevent vertical dragging
  --overlay          Lift the dragged card into the overlay layer
  --missing a,b,c    Deck indices that have no content
  --config PATH      Config file (default ~/.cardstack/config.json)
  -V, --version      Print version
  -h, --help         Print this help

Keys:
  drag the front card with the mouse to shuffle it to the back
  Space skip card   Esc cancel drag   r reload   R reload from start
  +/- visible cards   a/d add/remove card   x/y toggle axis lock
  o toggle overlay   w save settings   q quit";

pub fn version_line() -> String {
    format!("cardstack {}", VERSION)
}

/// Handle the --version command.
pub fn handle_version_command() -> ! {
    println!("{}", version_line());
    std::process::exit(0)
}

/// Handle the --help command.
pub fn handle_help_command() -> ! {
    println!("{}\n\n{}", version_line(), USAGE);
    std::process::exit(0)
}
