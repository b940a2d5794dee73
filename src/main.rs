//! rclocktray main entrypoint.

use rclocktray::run;
use rclocktray::ui::messages;

fn main() {
    if let Err(e) = run() {
        if e.is_misuse() {
            messages::warning(&e);
            std::process::exit(2);
        }
        messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
