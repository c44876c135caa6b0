//! emstrack main entrypoint.

use emstrack::run;
use emstrack::ui::messages;

fn main() {
    println!();
    if let Err(e) = run() {
        messages::error(e);
        std::process::exit(1);
    }
}
