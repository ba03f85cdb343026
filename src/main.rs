//! Shyft main entrypoint.

use shyft::run;

fn main() {
    if let Err(e) = run() {
        shyft::ui::messages::error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
