mod check;
mod completions;
mod config;
mod info;
mod scan;
mod trust;
mod verify;

pub use check::{run_check, CheckArgs};
pub use completions::{run_completions, run_man};
pub use config::run_config;
pub use info::run_info;
pub use scan::run_scan;
pub use trust::run_trust;
pub use verify::{run_verify, VerifyArgs};
