pub mod by_major;
pub mod by_undergraduate;
pub mod directory;
pub mod import;
pub mod options;
pub mod plan;
pub mod school_total;
pub mod search;
pub mod status;
pub mod subjects;

use crate::resolver::ApiResponse;

/// Print the JSON envelope every query command emits on stdout.
pub fn print_response(response: &ApiResponse) {
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Failed to serialize response: {err}");
            println!(r#"{{"success":false,"error":"failed to serialize response"}}"#);
        }
    }
}
