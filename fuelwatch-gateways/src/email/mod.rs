pub mod mailgun;
pub mod send_to_json_file;
