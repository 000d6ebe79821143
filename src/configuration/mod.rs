pub mod command_line;
pub mod constants;
pub mod deserialize;
pub mod journal;
pub mod settings;
