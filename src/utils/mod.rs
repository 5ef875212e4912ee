pub mod data_uri;
pub mod sanitize_key;
pub mod sounds_script;
