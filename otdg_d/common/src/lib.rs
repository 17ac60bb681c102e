pub use api::{Hand, Orientation, SignEntry};

mod config;
mod dictionary;
mod matcher;
mod orientation;

pub use config::{ContactBackend, ParserConfig};
pub use dictionary::{DictionaryError, SignDictionary};
pub use matcher::{find_matches, scan, LogSink, RecognitionSink};
pub use orientation::OrientationCell;
