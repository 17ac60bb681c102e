use api::{Hand, SignEntry};
use log::{debug, info};

/// Consumer of per-entry recognition results. One call per dictionary
/// entry per tick, in dictionary order.
pub trait RecognitionSink: Send {
    fn matched(&mut self, id: &str);
    fn unmatched(&mut self, _id: &str) {}
}

/// Default sink: matches at info, non-matches at debug when verbose.
pub struct LogSink {
    pub verbose: bool,
}

impl RecognitionSink for LogSink {
    fn matched(&mut self, id: &str) {
        info!("{} [MATCH]", id);
    }

    fn unmatched(&mut self, id: &str) {
        if self.verbose {
            debug!("{} [NOT MATCHED]", id);
        }
    }
}

/// Compares `snapshot` against every entry in dictionary order and reports
/// each result through the sink. Equality is exact and structural across
/// all twelve contacts, the orientation triple, motion, and dominance; a
/// one-degree orientation difference is a non-match.
pub fn scan(snapshot: &Hand, entries: &[SignEntry], sink: &mut dyn RecognitionSink) {
    for entry in entries {
        if *snapshot == entry.hand {
            sink.matched(&entry.id);
        } else {
            sink.unmatched(&entry.id);
        }
    }
}

/// Returns the identifiers of every entry whose hand equals `snapshot`
/// exactly, in dictionary order.
pub fn find_matches<'a>(snapshot: &Hand, entries: &'a [SignEntry]) -> Vec<&'a str> {
    entries
        .iter()
        .filter(|entry| entry.hand == *snapshot)
        .map(|entry| entry.id.as_str())
        .collect()
}
