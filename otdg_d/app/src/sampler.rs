use crate::glove::{Contact, ContactBank, GloveError};
use crate::session::StopToken;
use common::{Hand, OrientationCell, RecognitionSink, SignDictionary};
use log::{info, warn};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SamplerSettings {
    pub period: Duration,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            period: Duration::from_millis(200),
        }
    }
}

/// Reads all twelve pads in fixed order plus the current orientation into
/// one immutable snapshot. The pads are read one after another, not as a
/// synchronized vector; a snapshot may straddle a pad change mid-sequence.
pub fn build_snapshot(
    bank: &mut dyn ContactBank,
    orientation: &OrientationCell,
) -> Result<Hand, GloveError> {
    Ok(Hand {
        pinky: bank.read_contact(Contact::Pinky)?,
        ring: bank.read_contact(Contact::Ring)?,
        middle: bank.read_contact(Contact::Middle)?,
        index: bank.read_contact(Contact::Index)?,
        thumb: bank.read_contact(Contact::Thumb)?,
        palm_left: bank.read_contact(Contact::PalmLeft)?,
        palm_right: bank.read_contact(Contact::PalmRight)?,
        back_thumb: bank.read_contact(Contact::BackThumb)?,
        back_ring: bank.read_contact(Contact::BackRing)?,
        betw_im: bank.read_contact(Contact::BetwIM)?,
        betw_mr: bank.read_contact(Contact::BetwMR)?,
        betw_rp: bank.read_contact(Contact::BetwRP)?,
        angle: orientation.get(),
        motion: String::new(),
        dom: true,
    })
}

/// The sampling loop. Checks the stop token at each tick boundary, builds
/// a snapshot, scans it against the dictionary, then sleeps for the
/// period. A hardware fault skips the tick and the next tick re-reads the
/// line; only the token ends the loop. The caller releases the bank after
/// this returns.
pub fn run(
    bank: &Mutex<Box<dyn ContactBank>>,
    orientation: &OrientationCell,
    dictionary: &Arc<SignDictionary>,
    sink: &Mutex<Box<dyn RecognitionSink>>,
    stop: &StopToken,
    settings: &SamplerSettings,
) {
    info!("pose sampling [STARTED]");
    while !stop.is_stopped() {
        let snapshot = {
            let mut bank = bank.lock().unwrap();
            build_snapshot(bank.as_mut(), orientation)
        };
        match snapshot {
            Ok(snapshot) => {
                let mut sink = sink.lock().unwrap();
                common::scan(&snapshot, dictionary.entries(), sink.as_mut());
            }
            Err(e) => warn!("tick skipped: {}", e),
        }
        std::thread::sleep(settings.period);
    }
    info!("pose sampling [STOPPED]");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glove::sim::SimContactBank;

    #[test]
    fn snapshot_reflects_pad_and_orientation_state() {
        let sim = SimContactBank::new();
        sim.set_contact(Contact::Index, true);
        sim.set_contact(Contact::BetwMR, true);
        let orientation = OrientationCell::new();
        orientation.set(common::Orientation {
            alpha: 12,
            beta: -3,
            gamma: 90,
        });

        let mut bank = sim.clone();
        let snapshot = build_snapshot(&mut bank, &orientation).unwrap();
        assert!(snapshot.index);
        assert!(snapshot.betw_mr);
        assert!(!snapshot.pinky);
        assert_eq!(snapshot.angle.alpha, 12);
        assert_eq!(snapshot.angle.gamma, 90);
        assert_eq!(snapshot.motion, "");
        assert!(snapshot.dom);
    }

    #[test]
    fn snapshot_fails_when_a_line_read_fails() {
        let sim = SimContactBank::new();
        sim.fail_reads(1);
        let mut bank = sim.clone();
        assert!(build_snapshot(&mut bank, &OrientationCell::new()).is_err());
    }
}
