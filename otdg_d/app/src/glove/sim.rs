use super::{Contact, ContactBank, GloveError};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct SimState {
    levels: [bool; 12],
    acquired: bool,
    fail_acquire: bool,
    fail_reads: usize,
    releases: usize,
}

/// In-memory contact bank for hosts without the glove. Clones share one
/// state, so a test (or a demo driver) can flip pads and inject faults
/// while the sampling loop holds the bank.
#[derive(Clone, Default)]
pub struct SimContactBank {
    state: Arc<Mutex<SimState>>,
}

impl SimContactBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the logical engaged state of one pad.
    pub fn set_contact(&self, contact: Contact, engaged: bool) {
        self.state.lock().unwrap().levels[contact.idx()] = engaged;
    }

    /// Makes the next `count` reads fail with a read error.
    pub fn fail_reads(&self, count: usize) {
        self.state.lock().unwrap().fail_reads = count;
    }

    /// Makes `acquire` fail.
    pub fn fail_acquire(&self, fail: bool) {
        self.state.lock().unwrap().fail_acquire = fail;
    }

    /// How many times `release` has been called.
    pub fn release_count(&self) -> usize {
        self.state.lock().unwrap().releases
    }

    pub fn is_acquired(&self) -> bool {
        self.state.lock().unwrap().acquired
    }
}

impl ContactBank for SimContactBank {
    fn acquire(&mut self) -> Result<(), GloveError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_acquire {
            return Err(GloveError::Acquire {
                line: Contact::Pinky.line(),
                reason: "simulated acquisition failure".to_string(),
            });
        }
        state.acquired = true;
        Ok(())
    }

    fn read_contact(&mut self, contact: Contact) -> Result<bool, GloveError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_reads > 0 {
            state.fail_reads -= 1;
            return Err(GloveError::Read {
                line: contact.line(),
                reason: "simulated read failure".to_string(),
            });
        }
        Ok(state.levels[contact.idx()])
    }

    fn release(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.acquired = false;
        state.releases += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let bank = SimContactBank::new();
        let mut handle: Box<dyn ContactBank> = Box::new(bank.clone());
        bank.set_contact(Contact::Thumb, true);
        assert!(handle.read_contact(Contact::Thumb).unwrap());
        assert!(!handle.read_contact(Contact::Pinky).unwrap());
    }

    #[test]
    fn release_is_idempotent_and_counted() {
        let bank = SimContactBank::new();
        let mut handle = bank.clone();
        handle.acquire().unwrap();
        handle.release();
        handle.release();
        assert_eq!(bank.release_count(), 2);
        assert!(!bank.is_acquired());
    }

    #[test]
    fn injected_read_faults_are_one_shot() {
        let bank = SimContactBank::new();
        let mut handle = bank.clone();
        bank.fail_reads(1);
        assert!(handle.read_contact(Contact::Ring).is_err());
        assert!(handle.read_contact(Contact::Ring).is_ok());
    }

    #[test]
    fn acquire_failure_is_typed() {
        let bank = SimContactBank::new();
        let mut handle = bank.clone();
        bank.fail_acquire(true);
        assert!(matches!(
            handle.acquire(),
            Err(GloveError::Acquire { .. })
        ));
    }
}
