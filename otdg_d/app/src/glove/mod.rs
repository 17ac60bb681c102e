pub mod sim;

#[cfg(target_os = "linux")]
pub mod gpio;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GloveError {
    #[error("failed to acquire contact line {line}: {reason}")]
    Acquire { line: u8, reason: String },
    #[error("failed to read contact line {line}: {reason}")]
    Read { line: u8, reason: String },
}

/// The twelve contact pads, in snapshot read order. The discriminant is
/// the BCM line the pad is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Contact {
    Pinky = 2,
    Ring = 3,
    Middle = 4,
    Index = 5,
    Thumb = 6,
    PalmLeft = 7,
    PalmRight = 8,
    BackThumb = 9,
    BackRing = 10,
    BetwIM = 11,
    BetwMR = 12,
    BetwRP = 13,
}

impl Contact {
    pub const ALL: [Contact; 12] = [
        Contact::Pinky,
        Contact::Ring,
        Contact::Middle,
        Contact::Index,
        Contact::Thumb,
        Contact::PalmLeft,
        Contact::PalmRight,
        Contact::BackThumb,
        Contact::BackRing,
        Contact::BetwIM,
        Contact::BetwMR,
        Contact::BetwRP,
    ];

    /// BCM line number.
    pub fn line(self) -> u8 {
        self as u8
    }

    pub(crate) fn idx(self) -> usize {
        self.line() as usize - 2
    }
}

/// A bank of twelve contact inputs. Acquired once when a session arms,
/// held for the whole session, released once when it stops.
pub trait ContactBank: Send {
    /// Claims all twelve lines and configures them for input. Called on
    /// the IDLE -> ARMING transition; an error here aborts the session
    /// before sampling starts.
    fn acquire(&mut self) -> Result<(), GloveError>;

    /// Returns the logical engaged state of one pad. A failure skips the
    /// current tick only.
    fn read_contact(&mut self, contact: Contact) -> Result<bool, GloveError>;

    /// Releases the lines. Must be idempotent; called again on process
    /// shutdown even if the session already released.
    fn release(&mut self);
}
