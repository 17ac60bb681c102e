use super::{Contact, ContactBank, GloveError};
use log::debug;
use rppal::gpio::{Gpio, InputPin};
use std::collections::HashMap;

/// Raspberry Pi GPIO backend. Pads are wired through pull-ups, so an
/// engaged pad pulls its line low; `invert` maps that back to a logical
/// true. The legacy harness reads the raw level instead.
pub struct GpioContactBank {
    invert: bool,
    pins: HashMap<u8, InputPin>,
}

impl GpioContactBank {
    pub fn new(invert: bool) -> Self {
        Self {
            invert,
            pins: HashMap::new(),
        }
    }
}

impl ContactBank for GpioContactBank {
    fn acquire(&mut self) -> Result<(), GloveError> {
        let gpio = Gpio::new().map_err(|e| GloveError::Acquire {
            line: Contact::Pinky.line(),
            reason: e.to_string(),
        })?;
        for contact in Contact::ALL {
            let pin = gpio
                .get(contact.line())
                .map_err(|e| GloveError::Acquire {
                    line: contact.line(),
                    reason: e.to_string(),
                })?
                .into_input_pullup();
            self.pins.insert(contact.line(), pin);
        }
        debug!("acquired {} contact lines", self.pins.len());
        Ok(())
    }

    fn read_contact(&mut self, contact: Contact) -> Result<bool, GloveError> {
        let pin = self.pins.get(&contact.line()).ok_or(GloveError::Read {
            line: contact.line(),
            reason: "line not acquired".to_string(),
        })?;
        Ok(if self.invert {
            pin.is_low()
        } else {
            pin.is_high()
        })
    }

    fn release(&mut self) {
        if !self.pins.is_empty() {
            debug!("releasing contact lines");
            self.pins.clear();
        }
    }
}
