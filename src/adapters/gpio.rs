use crate::domain::model::{Line, PinEvent};
use crate::domain::ports::{ConfigProvider, TriggerPort};
use crate::utils::error::{Result, TriggerError};
use std::sync::{Arc, Mutex};

#[cfg(feature = "rpi")]
pub use self::rpi::RppalTrigger;

/// Opens the real GPIO lines named by `config`.
#[cfg(feature = "rpi")]
pub fn open_hardware(config: &impl ConfigProvider) -> Result<Box<dyn TriggerPort>> {
    let trigger = RppalTrigger::open(config)?;
    Ok(Box::new(trigger))
}

#[cfg(not(feature = "rpi"))]
pub fn open_hardware(_config: &impl ConfigProvider) -> Result<Box<dyn TriggerPort>> {
    Err(TriggerError::GpioInit {
        message: "built without the `rpi` feature".to_string(),
    })
}

#[cfg(feature = "rpi")]
mod rpi {
    use super::*;
    use rppal::gpio::{Gpio, Level, OutputPin};

    /// Shutter and focus as rppal output pins, BCM numbering.
    pub struct RppalTrigger {
        shutter: OutputPin,
        focus: OutputPin,
    }

    impl RppalTrigger {
        pub fn open(config: &impl ConfigProvider) -> Result<Self> {
            let gpio = Gpio::new()?;
            let shutter = gpio.get(config.shutter_pin())?.into_output_low();
            let focus = gpio.get(config.focus_pin())?.into_output_low();

            tracing::debug!(
                "Opened GPIO lines: shutter=BCM{}, focus=BCM{}",
                config.shutter_pin(),
                config.focus_pin()
            );

            Ok(Self { shutter, focus })
        }
    }

    impl TriggerPort for RppalTrigger {
        fn write(&mut self, line: Line, high: bool) -> Result<()> {
            let level = if high { Level::High } else { Level::Low };
            let pin = match line {
                Line::Shutter => &mut self.shutter,
                Line::Focus => &mut self.focus,
            };
            tracing::trace!("BCM{} ({}) -> {:?}", pin.pin(), line, level);
            pin.write(level);
            Ok(())
        }
    }

    impl Drop for RppalTrigger {
        fn drop(&mut self) {
            self.shutter.set_low();
            self.focus.set_low();
        }
    }
}

/// Records writes instead of touching hardware.
#[derive(Debug, Clone, Default)]
pub struct SimulatedTrigger {
    events: Arc<Mutex<Vec<PinEvent>>>,
    fail_after: Option<usize>,
}

impl SimulatedTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails every write once `writes` writes have succeeded.
    pub fn failing_after(writes: usize) -> Self {
        Self {
            events: Arc::default(),
            fail_after: Some(writes),
        }
    }

    pub fn events(&self) -> Vec<PinEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Current level of a line, low if it was never written.
    pub fn level(&self, line: Line) -> bool {
        self.events()
            .iter()
            .rev()
            .find(|e| e.line == line)
            .map(|e| e.high)
            .unwrap_or(false)
    }
}

impl TriggerPort for SimulatedTrigger {
    fn write(&mut self, line: Line, high: bool) -> Result<()> {
        let mut events = self.events.lock().map_err(|_| TriggerError::Gpio {
            line: line.to_string(),
            message: "simulated line state poisoned".to_string(),
        })?;

        if self.fail_after.is_some_and(|limit| events.len() >= limit) {
            return Err(TriggerError::Gpio {
                line: line.to_string(),
                message: "simulated write failure".to_string(),
            });
        }

        tracing::trace!("[sim] {} -> {}", line, if high { "high" } else { "low" });
        events.push(PinEvent { line, high });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_records_writes() {
        let mut trigger = SimulatedTrigger::new();
        trigger.write(Line::Focus, true).unwrap();
        trigger.write(Line::Shutter, true).unwrap();

        assert_eq!(
            trigger.events(),
            vec![PinEvent::high(Line::Focus), PinEvent::high(Line::Shutter)]
        );
        assert!(trigger.level(Line::Shutter));
    }

    #[test]
    fn test_release_drives_both_low() {
        let mut trigger = SimulatedTrigger::new();
        trigger.write(Line::Shutter, true).unwrap();
        trigger.write(Line::Focus, true).unwrap();
        trigger.release().unwrap();

        assert!(!trigger.level(Line::Shutter));
        assert!(!trigger.level(Line::Focus));
    }

    #[test]
    fn test_clones_share_history() {
        let trigger = SimulatedTrigger::new();
        let mut boxed: Box<dyn TriggerPort> = Box::new(trigger.clone());
        boxed.write(Line::Focus, true).unwrap();
        assert_eq!(trigger.events().len(), 1);
    }

    #[test]
    fn test_failing_after() {
        let mut trigger = SimulatedTrigger::failing_after(1);
        assert!(trigger.write(Line::Focus, true).is_ok());
        let err = trigger.write(Line::Focus, false).unwrap_err();
        assert!(matches!(err, TriggerError::Gpio { .. }));
    }

    #[cfg(not(feature = "rpi"))]
    #[test]
    fn test_open_hardware_without_rpi_feature() {
        use crate::config::TriggerSettings;
        let err = open_hardware(&TriggerSettings::default()).err().unwrap();
        assert!(matches!(err, TriggerError::GpioInit { .. }));
    }
}
