use std::sync::atomic::{AtomicBool, Ordering};

/// The trigger of an operation. It is disabled while a call is in flight.
///
/// Disabling is advisory: nothing stops a second trigger that slips in before
/// the first one acquires the control.
#[derive(Debug)]
pub struct Control {
    enabled: AtomicBool,
}

impl Default for Control {
    fn default() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }
}

impl Control {
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Disables the control until the returned guard is dropped.
    pub fn acquire(&self) -> ControlGuard<'_> {
        self.enabled.store(false, Ordering::SeqCst);
        ControlGuard { control: self }
    }
}

/// Re-enables its control on drop, whichever way the call ended.
#[must_use = "the control is re-enabled as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ControlGuard<'a> {
    control: &'a Control,
}

impl Drop for ControlGuard<'_> {
    fn drop(&mut self) {
        self.control.enabled.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_disables_until_dropped() {
        let control = Control::default();
        assert!(control.is_enabled());

        let guard = control.acquire();
        assert!(!control.is_enabled());

        drop(guard);
        assert!(control.is_enabled());
    }

    #[test]
    fn test_guard_released_on_early_return() {
        fn fallible(control: &Control) -> Result<(), &'static str> {
            let _guard = control.acquire();
            Err::<(), _>("transport failure")?;
            Ok(())
        }

        let control = Control::default();
        assert!(fallible(&control).is_err());
        assert!(control.is_enabled());
    }
}
