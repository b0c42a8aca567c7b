//! Edge-triggered sample and hold.

use fl_core::{Block, Scalar};

/// Samples its input on a rising trigger edge and holds it otherwise.
///
/// A sample is taken when `trigger` is true and the trigger of the previous
/// step was false. The previous trigger is updated on every step, whether a
/// sample is taken or not, so a trigger held high samples only once.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggeredSubsystem<T> {
    output: T,
    previous_trigger: bool,
}

impl<T: Scalar> TriggeredSubsystem<T> {
    pub fn new() -> Self {
        Self {
            output: T::zero(),
            previous_trigger: false,
        }
    }

    pub fn step(&mut self, input: T, trigger: bool) -> T {
        if trigger && !self.previous_trigger {
            self.output = input;
        }
        self.previous_trigger = trigger;
        self.output
    }
}

impl<T: Scalar> Default for TriggeredSubsystem<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> Block for TriggeredSubsystem<T> {
    type Output = T;

    fn output(&self) -> T {
        self.output
    }

    fn reset(&mut self) {
        self.output = T::zero();
        self.previous_trigger = false;
    }
}
