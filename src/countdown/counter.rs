/// A single integer that can be stepped by one or restored to its initial value.
///
/// Arithmetic wraps at the `i64` limits. The countdown controller never gets
/// there because it halts at its bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    initial: i64,
    value: i64,
}

impl Counter {
    pub fn new(initial: i64) -> Self {
        Self {
            initial,
            value: initial,
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn increment(&mut self) {
        self.value = self.value.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        self.value = self.value.wrapping_sub(1);
    }

    /// Restore the value supplied at construction.
    pub fn reset(&mut self) {
        self.value = self.initial;
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new(0)
    }
}
