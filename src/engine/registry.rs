use std::sync::{Arc, Mutex};

/// A downstream playback resource the scheduler can cut off on stop.
///
/// Implementations must tolerate repeated halts: stop is idempotent, so a
/// handle may be halted more than once.
pub trait Output: Send {
    /// Silence the resource immediately.
    fn halt(&mut self);
}

/// Any `FnMut()` closure works as a halt handle.
impl<F> Output for F
where
    F: FnMut() + Send,
{
    fn halt(&mut self) {
        self()
    }
}

/// Growable collection of halt handles.
///
/// Populated externally - typically from the dispatch callback as it creates
/// sounding resources - and read in full by the scheduler's stop path. The
/// registry only halts; it does not otherwise manage lifecycles, and handles
/// stay registered after halting.
pub struct OutputRegistry {
    outputs: Vec<Box<dyn Output>>,
}

impl OutputRegistry {
    pub fn new() -> Self {
        Self {
            outputs: Vec::new(),
        }
    }

    /// New registry behind the shared handle the scheduler and callback use.
    pub fn shared() -> SharedOutputs {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn register(&mut self, output: impl Output + 'static) {
        self.outputs.push(Box::new(output));
    }

    /// Halt every registered handle, in registration order.
    pub fn halt_all(&mut self) {
        for output in &mut self.outputs {
            output.halt();
        }
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl Default for OutputRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared between the scheduler (halts on stop) and whoever creates outputs.
pub type SharedOutputs = Arc<Mutex<OutputRegistry>>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_halt_all_hits_every_handle() {
        let hits = Arc::new(AtomicU32::new(0));
        let mut registry = OutputRegistry::new();

        for _ in 0..3 {
            let hits = Arc::clone(&hits);
            registry.register(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        registry.halt_all();
        assert_eq!(hits.load(Ordering::SeqCst), 3);

        // Handles stay registered; a second stop halts them again.
        registry.halt_all();
        assert_eq!(hits.load(Ordering::SeqCst), 6);
        assert_eq!(registry.len(), 3);
    }
}
