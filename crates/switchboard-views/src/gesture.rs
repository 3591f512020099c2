//! Pointer gesture bubbling.
//!
//! A gesture is delivered to its hit target first, then to each ancestor in
//! turn. Any handler may stop propagation, after which no ancestor sees it.

use tracing::trace;

/// A pointer gesture in flight.
#[derive(Debug, Default)]
pub struct PointerEvent {
    propagation_stopped: bool,
}

impl PointerEvent {
    /// Create a fresh gesture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prevent ancestors from receiving this gesture.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Returns true once a handler has stopped propagation.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Deliver a gesture along `path` (hit target first, outermost last).
///
/// Returns the number of nodes that handled the gesture.
pub fn bubble<T, F>(path: &[T], mut handle: F) -> usize
where
    T: Copy + std::fmt::Debug,
    F: FnMut(T, &mut PointerEvent),
{
    let mut event = PointerEvent::new();
    let mut delivered = 0;

    for &node in path {
        if event.is_propagation_stopped() {
            trace!(?node, "Propagation stopped");
            break;
        }
        handle(node, &mut event);
        delivered += 1;
    }

    delivered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubbles_to_every_ancestor() {
        let mut seen = Vec::new();
        let delivered = bubble(&[1, 2, 3], |node, _| seen.push(node));
        assert_eq!(delivered, 3);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_stop_propagation_halts_at_child() {
        let mut seen = Vec::new();
        let delivered = bubble(&["button", "tile"], |node, event| {
            seen.push(node);
            if node == "button" {
                event.stop_propagation();
            }
        });
        assert_eq!(delivered, 1);
        assert_eq!(seen, vec!["button"]);
    }
}
