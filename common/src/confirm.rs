//! Delete confirmation
//!
//! ```text
//! Idle --request(x)--> Confirming(x) --confirm()--> Confirmed(x)
//!                           |
//!                           +----cancel()----> Cancelled
//! ```

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmState<T> {
    Idle,
    Confirming(T),
    Confirmed(T),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog<T> {
    state: ConfirmState<T>,
}

impl<T> Default for ConfirmDialog<T> {
    fn default() -> Self {
        Self {
            state: ConfirmState::Idle,
        }
    }
}

impl<T: Clone> ConfirmDialog<T> {
    pub fn state(&self) -> &ConfirmState<T> {
        &self.state
    }

    /// Open the dialog for `target`; refused while another target is pending
    pub fn request(&mut self, target: T) -> bool {
        if self.is_open() {
            return false;
        }
        self.state = ConfirmState::Confirming(target);
        true
    }

    /// Accept the pending target; yields it exactly once
    pub fn confirm(&mut self) -> Option<T> {
        match &self.state {
            ConfirmState::Confirming(target) => {
                let target = target.clone();
                self.state = ConfirmState::Confirmed(target.clone());
                Some(target)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        if self.is_open() {
            self.state = ConfirmState::Cancelled;
        }
    }

    pub fn reset(&mut self) {
        self.state = ConfirmState::Idle;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ConfirmState::Confirming(_))
    }

    pub fn pending(&self) -> Option<&T> {
        match &self.state {
            ConfirmState::Confirming(target) => Some(target),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_yields_target_once() {
        let mut dialog = ConfirmDialog::default();
        assert!(dialog.request(7u64));
        assert_eq!(dialog.pending(), Some(&7));
        assert_eq!(dialog.confirm(), Some(7));
        assert_eq!(dialog.confirm(), None);
        assert_eq!(dialog.state(), &ConfirmState::Confirmed(7));
    }

    #[test]
    fn test_request_rejected_while_confirming() {
        let mut dialog = ConfirmDialog::default();
        assert!(dialog.request(1u64));
        assert!(!dialog.request(2));
        assert_eq!(dialog.pending(), Some(&1));
    }

    #[test]
    fn test_cancel_drops_target() {
        let mut dialog = ConfirmDialog::default();
        dialog.request(3u64);
        dialog.cancel();
        assert_eq!(dialog.state(), &ConfirmState::Cancelled);
        assert_eq!(dialog.confirm(), None);

        assert!(dialog.request(4));
        dialog.reset();
        assert_eq!(dialog.state(), &ConfirmState::Idle);
    }
}
