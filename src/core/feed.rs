//! Per-feed fetch state.
//!
//! A single tagged value per feed instead of separate loading/error flags,
//! so impossible combinations (loading and failed at once) cannot be
//! represented. Owned and mutated exclusively by the dashboard orchestrator.

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FeedState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> FeedState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FeedState::Loading)
    }

    /// True once a fetch attempt has completed, successfully or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, FeedState::Ready(_) | FeedState::Failed(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FeedState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FeedState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let state: FeedState<i32> = FeedState::default();
        assert_eq!(state, FeedState::Idle);
        assert!(!state.is_loading());
        assert!(!state.is_settled());
    }

    #[test]
    fn test_ready_exposes_value_and_no_error() {
        let state = FeedState::Ready(42);
        assert!(state.is_settled());
        assert_eq!(state.value(), Some(&42));
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_failed_exposes_message_and_no_value() {
        let state: FeedState<i32> = FeedState::Failed("boom".to_string());
        assert!(state.is_settled());
        assert_eq!(state.value(), None);
        assert_eq!(state.error_message(), Some("boom"));
    }
}
