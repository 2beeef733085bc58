//! Notification queue reducer

use super::types::{Notification, NotificationAction, NotificationId, NotificationState};
use crate::environment::AppEnvironment;
use mentorhub_core::{SmallVec, delay, effect::Effect, reducer::Reducer, smallvec};

/// Reducer for the notification queue
///
/// Dismissible notifications schedule their own `Dismiss` when the
/// environment has a notification timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationReducer;

impl NotificationReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for NotificationReducer {
    type State = NotificationState;
    type Action = NotificationAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            NotificationAction::Push(new) => {
                state.next_id += 1;
                let id = NotificationId(state.next_id);
                let dismissible = new.dismissible;

                tracing::debug!(%id, message = %new.message, "Notification queued");
                state.notifications.push(Notification {
                    id,
                    message: new.message,
                    context: new.context,
                    dismissible,
                    created_at: env.clock.now(),
                });

                match env.notification_timeout {
                    Some(timeout) if dismissible => smallvec![delay! {
                        duration: timeout,
                        action: NotificationAction::Dismiss { id }
                    }],
                    _ => SmallVec::new(),
                }
            },
            NotificationAction::Dismiss { id } => {
                state.notifications.retain(|notification| notification.id != id);
                SmallVec::new()
            },
            NotificationAction::Clear => {
                state.notifications.clear();
                SmallVec::new()
            },
        }
    }
}
