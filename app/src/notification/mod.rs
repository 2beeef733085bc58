//! Notification queue (success/warning banners)

pub mod reducer;
pub mod types;

pub use reducer::NotificationReducer;
pub use types::{
    NewNotification, Notification, NotificationAction, NotificationContext, NotificationId,
    NotificationState,
};
