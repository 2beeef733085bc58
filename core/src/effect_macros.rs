//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when reducers return request effects
//! and delayed actions.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use mentorhub_core::async_effect;
///
/// async_effect! {
///     match api.send(ApiRequest::get("/api/projects")).await {
///         Ok(json) => Some(ProjectAction::CollectionLoaded { .. }),
///         Err(error) => Some(ProjectAction::RequestFailed { .. }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use mentorhub_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_secs(5),
///     action: NotificationAction::Dismiss { id }
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}
