use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// A side effect returned from [`Component::update`](crate::Component::update).
///
/// Commands carry follow-up messages, async work, or both. Whoever drives the
/// component (an application loop, or [`Harness`](crate::testing::Harness)
/// in tests) delivers [`message`](Command::message)s after the current update
/// returns, and the result of [`perform`](Command::perform) once its future
/// completes.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use roster_core::Command;
///
/// #[derive(Debug)]
/// enum Msg { Selected(String), Expired(u64) }
///
/// // Do nothing:
/// let none: Command<Msg> = Command::none();
///
/// // Report something to the parent after this update:
/// let report = Command::message(Msg::Selected("apple".into()));
///
/// // Arm a timer:
/// let timer = Command::tick(Duration::from_millis(500), |_| Msg::Expired(7));
/// # let _ = (none, report, timer);
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Message(Msg),
    Future(BoxFuture<'static, Msg>),
    Batch(Vec<Command<Msg>>),
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Run an async future, map the result to a message.
    pub fn perform<F, T>(future: F, map: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Command {
            inner: CommandInner::Future(Box::pin(async move { map(future.await) })),
        }
    }

    /// One-shot timer: fires once after `duration`, mapping the instant to a message.
    ///
    /// The sleep is created when the future is first polled, so building the
    /// command needs no async runtime.
    pub fn tick(
        duration: std::time::Duration,
        map: impl FnOnce(std::time::Instant) -> Msg + Send + 'static,
    ) -> Self {
        Command {
            inner: CommandInner::Future(Box::pin(async move {
                tokio::time::sleep(duration).await;
                map(std::time::Instant::now())
            })),
        }
    }

    /// Deliver a message after the current update returns.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Message(msg),
        }
    }

    /// Combine commands. Messages are delivered in the given order.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.remove(0),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        self.map_with(Arc::new(f))
    }

    fn map_with<NewMsg: Send + 'static>(
        self,
        f: Arc<dyn Fn(Msg) -> NewMsg + Send + Sync>,
    ) -> Command<NewMsg> {
        match self.inner {
            CommandInner::None => Command::none(),
            CommandInner::Message(msg) => Command::message(f(msg)),
            CommandInner::Future(fut) => Command {
                inner: CommandInner::Future(Box::pin(async move { f(fut.await) })),
            },
            CommandInner::Batch(cmds) => Command {
                inner: CommandInner::Batch(
                    cmds.into_iter()
                        .map(|cmd| cmd.map_with(f.clone()))
                        .collect(),
                ),
            },
        }
    }

    // --- Inspection ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// If this command is an immediate message, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Message(msg) => Some(msg),
            _ => None,
        }
    }

    /// Split into the immediate messages, in delivery order, and the futures.
    pub fn into_parts(self) -> (Vec<Msg>, Vec<BoxFuture<'static, Msg>>) {
        let mut messages = Vec::new();
        let mut futures = Vec::new();
        self.split_into(&mut messages, &mut futures);
        (messages, futures)
    }

    fn split_into(self, messages: &mut Vec<Msg>, futures: &mut Vec<BoxFuture<'static, Msg>>) {
        match self.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => messages.push(msg),
            CommandInner::Future(fut) => futures.push(fut),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    cmd.split_into(messages, futures);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn command_none_is_none() {
        let cmd: Command<()> = Command::none();
        assert!(cmd.is_none());
    }

    #[test]
    fn command_message_round_trip() {
        let cmd: Command<i32> = Command::message(42);
        assert_eq!(cmd.into_message(), Some(42));
    }

    #[test]
    fn command_batch_empty_returns_none() {
        let cmd: Command<()> = Command::batch(vec![]);
        assert!(cmd.is_none());
    }

    #[test]
    fn command_batch_drops_noops_and_unwraps_single() {
        let cmd: Command<i32> = Command::batch(vec![Command::none(), Command::message(1)]);
        assert_eq!(cmd.into_message(), Some(1));
    }

    #[test]
    fn command_map_batch_preserves_order() {
        let cmd: Command<i32> = Command::batch(vec![Command::message(1), Command::message(2)]);
        let (messages, futures) = cmd.map(|n| n.to_string()).into_parts();
        assert_eq!(messages, vec!["1".to_string(), "2".to_string()]);
        assert!(futures.is_empty());
    }

    #[tokio::test]
    async fn command_map_future() {
        let cmd: Command<i32> = Command::perform(async { 20 }, |n| n + 1);
        let (messages, mut futures) = cmd.map(|n| n * 2).into_parts();
        assert!(messages.is_empty());
        assert_eq!(futures.pop().unwrap().await, 42);
    }

    #[test]
    fn tick_builds_outside_a_runtime() {
        let cmd: Command<u64> = Command::tick(Duration::from_millis(10), |_| 7);
        let (messages, futures) = cmd.into_parts();
        assert!(messages.is_empty());
        assert_eq!(futures.len(), 1);
    }

    #[tokio::test]
    async fn tick_fires_after_duration() {
        let start = std::time::Instant::now();
        let cmd: Command<u64> = Command::tick(Duration::from_millis(10), |_| 7);
        let (_, mut futures) = cmd.into_parts();
        assert_eq!(futures.pop().unwrap().await, 7);
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
