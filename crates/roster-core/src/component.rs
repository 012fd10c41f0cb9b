use crate::command::Command;
use ratatui::{layout::Rect, Frame};

/// A reusable widget that updates on messages and renders into a given area.
///
/// Widgets built on a [`ListManager`](crate::ListManager) translate their
/// messages (key presses, pointer events, timer expiries) into manager
/// operations in [`update`](Component::update), and report what happened to
/// their parent through the returned [`Command`].
///
/// Components are driven from a single UI thread; unlike their messages they
/// do not need to be `Send`.
///
/// # Composition pattern
///
/// Wrap the component's message type in a variant of the parent message and
/// use [`Command::map`] to translate commands:
///
/// ```rust,ignore
/// enum AppMsg { Fruits(listbox::Message) }
///
/// fn update(&mut self, msg: AppMsg) -> Command<AppMsg> {
///     match msg {
///         AppMsg::Fruits(m) => self.fruits.update(m).map(AppMsg::Fruits),
///     }
/// }
/// ```
pub trait Component: 'static {
    /// The component's internal message type.
    type Message: Send + 'static;

    /// Process a message, mutate state, and return a [`Command`] for side effects.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into a specific `area` of the [`Frame`].
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Whether this component currently has focus.
    ///
    /// A hint for input routing. The default implementation returns `false`.
    fn focused(&self) -> bool {
        false
    }
}
