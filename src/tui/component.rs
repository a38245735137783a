use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the clock display.
///
/// Components follow the props pattern:
/// - They receive everything they draw as struct fields, copied out of
///   `App` by the caller.
/// - They render to a `Frame`, placing themselves inside the given `Rect`
///   (the whole viewport) according to their own geometry.
///
/// Rendering is a projection: a component never writes back to `App`.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
