//! # Actions
//!
//! Every keypress becomes at most one `Action`. `update()` applies it to the
//! [`App`] and returns an [`Effect`] telling the event loop whether to keep
//! going.
//!
//! ```text
//! Key  →  Action::from_key()  →  update(&mut App, Action)  →  Effect
//! ```
//!
//! Screensaver mode sits in front of the normal mapping: any key dismisses
//! the clock, unless no-quit is set, in which case only colour keys get
//! through.

use log::debug;

use crate::core::options::InkColor;
use crate::core::state::App;

/// A key as the core sees it. Letters are matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Char(char),
    /// Any other key. Bound to nothing, but it still dismisses the
    /// screensaver.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Quit,
    ToggleSeconds,
    ToggleTwelveHour,
    ToggleCenter,
    ToggleBold,
    ToggleRebound,
    ToggleBox,
    SetColor(InkColor),
    /// Screensaver dismissed by a keypress.
    Dismiss,
}

impl Action {
    /// Normal-mode key bindings.
    pub fn from_key(key: Key) -> Option<Self> {
        let c = match key {
            Key::Up => return Some(Action::MoveUp),
            Key::Down => return Some(Action::MoveDown),
            Key::Left => return Some(Action::MoveLeft),
            Key::Right => return Some(Action::MoveRight),
            Key::Char(c) => c.to_ascii_lowercase(),
            Key::Other => return None,
        };
        match c {
            'k' => Some(Action::MoveUp),
            'j' => Some(Action::MoveDown),
            'h' => Some(Action::MoveLeft),
            'l' => Some(Action::MoveRight),
            'q' => Some(Action::Quit),
            's' => Some(Action::ToggleSeconds),
            't' => Some(Action::ToggleTwelveHour),
            'c' => Some(Action::ToggleCenter),
            'b' => Some(Action::ToggleBold),
            'r' => Some(Action::ToggleRebound),
            'x' => Some(Action::ToggleBox),
            _ => InkColor::from_key(c).map(Action::SetColor),
        }
    }

    /// Screensaver-mode key bindings.
    pub fn from_screensaver_key(key: Key, no_quit: bool) -> Option<Self> {
        if !no_quit {
            return Some(Action::Dismiss);
        }
        match key {
            Key::Char(c) => InkColor::from_key(c).map(Action::SetColor),
            _ => None,
        }
    }
}

/// What the event loop should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

/// Maps `key` through the active mode's bindings and applies the result.
pub fn handle_key(app: &mut App, key: Key) -> Effect {
    let action = if app.options.screensaver {
        Action::from_screensaver_key(key, app.options.no_quit)
    } else {
        Action::from_key(key)
    };
    match action {
        Some(action) => update(app, action),
        None => Effect::None,
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("Action: {:?}", action);
    match action {
        Action::MoveUp => {
            app.layout.nudge(-1, 0);
        }
        Action::MoveDown => {
            app.layout.nudge(1, 0);
        }
        Action::MoveLeft => {
            app.layout.nudge(0, -1);
        }
        Action::MoveRight => {
            app.layout.nudge(0, 1);
        }
        Action::Quit => {
            if !app.options.no_quit {
                return Effect::Quit;
            }
        }
        Action::Dismiss => return Effect::Quit,
        Action::ToggleSeconds => {
            app.layout.toggle_seconds_width();
        }
        Action::ToggleTwelveHour => {
            app.options.twelve_hour = !app.options.twelve_hour;
            app.refresh_date();
        }
        Action::ToggleCenter => app.layout.toggle_center(),
        Action::ToggleBold => app.options.bold = !app.options.bold,
        Action::ToggleRebound => app.layout.toggle_rebound(),
        Action::ToggleBox => app.options.boxed = !app.options.boxed,
        Action::SetColor(color) => app.options.color = color,
    }
    Effect::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::layout::{NORMAL_WIDTH, Placement, SECONDS_WIDTH};
    use crate::test_support::test_app;

    #[test]
    fn test_letters_are_case_insensitive() {
        assert_eq!(Action::from_key(Key::Char('K')), Some(Action::MoveUp));
        assert_eq!(Action::from_key(Key::Char('k')), Some(Action::MoveUp));
        assert_eq!(Action::from_key(Key::Char('Q')), Some(Action::Quit));
        assert_eq!(Action::from_key(Key::Char('X')), Some(Action::ToggleBox));
    }

    #[test]
    fn test_arrows_and_vi_keys_agree() {
        assert_eq!(Action::from_key(Key::Down), Action::from_key(Key::Char('j')));
        assert_eq!(Action::from_key(Key::Left), Action::from_key(Key::Char('h')));
        assert_eq!(Action::from_key(Key::Right), Action::from_key(Key::Char('l')));
    }

    #[test]
    fn test_digits_select_colour() {
        assert_eq!(
            Action::from_key(Key::Char('6')),
            InkColor::new(6).map(Action::SetColor)
        );
        assert_eq!(Action::from_key(Key::Char('8')), None);
        assert_eq!(Action::from_key(Key::Char('z')), None);
        assert_eq!(Action::from_key(Key::Other), None);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(handle_key(&mut app, Key::Char('q')), Effect::Quit);
    }

    #[test]
    fn test_no_quit_ignores_q() {
        let mut app = test_app();
        app.options.no_quit = true;
        assert_eq!(handle_key(&mut app, Key::Char('q')), Effect::None);
    }

    #[test]
    fn test_unbound_key_is_noop() {
        let mut app = test_app();
        let before = app.layout.clock();
        let options = app.options.clone();
        assert_eq!(handle_key(&mut app, Key::Char('?')), Effect::None);
        assert_eq!(app.layout.clock(), before);
        assert_eq!(app.options, options);
    }

    #[test]
    fn test_move_keys() {
        let mut app = test_app();
        handle_key(&mut app, Key::Down);
        handle_key(&mut app, Key::Char('l'));
        handle_key(&mut app, Key::Char('L'));
        assert_eq!((app.layout.clock().row, app.layout.clock().col), (1, 2));
        handle_key(&mut app, Key::Up);
        handle_key(&mut app, Key::Char('h'));
        assert_eq!((app.layout.clock().row, app.layout.clock().col), (0, 1));
    }

    #[test]
    fn test_move_ignored_when_centred() {
        let mut app = test_app();
        handle_key(&mut app, Key::Char('c'));
        let centred = app.layout.clock();
        handle_key(&mut app, Key::Down);
        handle_key(&mut app, Key::Right);
        assert_eq!(app.layout.clock(), centred);
    }

    #[test]
    fn test_center_then_rebound() {
        let mut app = test_app();
        handle_key(&mut app, Key::Char('c'));
        assert_eq!(app.layout.placement(), Placement::Centered);
        handle_key(&mut app, Key::Char('r'));
        assert_eq!(app.layout.placement(), Placement::Rebounding);
    }

    #[test]
    fn test_rebound_then_center() {
        let mut app = test_app();
        handle_key(&mut app, Key::Char('r'));
        handle_key(&mut app, Key::Char('C'));
        assert_eq!(app.layout.placement(), Placement::Centered);
    }

    #[test]
    fn test_toggle_seconds_changes_width() {
        let mut app = test_app();
        handle_key(&mut app, Key::Char('s'));
        assert!(app.layout.with_seconds());
        assert_eq!(app.layout.clock().width, SECONDS_WIDTH);
        handle_key(&mut app, Key::Char('S'));
        assert_eq!(app.layout.clock().width, NORMAL_WIDTH);
    }

    #[test]
    fn test_toggles_flip_options() {
        let mut app = test_app();
        handle_key(&mut app, Key::Char('b'));
        handle_key(&mut app, Key::Char('x'));
        assert!(app.options.bold);
        assert!(app.options.boxed);
        handle_key(&mut app, Key::Char('B'));
        handle_key(&mut app, Key::Char('X'));
        assert!(!app.options.bold);
        assert!(!app.options.boxed);
    }

    #[test]
    fn test_twelve_hour_widens_date_strip() {
        let mut app = test_app();
        let narrow = app.layout.date().width;
        handle_key(&mut app, Key::Char('t'));
        assert!(app.options.twelve_hour);
        assert_eq!(app.layout.date().width, narrow + 5);
        assert!(app.date_text().ends_with("M]"));
    }

    #[test]
    fn test_colour_key() {
        let mut app = test_app();
        handle_key(&mut app, Key::Char('3'));
        assert_eq!(app.options.color.index(), 3);
    }

    #[test]
    fn test_screensaver_any_key_quits() {
        let mut app = test_app();
        app.options.screensaver = true;
        assert_eq!(handle_key(&mut app, Key::Char('3')), Effect::Quit);
        assert_eq!(handle_key(&mut app, Key::Left), Effect::Quit);
        assert_eq!(handle_key(&mut app, Key::Other), Effect::Quit);
    }

    #[test]
    fn test_screensaver_no_quit_only_takes_colours() {
        let mut app = test_app();
        app.options.screensaver = true;
        app.options.no_quit = true;
        let before = app.layout.clock();

        assert_eq!(handle_key(&mut app, Key::Char('q')), Effect::None);
        assert_eq!(handle_key(&mut app, Key::Down), Effect::None);
        assert_eq!(handle_key(&mut app, Key::Char('s')), Effect::None);
        assert_eq!(handle_key(&mut app, Key::Other), Effect::None);
        assert_eq!(app.layout.clock(), before);

        assert_eq!(handle_key(&mut app, Key::Char('5')), Effect::None);
        assert_eq!(app.options.color.index(), 5);
    }
}
