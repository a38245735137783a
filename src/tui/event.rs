use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::core::action::Key;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    /// A key for the dispatcher.
    Key(Key),
    /// Ctrl+C. Raw mode swallows SIGINT, so it arrives as a key.
    Interrupt,
    Resize,
}

/// Wait up to `timeout` for one event. Events the clock has no use for
/// come back as `None`.
pub fn poll_event_timeout(timeout: Duration) -> std::io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    let event = match event::read()? {
        Event::Key(key_event) => translate_key(key_event),
        Event::Resize(..) => Some(TuiEvent::Resize),
        _ => None,
    };
    Ok(event)
}

/// Wait up to `timeout` for input on an alternate target device and
/// translate what arrives.
#[cfg(unix)]
pub fn poll_device_timeout(
    device: &std::fs::File,
    timeout: Duration,
) -> std::io::Result<Option<TuiEvent>> {
    use rustix::event::{PollFd, PollFlags, Timespec, poll};
    use rustix::io::Errno;

    let timeout = Timespec::try_from(timeout).unwrap_or(Timespec {
        tv_sec: 1,
        tv_nsec: 0,
    });
    let mut fds = [PollFd::new(device, PollFlags::IN)];
    match poll(&mut fds, Some(&timeout)) {
        Ok(0) | Err(Errno::INTR) => return Ok(None),
        Ok(_) => {}
        Err(e) => return Err(e.into()),
    }

    let mut buf = [0u8; 8];
    let len = match rustix::io::read(device, &mut buf[..]) {
        Ok(len) => len,
        Err(Errno::INTR | Errno::AGAIN) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if len == 0 {
        // Hung up. Keep the redraw pace instead of spinning on EOF.
        std::thread::sleep(timeout.try_into().unwrap_or(Duration::from_secs(1)));
    }
    Ok(translate_bytes(&buf[..len]))
}

#[cfg(not(unix))]
pub fn poll_device_timeout(
    _device: &std::fs::File,
    _timeout: Duration,
) -> std::io::Result<Option<TuiEvent>> {
    Err(std::io::ErrorKind::Unsupported.into())
}

/// Raw bytes read from a device in raw mode. Arrow keys arrive as ANSI
/// escape sequences, Ctrl+C as ETX.
fn translate_bytes(bytes: &[u8]) -> Option<TuiEvent> {
    let key = match bytes {
        [] => return None,
        [0x03, ..] => return Some(TuiEvent::Interrupt),
        [0x1b, b'[' | b'O', b'A', ..] => Key::Up,
        [0x1b, b'[' | b'O', b'B', ..] => Key::Down,
        [0x1b, b'[' | b'O', b'C', ..] => Key::Right,
        [0x1b, b'[' | b'O', b'D', ..] => Key::Left,
        [b, ..] if b.is_ascii_graphic() => Key::Char(char::from(*b)),
        _ => Key::Other,
    };
    Some(TuiEvent::Key(key))
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::trace!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Interrupt),
        (_, KeyCode::Up) => Some(TuiEvent::Key(Key::Up)),
        (_, KeyCode::Down) => Some(TuiEvent::Key(Key::Down)),
        (_, KeyCode::Left) => Some(TuiEvent::Key(Key::Left)),
        (_, KeyCode::Right) => Some(TuiEvent::Key(Key::Right)),
        (_, KeyCode::Char(c)) => Some(TuiEvent::Key(Key::Char(c))),
        // Modifier-only presses are not keypresses
        (_, KeyCode::Modifier(_)) => None,
        // Screensaver mode dismisses on any key, so pass the rest through
        _ => Some(TuiEvent::Key(Key::Other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Option<TuiEvent> {
        translate_key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_arrows() {
        assert_eq!(
            press(KeyCode::Up, KeyModifiers::NONE),
            Some(TuiEvent::Key(Key::Up))
        );
        assert_eq!(
            press(KeyCode::Right, KeyModifiers::NONE),
            Some(TuiEvent::Key(Key::Right))
        );
    }

    #[test]
    fn test_shifted_letter_kept() {
        assert_eq!(
            press(KeyCode::Char('Q'), KeyModifiers::SHIFT),
            Some(TuiEvent::Key(Key::Char('Q')))
        );
    }

    #[test]
    fn test_ctrl_c_interrupts() {
        assert_eq!(
            press(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(TuiEvent::Interrupt)
        );
    }

    #[test]
    fn test_release_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(translate_key(key), None);
    }

    #[test]
    fn test_device_bytes() {
        assert_eq!(translate_bytes(b""), None);
        assert_eq!(translate_bytes(b"q"), Some(TuiEvent::Key(Key::Char('q'))));
        assert_eq!(translate_bytes(b"\x1b[A"), Some(TuiEvent::Key(Key::Up)));
        assert_eq!(translate_bytes(b"\x1bOD"), Some(TuiEvent::Key(Key::Left)));
        assert_eq!(translate_bytes(b"\x03"), Some(TuiEvent::Interrupt));
    }

    #[test]
    fn test_device_unbound_bytes_pass_through() {
        // F1, Delete, a lone Escape and a space
        for bytes in [&b"\x1bOP"[..], b"\x1b[3~", b"\x1b", b" "] {
            assert_eq!(
                translate_bytes(bytes),
                Some(TuiEvent::Key(Key::Other)),
                "{bytes:?}"
            );
        }
    }

    #[test]
    fn test_unbound_keys_pass_through() {
        for code in [
            KeyCode::F(1),
            KeyCode::Home,
            KeyCode::PageDown,
            KeyCode::Delete,
            KeyCode::Insert,
            KeyCode::Esc,
        ] {
            assert_eq!(
                press(code, KeyModifiers::NONE),
                Some(TuiEvent::Key(Key::Other)),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_function_key_dismisses_screensaver() {
        use crate::core::action::{Effect, handle_key};
        use crate::test_support::test_app;

        let mut app = test_app();
        app.options.screensaver = true;
        let Some(TuiEvent::Key(key)) = press(KeyCode::F(1), KeyModifiers::NONE) else {
            panic!("F1 was not translated to a key");
        };
        assert_eq!(handle_key(&mut app, key), Effect::Quit);
    }

    #[test]
    fn test_function_key_is_noop_outside_screensaver() {
        use crate::core::action::{Effect, handle_key};
        use crate::test_support::test_app;

        let mut app = test_app();
        let before = app.layout.clock();
        assert_eq!(handle_key(&mut app, Key::Other), Effect::None);
        assert_eq!(app.layout.clock(), before);
    }
}
