pub(crate) use self::session_screen::SessionScreen;

mod session_screen;
mod widgets;
