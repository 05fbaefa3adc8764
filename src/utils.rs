use log::Level;
#[cfg(feature = "profile")]
use web_sys::console;

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// Routes `log` records to the browser console
pub fn init_logging(level: Level) {
    // A second call finds the logger already installed and keeps it
    if console_log::init_with_level(level).is_ok() {
        log::debug!("console logger installed");
    }
}

// Times a scope with console.time / console.timeEnd
#[cfg(feature = "profile")]
pub struct Timer<'a> {
    name: &'a str,
}

#[cfg(feature = "profile")]
impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

#[cfg(feature = "profile")]
impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
