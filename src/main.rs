//! DeviceConsole - Main entry point
//!
//! Polls stdin byte-wise, dispatches complete lines and drains the console
//! log after each command. On ESP-IDF stdin/stdout are the console UART.

use std::fmt::Write as _;
use std::io::{self, Read, Write as _};
use std::time::Duration;

use device_console::config::ConsoleConfig;
use device_console::console::{Console, ConsoleError, ConsoleOutput, LineBuffer, SettingsHooks};
use device_console::log_globals::CONSOLE_LOG;
use device_console::log_sink;

/// Idle wait when no input is pending.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// stdout as a console sink
struct StdoutSink(io::Stdout);

impl core::fmt::Write for StdoutSink {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.0.write_all(s.as_bytes()).map_err(|_| core::fmt::Error)
    }
}

impl ConsoleOutput for StdoutSink {
    fn flush(&mut self) {
        let _ = self.0.flush();
    }
}

#[cfg(target_os = "espidf")]
fn settings_backend() -> Box<dyn SettingsHooks> {
    use device_console::config::nvs::NvsSettings;
    use device_console::console::NoSettings;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;

    match EspDefaultNvsPartition::take().and_then(NvsSettings::open) {
        Ok(settings) => Box::new(settings),
        Err(e) => {
            println!("nvs unavailable ({}), settings disabled", e);
            Box::new(NoSettings)
        }
    }
}

#[cfg(not(target_os = "espidf"))]
fn settings_backend() -> Box<dyn SettingsHooks> {
    use device_console::console::MemorySettings;

    Box::new(MemorySettings::<16>::new())
}

fn main() {
    #[cfg(target_os = "espidf")]
    esp_idf_svc::sys::link_patches();

    #[cfg(target_os = "espidf")]
    let mut device = device_console::hal::EspDevice::new();
    #[cfg(not(target_os = "espidf"))]
    let mut device = device_console::hal::SimDevice::new();

    let mut settings = settings_backend();
    let mut out = StdoutSink(io::stdout());

    let console: Result<Console<'_>, ConsoleError> = Console::with_builtins(
        &mut device,
        settings.as_mut(),
        &CONSOLE_LOG,
        ConsoleConfig::default(),
    );
    let mut console = match console {
        Ok(console) => console,
        Err(e) => {
            let _ = writeln!(out, "console disabled: {}", e);
            log_sink::drain_to(&CONSOLE_LOG, &mut out);
            return;
        }
    };

    log_sink::drain_to(&CONSOLE_LOG, &mut out);
    console.print_banner(&mut out);
    out.flush();

    let mut line = LineBuffer::new();
    let mut stdin = io::stdin();
    let mut byte = [0u8; 1];

    loop {
        let n = stdin.read(&mut byte).unwrap_or(0);
        if n == 0 {
            if cfg!(target_os = "espidf") {
                std::thread::sleep(POLL_INTERVAL);
                continue;
            }
            break; // host: end of input
        }

        if !line.feed(byte[0]) {
            continue;
        }

        if line.is_empty() && !line.overflowed() {
            continue; // second half of CRLF, or a bare Enter
        }

        match line.text() {
            Ok(text) => {
                if let Some(status) = console.dispatch_line(text, &mut out) {
                    if status != 0 {
                        let _ = writeln!(out, "status={}", status);
                    }
                }
            }
            Err(e) => {
                let _ = writeln!(out, "{} ({})", ConsoleError::Usage, e);
            }
        }
        line.clear();

        log_sink::drain_to(&CONSOLE_LOG, &mut out);
        console.print_prompt(&mut out);
        out.flush();
    }
}
