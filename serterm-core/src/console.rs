//! Cooperative poll loop
//!
//! The console is the one place where all pieces meet. Each call to
//! [`Console::poll`] runs one iteration, always in this order:
//!
//! 1. Drain received bytes into the interpreter
//! 2. Poll the keyboard host and auto-repeat, update the keyboard LEDs
//! 3. Drain the key queue through the mode controller
//! 4. Drain the transmit queue to the serial port
//! 5. Housekeeping (bell timing)
//!
//! Nothing here blocks. Time comes in as a millisecond counter sampled by
//! the caller once per iteration.

use embedded_io::{Write, WriteReady};
use serterm_hal::{Bell, KeyboardHost, SerialPort};

use crate::config::Settings;
use crate::keyboard::{KeyToken, KeyboardInput, Locale};
use crate::mode::{ConfigSurface, Mode, ModeController, ModeEvent};
use crate::ring::{RingBuffer, RingConsumer, KEY_QUEUE_SLOTS, RX_QUEUE_SLOTS, TX_QUEUE_SLOTS};
use crate::status;
use crate::terminal::Terminal;

/// Most received bytes interpreted per iteration
pub const RX_BATCH: usize = 64;

/// Terminal, keyboard and routing state for one screen and serial link
pub struct Console<'a, const COLS: usize, const ROWS: usize> {
    /// Escape interpreter and screen
    terminal: Terminal<COLS, ROWS>,
    /// Keyboard report decoder
    keyboard: KeyboardInput,
    /// Decoded keys waiting for routing
    keys: RingBuffer<KeyToken, KEY_QUEUE_SLOTS>,
    /// Bytes waiting for the serial transmitter
    tx: RingBuffer<u8, TX_QUEUE_SLOTS>,
    /// Bytes from the receive interrupt
    rx: RingConsumer<'a, u8, RX_QUEUE_SLOTS>,
    /// Keystroke routing
    modes: ModeController,
    /// Settings in effect
    settings: Settings,
}

impl<'a, const COLS: usize, const ROWS: usize> Console<'a, COLS, ROWS> {
    /// Create the console, show the banner and sound the startup beep
    ///
    /// `rx` is the consumer half of the receive buffer whose producer half
    /// belongs to the UART interrupt. The serial port is expected to be
    /// configured for `settings.serial` already.
    pub fn new(
        rx: RingConsumer<'a, u8, RX_QUEUE_SLOTS>,
        settings: Settings,
        locale: Locale,
        bell: &mut impl Bell,
    ) -> Self {
        let mut console = Self {
            terminal: Terminal::new(&settings),
            keyboard: KeyboardInput::new(locale),
            keys: RingBuffer::new(),
            tx: RingBuffer::new(),
            rx,
            modes: ModeController::new(),
            settings,
        };

        console.terminal.banner();
        console.redraw_status();
        bell.ring();
        console
    }

    /// Run one loop iteration
    pub fn poll<S, K, B, F>(
        &mut self,
        now_ms: u32,
        serial: &mut S,
        keyboard: &mut K,
        bell: &mut B,
        config: &mut F,
    ) where
        S: SerialPort,
        K: KeyboardHost,
        B: Bell,
        F: ConfigSurface,
    {
        self.drain_rx(bell);
        self.poll_keyboard(now_ms, keyboard);
        self.drain_keys(serial, bell, config);
        self.drain_tx(serial);
        bell.tick(now_ms);
    }

    pub fn terminal(&self) -> &Terminal<COLS, ROWS> {
        &self.terminal
    }

    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Bytes not yet handed to the serial port
    pub fn tx_pending(&self) -> usize {
        self.tx.len()
    }

    pub fn caps_lock(&self) -> bool {
        self.keyboard.caps_lock()
    }

    fn drain_rx(&mut self, bell: &mut impl Bell) {
        for _ in 0..RX_BATCH {
            let Some(byte) = self.rx.try_pop() else {
                break;
            };
            self.terminal.handle(byte, bell);
        }
    }

    fn poll_keyboard(&mut self, now_ms: u32, keyboard: &mut impl KeyboardHost) {
        if let Some(report) = keyboard.poll_report() {
            self.keyboard.process_report(&report, now_ms, &mut self.keys);
        }
        self.keyboard.poll_repeat(now_ms, &mut self.keys);

        if let Some(leds) = self.keyboard.take_led_change() {
            keyboard.set_leds(leds);
        }
    }

    fn drain_keys(
        &mut self,
        serial: &mut impl SerialPort,
        bell: &mut impl Bell,
        config: &mut impl ConfigSurface,
    ) {
        while let Some(token) = self.keys.try_pop() {
            let event = self.modes.dispatch(
                token,
                &self.settings,
                &mut self.terminal,
                &mut self.tx,
                bell,
                config,
            );

            match event {
                Some(ModeEvent::Entered(_)) => self.redraw_status(),
                Some(ModeEvent::ConfigExited(settings)) => self.apply(settings, serial),
                None => {}
            }
        }
    }

    /// Hand queued bytes to the port while it can take them
    ///
    /// A byte leaves the queue only once the port accepted it.
    fn drain_tx(&mut self, serial: &mut impl SerialPort) {
        while let Some(&byte) = self.tx.peek() {
            match serial.write_ready() {
                Ok(true) => {}
                Ok(false) => break,
                Err(_) => {
                    warn!("serial: ready check failed");
                    break;
                }
            }

            match serial.write(&[byte]) {
                Ok(0) => break,
                Ok(_) => {
                    self.tx.try_pop();
                }
                Err(_) => {
                    warn!("serial: write failed, byte kept");
                    break;
                }
            }
        }
    }

    /// Put edited settings into effect after leaving CONFIG
    fn apply(&mut self, settings: Settings, serial: &mut impl SerialPort) {
        if settings.serial != self.settings.serial {
            match serial.reconfigure(settings.serial) {
                Ok(()) => info!("serial: reconfigured to {}", settings.serial),
                Err(_) => warn!("serial: reconfigure failed"),
            }
        }

        self.settings = settings;
        self.terminal.apply(&settings);
        self.terminal.reset();
        self.redraw_status();
    }

    fn redraw_status(&mut self) {
        status::draw(&mut self.terminal, self.modes.mode(), &self.settings.serial);
    }
}
