//! Bridges winit's callback-driven event loop to the self-pipe readiness
//! model term-app's run loop expects, treating the window as one of the
//! select()-able sources. Winit owns a dedicated thread; every event it
//! produces is relayed through a channel and a byte is pushed down a pipe
//! so the fd becomes readable, mirroring how an X11 connection fd works.

use std::sync::mpsc;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent as WinitWindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key as WinitKey, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use term_platform::input_encoder::Key;
use term_platform::window::WindowEvent;

use crate::gpu::RendererError;

struct Relay {
    tx: mpsc::Sender<WindowEvent>,
    window_tx: Option<mpsc::Sender<Arc<Window>>>,
    wake_fd: i32,
}

impl ApplicationHandler for Relay {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window_tx) = self.window_tx.take() {
            let attrs = WindowAttributes::default()
                .with_title("term")
                .with_inner_size(winit::dpi::LogicalSize::new(960.0, 600.0));
            match event_loop.create_window(attrs) {
                Ok(window) => {
                    let _ = window_tx.send(Arc::new(window));
                }
                Err(e) => {
                    tracing::error!("failed to create window: {e}");
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WinitWindowEvent) {
        let translated = match event {
            WinitWindowEvent::CloseRequested => Some(WindowEvent::CloseRequested),
            WinitWindowEvent::Resized(size) => Some(WindowEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            WinitWindowEvent::RedrawRequested => Some(WindowEvent::RedrawRequested),
            WinitWindowEvent::KeyboardInput { event, .. } => {
                let KeyEvent {
                    logical_key, state, ..
                } = event;
                if state != ElementState::Pressed {
                    None
                } else {
                    key_from_winit(&logical_key).map(WindowEvent::KeyPress)
                }
            }
            _ => None,
        };

        if let Some(event) = translated {
            if self.tx.send(event).is_ok() {
                wake(self.wake_fd);
            }
        }
    }
}

fn key_from_winit(key: &WinitKey) -> Option<Key> {
    match key {
        WinitKey::Named(NamedKey::ArrowUp) => Some(Key::Up),
        WinitKey::Named(NamedKey::ArrowDown) => Some(Key::Down),
        WinitKey::Named(NamedKey::ArrowLeft) => Some(Key::Left),
        WinitKey::Named(NamedKey::ArrowRight) => Some(Key::Right),
        WinitKey::Named(NamedKey::Backspace) => Some(Key::Backspace),
        WinitKey::Named(NamedKey::Enter) => Some(Key::Function(b'\r')),
        WinitKey::Named(NamedKey::Tab) => Some(Key::Function(b'\t')),
        WinitKey::Named(NamedKey::Escape) => Some(Key::Function(0x1b)),
        WinitKey::Character(s) => s.chars().next().map(Key::Char),
        _ => None,
    }
}

#[cfg(unix)]
fn wake(fd: i32) {
    unsafe {
        let byte: u8 = 1;
        libc::write(fd, &byte as *const u8 as *const libc::c_void, 1);
    }
}

#[cfg(not(unix))]
fn wake(_fd: i32) {}

/// A [`term_platform::window::WindowSystem`] backed by a winit event loop
/// running on its own thread.
pub struct WinitWindowSystem {
    rx: mpsc::Receiver<WindowEvent>,
    #[cfg(unix)]
    read_fd: i32,
    _event_thread: std::thread::JoinHandle<()>,
}

impl WinitWindowSystem {
    /// Spawn the winit thread and block until it has created a window,
    /// returning both the system handle and the window for renderer setup.
    pub fn spawn() -> Result<(Self, Arc<Window>), RendererError> {
        let (tx, rx) = mpsc::channel();
        let (window_tx, window_rx) = mpsc::channel();

        #[cfg(unix)]
        let (read_fd, write_fd) = {
            let mut fds = [0i32; 2];
            let rc = unsafe { libc::pipe(fds.as_mut_ptr()) };
            if rc != 0 {
                return Err(RendererError::SurfaceError(
                    "failed to create self-pipe for window events".into(),
                ));
            }
            for fd in fds {
                unsafe {
                    let flags = libc::fcntl(fd, libc::F_GETFL, 0);
                    libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK);
                }
            }
            (fds[0], fds[1])
        };
        #[cfg(not(unix))]
        let write_fd = 0;

        let event_thread = std::thread::Builder::new()
            .name("term-window".into())
            .spawn(move || {
                let event_loop = match EventLoop::new() {
                    Ok(el) => el,
                    Err(e) => {
                        tracing::error!("failed to create winit event loop: {e}");
                        return;
                    }
                };
                let mut relay = Relay {
                    tx,
                    window_tx: Some(window_tx),
                    wake_fd: write_fd,
                };
                if let Err(e) = event_loop.run_app(&mut relay) {
                    tracing::error!("winit event loop exited with error: {e}");
                }
            })
            .map_err(|e| RendererError::SurfaceError(e.to_string()))?;

        let window = window_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .map_err(|_| RendererError::SurfaceError("window was never created".into()))?;

        Ok((
            Self {
                rx,
                #[cfg(unix)]
                read_fd,
                _event_thread: event_thread,
            },
            window,
        ))
    }
}

impl term_platform::window::WindowSystem for WinitWindowSystem {
    fn poll_events(&mut self) -> Vec<WindowEvent> {
        #[cfg(unix)]
        {
            let mut drain = [0u8; 256];
            loop {
                let n = unsafe {
                    libc::read(self.read_fd, drain.as_mut_ptr() as *mut libc::c_void, drain.len())
                };
                if n <= 0 {
                    break;
                }
            }
        }

        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[cfg(unix)]
    fn raw_fd(&self) -> std::os::unix::io::RawFd {
        self.read_fd
    }
}
