//! The single-threaded, readiness-based run loop: multiplexes the PTY
//! master, the window connection, and stdin with a one-second timeout using
//! `mio`. Bridges winit's callback-driven event loop into this select-style
//! loop through `term_renderer::window_system`'s self-pipe (see that
//! module's docs).

use std::time::Duration;

use mio::unix::SourceFd;
use mio::{Events, Interest, Poll, Token};

use term_common::errors::{SetupError, TermError};
use term_common::Result;
use term_core::palette::{ColorSource, Pixel};
use term_core::{Executor, ExecutorMode, Palette, Parser};
use term_platform::window::{FontStyle, Renderer, WindowEvent, WindowSystem};
use term_platform::{detect_shell, encode_key, shell_args, PtyHandle};
use term_renderer::backend::GpuRenderer;
use term_renderer::window_system::WinitWindowSystem;

use crate::cli::Args;

/// Default foreground/background for a dark terminal theme.
const DEFAULT_FG_RGB: (u8, u8, u8) = (0xE5, 0xE5, 0xE5);
const DEFAULT_BG_RGB: (u8, u8, u8) = (0x00, 0x00, 0x00);

const PTY_TOKEN: Token = Token(0);
const WINDOW_TOKEN: Token = Token(1);
const STDIN_TOKEN: Token = Token(2);

const TICK: Duration = Duration::from_secs(1);

struct ColorSourceAdapter<'a, R: Renderer>(&'a mut R);

impl<'a, R: Renderer> ColorSource for ColorSourceAdapter<'a, R> {
    fn alloc(&mut self, rgb: (u8, u8, u8)) -> Pixel {
        self.0.alloc_color(rgb)
    }
}

pub fn run(args: Args) -> Result<()> {
    let shell = args.shell.clone().unwrap_or_else(detect_shell);
    let shell_args_vec = shell_args(&shell);

    let (mut window_system, window) = WinitWindowSystem::spawn()
        .map_err(|e| TermError::Setup(SetupError::Display(e.to_string())))?;

    let mut renderer = pollster::block_on(GpuRenderer::new(window.clone()))
        .map_err(|e| TermError::Setup(SetupError::Display(e.to_string())))?;

    let metrics = renderer.cell_metrics();
    let inner = window.inner_size();
    let (cols, rows) = metrics.grid_size(inner.width, inner.height);

    let palette = {
        let mut adapter = ColorSourceAdapter(&mut renderer);
        Palette::build(&mut adapter, DEFAULT_FG_RGB, DEFAULT_BG_RGB)
    };

    let mode = if args.exit_on_unknown {
        ExecutorMode::Strict
    } else {
        ExecutorMode::Lenient
    };
    let mut executor = Executor::new(cols, rows, palette, mode);
    executor.grid_mut().dirty_all();

    let mut pty = PtyHandle::spawn(&shell, &shell_args_vec, cols as u16, rows as u16)?;
    let mut parser = Parser::new();

    let mut poll = Poll::new()?;
    let mut events = Events::with_capacity(16);

    let pty_fd = pty
        .raw_fd()
        .ok_or_else(|| TermError::Other("pty master has no raw fd".into()))?;
    poll.registry()
        .register(&mut SourceFd(&pty_fd), PTY_TOKEN, Interest::READABLE)?;

    let window_fd = window_system.raw_fd();
    poll.registry()
        .register(&mut SourceFd(&window_fd), WINDOW_TOKEN, Interest::READABLE)?;

    set_nonblocking(libc::STDIN_FILENO)?;
    let mut stdin_registered = true;
    poll.registry()
        .register(&mut SourceFd(&libc::STDIN_FILENO), STDIN_TOKEN, Interest::READABLE)?;

    let mut blink_on = false;
    redraw(&mut executor, &mut renderer, blink_on);

    loop {
        match poll.poll(&mut events, Some(TICK)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(TermError::Io(e)),
        }

        if events.is_empty() {
            // Timeout fired: one-hertz blink tick (§5).
            blink_on = !blink_on;
            redraw(&mut executor, &mut renderer, blink_on);
            continue;
        }

        let mut needs_redraw = false;

        for event in events.iter() {
            match event.token() {
                PTY_TOKEN => {
                    if !drain_pty(&mut pty, &mut parser, &mut executor, args.print_child) {
                        tracing::info!("child exited");
                        return Ok(());
                    }
                    needs_redraw = true;
                }
                WINDOW_TOKEN => {
                    for win_event in window_system.poll_events() {
                        match win_event {
                            WindowEvent::RedrawRequested => {
                                executor.grid_mut().dirty_all();
                                needs_redraw = true;
                            }
                            WindowEvent::KeyPress(key) => {
                                let bytes = encode_key(&key, executor.application_keypad());
                                let _ = pty.write_all(&bytes);
                            }
                            WindowEvent::Resized { width, height } => {
                                // Grid dimensions are fixed (§3 Non-goals:
                                // no dynamic resize); only the GPU surface
                                // needs to track the new window size.
                                renderer.resize(width, height);
                                executor.grid_mut().dirty_all();
                                needs_redraw = true;
                            }
                            WindowEvent::CloseRequested => {
                                pty.kill();
                                return Ok(());
                            }
                        }
                    }
                }
                STDIN_TOKEN => {
                    if stdin_registered {
                        let mut buf = [0u8; 4096];
                        match read_stdin(&mut buf) {
                            Ok(0) => {
                                let _ = poll
                                    .registry()
                                    .deregister(&mut SourceFd(&libc::STDIN_FILENO));
                                stdin_registered = false;
                            }
                            Ok(n) => {
                                let _ = pty.write_all(&buf[..n]);
                            }
                            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {}
                            Err(_) => {
                                let _ = poll
                                    .registry()
                                    .deregister(&mut SourceFd(&libc::STDIN_FILENO));
                                stdin_registered = false;
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        if needs_redraw {
            redraw(&mut executor, &mut renderer, blink_on);
        }
    }
}

/// Drain every byte currently available from the child, feeding each
/// through the Parser and Executor. Returns `false` once the child has
/// actually exited (as opposed to the fd merely having nothing more to
/// read right now).
fn drain_pty(pty: &mut PtyHandle, parser: &mut Parser, executor: &mut Executor, print_child: bool) -> bool {
    let mut buf = [0u8; 4096];
    loop {
        match pty.read(&mut buf) {
            Ok(0) => return pty.is_alive(),
            Ok(n) => {
                if print_child {
                    eprint!("{}", String::from_utf8_lossy(&buf[..n]));
                }
                for &b in &buf[..n] {
                    if let Some(cmd) = parser.feed(b) {
                        match executor.execute(cmd) {
                            Ok(Some(reply)) => {
                                let _ = pty.write_all(reply.as_bytes());
                            }
                            Ok(None) => {}
                            // Strict mode (§7): protocol error becomes a
                            // process exit, surfaced here as "child gone".
                            Err(_) => return false,
                        }
                    }
                }
            }
            Err(_) => return false,
        }
    }
}

/// Paint every cell where `dirty || is_cursor_cell` (§6 "Renderer
/// collaborator"), inverting fg/bg on the cursor cell when blink-phase is
/// on, then clear the dirty flag on non-cursor cells only.
fn redraw(executor: &mut Executor, renderer: &mut GpuRenderer, blink_on: bool) {
    let grid = executor.grid_mut();
    let (cursor_x, cursor_y) = grid.cursor();
    let cursor_visible = grid.cursor_visible();

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let is_cursor = cursor_visible && col == cursor_x && row == cursor_y;
            let cell = *grid.cell(row, col);
            if !cell.dirty && !is_cursor {
                continue;
            }

            let (fg, bg) = if is_cursor && blink_on {
                (cell.bg, cell.fg)
            } else {
                (cell.fg, cell.bg)
            };

            renderer.fill_rect(col, row, bg);
            renderer.draw_text(col, row, cell.glyph, fg, FontStyle::from_attrs(cell.bold, cell.italic));

            if !is_cursor {
                grid.mark_drawn(row, col);
            }
        }
    }

    renderer.present();
}

fn read_stdin(buf: &mut [u8]) -> std::io::Result<usize> {
    use std::io::Read;
    std::io::stdin().lock().read(buf)
}

fn set_nonblocking(fd: i32) -> Result<()> {
    // SAFETY: `fd` is a well-known standard fd (stdin); fcntl with
    // F_GETFL/F_SETFL does not take ownership of it.
    unsafe {
        let flags = libc::fcntl(fd, libc::F_GETFL, 0);
        if flags < 0 {
            return Err(TermError::Io(std::io::Error::last_os_error()));
        }
        if libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) < 0 {
            return Err(TermError::Io(std::io::Error::last_os_error()));
        }
    }
    Ok(())
}
