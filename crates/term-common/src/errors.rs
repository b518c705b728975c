#[derive(Debug, thiserror::Error)]
pub enum PtyError {
    #[error("failed to spawn shell: {0}")]
    SpawnFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to resize pty: {0}")]
    ResizeFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("display connection failed: {0}")]
    Display(String),

    #[error("font load failed: {0}")]
    Font(String),

    #[error("color allocation failed: {0}")]
    Color(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error(transparent)]
    Pty(#[from] PtyError),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pty_error_display() {
        let err = PtyError::SpawnFailed("no such file".into());
        assert_eq!(err.to_string(), "failed to spawn shell: no such file");
    }

    #[test]
    fn setup_error_display() {
        let err = SetupError::Font("could not load font".into());
        assert_eq!(err.to_string(), "font load failed: could not load font");
    }

    #[test]
    fn term_error_from_pty() {
        let pty_err = PtyError::ResizeFailed("ioctl failed".into());
        let term_err: TermError = pty_err.into();
        assert!(matches!(term_err, TermError::Pty(_)));
        assert!(term_err.to_string().contains("ioctl failed"));
    }

    #[test]
    fn term_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let term_err: TermError = io_err.into();
        assert!(matches!(term_err, TermError::Io(_)));
    }
}
