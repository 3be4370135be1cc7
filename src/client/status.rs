use super::api::ClientError;
use crate::error::ErrorKind;

/// User-facing classification of a failed translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NotConfigured,
    Unauthorized,
    RateLimited,
    Unavailable,
}

impl Condition {
    pub fn from_kind(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NoProviderConfigured => Self::NotConfigured,
            ErrorKind::UpstreamAuth => Self::Unauthorized,
            ErrorKind::UpstreamRateLimited => Self::RateLimited,
            ErrorKind::MissingInput | ErrorKind::UpstreamOther | ErrorKind::EmptyUpstreamResponse => {
                Self::Unavailable
            }
        }
    }

    pub fn from_status(status: u16) -> Self {
        Self::from_kind(ErrorKind::from_response_status(status))
    }

    pub fn from_error(error: &ClientError) -> Self {
        match error {
            ClientError::Status(status) => Self::from_status(*status),
            ClientError::InvalidResponse | ClientError::Transport(_) => Self::Unavailable,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::NotConfigured => "not-configured",
            Self::Unauthorized => "unauthorized",
            Self::RateLimited => "rate-limited",
            Self::Unavailable => "unavailable",
        }
    }

    /// Prefix the original input with the condition tag.
    pub fn render(self, text: &str) -> String {
        format!("[{}] {}", self.tag(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_keeps_original_text() {
        assert_eq!(Condition::RateLimited.render(" hola "), "[rate-limited]  hola ");
    }

    #[test]
    fn follows_server_error_kinds() {
        assert_eq!(Condition::from_status(503), Condition::NotConfigured);
        assert_eq!(Condition::from_status(401), Condition::Unauthorized);
        assert_eq!(Condition::from_status(403), Condition::Unauthorized);
        assert_eq!(Condition::from_status(429), Condition::RateLimited);
        assert_eq!(Condition::from_status(400), Condition::Unavailable);
        assert_eq!(Condition::from_kind(ErrorKind::EmptyUpstreamResponse), Condition::Unavailable);
    }

    #[test]
    fn unknown_errors_are_unavailable() {
        assert_eq!(Condition::from_status(500), Condition::Unavailable);
        assert_eq!(Condition::from_status(404), Condition::Unavailable);
        assert_eq!(Condition::from_error(&ClientError::InvalidResponse), Condition::Unavailable);
    }
}
