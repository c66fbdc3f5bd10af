//! The single success/error message of a page

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Holds at most one notice; every new outcome overwrites the last
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeChannel {
    current: Option<Notice>,
}

impl NoticeChannel {
    pub fn success(&mut self, message: impl Into<String>) {
        self.current = Some(Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.current = Some(Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        });
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|n| n.is_error())
            .map(|n| n.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_and_dismiss() {
        let mut channel = NoticeChannel::default();
        assert!(channel.current().is_none());

        channel.error("No se pudo cargar los pacientes. Intente nuevamente.");
        assert_eq!(
            channel.error_message(),
            Some("No se pudo cargar los pacientes. Intente nuevamente.")
        );

        channel.success("Paciente agregado exitosamente.");
        let notice = channel.current().unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(channel.error_message(), None);

        channel.dismiss();
        assert!(channel.current().is_none());
    }
}
