#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    /// Set once the exit transition has started.
    pub leaving: bool,
}

impl Notice {
    pub fn css_class(&self) -> String {
        let mut class = format!("notification notification-{}", self.severity.as_str());
        if !self.leaving {
            class.push_str(" show");
        }
        class
    }
}

/// Toasts currently on screen. Each notice lives independently; there is no
/// queue or rate limit, they simply stack.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoticeBoard {
    next_id: u64,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.notices.push(Notice {
            id,
            message: message.into(),
            severity,
            leaving: false,
        });
        id
    }

    pub fn begin_dismiss(&mut self, id: u64) {
        if let Some(notice) = self.notices.iter_mut().find(|n| n.id == id) {
            notice.leaving = true;
        }
    }

    pub fn remove(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_stack_with_unique_ids() {
        let mut board = NoticeBoard::default();
        let a = board.push("Zooming in", Severity::Success);
        let b = board.push("Zooming in", Severity::Success);
        assert_ne!(a, b);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn dismiss_is_two_phase_and_by_id() {
        let mut board = NoticeBoard::default();
        let a = board.push("first", Severity::Info);
        let b = board.push("second", Severity::Warning);

        board.begin_dismiss(a);
        assert!(board.notices()[0].leaving);
        assert!(!board.notices()[1].leaving);

        board.remove(a);
        assert_eq!(board.len(), 1);
        assert_eq!(board.notices()[0].id, b);

        board.remove(a);
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn css_class_tracks_severity_and_exit() {
        let mut board = NoticeBoard::default();
        let id = board.push("oops", Severity::Error);
        assert_eq!(
            board.notices()[0].css_class(),
            "notification notification-error show"
        );
        board.begin_dismiss(id);
        assert_eq!(
            board.notices()[0].css_class(),
            "notification notification-error"
        );
    }
}
