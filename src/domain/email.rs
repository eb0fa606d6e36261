#[derive(Debug, Clone, Default)]
pub struct EmailInput {
    pub subject: String,
    pub body: String,
}

impl EmailInput {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Whitespace-only fields still count as content.
    pub fn is_empty(&self) -> bool {
        self.subject.is_empty() && self.body.is_empty()
    }

    pub fn combined(&self) -> String {
        format!("{} {}", self.subject, self.body)
    }
}
