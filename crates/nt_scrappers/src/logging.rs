use std::collections::VecDeque;

/// Prefixes every log line with a stack of context tags such as
/// `[google-news] [page 2]`.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: VecDeque<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            prefixes: VecDeque::new(),
        }
    }

    pub fn with_new_prefixes(mut self, prefix: String) -> Self {
        self.prefixes.clear();
        self.prefixes.push_back(prefix);
        self
    }

    pub fn with_prefix(mut self, prefix: String) -> Self {
        self.prefixes.push_back(prefix);
        self
    }

    fn prefix(&self) -> String {
        self.prefixes.iter().map(|p| format!("{} ", p)).collect::<String>()
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}{}", self.prefix(), message);
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}{}", self.prefix(), message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}{}", self.prefix(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_stack() {
        let logger = Logger::new()
            .with_prefix("[google-news]".to_string())
            .with_prefix("[page 2]".to_string());
        assert_eq!(logger.prefix(), "[google-news] [page 2] ");
    }

    #[test]
    fn test_new_prefixes_replace_stack() {
        let logger = Logger::new()
            .with_prefix("[a]".to_string())
            .with_new_prefixes("[b]".to_string());
        assert_eq!(logger.prefix(), "[b] ");
    }
}
