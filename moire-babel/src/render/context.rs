//! Mutable state of one render

/// One open list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFrame {
    /// The dialect's marker for this list (`-`, `ol`, `#`, ...)
    pub marker: &'static str,
}

/// State threaded through a single document render
///
/// A context is never shared: each (document, dialect) render creates its own.
#[derive(Debug, Default)]
pub struct RenderContext {
    lists: Vec<ListFrame>,
    counters: [usize; 6],
    output: String,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lists enclosing the node being rendered
    pub fn depth(&self) -> usize {
        self.lists.len()
    }

    pub fn lists(&self) -> &[ListFrame] {
        &self.lists
    }

    /// Run `f` one list level deeper.
    ///
    /// The level is popped whatever `f` returns, so a failed subtree leaves the depth as it
    /// found it.
    pub fn scoped<T>(&mut self, frame: ListFrame, f: impl FnOnce(&mut Self) -> T) -> T {
        let depth = self.lists.len();
        self.lists.push(frame);
        let result = f(self);
        self.lists.truncate(depth);
        result
    }

    /// Advance the counter for a heading of `level` and return its number, e.g. `1.2.`
    ///
    /// Deeper levels restart; leading levels that never had a heading are left out, so a
    /// document starting at level 2 numbers `1.`, `2.` rather than `0.1.`, `0.2.`.
    pub fn next_heading_number(&mut self, level: u8) -> String {
        let index = usize::from(level.clamp(1, 6)) - 1;
        self.counters[index] += 1;
        for counter in &mut self.counters[index + 1..] {
            *counter = 0;
        }

        self.counters[..=index]
            .iter()
            .skip_while(|count| **count == 0)
            .map(|count| format!("{}.", count))
            .collect()
    }

    pub fn push_str(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BULLET: ListFrame = ListFrame { marker: "-" };

    #[test]
    fn test_scoped_restores_depth() {
        let mut ctx = RenderContext::new();
        let inner = ctx.scoped(BULLET, |ctx| ctx.scoped(BULLET, |ctx| ctx.depth()));
        assert_eq!(inner, 2);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_scoped_restores_depth_on_error() {
        let mut ctx = RenderContext::new();
        let result: Result<(), &str> = ctx.scoped(BULLET, |ctx| {
            ctx.scoped(BULLET, |_| Err("boom"))?;
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_heading_numbers() {
        let mut ctx = RenderContext::new();
        assert_eq!(ctx.next_heading_number(1), "1.");
        assert_eq!(ctx.next_heading_number(2), "1.1.");
        assert_eq!(ctx.next_heading_number(2), "1.2.");
        assert_eq!(ctx.next_heading_number(3), "1.2.1.");
        assert_eq!(ctx.next_heading_number(1), "2.");
        assert_eq!(ctx.next_heading_number(2), "2.1.");
    }

    #[test]
    fn test_heading_numbers_skip_missing_top_levels() {
        let mut ctx = RenderContext::new();
        assert_eq!(ctx.next_heading_number(2), "1.");
        assert_eq!(ctx.next_heading_number(3), "1.1.");
        assert_eq!(ctx.next_heading_number(2), "2.");
    }
}
