/// Options shared by the tokenizer and the tree builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ParserConfig {
    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#other-parsing-state-flags)
    ///
    /// "The scripting flag is set to "enabled" if scripting was enabled for the
    /// Document with which the parser is associated when the parser was created,
    /// and "disabled" otherwise."
    pub scripting: bool,
    /// Recognise attribute-free lowercase tags directly from the data state.
    /// Produces the same tokens as the full tag states.
    pub simple_tag_fast_path: bool,
    /// Forward the first occurrence of each parse error to stderr.
    pub report_warnings: bool,
    /// Keep parse errors for [`crate::HTMLParser::issues`] and
    /// [`crate::HTMLTokenizer::errors`].
    pub collect_issues: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserConfig {
    /// Scripting off, fast path on, issues collected but not printed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scripting: false,
            simple_tag_fast_path: true,
            report_warnings: false,
            collect_issues: true,
        }
    }

    /// Set the scripting flag.
    #[must_use]
    pub const fn with_scripting(mut self, scripting: bool) -> Self {
        self.scripting = scripting;
        self
    }

    /// Enable or disable the simple tag fast path.
    #[must_use]
    pub const fn with_simple_tag_fast_path(mut self, enabled: bool) -> Self {
        self.simple_tag_fast_path = enabled;
        self
    }

    /// Print parse errors through the shared warning sink.
    #[must_use]
    pub const fn with_report_warnings(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    /// Keep or drop the collected parse errors.
    #[must_use]
    pub const fn with_collect_issues(mut self, enabled: bool) -> Self {
        self.collect_issues = enabled;
        self
    }
}
