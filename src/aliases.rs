//! Merging user email addresses into the base aliases template.
//!
//! The template is split into lines once and indexed by the name in front of
//! the first `:`. Each recipient either rewrites every line carrying its name
//! (in place) or is queued for the tail of the file.
//!
//! Usernames are compared as literal text, so `a.b` only ever matches a line
//! starting with `a.b:`.

use std::collections::HashMap;

use crate::directory::Recipient;

/// One line of the template, without its terminator.
#[derive(Debug, Clone)]
struct TemplateLine {
    text: String,
    terminated: bool,
}

/// Builds the final aliases document from a base template.
#[derive(Debug)]
pub struct AliasFileBuilder {
    lines: Vec<TemplateLine>,
    /// Alias name -> indices of the lines defining it.
    index: HashMap<String, Vec<usize>>,
    appended: Vec<String>,
    rewritten: usize,
}

impl AliasFileBuilder {
    /// Parse a base template.
    pub fn new(template: &str) -> Self {
        let mut lines = Vec::new();
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, raw) in template.split_inclusive('\n').enumerate() {
            let (text, terminated) = match raw.strip_suffix('\n') {
                Some(text) => (text, true),
                None => (raw, false),
            };
            if let Some((name, _)) = text.split_once(':') {
                index.entry(name.to_string()).or_default().push(i);
            }
            lines.push(TemplateLine {
                text: text.to_string(),
                terminated,
            });
        }

        Self {
            lines,
            index,
            appended: Vec::new(),
            rewritten: 0,
        }
    }

    /// Add one recipient to the document.
    ///
    /// Every template line defining `recipient.username` is replaced with
    /// `username: email`. If there is none, the entry is appended at the end.
    pub fn apply(&mut self, recipient: &Recipient) {
        let entry = format_entry(&recipient.username, &recipient.email);
        let matches = self.matching_lines(&recipient.username);

        if matches.is_empty() {
            tracing::debug!(user = %recipient.username, "appending alias");
            self.appended.push(entry);
            return;
        }

        tracing::debug!(
            user = %recipient.username,
            lines = matches.len(),
            "rewriting alias in place"
        );
        for i in matches {
            self.lines[i].text = entry.clone();
        }
        self.rewritten += 1;
    }

    /// Number of recipients merged into existing template lines.
    pub fn rewritten(&self) -> usize {
        self.rewritten
    }

    /// Number of recipients queued for the end of the file.
    pub fn appended(&self) -> usize {
        self.appended.len()
    }

    /// Render the merged document.
    pub fn build(self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&line.text);
            if line.terminated {
                out.push('\n');
            }
        }

        if !self.appended.is_empty() && !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        for entry in &self.appended {
            out.push_str(entry);
            out.push('\n');
        }
        out
    }

    fn matching_lines(&self, username: &str) -> Vec<usize> {
        // Names containing ':' can't come out of the index split.
        if username.contains(':') {
            let prefix = format!("{}:", username);
            return self
                .lines
                .iter()
                .enumerate()
                .filter(|(_, line)| line.text.starts_with(&prefix))
                .map(|(i, _)| i)
                .collect();
        }
        self.index.get(username).cloned().unwrap_or_default()
    }
}

/// Format a single alias line (without newline).
pub fn format_entry(username: &str, email: &str) -> String {
    format!("{}: {}", username, email)
}

/// Merge `recipients`, in order, into `template`.
pub fn merge(template: &str, recipients: &[Recipient]) -> String {
    let mut builder = AliasFileBuilder::new(template);
    for recipient in recipients {
        builder.apply(recipient);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rcpt(username: &str, email: &str) -> Recipient {
        Recipient {
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_no_recipients_returns_template_unchanged() {
        let template = "# header\nroot: admin\n\npostmaster: root";
        assert_eq!(merge(template, &[]), template);
    }

    #[test]
    fn test_append_after_comment() {
        let out = merge("root: admin\n# comment\n", &[rcpt("alice", "alice@x.com")]);
        assert_eq!(out, "root: admin\n# comment\nalice: alice@x.com\n");
    }

    #[test]
    fn test_rewrite_in_place() {
        let out = merge("root: admin\n", &[rcpt("root", "root@x.com")]);
        assert_eq!(out, "root: root@x.com\n");
    }

    #[test]
    fn test_rewrite_keeps_position() {
        let template = "MAILER-DAEMON: postmaster\nroot: admin\nnews: root\n";
        let out = merge(template, &[rcpt("root", "ops@example.org")]);
        assert_eq!(
            out,
            "MAILER-DAEMON: postmaster\nroot: ops@example.org\nnews: root\n"
        );
    }

    #[test]
    fn test_every_matching_line_rewritten() {
        let template = "root: a\nother: b\nroot: c\n";
        let out = merge(template, &[rcpt("root", "r@x")]);
        assert_eq!(out, "root: r@x\nother: b\nroot: r@x\n");
    }

    #[test]
    fn test_appended_in_input_order() {
        let out = merge(
            "root: admin\n",
            &[rcpt("zed", "z@x"), rcpt("amy", "a@x"), rcpt("root", "r@x")],
        );
        assert_eq!(out, "root: r@x\nzed: z@x\namy: a@x\n");
    }

    #[test]
    fn test_newline_inserted_before_append() {
        let out = merge("root: admin", &[rcpt("bob", "b@x")]);
        assert_eq!(out, "root: admin\nbob: b@x\n");
    }

    #[test]
    fn test_unterminated_last_line_rewritten() {
        let out = merge("root: admin", &[rcpt("root", "r@x")]);
        assert_eq!(out, "root: r@x");
    }

    #[test]
    fn test_empty_template() {
        let out = merge("", &[rcpt("bob", "b@x")]);
        assert_eq!(out, "bob: b@x\n");
    }

    #[test]
    fn test_match_is_case_sensitive_and_exact() {
        let template = "Root: a\nrootkit: b\nroot : c\n";
        let out = merge(template, &[rcpt("root", "r@x")]);
        assert_eq!(out, "Root: a\nrootkit: b\nroot : c\nroot: r@x\n");
    }

    #[test]
    fn test_comment_mentioning_user_untouched() {
        let template = "# root: see below\nroot: admin\n";
        let out = merge(template, &[rcpt("root", "r@x")]);
        assert_eq!(out, "# root: see below\nroot: r@x\n");
    }

    #[test]
    fn test_metacharacters_match_literally() {
        let template = "aXb: one\na.b: two\n";
        let out = merge(template, &[rcpt("a.b", "dot@x"), rcpt("a*", "star@x")]);
        assert_eq!(out, "aXb: one\na.b: dot@x\na*: star@x\n");
    }

    #[test]
    fn test_username_with_colon_matches_prefix() {
        let out = merge("a:b: old\n", &[rcpt("a:b", "new@x")]);
        assert_eq!(out, "a:b: new@x\n");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let recipients = [rcpt("root", "r@x"), rcpt("alice", "a@x")];
        let first = merge("root: admin\n# c\n", &recipients);
        let second = merge(&first, &recipients);
        assert_eq!(first, second);
    }

    #[test]
    fn test_counters() {
        let mut builder = AliasFileBuilder::new("root: admin\n");
        builder.apply(&rcpt("root", "r@x"));
        builder.apply(&rcpt("bob", "b@x"));
        builder.apply(&rcpt("eve", "e@x"));
        assert_eq!(builder.rewritten(), 1);
        assert_eq!(builder.appended(), 2);
    }

    #[test]
    fn test_crlf_line_rewritten_whole() {
        let out = merge("root: admin\r\nnews: root\r\n", &[rcpt("root", "r@x")]);
        assert_eq!(out, "root: r@x\nnews: root\r\n");
    }
}
