//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for code block
//! syntax highlighting. Agent replies arrive whole, so each one is rendered
//! once as formatted markdown.

use console::style;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

const CODE_THEME: &str = "base16-ocean.dark";

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        // Addresses and hashes come back as inline code.
        skin.inline_code.set_fg(Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Render a markdown reply with syntax-highlighted code blocks.
    ///
    /// Code fences with a language tag are highlighted via syntect; everything
    /// else is rendered through termimad.
    pub fn render_final(&self, markdown: &str) -> String {
        let mut output = String::new();
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();

        for line in markdown.lines() {
            if line.starts_with("```") {
                if in_code_block {
                    output.push_str(&self.highlight_code(&code_buf, &code_lang));
                    output.push('\n');
                } else {
                    code_lang = line.trim_start_matches('`').trim().to_string();
                    code_buf.clear();
                }
                in_code_block = !in_code_block;
            } else if in_code_block {
                code_buf.push_str(line);
                code_buf.push('\n');
            } else {
                output.push_str(&self.skin.term_text(line).to_string());
            }
        }

        // Unclosed fence
        if in_code_block && !code_buf.is_empty() {
            output.push_str(&self.highlight_code(&code_buf, &code_lang));
        }

        output
    }

    /// Print an agent reply.
    pub fn print_reply(&self, reply: &str) {
        let rendered = self.render_final(reply);
        println!("\n  {} {}", style("Agent").cyan().bold(), rendered.trim());
    }

    /// Print an error the server returned in place of a reply.
    pub fn print_error(&self, error: &str) {
        println!("\n  {} {}", style("!").red().bold(), style(error).red());
    }

    /// Print the footer after a reply: "| {time}s . {network}".
    pub fn print_stats_footer(&self, response_ms: u64, network: &str) {
        let seconds = response_ms as f64 / 1000.0;
        println!(
            "\n  {} {} {} {}",
            style("|").dim(),
            style(format!("{seconds:.1}s")).dim(),
            style("\u{00b7}").dim(),
            style(network).dim(),
        );
    }

    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let mut output = String::new();
        output.push_str(&format!("  {}\n", style(format!("--- {lang} ---")).dim()));

        let Some(theme) = self.theme_set.themes.get(CODE_THEME) else {
            for line in code.lines() {
                output.push_str(&format!("  {line}\n"));
            }
            return output;
        };
        let mut h = HighlightLines::new(syntax, theme);

        for line in code.lines() {
            let ranges: Vec<(Style, &str)> = h
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_is_highlighted_separately() {
        let renderer = ChatRenderer::new();
        let out = renderer.render_final("Send it:\n```json\n{\"to\": \"0xabc\"}\n```\nDone.");
        assert!(out.contains("--- json ---"));
        assert!(out.contains("0xabc"));
        assert!(out.contains("Done."));
    }

    #[test]
    fn test_unclosed_fence_still_renders_code() {
        let renderer = ChatRenderer::new();
        let out = renderer.render_final("```\nbalance = 0");
        assert!(out.contains("balance = 0"));
    }
}
