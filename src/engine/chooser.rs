//! Interactive fuzzy chooser drawn on stderr, so stdout stays free for the selected path.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use std::io::{self, Write};

/// Picks one of `len` items, each displayed as `label(i)`.
/// Returns the picked index, or None when the user aborted.
pub trait Chooser {
    fn choose(&mut self, len: usize, label: &dyn Fn(usize) -> String) -> Result<Option<usize>>;
}

/// Score `candidate` against `query` as a case-insensitive subsequence match.
/// None when not every query char appears in order. Higher is better: consecutive
/// matches and matches right after a separator score extra.
pub fn fuzzy_score(query: &str, candidate: &str) -> Option<i64> {
    if query.is_empty() {
        return Some(0);
    }
    let cand: Vec<char> = candidate.to_lowercase().chars().collect();
    let mut score = 0_i64;
    let mut pos = 0_usize;
    let mut prev: Option<usize> = None;
    for q in query.to_lowercase().chars() {
        let found = (pos..cand.len()).find(|&i| cand[i] == q)?;
        score += 1;
        if prev.is_some_and(|p| p + 1 == found) {
            score += 5;
        }
        if found == 0 || matches!(cand[found - 1], '/' | '-' | '_' | '.' | ' ') {
            score += 3;
        }
        prev = Some(found);
        pos = found + 1;
    }
    Some(score)
}

/// What a key press asks the chooser to do.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Pick(usize),
    Abort,
}

/// Query, filtered matches and cursor. Terminal-free so it can be driven by tests.
pub struct ChooserState {
    labels: Vec<String>,
    query: String,
    matches: Vec<usize>,
    cursor: usize,
}

impl ChooserState {
    pub fn new(labels: Vec<String>) -> Self {
        let mut state = Self {
            labels,
            query: String::new(),
            matches: Vec::new(),
            cursor: 0,
        };
        state.refilter();
        state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Indices into the original items, best match first.
    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn refilter(&mut self) {
        let mut scored: Vec<(i64, usize)> = self
            .labels
            .iter()
            .enumerate()
            .filter_map(|(i, label)| fuzzy_score(&self.query, label).map(|s| (s, i)))
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        self.matches = scored.into_iter().map(|(_, i)| i).collect();
        self.cursor = 0;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => KeyAction::Abort,
            KeyCode::Char('c' | 'g') if ctrl => KeyAction::Abort,
            KeyCode::Enter => match self.matches.get(self.cursor) {
                Some(&i) => KeyAction::Pick(i),
                None => KeyAction::Abort,
            },
            KeyCode::Up => self.move_up(),
            KeyCode::Char('p') if ctrl => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Char('n') if ctrl => self.move_down(),
            KeyCode::Char('u') if ctrl => {
                self.query.clear();
                self.refilter();
                KeyAction::Continue
            }
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter();
                }
                KeyAction::Continue
            }
            KeyCode::Char(c) if !ctrl => {
                self.query.push(c);
                self.refilter();
                KeyAction::Continue
            }
            _ => KeyAction::Continue,
        }
    }

    fn move_up(&mut self) -> KeyAction {
        self.cursor = self.cursor.saturating_sub(1);
        KeyAction::Continue
    }

    fn move_down(&mut self) -> KeyAction {
        if self.cursor + 1 < self.matches.len() {
            self.cursor += 1;
        }
        KeyAction::Continue
    }
}

/// Restores the terminal when the chooser returns or unwinds.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stderr(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Full-screen chooser on the alternate screen of stderr.
pub struct TerminalChooser {
    prompt: String,
}

impl Default for TerminalChooser {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
        }
    }
}

impl TerminalChooser {
    fn draw(&self, out: &mut impl Write, state: &ChooserState) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let width = usize::from(cols).max(1);
        let list_rows = usize::from(rows).saturating_sub(2).max(1);
        let offset = state.cursor.saturating_sub(list_rows - 1);

        queue!(
            out,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            Print(truncate(&format!("{}{}", self.prompt, state.query), width)),
            cursor::MoveTo(0, 1),
            Print(format!("  {}/{}", state.matches.len(), state.labels.len())),
        )?;
        for (row, &idx) in state.matches.iter().skip(offset).take(list_rows).enumerate() {
            let y = u16::try_from(row + 2).unwrap_or(u16::MAX);
            let label = state.labels.get(idx).map(String::as_str).unwrap_or("");
            queue!(out, cursor::MoveTo(0, y))?;
            if offset + row == state.cursor {
                queue!(
                    out,
                    SetAttribute(Attribute::Reverse),
                    Print(truncate(&format!("> {label}"), width)),
                    SetAttribute(Attribute::Reset),
                )?;
            } else {
                queue!(out, Print(truncate(&format!("  {label}"), width)))?;
            }
        }
        out.flush()
    }
}

fn truncate(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

impl Chooser for TerminalChooser {
    fn choose(&mut self, len: usize, label: &dyn Fn(usize) -> String) -> Result<Option<usize>> {
        if len == 0 {
            return Ok(None);
        }
        let mut state = ChooserState::new((0..len).map(label).collect());
        let mut out = io::stderr();

        terminal::enable_raw_mode().context("enable raw terminal mode")?;
        let _guard = TerminalGuard;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)
            .context("enter alternate screen")?;

        loop {
            self.draw(&mut out, &state).context("draw chooser")?;
            let Event::Key(key) = event::read().context("read terminal event")? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match state.handle_key(key) {
                KeyAction::Continue => {}
                KeyAction::Pick(i) => return Ok(Some(i)),
                KeyAction::Abort => return Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn state() -> ChooserState {
        ChooserState::new(vec![
            "/src/alpha/".to_string(),
            "/src/beta/".to_string(),
            "/work/gamma-api/".to_string(),
        ])
    }

    #[test]
    fn test_fuzzy_subsequence() {
        assert!(fuzzy_score("gapi", "/work/gamma-api/").is_some());
        assert!(fuzzy_score("GAMMA", "/work/gamma-api/").is_some());
        assert!(fuzzy_score("zz", "/work/gamma-api/").is_none());
        assert_eq!(fuzzy_score("", "anything"), Some(0));
    }

    #[test]
    fn test_fuzzy_prefers_consecutive_and_boundary() {
        let tight = fuzzy_score("beta", "/src/beta/").unwrap();
        let loose = fuzzy_score("beta", "/b/e/t/xa/").unwrap();
        assert!(tight > loose);
    }

    #[test]
    fn test_empty_query_keeps_order() {
        assert_eq!(state().matches(), &[0, 1, 2]);
    }

    #[test]
    fn test_typing_filters() {
        let mut s = state();
        for c in "gam".chars() {
            assert_eq!(s.handle_key(key(KeyCode::Char(c))), KeyAction::Continue);
        }
        assert_eq!(s.query(), "gam");
        assert_eq!(s.matches(), &[2]);
        assert_eq!(s.handle_key(key(KeyCode::Enter)), KeyAction::Pick(2));
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut s = state();
        s.handle_key(key(KeyCode::Char('x')));
        assert!(s.matches().is_empty());
        s.handle_key(key(KeyCode::Backspace));
        assert_eq!(s.matches().len(), 3);
        s.handle_key(key(KeyCode::Char('b')));
        s.handle_key(ctrl('u'));
        assert_eq!(s.query(), "");
    }

    #[test]
    fn test_cursor_moves_within_bounds() {
        let mut s = state();
        s.handle_key(key(KeyCode::Up));
        assert_eq!(s.cursor(), 0);
        s.handle_key(key(KeyCode::Down));
        s.handle_key(ctrl('n'));
        s.handle_key(key(KeyCode::Down));
        assert_eq!(s.cursor(), 2);
        s.handle_key(ctrl('p'));
        assert_eq!(s.handle_key(key(KeyCode::Enter)), KeyAction::Pick(1));
    }

    #[test]
    fn test_abort_keys() {
        assert_eq!(state().handle_key(key(KeyCode::Esc)), KeyAction::Abort);
        assert_eq!(state().handle_key(ctrl('c')), KeyAction::Abort);
    }

    #[test]
    fn test_enter_without_matches_aborts() {
        let mut s = state();
        s.handle_key(key(KeyCode::Char('q')));
        assert_eq!(s.handle_key(key(KeyCode::Enter)), KeyAction::Abort);
    }

    #[test]
    fn test_terminal_chooser_empty_list_skips_terminal() {
        let mut chooser = TerminalChooser::default();
        assert_eq!(chooser.choose(0, &|_| String::new()).unwrap(), None);
    }
}
