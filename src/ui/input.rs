use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of handling a key event in an input component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
  /// Key was handled, continue input mode
  Consumed,
  /// Enter pressed with a valid number
  Submitted(u32),
  /// Escape pressed, input cancelled
  Cancelled,
  /// Key not handled, pass to next handler
  NotHandled,
}

/// Single-line numeric input used for the import limit and offset
#[derive(Debug, Clone, Default)]
pub struct NumberInput {
  buffer: String,
  cursor: usize,
}

impl NumberInput {
  pub fn new() -> Self {
    Self::default()
  }

  /// Start editing with `value` prefilled and the cursor at the end
  pub fn start(&mut self, value: u32) {
    self.buffer = value.to_string();
    self.cursor = self.buffer.len();
  }

  /// Get the current input value
  pub fn value(&self) -> &str {
    &self.buffer
  }

  /// Get cursor position for rendering
  pub fn cursor_position(&self) -> usize {
    self.cursor
  }

  /// Parse the buffer. Empty input counts as 0.
  pub fn parse(&self) -> Option<u32> {
    let trimmed = self.buffer.trim();
    if trimmed.is_empty() {
      return Some(0);
    }
    trimmed.parse().ok()
  }

  /// Handle a key event, returning the result
  pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
    match key.code {
      KeyCode::Esc => InputResult::Cancelled,
      KeyCode::Enter => match self.parse() {
        Some(n) => InputResult::Submitted(n),
        // Out of range, keep editing
        None => InputResult::Consumed,
      },
      KeyCode::Backspace => {
        if self.cursor > 0 {
          self.cursor -= 1;
          self.buffer.remove(self.cursor);
        }
        InputResult::Consumed
      }
      KeyCode::Delete => {
        if self.cursor < self.buffer.len() {
          self.buffer.remove(self.cursor);
        }
        InputResult::Consumed
      }
      KeyCode::Left => {
        self.cursor = self.cursor.saturating_sub(1);
        InputResult::Consumed
      }
      KeyCode::Right => {
        if self.cursor < self.buffer.len() {
          self.cursor += 1;
        }
        InputResult::Consumed
      }
      KeyCode::Home => {
        self.cursor = 0;
        InputResult::Consumed
      }
      KeyCode::End => {
        self.cursor = self.buffer.len();
        InputResult::Consumed
      }
      KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
        // Clear line before cursor
        self.buffer = self.buffer[self.cursor..].to_string();
        self.cursor = 0;
        InputResult::Consumed
      }
      KeyCode::Char(c) if c.is_ascii_digit() => {
        self.buffer.insert(self.cursor, c);
        self.cursor += 1;
        InputResult::Consumed
      }
      // Swallow everything else so letters don't leak into normal mode
      KeyCode::Char(_) => InputResult::Consumed,
      _ => InputResult::NotHandled,
    }
  }
}
