// Cursor-based text editing.
// Every edit returns the full new text so it can be handed straight to the session store.

/// Cursor into a text value, as a char offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCursor {
    pos: usize,
}

fn byte_offset(text: &str, pos: usize) -> usize {
    text.char_indices().nth(pos).map_or(text.len(), |(i, _)| i)
}

/// Char offset and char length of every line.
fn lines(text: &str) -> Vec<(usize, usize)> {
    let mut result = Vec::new();
    let mut start = 0;
    for line in text.split('\n') {
        let len = line.chars().count();
        result.push((start, len));
        start += len + 1;
    }
    result
}

impl TextCursor {
    /// Cursor placed at the end of `text`.
    pub fn at_end(text: &str) -> Self {
        Self {
            pos: text.chars().count(),
        }
    }

    fn clamped(&self, text: &str) -> usize {
        self.pos.min(text.chars().count())
    }

    /// Zero-based (line, column) of the cursor.
    pub fn line_col(&self, text: &str) -> (usize, usize) {
        let pos = self.clamped(text);
        let lines = lines(text);
        let line = lines
            .iter()
            .rposition(|&(start, _)| start <= pos)
            .unwrap_or(0);
        (line, pos - lines[line].0)
    }

    pub fn insert(&mut self, text: &str, ch: char) -> String {
        let pos = self.clamped(text);
        let at = byte_offset(text, pos);

        let mut updated = String::with_capacity(text.len() + ch.len_utf8());
        updated.push_str(&text[..at]);
        updated.push(ch);
        updated.push_str(&text[at..]);

        self.pos = pos + 1;
        updated
    }

    /// Remove the char before the cursor. `None` at the start of the text.
    pub fn backspace(&mut self, text: &str) -> Option<String> {
        let pos = self.clamped(text);
        if pos == 0 {
            return None;
        }
        self.pos = pos - 1;
        Some(remove_char(text, pos - 1))
    }

    /// Remove the char under the cursor. `None` at the end of the text.
    pub fn delete(&mut self, text: &str) -> Option<String> {
        let pos = self.clamped(text);
        if pos >= text.chars().count() {
            return None;
        }
        self.pos = pos;
        Some(remove_char(text, pos))
    }

    pub fn move_left(&mut self, text: &str) {
        self.pos = self.clamped(text).saturating_sub(1);
    }

    pub fn move_right(&mut self, text: &str) {
        self.pos = (self.clamped(text) + 1).min(text.chars().count());
    }

    pub fn move_up(&mut self, text: &str) {
        let (line, col) = self.line_col(text);
        if line > 0 {
            self.move_to(text, line - 1, col);
        }
    }

    pub fn move_down(&mut self, text: &str) {
        let (line, col) = self.line_col(text);
        self.move_to(text, line + 1, col);
    }

    pub fn move_home(&mut self, text: &str) {
        let (line, _) = self.line_col(text);
        self.move_to(text, line, 0);
    }

    pub fn move_end(&mut self, text: &str) {
        let (line, _) = self.line_col(text);
        self.move_to(text, line, usize::MAX);
    }

    fn move_to(&mut self, text: &str, line: usize, col: usize) {
        if let Some(&(start, len)) = lines(text).get(line) {
            self.pos = start + col.min(len);
        }
    }
}

fn remove_char(text: &str, pos: usize) -> String {
    let start = byte_offset(text, pos);
    let end = byte_offset(text, pos + 1);
    let mut updated = String::with_capacity(text.len());
    updated.push_str(&text[..start]);
    updated.push_str(&text[end..]);
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace() {
        let mut cursor = TextCursor::default();
        let text = cursor.insert("", 'a');
        let text = cursor.insert(&text, 'b');
        assert_eq!(text, "ab");

        cursor.move_left(&text);
        let text = cursor.insert(&text, 'x');
        assert_eq!(text, "axb");

        let text = cursor.backspace(&text).unwrap();
        assert_eq!(text, "ab");
        assert_eq!(cursor.line_col(&text), (0, 1));
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut cursor = TextCursor::default();
        assert!(cursor.backspace("abc").is_none());
    }

    #[test]
    fn test_delete_under_cursor() {
        let mut cursor = TextCursor::default();
        assert_eq!(cursor.delete("abc").unwrap(), "bc");

        let mut cursor = TextCursor::at_end("abc");
        assert!(cursor.delete("abc").is_none());
    }

    #[test]
    fn test_multibyte_chars() {
        let mut cursor = TextCursor::at_end("héllo");
        cursor.move_left("héllo");
        cursor.move_left("héllo");
        cursor.move_left("héllo");
        let text = cursor.backspace("héllo").unwrap();
        assert_eq!(text, "hllo");
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let text = "long line\nab\nthird line";
        let mut cursor = TextCursor::default();
        cursor.move_end(text);
        assert_eq!(cursor.line_col(text), (0, 9));

        cursor.move_down(text);
        assert_eq!(cursor.line_col(text), (1, 2));

        cursor.move_down(text);
        assert_eq!(cursor.line_col(text), (2, 2));

        cursor.move_down(text);
        assert_eq!(cursor.line_col(text), (2, 2));

        cursor.move_up(text);
        cursor.move_home(text);
        assert_eq!(cursor.line_col(text), (1, 0));
    }

    #[test]
    fn test_newline_insert() {
        let mut cursor = TextCursor::at_end("a");
        let text = cursor.insert("a", '\n');
        assert_eq!(text, "a\n");
        assert_eq!(cursor.line_col(&text), (1, 0));
    }

    #[test]
    fn test_stale_cursor_is_clamped() {
        let mut cursor = TextCursor::at_end("a long value");
        assert_eq!(cursor.line_col("ab"), (0, 2));
        assert_eq!(cursor.insert("ab", 'c'), "abc");
    }
}
