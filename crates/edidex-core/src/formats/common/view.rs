/// Read-only window over a byte slice with a forward-moving cursor.
///
/// Every access is bounds-checked against the slice length; reads past the
/// end yield `None` instead of panicking.
///
/// # Examples
/// ```
/// use edidex_core::ByteView;
///
/// let mut view = ByteView::new(b"abc: 12");
/// assert!(view.seek_past(b":"));
/// assert_eq!(view.peek(), Some(b' '));
/// assert_eq!(view.position(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct ByteView<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> ByteView<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.data.len()
    }

    /// Move the cursor back to the start of the view.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    /// Byte `ahead` positions past the cursor, if it exists.
    pub fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.cursor
            .checked_add(ahead)
            .and_then(|index| self.data.get(index))
            .copied()
    }

    /// Advance the cursor by `count` bytes, clamped to the end of the view.
    pub fn advance(&mut self, count: usize) {
        self.cursor = self.cursor.saturating_add(count).min(self.data.len());
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.cursor.min(self.data.len())..]
    }

    pub fn starts_with(&self, literal: &[u8]) -> bool {
        self.remaining().starts_with(literal)
    }

    /// Offset of the next occurrence of `needle`, relative to the cursor.
    pub fn find(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        self.remaining()
            .windows(needle.len())
            .position(|window| window == needle)
    }

    /// Move the cursor just past the next occurrence of `needle`.
    ///
    /// When the needle is absent the cursor is moved to the end of the view
    /// and `false` is returned.
    pub fn seek_past(&mut self, needle: &[u8]) -> bool {
        match self.find(needle) {
            Some(offset) => {
                self.advance(offset + needle.len());
                true
            }
            None => {
                self.cursor = self.data.len();
                false
            }
        }
    }

    /// Move the cursor onto the next occurrence of `needle` without consuming it.
    pub fn seek_to(&mut self, needle: &[u8]) -> bool {
        match self.find(needle) {
            Some(offset) => {
                self.advance(offset);
                true
            }
            None => false,
        }
    }

    /// Return the bytes between the cursor and the next `terminator`, leaving
    /// the cursor on the terminator. The cursor is unchanged when no
    /// terminator follows.
    pub fn take_until(&mut self, terminator: &[u8]) -> Option<&'a [u8]> {
        let offset = self.find(terminator)?;
        let start = self.cursor;
        self.advance(offset);
        Some(&self.data[start..start + offset])
    }
}
