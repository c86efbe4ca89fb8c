pub const TYPEWRITER_STEP_MS: u32 = 50;

/// Reveals a line one character per step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Typewriter {
    text: &'static str,
    typed_chars: usize,
}

impl Typewriter {
    pub fn new(text: &'static str) -> Self {
        Self {
            text,
            typed_chars: 0,
        }
    }

    pub fn typed(&self) -> &'static str {
        match self.text.char_indices().nth(self.typed_chars) {
            Some((end, _)) => &self.text[..end],
            None => self.text,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.typed_chars >= self.text.chars().count()
    }

    pub fn advanced(self) -> Self {
        if self.is_complete() {
            return self;
        }

        Self {
            typed_chars: self.typed_chars + 1,
            ..self
        }
    }
}
