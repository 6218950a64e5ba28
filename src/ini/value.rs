use super::error::ValueError;

// --- Scalar tokenizer ---
//
// A value list is a comma separated run of scalars:
//   yes | y | no | n          (any case)
//   $1F                       (hex, uppercase digits)
//   -12 | 640                 (decimal)

const BOOL_WORDS: [(&str, i32); 4] = [("yes", 1), ("y", 1), ("no", 0), ("n", 0)];

/// Cursor over the value part of a cleaned line.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub const fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    #[inline(always)]
    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    #[inline(always)]
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn unexpected(&self) -> ValueError {
        let found = self.src[self.pos..].chars().next();
        ValueError::Unexpected {
            found,
            column: self.pos,
        }
    }

    /// Decode the scalar under the cursor and step past it and its comma.
    pub fn next_scalar(&mut self) -> Result<i32, ValueError> {
        let rest = &self.src[self.pos..];
        for (word, value) in BOOL_WORDS {
            let Some(head) = rest.get(..word.len()) else {
                continue;
            };
            if !head.eq_ignore_ascii_case(word) {
                continue;
            }
            match rest.as_bytes().get(word.len()) {
                None => {
                    self.pos += word.len();
                    return Ok(value);
                }
                Some(b',') => {
                    self.pos += word.len() + 1;
                    return Ok(value);
                }
                Some(_) => {}
            }
        }

        match self.peek() {
            Some(b'$') => {
                self.pos += 1;
                self.digits(16, false)
            }
            Some(b'-') => {
                self.pos += 1;
                match self.peek() {
                    Some(b'0'..=b'9') => self.digits(10, true),
                    _ => Err(self.unexpected()),
                }
            }
            Some(b'0'..=b'9') => self.digits(10, false),
            _ => Err(self.unexpected()),
        }
    }

    fn digits(&mut self, radix: u32, negative: bool) -> Result<i32, ValueError> {
        let mut value: i32 = 0;
        loop {
            let digit = match self.peek() {
                None => break,
                Some(b',') => {
                    self.pos += 1;
                    break;
                }
                Some(c @ b'0'..=b'9') => i32::from(c - b'0'),
                Some(c @ b'A'..=b'F') if radix == 16 => i32::from(c - b'A' + 10),
                Some(_) => return Err(self.unexpected()),
            };
            let column = self.pos;
            value = value
                .checked_mul(radix as i32)
                .and_then(|v| {
                    if negative {
                        v.checked_sub(digit)
                    } else {
                        v.checked_add(digit)
                    }
                })
                .ok_or(ValueError::Overflow { column })?;
            self.pos += 1;
        }
        Ok(value)
    }
}

/// Decode one scalar of `src` starting at `*index`, moving `*index` past it.
pub fn read_value(src: &str, index: &mut usize) -> Result<i32, ValueError> {
    let pos = (*index).min(src.len());
    if !src.is_char_boundary(pos) {
        return Err(ValueError::Unexpected {
            found: None,
            column: pos,
        });
    }
    let mut lexer = Lexer { src, pos };
    let value = lexer.next_scalar();
    *index = lexer.pos;
    value
}

/// Decode every scalar of `src`, expecting exactly `count` of them.
///
/// The count is checked as soon as the `count`-th scalar is decoded: any
/// input left at that point is an error, even if it would not tokenize.
pub fn read_values(src: &str, count: usize) -> Result<Vec<i32>, ArityError> {
    let mut lexer = Lexer::new(src);
    let mut values = Vec::with_capacity(count);
    while !lexer.is_at_end() {
        values.push(lexer.next_scalar().map_err(ArityError::Value)?);
        if values.len() >= count && !lexer.is_at_end() {
            return Err(ArityError::TooMany);
        }
    }
    if values.len() < count {
        return Err(ArityError::NotEnough { found: values.len() });
    }
    Ok(values)
}

/// Why a value list did not yield the expected scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArityError {
    Value(ValueError),
    TooMany,
    NotEnough { found: usize },
}
